//! Benchmarks for the comparison scans and fixture parsers.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use solfege::compare::{all_close, all_close_matrix, check_vectors_close};
use solfege::fixture;
use solfege::matrix::Matrix;

fn make_signal(len: usize) -> Vec<f32> {
    (0..len).map(|i| (i as f32 * 0.01).sin() * 0.1).collect()
}

fn bench_vector_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("vector_compare");

    for &size in &[512, 4096] {
        let found = make_signal(size);
        let expected = found.clone();

        group.bench_function(format!("all_close_{size}"), |b| {
            b.iter(|| all_close(black_box(&found), black_box(&expected), 1e-7));
        });

        group.bench_function(format!("elementwise_{size}"), |b| {
            b.iter(|| check_vectors_close(black_box(&found), black_box(&expected), 1e-7));
        });
    }

    group.finish();
}

fn bench_matrix_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_compare");

    let rows = 128;
    let cols = 64;
    let data: Vec<f64> = (0..rows * cols).map(|i| (i as f64 * 0.01).cos()).collect();
    let found = Matrix::from_flat(rows, cols, data.clone()).unwrap();
    let expected = Matrix::from_flat(rows, cols, data).unwrap();

    group.bench_function("all_close_matrix_128x64", |b| {
        b.iter(|| all_close_matrix(black_box(&found), black_box(&expected), 1e-7));
    });

    group.finish();
}

fn bench_fixture_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixture_parse");

    let vector_content: String = (0..1024)
        .map(|i| format!("{:.6} ", (i as f64 * 0.01).sin()))
        .collect();
    group.bench_function("vector_1024", |b| {
        b.iter(|| fixture::parse_vector(black_box(&vector_content)));
    });

    let complex_content: String = (0..512)
        .map(|i| {
            let phase = i as f64 * 0.02;
            format!("({:.6},{:.6}) ", phase.cos(), phase.sin())
        })
        .collect();
    group.bench_function("complex_512", |b| {
        b.iter(|| fixture::parse_complex_vector(black_box(&complex_content)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_vector_compare,
    bench_matrix_compare,
    bench_fixture_parse,
);
criterion_main!(benches);
