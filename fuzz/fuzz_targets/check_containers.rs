#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use solfege::{Matrix, NumericContainer, Tolerance, check_containers_close};

#[derive(Debug, Arbitrary)]
enum FuzzContainer {
    Scalar(f64),
    VectorSingle(Vec<f32>),
    VectorDouble(Vec<f64>),
    MatrixSingle { cols: u8, data: Vec<f32> },
    MatrixDouble { cols: u8, data: Vec<f64> },
}

#[derive(Debug, Arbitrary)]
enum FuzzTolerance {
    Relative(f64),
    Absolute(f64),
    Digits(i8),
}

fn build(container: FuzzContainer) -> NumericContainer {
    match container {
        FuzzContainer::Scalar(x) => NumericContainer::from(x),
        FuzzContainer::VectorSingle(v) => NumericContainer::from(v),
        FuzzContainer::VectorDouble(v) => NumericContainer::from(v),
        FuzzContainer::MatrixSingle { cols, data } => {
            let cols = usize::from(cols % 8) + 1;
            let rows = data.len() / cols;
            let matrix = Matrix::from_flat(rows, cols, data[..rows * cols].to_vec());
            NumericContainer::from(matrix.expect("data trimmed to fit"))
        }
        FuzzContainer::MatrixDouble { cols, data } => {
            let cols = usize::from(cols % 8) + 1;
            let rows = data.len() / cols;
            let matrix = Matrix::from_flat(rows, cols, data[..rows * cols].to_vec());
            NumericContainer::from(matrix.expect("data trimmed to fit"))
        }
    }
}

// Container dispatch must return a verdict for any pair, never panic.
fuzz_target!(|input: (FuzzContainer, FuzzContainer, FuzzTolerance)| {
    let (found, expected, tolerance) = input;
    let tolerance = match tolerance {
        FuzzTolerance::Relative(p) => Tolerance::Relative(p),
        FuzzTolerance::Absolute(p) => Tolerance::Absolute(p),
        FuzzTolerance::Digits(d) => Tolerance::Digits(i32::from(d)),
    };
    let _ = check_containers_close(&build(found), &build(expected), tolerance);
});
