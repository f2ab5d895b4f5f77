//! Tolerance semantics across the scalar, vector, matrix, and container
//! checks, exercised over generated inputs.

use solfege::compare::{
    CheckFailure, all_close, all_close_matrix, check_close, check_matrices_close,
    check_vectors_close, check_vectors_close_abs, check_vectors_close_digits,
    check_vectors_equal, relative_difference,
};
use solfege::{Matrix, NumericContainer, Tolerance, check_containers_close};
use solfege_proptest::generators;
use solfege_proptest::proptest::prelude::*;
use solfege_proptest::test_strategy::proptest;
use tracing_subscriber::EnvFilter;

/// Route log output through the test harness; `RUST_LOG=solfege=trace`
/// shows which comparison path the dispatch takes.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[proptest]
fn close_check_is_reflexive(
    #[strategy(generators::value())] a: f64,
    #[strategy(0.0..1.0f64)] precision: f64,
) {
    prop_assert!(check_close(a, a, precision).is_ok());
}

#[proptest]
fn close_check_matches_the_relative_error_formula(
    #[strategy(generators::value())] found: f64,
    #[strategy(generators::value())] expected: f64,
    #[strategy(0.0..1.0f64)] precision: f64,
) {
    let verdict = check_close(found, expected, precision).is_ok();
    prop_assert_eq!(verdict, relative_difference(found, expected) <= precision);
}

#[proptest]
fn vector_fast_path_matches_the_elementwise_verdict(
    #[strategy(generators::sample_vector_pair(64))] pair: (Vec<f32>, Vec<f32>),
    #[strategy(0.0..1.0f64)] precision: f64,
) {
    let (found, expected) = pair;
    let fast = all_close(&found, &expected, precision);
    let slow = check_vectors_close(&found, &expected, precision).is_ok();
    prop_assert_eq!(fast, slow);
}

#[proptest]
fn matrix_fast_path_matches_the_elementwise_verdict(
    #[strategy(generators::matrix_pair(8, 8))] pair: (Matrix<f64>, Matrix<f64>),
    #[strategy(0.0..1.0f64)] precision: f64,
) {
    let (found, expected) = pair;
    prop_assert_eq!(
        all_close_matrix(&found, &expected, precision),
        check_matrices_close(&found, &expected, precision).is_ok(),
    );
}

#[proptest]
fn length_mismatch_wins_regardless_of_content(
    #[strategy(generators::vector(16))] base: Vec<f64>,
    #[strategy(generators::value())] extra: f64,
) {
    let mut found = base.clone();
    found.push(extra);
    prop_assert!(
        matches!(
            check_vectors_equal(&found, &base),
            Err(CheckFailure::LengthMismatch { .. }),
        ),
        "expected Err(CheckFailure::LengthMismatch)"
    );
}

#[proptest]
fn container_dispatch_agrees_with_the_direct_vector_checks(
    #[strategy(generators::vector_pair(32))] pair: (Vec<f64>, Vec<f64>),
    #[strategy(generators::tolerance())] tolerance: Tolerance,
) {
    let (found, expected) = pair;
    let direct = match tolerance {
        Tolerance::Relative(p) => check_vectors_close(&found, &expected, p),
        Tolerance::Absolute(p) => check_vectors_close_abs(&found, &expected, p),
        Tolerance::Digits(d) => check_vectors_close_digits(&found, &expected, d),
    }
    .is_ok();
    let dispatched = check_containers_close(
        &NumericContainer::from(found),
        &NumericContainer::from(expected),
        tolerance,
    )
    .is_ok();
    prop_assert_eq!(dispatched, direct);
}

#[proptest]
fn single_width_dispatch_matches_the_elementwise_verdict(
    #[strategy(generators::sample_vector_pair(48))] pair: (Vec<f32>, Vec<f32>),
    #[strategy(0.0..0.5f64)] precision: f64,
) {
    let (found, expected) = pair;
    let elementwise = check_vectors_close(&found, &expected, precision).is_ok();
    let dispatched = check_containers_close(
        &NumericContainer::from(found),
        &NumericContainer::from(expected),
        Tolerance::Relative(precision),
    )
    .is_ok();
    prop_assert_eq!(dispatched, elementwise);
}

#[test]
fn zero_expectation_scenarios() {
    init_tracing();
    check_close(0.0, 0.0, 1e-7).unwrap();
    check_close(1.0, 0.0, 0.5).unwrap_err();
    check_close(0.0, 1.0, 0.5).unwrap_err();
}

#[test]
fn two_by_two_violations_fail_wherever_they_sit() {
    init_tracing();
    let expected = Matrix::from_rows(vec![vec![1.0f64, 2.0], vec![3.0, 4.0]]).unwrap();
    let bad_first = Matrix::from_rows(vec![vec![9.0f64, 2.0], vec![3.0, 4.0]]).unwrap();
    let bad_last = Matrix::from_rows(vec![vec![1.0f64, 2.0], vec![3.0, 9.0]]).unwrap();

    assert!(!all_close_matrix(&bad_first, &expected, 1e-7));
    assert!(!all_close_matrix(&bad_last, &expected, 1e-7));

    // The container dispatch falls back to the elementwise rerun, so each
    // failure names its own cell.
    for (matrix, index) in [(bad_first, 0usize), (bad_last, 3)] {
        let err = check_containers_close(
            &NumericContainer::from(matrix),
            &NumericContainer::from(expected.clone()),
            Tolerance::Relative(1e-7),
        )
        .unwrap_err();
        assert!(
            matches!(err, CheckFailure::OutOfTolerance { index: Some(i), .. } if i == index),
            "unexpected failure {err:?}"
        );
    }
}

#[test]
fn relative_error_is_scaled_by_the_expected_magnitude() {
    init_tracing();
    // One part in ten thousand passes at 1e-3 whatever the magnitude.
    check_close(10_000.0, 10_001.0, 1e-3).unwrap();
    check_close(0.000_10, 0.000_100_01, 1e-3).unwrap();
    // The same absolute gap fails once the magnitude shrinks enough.
    check_close(0.01, 1.01, 1e-3).unwrap_err();
}
