//! Strategies for finite numeric data in analysis-sized magnitude ranges.

use proptest::collection::vec;
use proptest::prelude::*;

use solfege::{Matrix, Tolerance};

/// Magnitude bound used by the default value strategy.
pub const MAX_MAGNITUDE: f64 = 1e6;

/// Finite values within `±MAX_MAGNITUDE`.
pub fn value() -> impl Strategy<Value = f64> {
    -MAX_MAGNITUDE..MAX_MAGNITUDE
}

/// Finite single-precision samples within `±1.0`, like normalized audio.
pub fn sample() -> impl Strategy<Value = f32> {
    -1.0f32..1.0f32
}

/// A vector of up to `max_len` finite values.
pub fn vector(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    vec(value(), 0..=max_len)
}

/// Two equal-length vectors of finite samples.
pub fn sample_vector_pair(max_len: usize) -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (0..=max_len).prop_flat_map(|len| (vec(sample(), len), vec(sample(), len)))
}

/// Two equal-length vectors of finite values.
pub fn vector_pair(max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (0..=max_len).prop_flat_map(|len| (vec(value(), len), vec(value(), len)))
}

/// Two equal-shape matrices of finite values, at least 1x1.
pub fn matrix_pair(
    max_rows: usize,
    max_cols: usize,
) -> impl Strategy<Value = (Matrix<f64>, Matrix<f64>)> {
    (1..=max_rows, 1..=max_cols).prop_flat_map(|(rows, cols)| {
        (vec(value(), rows * cols), vec(value(), rows * cols)).prop_map(
            move |(found, expected)| {
                (
                    Matrix::from_flat(rows, cols, found).expect("generated length matches"),
                    Matrix::from_flat(rows, cols, expected).expect("generated length matches"),
                )
            },
        )
    })
}

/// Any tolerance mode with a modest bound.
pub fn tolerance() -> impl Strategy<Value = Tolerance> {
    prop_oneof![
        (0.0..1.0).prop_map(Tolerance::Relative),
        (0.0..10.0).prop_map(Tolerance::Absolute),
        (-3..6i32).prop_map(Tolerance::Digits),
    ]
}
