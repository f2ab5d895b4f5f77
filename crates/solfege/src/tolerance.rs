//! Tolerance modes and their default bounds.

/// Default bound on relative error.
pub const DEFAULT_RELATIVE_EPSILON: f64 = 1e-7;

/// Default bound on absolute error.
pub const DEFAULT_ABSOLUTE_EPSILON: f64 = 0.1;

/// Default decimal-place count for fixed-precision comparison.
pub const DEFAULT_DIGITS: i32 = 0;

/// How far apart two values may be while still counting as equal.
///
/// Exactly one mode applies per comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// Bound on the relative difference
    /// (see [`relative_difference`](crate::compare::relative_difference)).
    Relative(f64),
    /// Bound on `|expected - found|`.
    Absolute(f64),
    /// Round both values to this many decimal places, then compare exactly.
    /// Negative counts round to the left of the decimal point.
    Digits(i32),
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::Relative(DEFAULT_RELATIVE_EPSILON)
    }
}
