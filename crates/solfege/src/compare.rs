//! Numeric comparison checks with configurable tolerance semantics.
//!
//! Every check returns `Result<(), CheckFailure>`. Failures name the first
//! offending position and carry the observed difference next to the allowed
//! bound. The `all_close*` functions are boolean scans used as fast paths by
//! [`check_containers_close`]; they give the same verdicts as the
//! elementwise checks.

use tracing::trace;

use crate::container::{ContainerKind, Element, NumericContainer};
use crate::matrix::Matrix;
use crate::tolerance::Tolerance;

/// A failed comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckFailure {
    /// A value is NaN or infinite.
    NonFinite { value: f64, index: Option<usize> },
    /// Two sequences differ in length.
    LengthMismatch {
        found: usize,
        expected: usize,
        row: Option<usize>,
    },
    /// Two matrices differ in shape.
    ShapeMismatch {
        found: [usize; 2],
        expected: [usize; 2],
    },
    /// Two containers differ in structural kind.
    KindMismatch {
        found: ContainerKind,
        expected: ContainerKind,
    },
    /// Exact comparison found differing values.
    NotEqual {
        index: Option<usize>,
        found: f64,
        expected: f64,
    },
    /// Exact comparison found differing cell values.
    CellNotEqual {
        row: usize,
        col: usize,
        found: f64,
        expected: f64,
    },
    /// One side of a cell pair is a scalar, the other an array.
    CellKindMismatch { row: usize, col: usize },
    /// The all-nonzero reductions of two array cells disagree.
    ReductionMismatch {
        row: usize,
        col: usize,
        found: bool,
        expected: bool,
    },
    /// Approximate comparison exceeded its tolerance.
    OutOfTolerance {
        index: Option<usize>,
        found: f64,
        expected: f64,
        diff: f64,
        tolerance: Tolerance,
    },
}

impl CheckFailure {
    /// Attach an element index to a failure produced by a scalar check.
    fn at_index(self, index: usize) -> Self {
        match self {
            Self::NonFinite { value, .. } => Self::NonFinite {
                value,
                index: Some(index),
            },
            Self::NotEqual {
                found, expected, ..
            } => Self::NotEqual {
                index: Some(index),
                found,
                expected,
            },
            Self::OutOfTolerance {
                found,
                expected,
                diff,
                tolerance,
                ..
            } => Self::OutOfTolerance {
                index: Some(index),
                found,
                expected,
                diff,
                tolerance,
            },
            other => other,
        }
    }
}

impl std::fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::NonFinite {
                value,
                index: Some(i),
            } => write!(f, "value {value} at index {i} is not finite"),
            Self::NonFinite { value, index: None } => {
                write!(f, "value {value} is not finite")
            }
            Self::LengthMismatch {
                found,
                expected,
                row: Some(r),
            } => write!(f, "row {r} has length {found}; expected {expected}"),
            Self::LengthMismatch {
                found,
                expected,
                row: None,
            } => write!(f, "length is {found}; expected {expected}"),
            Self::ShapeMismatch { found, expected } => write!(
                f,
                "shape is {}x{}; expected {}x{}",
                found[0], found[1], expected[0], expected[1],
            ),
            Self::KindMismatch { found, expected } => {
                write!(f, "container is a {found}; expected a {expected}")
            }
            Self::NotEqual {
                index: Some(i),
                found,
                expected,
            } => write!(f, "values differ at index {i}: found {found}, expected {expected}"),
            Self::NotEqual {
                index: None,
                found,
                expected,
            } => write!(f, "values differ: found {found}, expected {expected}"),
            Self::CellNotEqual {
                row,
                col,
                found,
                expected,
            } => write!(
                f,
                "cell ({row}, {col}) differs: found {found}, expected {expected}",
            ),
            Self::CellKindMismatch { row, col } => {
                write!(f, "cell ({row}, {col}) mixes scalar and array values")
            }
            Self::ReductionMismatch {
                row,
                col,
                found,
                expected,
            } => write!(
                f,
                "array cell ({row}, {col}) reduces to {found}; expected {expected}",
            ),
            Self::OutOfTolerance {
                index,
                found,
                expected,
                diff,
                tolerance,
            } => {
                if let Some(i) = index {
                    write!(f, "at index {i}: ")?;
                }
                match tolerance {
                    Tolerance::Relative(precision) => write!(
                        f,
                        "difference is {diff:e} while the allowed relative error is {precision:e}",
                    ),
                    Tolerance::Absolute(precision) => write!(
                        f,
                        "difference is {diff:e} while the allowed absolute error is {precision:e}",
                    ),
                    Tolerance::Digits(digits) => write!(
                        f,
                        "found {found} and expected {expected} differ when rounded to {digits} decimal places",
                    ),
                }
            }
        }
    }
}

impl std::error::Error for CheckFailure {}

/// Relative difference between two values.
///
/// When `expected` is zero the magnitude of `found` stands in for the ratio
/// (and vice versa), so a zero expectation only matches values that are
/// themselves within the bound of zero.
#[inline]
pub fn relative_difference(found: f64, expected: f64) -> f64 {
    if expected == 0.0 {
        found.abs()
    } else if found == 0.0 {
        expected.abs()
    } else {
        ((expected - found) / expected).abs()
    }
}

/// Whether two values are within `precision` relative difference.
///
/// NaN on either side never compares close.
#[inline]
pub fn almost_equal(found: f64, expected: f64, precision: f64) -> bool {
    relative_difference(found, expected) <= precision
}

/// Round to `digits` decimal places, half away from zero.
///
/// Negative counts round to the left of the decimal point. Counts whose
/// scale factor falls outside f64's finite range saturate: the value is
/// returned unchanged when `value * scale` overflows, and collapses to
/// signed zero when the scale itself underflows.
#[inline]
pub fn round_to_digits(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    let scaled = value * scale;
    if !scaled.is_finite() {
        // An overflowing product means rounding at this place cannot
        // move the value to a different f64. Non-finite inputs also
        // land here and pass through unchanged.
        return value;
    }
    if scale == 0.0 {
        // Every finite value rounds to zero at this many places.
        return 0.0f64.copysign(value);
    }
    scaled.round() / scale
}

/// Fail if `value` is NaN or infinite.
pub fn check_finite(value: f64) -> Result<(), CheckFailure> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CheckFailure::NonFinite { value, index: None })
    }
}

/// Fail on the first NaN or infinite element.
pub fn check_all_finite<T: Element>(values: &[T]) -> Result<(), CheckFailure> {
    for (i, &value) in values.iter().enumerate() {
        let value = value.widen();
        if !value.is_finite() {
            return Err(CheckFailure::NonFinite {
                value,
                index: Some(i),
            });
        }
    }
    Ok(())
}

/// Compare two values under a relative-error bound.
pub fn check_close(found: f64, expected: f64, precision: f64) -> Result<(), CheckFailure> {
    if almost_equal(found, expected, precision) {
        Ok(())
    } else {
        Err(CheckFailure::OutOfTolerance {
            index: None,
            found,
            expected,
            diff: relative_difference(found, expected),
            tolerance: Tolerance::Relative(precision),
        })
    }
}

/// Compare two values under an absolute-error bound.
pub fn check_close_abs(found: f64, expected: f64, precision: f64) -> Result<(), CheckFailure> {
    let diff = (expected - found).abs();
    if diff <= precision {
        Ok(())
    } else {
        Err(CheckFailure::OutOfTolerance {
            index: None,
            found,
            expected,
            diff,
            tolerance: Tolerance::Absolute(precision),
        })
    }
}

/// Round both values to `digits` decimal places, then compare exactly.
pub fn check_close_digits(found: f64, expected: f64, digits: i32) -> Result<(), CheckFailure> {
    let rounded_found = round_to_digits(found, digits);
    let rounded_expected = round_to_digits(expected, digits);
    if rounded_found == rounded_expected {
        Ok(())
    } else {
        Err(CheckFailure::OutOfTolerance {
            index: None,
            found,
            expected,
            diff: (rounded_expected - rounded_found).abs(),
            tolerance: Tolerance::Digits(digits),
        })
    }
}

fn check_same_len<T>(found: &[T], expected: &[T]) -> Result<(), CheckFailure> {
    if found.len() == expected.len() {
        Ok(())
    } else {
        Err(CheckFailure::LengthMismatch {
            found: found.len(),
            expected: expected.len(),
            row: None,
        })
    }
}

/// Exact elementwise equality; the length check runs before any element is
/// looked at.
pub fn check_vectors_equal<T: Element>(found: &[T], expected: &[T]) -> Result<(), CheckFailure> {
    check_same_len(found, expected)?;
    for (i, (&f, &e)) in found.iter().zip(expected).enumerate() {
        if f != e {
            return Err(CheckFailure::NotEqual {
                index: Some(i),
                found: f.widen(),
                expected: e.widen(),
            });
        }
    }
    Ok(())
}

/// Exact elementwise equality of two dense matrices; failure indices are
/// row-major.
pub fn check_matrices_equal<T: Element>(
    found: &Matrix<T>,
    expected: &Matrix<T>,
) -> Result<(), CheckFailure> {
    if found.shape() != expected.shape() {
        return Err(CheckFailure::ShapeMismatch {
            found: found.shape(),
            expected: expected.shape(),
        });
    }
    check_vectors_equal(found.as_slice(), expected.as_slice())
}

/// One cell of a loosely-typed matrix whose cells may themselves be arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixCell {
    Scalar(f64),
    Array(Vec<f64>),
}

fn all_nonzero(values: &[f64]) -> bool {
    values.iter().all(|&x| x != 0.0)
}

/// Exact equality over rows of mixed scalar/array cells.
///
/// Scalar cells compare exactly. Array cells compare by whether every
/// element is nonzero on each side, not elementwise; two arrays with
/// different values both reducing to "all nonzero" count as equal. This
/// reduction is kept for compatibility with historical fixture suites —
/// use [`check_matrices_equal`] for true elementwise equality.
pub fn check_cell_matrices_equal(
    found: &[Vec<MatrixCell>],
    expected: &[Vec<MatrixCell>],
) -> Result<(), CheckFailure> {
    if found.len() != expected.len() {
        return Err(CheckFailure::LengthMismatch {
            found: found.len(),
            expected: expected.len(),
            row: None,
        });
    }
    for (i, (row_found, row_expected)) in found.iter().zip(expected).enumerate() {
        if row_found.len() != row_expected.len() {
            return Err(CheckFailure::LengthMismatch {
                found: row_found.len(),
                expected: row_expected.len(),
                row: Some(i),
            });
        }
        for (j, (cell_found, cell_expected)) in row_found.iter().zip(row_expected).enumerate() {
            match (cell_found, cell_expected) {
                (MatrixCell::Scalar(f), MatrixCell::Scalar(e)) => {
                    if f != e {
                        return Err(CheckFailure::CellNotEqual {
                            row: i,
                            col: j,
                            found: *f,
                            expected: *e,
                        });
                    }
                }
                (MatrixCell::Array(f), MatrixCell::Array(e)) => {
                    let reduced_found = all_nonzero(f);
                    let reduced_expected = all_nonzero(e);
                    if reduced_found != reduced_expected {
                        return Err(CheckFailure::ReductionMismatch {
                            row: i,
                            col: j,
                            found: reduced_found,
                            expected: reduced_expected,
                        });
                    }
                }
                _ => return Err(CheckFailure::CellKindMismatch { row: i, col: j }),
            }
        }
    }
    Ok(())
}

/// Elementwise relative-error comparison; the failure names the first
/// offending index.
pub fn check_vectors_close<T: Element>(
    found: &[T],
    expected: &[T],
    precision: f64,
) -> Result<(), CheckFailure> {
    check_same_len(found, expected)?;
    for (i, (&f, &e)) in found.iter().zip(expected).enumerate() {
        check_close(f.widen(), e.widen(), precision).map_err(|failure| failure.at_index(i))?;
    }
    Ok(())
}

/// Elementwise absolute-error comparison.
pub fn check_vectors_close_abs<T: Element>(
    found: &[T],
    expected: &[T],
    precision: f64,
) -> Result<(), CheckFailure> {
    check_same_len(found, expected)?;
    for (i, (&f, &e)) in found.iter().zip(expected).enumerate() {
        check_close_abs(f.widen(), e.widen(), precision).map_err(|failure| failure.at_index(i))?;
    }
    Ok(())
}

/// Elementwise fixed-precision comparison.
pub fn check_vectors_close_digits<T: Element>(
    found: &[T],
    expected: &[T],
    digits: i32,
) -> Result<(), CheckFailure> {
    check_same_len(found, expected)?;
    for (i, (&f, &e)) in found.iter().zip(expected).enumerate() {
        check_close_digits(f.widen(), e.widen(), digits).map_err(|failure| failure.at_index(i))?;
    }
    Ok(())
}

/// Relative-error comparison of two dense matrices; failure indices are
/// row-major.
pub fn check_matrices_close<T: Element>(
    found: &Matrix<T>,
    expected: &Matrix<T>,
    precision: f64,
) -> Result<(), CheckFailure> {
    if found.shape() != expected.shape() {
        return Err(CheckFailure::ShapeMismatch {
            found: found.shape(),
            expected: expected.shape(),
        });
    }
    check_vectors_close(found.as_slice(), expected.as_slice(), precision)
}

/// Scan two equal-length slices for relative closeness, stopping at the
/// first violation.
///
/// Verdict-equivalent to [`check_vectors_close`] on equal-length input.
/// Panics if the lengths differ; callers filter shapes before taking the
/// fast path.
pub fn all_close<T: Element>(found: &[T], expected: &[T], precision: f64) -> bool {
    assert_eq!(
        found.len(),
        expected.len(),
        "fast-path comparison requires equal lengths",
    );
    for (&f, &e) in found.iter().zip(expected) {
        if !almost_equal(f.widen(), e.widen(), precision) {
            return false;
        }
    }
    true
}

/// Scan every `(i, j)` cell of two equal-shape matrices for relative
/// closeness, stopping at the first violation.
///
/// Panics if the shapes differ; callers filter shapes before taking the
/// fast path.
pub fn all_close_matrix<T: Element>(
    found: &Matrix<T>,
    expected: &Matrix<T>,
    precision: f64,
) -> bool {
    assert_eq!(
        found.shape(),
        expected.shape(),
        "fast-path comparison requires equal shapes",
    );
    for i in 0..found.rows() {
        for j in 0..found.cols() {
            if !almost_equal(found[(i, j)].widen(), expected[(i, j)].widen(), precision) {
                return false;
            }
        }
    }
    true
}

/// Perceptual audio comparison. Not implemented; always reports a mismatch.
///
/// Callers must not rely on this passing for any input.
pub fn all_close_audio<T: Element>(_found: &[T], _expected: &[T], _precision: f64) -> bool {
    false
}

/// Compare two containers under a tolerance, dispatching on the tags.
///
/// Same-width vector and matrix pairs take the `all_close*` scans under a
/// relative tolerance; a failed scan reruns the elementwise check so the
/// failure names a position. Width-mismatched pairs are widened to `f64`
/// and compared elementwise. Absolute and fixed-precision tolerances always
/// take the elementwise paths.
pub fn check_containers_close(
    found: &NumericContainer,
    expected: &NumericContainer,
    tolerance: Tolerance,
) -> Result<(), CheckFailure> {
    use NumericContainer as C;

    if found.kind() != expected.kind() {
        return Err(CheckFailure::KindMismatch {
            found: found.kind(),
            expected: expected.kind(),
        });
    }
    trace!(kind = %found.kind(), len = found.len(), ?tolerance, "container comparison");

    if let Tolerance::Relative(precision) = tolerance {
        match (found, expected) {
            (C::Scalar(f), C::Scalar(e)) => return check_close(*f, *e, precision),
            (C::VectorSingle(f), C::VectorSingle(e)) => {
                if f.len() == e.len() && all_close(f, e, precision) {
                    return Ok(());
                }
                return check_vectors_close(f, e, precision);
            }
            (C::VectorDouble(f), C::VectorDouble(e)) => {
                return check_vectors_close(f, e, precision);
            }
            (C::MatrixDouble(f), C::MatrixDouble(e)) => {
                if f.shape() == e.shape() && all_close_matrix(f, e, precision) {
                    return Ok(());
                }
                return check_matrices_close(f, e, precision);
            }
            (C::MatrixSingle(f), C::MatrixSingle(e)) => {
                return check_matrices_close(f, e, precision);
            }
            _ => {}
        }
    }

    match (widen_container(found), widen_container(expected)) {
        (Widened::Scalar(f), Widened::Scalar(e)) => check_scalar_with(f, e, tolerance),
        (Widened::Vector(f), Widened::Vector(e)) => check_widened_vectors(&f, &e, tolerance),
        (Widened::Matrix(shape_found, f), Widened::Matrix(shape_expected, e)) => {
            if shape_found != shape_expected {
                return Err(CheckFailure::ShapeMismatch {
                    found: shape_found,
                    expected: shape_expected,
                });
            }
            check_widened_vectors(&f, &e, tolerance)
        }
        _ => Err(CheckFailure::KindMismatch {
            found: found.kind(),
            expected: expected.kind(),
        }),
    }
}

enum Widened {
    Scalar(f64),
    Vector(Vec<f64>),
    Matrix([usize; 2], Vec<f64>),
}

fn widen_container(container: &NumericContainer) -> Widened {
    match container {
        NumericContainer::Scalar(x) => Widened::Scalar(*x),
        NumericContainer::VectorSingle(v) => {
            Widened::Vector(v.iter().map(|&x| x.widen()).collect())
        }
        NumericContainer::VectorDouble(v) => Widened::Vector(v.clone()),
        NumericContainer::MatrixSingle(m) => Widened::Matrix(
            m.shape(),
            m.as_slice().iter().map(|&x| x.widen()).collect(),
        ),
        NumericContainer::MatrixDouble(m) => Widened::Matrix(m.shape(), m.as_slice().to_vec()),
    }
}

fn check_scalar_with(found: f64, expected: f64, tolerance: Tolerance) -> Result<(), CheckFailure> {
    match tolerance {
        Tolerance::Relative(precision) => check_close(found, expected, precision),
        Tolerance::Absolute(precision) => check_close_abs(found, expected, precision),
        Tolerance::Digits(digits) => check_close_digits(found, expected, digits),
    }
}

fn check_widened_vectors(
    found: &[f64],
    expected: &[f64],
    tolerance: Tolerance,
) -> Result<(), CheckFailure> {
    match tolerance {
        Tolerance::Relative(precision) => check_vectors_close(found, expected, precision),
        Tolerance::Absolute(precision) => check_vectors_close_abs(found, expected, precision),
        Tolerance::Digits(digits) => check_vectors_close_digits(found, expected, digits),
    }
}
