//! Readers for whitespace-delimited reference files.
//!
//! Five sub-formats: scalar, vector, two-column vector, complex vector, and
//! matrix-as-lines. The `parse_*` functions work on content directly; the
//! `read_*` functions load a file first and name it in any failure.

use std::path::{Path, PathBuf};

use num_complex::Complex64;
use tracing::debug;

use crate::matrix::Matrix;

/// Error returned when a fixture cannot be loaded or parsed.
#[derive(Debug)]
pub enum FixtureError {
    /// The fixture file could not be read.
    Io { path: PathBuf, source: std::io::Error },
    /// A token could not be parsed as a real number.
    MalformedToken { path: Option<PathBuf>, token: String },
    /// A token could not be parsed as a `(re,im)` pair.
    MalformedComplex { path: Option<PathBuf>, token: String },
    /// A matrix row's length disagrees with the first row's.
    RaggedRow {
        path: Option<PathBuf>,
        row: usize,
        len: usize,
        expected: usize,
    },
}

impl FixtureError {
    fn with_path(self, path: &Path) -> Self {
        let path = Some(path.to_path_buf());
        match self {
            Self::MalformedToken { token, .. } => Self::MalformedToken { path, token },
            Self::MalformedComplex { token, .. } => Self::MalformedComplex { path, token },
            Self::RaggedRow {
                row, len, expected, ..
            } => Self::RaggedRow {
                path,
                row,
                len,
                expected,
            },
            other => other,
        }
    }
}

fn fmt_in_path(f: &mut std::fmt::Formatter<'_>, path: Option<&PathBuf>) -> std::fmt::Result {
    match path {
        Some(path) => write!(f, " in fixture {}", path.display()),
        None => Ok(()),
    }
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read fixture {}: {source}", path.display())
            }
            Self::MalformedToken { path, token } => {
                write!(f, "malformed number {token:?}")?;
                fmt_in_path(f, path.as_ref())
            }
            Self::MalformedComplex { path, token } => {
                write!(f, "malformed complex pair {token:?}, expected \"(re,im)\"")?;
                fmt_in_path(f, path.as_ref())
            }
            Self::RaggedRow {
                path,
                row,
                len,
                expected,
            } => {
                write!(f, "row {row} has {len} values; expected {expected}")?;
                fmt_in_path(f, path.as_ref())
            }
        }
    }
}

impl std::error::Error for FixtureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

fn parse_token(token: &str) -> Result<f64, FixtureError> {
    token.parse().map_err(|_| FixtureError::MalformedToken {
        path: None,
        token: token.to_owned(),
    })
}

fn parse_complex_token(token: &str) -> Result<Complex64, FixtureError> {
    let malformed = || FixtureError::MalformedComplex {
        path: None,
        token: token.to_owned(),
    };
    let inner = token
        .strip_prefix('(')
        .and_then(|t| t.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let (re, im) = inner.split_once(',').ok_or_else(malformed)?;
    let re = re.parse().map_err(|_| malformed())?;
    let im = im.parse().map_err(|_| malformed())?;
    Ok(Complex64::new(re, im))
}

/// Parse the whole trimmed content as one value.
pub fn parse_value(content: &str) -> Result<f64, FixtureError> {
    parse_token(content.trim())
}

/// Parse every whitespace-separated token as a value, in order.
pub fn parse_vector(content: &str) -> Result<Vec<f64>, FixtureError> {
    content.split_whitespace().map(parse_token).collect()
}

/// Parse only the tokens at odd 0-indexed positions.
///
/// Used for fixtures storing index/value (or frequency/magnitude) pairs
/// where only the value column matters. Tokens in even positions are
/// skipped without being parsed.
pub fn parse_vector_two_columns(content: &str) -> Result<Vec<f64>, FixtureError> {
    content
        .split_whitespace()
        .enumerate()
        .filter(|&(i, _)| i % 2 == 1)
        .map(|(_, token)| parse_token(token))
        .collect()
}

/// Parse every whitespace-separated `(re,im)` token as a complex value.
pub fn parse_complex_vector(content: &str) -> Result<Vec<Complex64>, FixtureError> {
    content.split_whitespace().map(parse_complex_token).collect()
}

/// Parse each non-blank line as a row of values.
///
/// Rows must all have the first row's length; blank lines are skipped.
pub fn parse_matrix(content: &str) -> Result<Matrix<f64>, FixtureError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for line in content.lines() {
        let row = line
            .split_whitespace()
            .map(parse_token)
            .collect::<Result<Vec<_>, _>>()?;
        if row.is_empty() {
            continue;
        }
        if let Some(first) = rows.first()
            && row.len() != first.len()
        {
            return Err(FixtureError::RaggedRow {
                path: None,
                row: rows.len(),
                len: row.len(),
                expected: first.len(),
            });
        }
        rows.push(row);
    }
    Ok(Matrix::from_rows(rows).expect("rows were checked for equal length"))
}

fn read_content(path: &Path) -> Result<String, FixtureError> {
    debug!(path = %path.display(), "loading fixture");
    std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a fixture holding one value.
pub fn read_value(path: impl AsRef<Path>) -> Result<f64, FixtureError> {
    let path = path.as_ref();
    parse_value(&read_content(path)?).map_err(|err| err.with_path(path))
}

/// Read a fixture holding whitespace-separated values.
pub fn read_vector(path: impl AsRef<Path>) -> Result<Vec<f64>, FixtureError> {
    let path = path.as_ref();
    parse_vector(&read_content(path)?).map_err(|err| err.with_path(path))
}

/// Read a two-column fixture, keeping only the value column.
pub fn read_vector_two_columns(path: impl AsRef<Path>) -> Result<Vec<f64>, FixtureError> {
    let path = path.as_ref();
    parse_vector_two_columns(&read_content(path)?).map_err(|err| err.with_path(path))
}

/// Read a fixture holding whitespace-separated `(re,im)` pairs.
pub fn read_complex_vector(path: impl AsRef<Path>) -> Result<Vec<Complex64>, FixtureError> {
    let path = path.as_ref();
    parse_complex_vector(&read_content(path)?).map_err(|err| err.with_path(path))
}

/// Read a fixture holding one row of values per line.
pub fn read_matrix(path: impl AsRef<Path>) -> Result<Matrix<f64>, FixtureError> {
    let path = path.as_ref();
    parse_matrix(&read_content(path)?).map_err(|err| err.with_path(path))
}

/// Absolute path of a fixture, resolved against the calling crate's
/// manifest directory.
///
/// ```
/// let path = solfege::fixture_path!("tests/data/spectrum.txt");
/// assert!(path.ends_with("tests/data/spectrum.txt"));
/// ```
#[macro_export]
macro_rules! fixture_path {
    ($relative:expr) => {
        ::std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join($relative)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_accepts_surrounding_whitespace() {
        assert_eq!(parse_value(" 42.5\n").unwrap(), 42.5);
        assert_eq!(parse_value("-1e-3").unwrap(), -0.001);
    }

    #[test]
    fn parse_value_rejects_empty_content() {
        let err = parse_value("   \n").unwrap_err();
        assert!(matches!(err, FixtureError::MalformedToken { .. }));
    }

    #[test]
    fn parse_vector_keeps_token_order() {
        assert_eq!(parse_vector("1.0 2.0 3.0").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_vector("5 -6\n7").unwrap(), vec![5.0, -6.0, 7.0]);
        assert!(parse_vector("").unwrap().is_empty());
    }

    #[test]
    fn parse_vector_reports_the_bad_token() {
        let err = parse_vector("1.0 oops 3.0").unwrap_err();
        let FixtureError::MalformedToken { token, .. } = err else {
            panic!("expected a malformed token, got {err:?}");
        };
        assert_eq!(token, "oops");
    }

    #[test]
    fn two_column_parse_keeps_odd_positions_only() {
        assert_eq!(
            parse_vector_two_columns("0 1.5 1 2.5 2 3.5").unwrap(),
            vec![1.5, 2.5, 3.5],
        );
    }

    #[test]
    fn two_column_parse_never_touches_the_index_column() {
        // Unparseable index tokens are fine; only the value column is read.
        assert_eq!(
            parse_vector_two_columns("a 1.0 b 2.0").unwrap(),
            vec![1.0, 2.0],
        );
        let err = parse_vector_two_columns("0 good").unwrap_err();
        assert!(matches!(err, FixtureError::MalformedToken { .. }));
    }

    #[test]
    fn complex_parse_reads_re_im_pairs() {
        assert_eq!(
            parse_complex_vector("(1,-2) (3,4)").unwrap(),
            vec![Complex64::new(1.0, -2.0), Complex64::new(3.0, 4.0)],
        );
        assert_eq!(
            parse_complex_vector("(-1.5e1,0.25)").unwrap(),
            vec![Complex64::new(-15.0, 0.25)],
        );
    }

    #[test]
    fn complex_parse_rejects_malformed_pairs() {
        for bad in ["1,2", "(1;2)", "(1,2,3)", "(1,x)", "(1,2"] {
            let err = parse_complex_vector(bad).unwrap_err();
            assert!(
                matches!(err, FixtureError::MalformedComplex { .. }),
                "token {bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn matrix_parse_reads_one_row_per_line() {
        let m = parse_matrix("1 2 3\n4 5 6\n").unwrap();
        assert_eq!(m.shape(), [2, 3]);
        assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn matrix_parse_skips_blank_lines() {
        let m = parse_matrix("1 2\n\n3 4\n   \n").unwrap();
        assert_eq!(m.shape(), [2, 2]);
        assert!(parse_matrix("\n\n").unwrap().is_empty());
    }

    #[test]
    fn matrix_parse_rejects_ragged_rows() {
        let err = parse_matrix("1 2\n3\n").unwrap_err();
        let FixtureError::RaggedRow {
            row, len, expected, ..
        } = err
        else {
            panic!("expected a ragged row, got {err:?}");
        };
        assert_eq!((row, len, expected), (1, 1, 2));
    }
}

