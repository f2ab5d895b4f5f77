//! Dense row-major matrix storage for reference data.

/// Error returned when constructing a [`Matrix`] from malformed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixShapeError {
    /// A row's length disagrees with the first row's length.
    RaggedRow { row: usize, len: usize, expected: usize },
    /// A flat buffer's length is not `rows * cols`.
    SizeMismatch { rows: usize, cols: usize, len: usize },
}

impl std::fmt::Display for MatrixShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::RaggedRow { row, len, expected } => write!(
                f,
                "row {row} has {len} elements; expected {expected} to match the first row",
            ),
            Self::SizeMismatch { rows, cols, len } => write!(
                f,
                "flat buffer of {len} elements cannot fill a {rows}x{cols} matrix",
            ),
        }
    }
}

impl std::error::Error for MatrixShapeError {}

/// Dense matrix with row-major storage.
///
/// Rows all have the same length; the shape is fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Matrix<T> {
    /// Build a matrix from rows, which must all have equal length.
    ///
    /// An empty row list yields the 0x0 matrix.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, MatrixShapeError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * cols);
        let mut count = 0;
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(MatrixShapeError::RaggedRow {
                    row: i,
                    len: row.len(),
                    expected: cols,
                });
            }
            data.extend(row);
            count += 1;
        }
        Ok(Self {
            rows: count,
            cols,
            data,
        })
    }

    /// Build a matrix from a flat row-major buffer of exactly `rows * cols`
    /// elements.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, MatrixShapeError> {
        if data.len() != rows * cols {
            return Err(MatrixShapeError::SizeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// The shape as `[rows, cols]`.
    #[inline]
    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }

    /// The number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the matrix holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// One row as a slice.
    ///
    /// Panics if `row >= rows`.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        assert!(row < self.rows, "row {row} out of bounds for {} rows", self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterator over the rows.
    pub fn row_iter(&self) -> impl Iterator<Item = &[T]> {
        (0..self.rows).map(|r| self.row(r))
    }

    /// The whole storage in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> std::ops::Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        &self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_stores_row_major() {
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m.shape(), [2, 2]);
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(m[(0, 1)], 2.0);
        assert_eq!(m[(1, 0)], 3.0);
        assert_eq!(m.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn from_rows_rejects_ragged_input() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixShapeError::RaggedRow {
                row: 1,
                len: 1,
                expected: 2,
            }
        );
    }

    #[test]
    fn from_rows_accepts_empty_input() {
        let m: Matrix<f64> = Matrix::from_rows(vec![]).unwrap();
        assert_eq!(m.shape(), [0, 0]);
        assert!(m.is_empty());
        assert_eq!(m.row_iter().count(), 0);
    }

    #[test]
    fn from_flat_checks_size() {
        let err = Matrix::from_flat(2, 3, vec![1.0; 5]).unwrap_err();
        assert_eq!(
            err,
            MatrixShapeError::SizeMismatch {
                rows: 2,
                cols: 3,
                len: 5,
            }
        );

        let m = Matrix::from_flat(2, 3, vec![0.0f32; 6]).unwrap();
        assert_eq!(m.shape(), [2, 3]);
    }

    #[test]
    fn row_iter_yields_each_row() {
        let m = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]).unwrap();
        let rows: Vec<&[i32]> = m.row_iter().collect();
        assert_eq!(rows, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_bounds_panics() {
        let m = Matrix::from_rows(vec![vec![1.0]]).unwrap();
        let _ = m[(0, 1)];
    }
}
