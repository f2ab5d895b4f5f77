//! Numeric containers tagged with their structure and element width.
//!
//! Algorithm outputs always state what they hold; comparison code branches
//! on the tag instead of inspecting values at run time.

use crate::matrix::Matrix;

/// Floating-point storage width of a container's elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementWidth {
    /// 32-bit IEEE 754.
    Single,
    /// 64-bit IEEE 754.
    Double,
}

/// Structural kind of a [`NumericContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    Scalar,
    Vector,
    Matrix,
}

impl std::fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Scalar => "scalar",
            Self::Vector => "vector",
            Self::Matrix => "matrix",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating-point element type accepted by the comparison routines.
///
/// Implemented for `f32` and `f64` only.
pub trait Element:
    sealed::Sealed + Copy + PartialEq + std::fmt::Debug + std::fmt::Display + 'static
{
    /// Storage width of this element type.
    const WIDTH: ElementWidth;

    /// Widen to `f64`, exactly for `f32` inputs.
    fn widen(self) -> f64;
}

impl Element for f32 {
    const WIDTH: ElementWidth = ElementWidth::Single;

    #[inline]
    fn widen(self) -> f64 {
        f64::from(self)
    }
}

impl Element for f64 {
    const WIDTH: ElementWidth = ElementWidth::Double;

    #[inline]
    fn widen(self) -> f64 {
        self
    }
}

/// A value produced or consumed by an algorithm under test.
///
/// The variant records both the structural kind and the element width, so
/// consumers can pick width-specific code paths without inspecting values.
/// Scalars are always carried at double width.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericContainer {
    Scalar(f64),
    VectorSingle(Vec<f32>),
    VectorDouble(Vec<f64>),
    MatrixSingle(Matrix<f32>),
    MatrixDouble(Matrix<f64>),
}

impl NumericContainer {
    /// The structural kind of this container.
    pub fn kind(&self) -> ContainerKind {
        match self {
            Self::Scalar(_) => ContainerKind::Scalar,
            Self::VectorSingle(_) | Self::VectorDouble(_) => ContainerKind::Vector,
            Self::MatrixSingle(_) | Self::MatrixDouble(_) => ContainerKind::Matrix,
        }
    }

    /// The element width of this container.
    pub fn width(&self) -> ElementWidth {
        match self {
            Self::VectorSingle(_) | Self::MatrixSingle(_) => ElementWidth::Single,
            Self::Scalar(_) | Self::VectorDouble(_) | Self::MatrixDouble(_) => {
                ElementWidth::Double
            }
        }
    }

    /// Number of elements held (1 for a scalar).
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::VectorSingle(v) => v.len(),
            Self::VectorDouble(v) => v.len(),
            Self::MatrixSingle(m) => m.len(),
            Self::MatrixDouble(m) => m.len(),
        }
    }

    /// Whether the container holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<f64> for NumericContainer {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

impl From<f32> for NumericContainer {
    fn from(value: f32) -> Self {
        Self::Scalar(value.widen())
    }
}

impl From<Vec<f32>> for NumericContainer {
    fn from(value: Vec<f32>) -> Self {
        Self::VectorSingle(value)
    }
}

impl From<Vec<f64>> for NumericContainer {
    fn from(value: Vec<f64>) -> Self {
        Self::VectorDouble(value)
    }
}

impl From<Matrix<f32>> for NumericContainer {
    fn from(value: Matrix<f32>) -> Self {
        Self::MatrixSingle(value)
    }
}

impl From<Matrix<f64>> for NumericContainer {
    fn from(value: Matrix<f64>) -> Self {
        Self::MatrixDouble(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_width_follow_the_variant() {
        let scalar = NumericContainer::from(1.5f64);
        assert_eq!(scalar.kind(), ContainerKind::Scalar);
        assert_eq!(scalar.width(), ElementWidth::Double);
        assert_eq!(scalar.len(), 1);

        let single = NumericContainer::from(vec![1.0f32, 2.0]);
        assert_eq!(single.kind(), ContainerKind::Vector);
        assert_eq!(single.width(), ElementWidth::Single);
        assert_eq!(single.len(), 2);

        let matrix =
            NumericContainer::from(Matrix::from_rows(vec![vec![1.0f64, 2.0]]).unwrap());
        assert_eq!(matrix.kind(), ContainerKind::Matrix);
        assert_eq!(matrix.width(), ElementWidth::Double);
        assert_eq!(matrix.len(), 2);
    }

    #[test]
    fn scalar_from_f32_widens_exactly() {
        let NumericContainer::Scalar(x) = NumericContainer::from(0.25f32) else {
            panic!("expected a scalar");
        };
        assert_eq!(x, 0.25);
    }

    #[test]
    fn empty_vector_is_empty() {
        assert!(NumericContainer::from(Vec::<f64>::new()).is_empty());
        assert!(!NumericContainer::from(0.0f64).is_empty());
    }
}
