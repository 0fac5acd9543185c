use thiserror::Error;

/// Failure modes of the algebra engine. All are raised synchronously at the
/// point of violation; none are retried.
///
/// Singular-matrix inversion is deliberately absent from this list: dividing
/// by a zero determinant produces non-finite entries rather than an error
/// (see [`crate::MatrixOps::inverted`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AlgebraError {
    /// Two extents that must agree (vector dimensions, matrix shapes, or the
    /// inner extents of a product) do not.
    #[error("dimension mismatch: {0} vs {1}")]
    DimensionMismatch(usize, usize),

    /// The operation is undefined for the operand: cross product outside 3-D,
    /// determinant or inverse of a non-square matrix, writing to a locked
    /// vector, bridging a matrix that is neither 1xN nor Nx1, ...
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),

    /// Element or row/column index outside the declared bounds.
    #[error("index {index} out of range (extent {extent})")]
    OutOfRange { index: usize, extent: usize },
}

pub type Result<T> = std::result::Result<T, AlgebraError>;
