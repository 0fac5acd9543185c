/// Failure taxonomy shared by every operation in this crate.
pub mod error;

/// Dynamic-dimension real vectors: owned storage with an optional write lock,
/// object-safe read/write capability traits, and mutating/copying operation
/// pairs (`add`/`added`, `normalize`/`normalized`, ...).
pub mod vector;

/// 2-D real matrices: arithmetic, multiplication, Laplace determinant over
/// live submatrix views, and adjugate inversion.
pub mod matrix;

/// Live algebraic views - transposed, submatrix-with-row/col-deleted, and the
/// vector/matrix bridges. A view aliases its owner's storage through an index
/// transform; reads and writes both pass through, and the borrow ties the
/// view's lifetime to the owner.
pub mod view;

pub use error::{AlgebraError, Result};
pub use matrix::{Matrix, MatrixOps, MatrixOpsMut, MatrixRead, MatrixWrite};
pub use vector::{Vector, VectorOps, VectorOpsMut, VectorRead, VectorWrite};
pub use view::{
    MatrixAsVector, MatrixAsVectorMut, SubMatrixView, SubMatrixViewMut, TransposeView,
    TransposeViewMut, VectorAsMatrix, VectorAsMatrixMut,
};
