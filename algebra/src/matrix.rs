use std::fmt;

use itertools::Itertools;

use crate::error::{AlgebraError, Result};
use crate::vector::Vector;
use crate::view::{
    MatrixAsVector, MatrixAsVectorMut, SubMatrixView, SubMatrixViewMut, TransposeView,
    TransposeViewMut,
};

/// Read access to a 2-D grid of reals. Object-safe; the determinant recursion
/// below works on `&dyn MatrixRead` so owned matrices and nested views share
/// one code path.
pub trait MatrixRead {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> Result<f64>;
}

/// Write access on top of [`MatrixRead`].
pub trait MatrixWrite: MatrixRead {
    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()>;
}

impl<'a, T: MatrixRead + ?Sized> MatrixRead for &'a T {
    fn rows(&self) -> usize {
        (**self).rows()
    }
    fn cols(&self) -> usize {
        (**self).cols()
    }
    fn get(&self, row: usize, col: usize) -> Result<f64> {
        (**self).get(row, col)
    }
}

impl<'a, T: MatrixRead + ?Sized> MatrixRead for &'a mut T {
    fn rows(&self) -> usize {
        (**self).rows()
    }
    fn cols(&self) -> usize {
        (**self).cols()
    }
    fn get(&self, row: usize, col: usize) -> Result<f64> {
        (**self).get(row, col)
    }
}

impl<'a, T: MatrixWrite + ?Sized> MatrixWrite for &'a mut T {
    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        (**self).set(row, col, value)
    }
}

fn same_extent(a: usize, b: usize) -> Result<()> {
    if a == b {
        Ok(())
    } else {
        Err(AlgebraError::DimensionMismatch(a, b))
    }
}

/// Laplace cofactor expansion along the first row, recursing over live
/// submatrix views so no element is ever copied. O(n!), which is exact and
/// fast enough for the sizes this engine serves (at most 4).
fn cofactor_expansion(m: &dyn MatrixRead) -> Result<f64> {
    if m.rows() != m.cols() {
        return Err(AlgebraError::InvalidOperation(
            "determinant of a non-square matrix",
        ));
    }
    match m.rows() {
        1 => m.get(0, 0),
        2 => Ok(m.get(0, 0)? * m.get(1, 1)? - m.get(0, 1)? * m.get(1, 0)?),
        n => {
            let mut det = 0.0;
            for j in 0..n {
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                let minor = SubMatrixView::new(m, 0, j)?;
                det += sign * m.get(0, j)? * cofactor_expansion(&minor)?;
            }
            Ok(det)
        }
    }
}

/// Non-mutating matrix operations, available on every [`MatrixRead`]
/// implementor. Results are always owned [`Matrix`] values.
pub trait MatrixOps: MatrixRead {
    fn added(&self, other: &dyn MatrixRead) -> Result<Matrix> {
        same_extent(self.rows(), other.rows())?;
        same_extent(self.cols(), other.cols())?;
        let mut out = Matrix::zeros(self.rows(), self.cols())?;
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                out.set(i, j, self.get(i, j)? + other.get(i, j)?)?;
            }
        }
        Ok(out)
    }

    fn subbed(&self, other: &dyn MatrixRead) -> Result<Matrix> {
        same_extent(self.rows(), other.rows())?;
        same_extent(self.cols(), other.cols())?;
        let mut out = Matrix::zeros(self.rows(), self.cols())?;
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                out.set(i, j, self.get(i, j)? - other.get(i, j)?)?;
            }
        }
        Ok(out)
    }

    fn scaled(&self, k: f64) -> Result<Matrix> {
        let mut out = Matrix::zeros(self.rows(), self.cols())?;
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                out.set(i, j, self.get(i, j)? * k)?;
            }
        }
        Ok(out)
    }

    /// Matrix product; the inner extents must agree.
    fn matmul(&self, other: &dyn MatrixRead) -> Result<Matrix> {
        same_extent(self.cols(), other.rows())?;
        let mut out = Matrix::zeros(self.rows(), other.cols())?;
        for i in 0..self.rows() {
            for j in 0..other.cols() {
                let mut sum = 0.0;
                for k in 0..self.cols() {
                    sum += self.get(i, k)? * other.get(k, j)?;
                }
                out.set(i, j, sum)?;
            }
        }
        Ok(out)
    }

    /// Transposed copy. For the zero-copy variant see
    /// [`MatrixOps::transpose_view`].
    fn transposed(&self) -> Result<Matrix> {
        let mut out = Matrix::zeros(self.cols(), self.rows())?;
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                out.set(j, i, self.get(i, j)?)?;
            }
        }
        Ok(out)
    }

    /// Copy with one row and one column deleted.
    fn minor(&self, delete_row: usize, delete_col: usize) -> Result<Matrix>
    where
        Self: Sized,
    {
        let view = SubMatrixView::new(self, delete_row, delete_col)?;
        let mut out = Matrix::zeros(view.rows(), view.cols())?;
        for i in 0..view.rows() {
            for j in 0..view.cols() {
                out.set(i, j, view.get(i, j)?)?;
            }
        }
        Ok(out)
    }

    fn determinant(&self) -> Result<f64>
    where
        Self: Sized,
    {
        cofactor_expansion(self)
    }

    /// Inverse by the adjugate method: transposed cofactor matrix over the
    /// determinant. Fails on non-square input. A singular matrix is NOT
    /// guarded against - the division by a zero determinant silently produces
    /// non-finite entries, and guarding is the caller's responsibility.
    fn inverted(&self) -> Result<Matrix>
    where
        Self: Sized,
    {
        if self.rows() != self.cols() {
            return Err(AlgebraError::InvalidOperation(
                "inverse of a non-square matrix",
            ));
        }
        if self.rows() == 1 {
            return Matrix::new(1, 1, vec![1.0 / self.get(0, 0)?]);
        }
        let det = self.determinant()?;
        let n = self.rows();
        let mut cof = Matrix::zeros(n, n)?;
        for i in 0..n {
            for j in 0..n {
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                let minor_det = self.minor_view(i, j)?.determinant()?;
                cof.set(i, j, sign * minor_det)?;
            }
        }
        cof.transpose_view().scaled(1.0 / det)
    }

    /// Copy of a 1xN or Nx1 matrix as a vector; any other shape fails.
    fn to_vector(&self) -> Result<Vector> {
        if self.rows() == 1 {
            Vector::new(
                (0..self.cols())
                    .map(|j| self.get(0, j))
                    .collect::<Result<Vec<_>>>()?,
            )
        } else if self.cols() == 1 {
            Vector::new(
                (0..self.rows())
                    .map(|i| self.get(i, 0))
                    .collect::<Result<Vec<_>>>()?,
            )
        } else {
            Err(AlgebraError::InvalidOperation(
                "matrix is neither a single row nor a single column",
            ))
        }
    }

    /// Live transposed view of `self`.
    fn transpose_view(&self) -> TransposeView<'_>
    where
        Self: Sized,
    {
        TransposeView::new(self)
    }

    /// Live view with one row and one column deleted.
    fn minor_view(&self, delete_row: usize, delete_col: usize) -> Result<SubMatrixView<'_>>
    where
        Self: Sized,
    {
        SubMatrixView::new(self, delete_row, delete_col)
    }

    /// Live vector view of a 1xN or Nx1 matrix.
    fn as_vector_view(&self) -> Result<MatrixAsVector<'_>>
    where
        Self: Sized,
    {
        MatrixAsVector::new(self)
    }
}

impl<T: MatrixRead + ?Sized> MatrixOps for T {}

/// In-place counterparts of the copying operations in [`MatrixOps`], plus the
/// mutable view constructors.
pub trait MatrixOpsMut: MatrixWrite {
    fn add(&mut self, other: &dyn MatrixRead) -> Result<()> {
        same_extent(self.rows(), other.rows())?;
        same_extent(self.cols(), other.cols())?;
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                let v = self.get(i, j)? + other.get(i, j)?;
                self.set(i, j, v)?;
            }
        }
        Ok(())
    }

    fn sub(&mut self, other: &dyn MatrixRead) -> Result<()> {
        same_extent(self.rows(), other.rows())?;
        same_extent(self.cols(), other.cols())?;
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                let v = self.get(i, j)? - other.get(i, j)?;
                self.set(i, j, v)?;
            }
        }
        Ok(())
    }

    fn scale(&mut self, k: f64) -> Result<()> {
        for i in 0..self.rows() {
            for j in 0..self.cols() {
                let v = self.get(i, j)? * k;
                self.set(i, j, v)?;
            }
        }
        Ok(())
    }

    /// Live mutable transposed view; writes land in the owner with the
    /// indices swapped.
    fn transpose_view_mut(&mut self) -> TransposeViewMut<'_>
    where
        Self: Sized,
    {
        TransposeViewMut::new(self)
    }

    /// Live mutable view with one row and one column deleted.
    fn minor_view_mut(
        &mut self,
        delete_row: usize,
        delete_col: usize,
    ) -> Result<SubMatrixViewMut<'_>>
    where
        Self: Sized,
    {
        SubMatrixViewMut::new(self, delete_row, delete_col)
    }

    /// Live mutable vector view of a 1xN or Nx1 matrix.
    fn as_vector_view_mut(&mut self) -> Result<MatrixAsVectorMut<'_>>
    where
        Self: Sized,
    {
        MatrixAsVectorMut::new(self)
    }
}

impl<T: MatrixWrite + ?Sized> MatrixOpsMut for T {}

/// Owned row-major matrix with fixed positive extents.
#[derive(Debug, Clone)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    elems: Vec<f64>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, elems: Vec<f64>) -> Result<Matrix> {
        if rows == 0 || cols == 0 {
            return Err(AlgebraError::InvalidOperation(
                "matrix extents must be positive",
            ));
        }
        if elems.len() != rows * cols {
            return Err(AlgebraError::DimensionMismatch(rows * cols, elems.len()));
        }
        Ok(Matrix { rows, cols, elems })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Matrix> {
        Matrix::new(rows, cols, vec![0.0; rows * cols])
    }

    pub fn identity(n: usize) -> Result<Matrix> {
        let mut m = Matrix::zeros(n, n)?;
        for i in 0..n {
            m.set(i, i, 1.0)?;
        }
        Ok(m)
    }

    /// Builds a matrix from whole rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Matrix> {
        let row_count = rows.len();
        let col_count = rows.first().map(|r| r.len()).unwrap_or(0);
        for row in &rows {
            same_extent(col_count, row.len())?;
        }
        Matrix::new(row_count, col_count, rows.into_iter().flatten().collect())
    }
}

impl MatrixRead for Matrix {
    fn rows(&self) -> usize {
        self.rows
    }
    fn cols(&self) -> usize {
        self.cols
    }
    fn get(&self, row: usize, col: usize) -> Result<f64> {
        if row >= self.rows {
            return Err(AlgebraError::OutOfRange {
                index: row,
                extent: self.rows,
            });
        }
        if col >= self.cols {
            return Err(AlgebraError::OutOfRange {
                index: col,
                extent: self.cols,
            });
        }
        Ok(self.elems[row * self.cols + col])
    }
}

impl MatrixWrite for Matrix {
    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if row >= self.rows {
            return Err(AlgebraError::OutOfRange {
                index: row,
                extent: self.rows,
            });
        }
        if col >= self.cols {
            return Err(AlgebraError::OutOfRange {
                index: col,
                extent: self.cols,
            });
        }
        self.elems[row * self.cols + col] = value;
        Ok(())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(3);
        for row in self.elems.chunks(self.cols) {
            writeln!(
                f,
                "| {} |",
                row.iter().map(|x| format!("{:.*}", p, x)).join(" ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::vector::VectorOps;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn sample_3x3() -> Matrix {
        Matrix::from_rows(vec![
            vec![2.0, -1.0, 0.0],
            vec![1.0, 3.0, 2.0],
            vec![0.5, 0.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn add_sub_round_trip() {
        let a = sample_3x3();
        let b = Matrix::from_rows(vec![
            vec![1.0, 1.0, 1.0],
            vec![-2.0, 0.5, 0.0],
            vec![3.0, 3.0, -1.0],
        ])
        .unwrap();
        let round = a.added(&b).unwrap().subbed(&b).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert!(close(round.get(i, j).unwrap(), a.get(i, j).unwrap()));
            }
        }
    }

    #[test]
    fn shape_mismatch_is_reported() {
        let a = sample_3x3();
        let b = Matrix::zeros(2, 3).unwrap();
        assert_eq!(
            a.added(&b).unwrap_err(),
            AlgebraError::DimensionMismatch(3, 2)
        );
        assert_eq!(
            b.matmul(&b).unwrap_err(),
            AlgebraError::DimensionMismatch(3, 2)
        );
    }

    #[test]
    fn determinant_known_values() {
        let m = Matrix::from_rows(vec![vec![3.0, 8.0], vec![4.0, 6.0]]).unwrap();
        assert!(close(m.determinant().unwrap(), -14.0));

        // det = 2*(3*1-2*0) - (-1)*(1*1-2*0.5) + 0 = 6.
        assert!(close(sample_3x3().determinant().unwrap(), 6.0));

        let one = Matrix::new(1, 1, vec![7.5]).unwrap();
        assert!(close(one.determinant().unwrap(), 7.5));
    }

    #[test]
    fn determinant_of_transpose_matches() {
        let m = sample_3x3();
        let det_t = m.transpose_view().determinant().unwrap();
        assert!(close(det_t, m.determinant().unwrap()));

        let copied_t = m.transposed().unwrap();
        assert!(close(copied_t.determinant().unwrap(), m.determinant().unwrap()));
    }

    #[test]
    fn determinant_requires_square() {
        let m = Matrix::zeros(2, 3).unwrap();
        assert!(matches!(
            m.determinant(),
            Err(AlgebraError::InvalidOperation(_))
        ));
    }

    #[test]
    fn inverse_times_original_is_identity() {
        let m = sample_3x3();
        let product = m.matmul(&m.inverted().unwrap()).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (product.get(i, j).unwrap() - expected).abs() < 1e-9,
                    "product[{}][{}] = {}",
                    i,
                    j,
                    product.get(i, j).unwrap()
                );
            }
        }
    }

    #[test]
    fn inverse_of_1x1_is_reciprocal() {
        let m = Matrix::new(1, 1, vec![4.0]).unwrap();
        let inv = m.inverted().unwrap();
        assert!(close(inv.get(0, 0).unwrap(), 0.25));
    }

    #[test]
    fn singular_inverse_is_non_finite() {
        // Rank-1 matrix: determinant is exactly zero, and the inversion is
        // documented to produce non-finite entries rather than fail.
        let m = Matrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        let inv = m.inverted().unwrap();
        assert!(!inv.get(0, 0).unwrap().is_finite());
    }

    #[test]
    fn matmul_known_product() {
        let a = Matrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::from_rows(vec![vec![7.0, 8.0], vec![9.0, 10.0], vec![11.0, 12.0]])
            .unwrap();
        let p = a.matmul(&b).unwrap();
        assert_eq!(p.rows(), 2);
        assert_eq!(p.cols(), 2);
        assert!(close(p.get(0, 0).unwrap(), 58.0));
        assert!(close(p.get(0, 1).unwrap(), 64.0));
        assert!(close(p.get(1, 0).unwrap(), 139.0));
        assert!(close(p.get(1, 1).unwrap(), 154.0));
    }

    #[test]
    fn minor_copy_deletes_row_and_column() {
        let m = sample_3x3();
        let minor = m.minor(1, 0).unwrap();
        assert_eq!((minor.rows(), minor.cols()), (2, 2));
        assert!(close(minor.get(0, 0).unwrap(), -1.0));
        assert!(close(minor.get(1, 1).unwrap(), 1.0));
    }

    #[test]
    fn vector_bridge_requires_single_row_or_column() {
        let m = sample_3x3();
        assert!(matches!(
            m.to_vector(),
            Err(AlgebraError::InvalidOperation(_))
        ));
        let row = Matrix::new(1, 3, vec![1.0, 2.0, 3.0]).unwrap();
        let v = row.to_vector().unwrap();
        assert_eq!(v.to_vec().unwrap(), vec![1.0, 2.0, 3.0]);
    }
}
