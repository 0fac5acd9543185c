use crate::error::{AlgebraError, Result};
use crate::matrix::{MatrixRead, MatrixWrite};
use crate::vector::{VectorRead, VectorWrite};

fn check_index(index: usize, extent: usize) -> Result<usize> {
    if index < extent {
        Ok(index)
    } else {
        Err(AlgebraError::OutOfRange { index, extent })
    }
}

fn skip_table(len: usize, deleted: usize) -> Vec<usize> {
    (0..len).filter(|&i| i != deleted).collect()
}

/// Transposed projection of a matrix: row/column indices are swapped on every
/// access, nothing is copied.
pub struct TransposeView<'a> {
    inner: &'a dyn MatrixRead,
}

impl<'a> TransposeView<'a> {
    pub fn new(inner: &'a dyn MatrixRead) -> Self {
        TransposeView { inner }
    }
}

impl MatrixRead for TransposeView<'_> {
    fn rows(&self) -> usize {
        self.inner.cols()
    }
    fn cols(&self) -> usize {
        self.inner.rows()
    }
    fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.inner.get(col, row)
    }
}

/// Mutable [`TransposeView`]; writes land in the owner with swapped indices.
pub struct TransposeViewMut<'a> {
    inner: &'a mut dyn MatrixWrite,
}

impl<'a> TransposeViewMut<'a> {
    pub fn new(inner: &'a mut dyn MatrixWrite) -> Self {
        TransposeViewMut { inner }
    }
}

impl MatrixRead for TransposeViewMut<'_> {
    fn rows(&self) -> usize {
        self.inner.cols()
    }
    fn cols(&self) -> usize {
        self.inner.rows()
    }
    fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.inner.get(col, row)
    }
}

impl MatrixWrite for TransposeViewMut<'_> {
    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.inner.set(col, row, value)
    }
}

/// Matrix projection with one row and one column deleted. Index remapping
/// goes through two small tables precomputed at construction; the elements
/// themselves stay in the owner.
pub struct SubMatrixView<'a> {
    inner: &'a dyn MatrixRead,
    row_map: Vec<usize>,
    col_map: Vec<usize>,
}

impl<'a> SubMatrixView<'a> {
    pub fn new(inner: &'a dyn MatrixRead, delete_row: usize, delete_col: usize) -> Result<Self> {
        check_index(delete_row, inner.rows())?;
        check_index(delete_col, inner.cols())?;
        if inner.rows() < 2 || inner.cols() < 2 {
            return Err(AlgebraError::InvalidOperation(
                "submatrix of a single row or column would be empty",
            ));
        }
        Ok(SubMatrixView {
            row_map: skip_table(inner.rows(), delete_row),
            col_map: skip_table(inner.cols(), delete_col),
            inner,
        })
    }
}

impl MatrixRead for SubMatrixView<'_> {
    fn rows(&self) -> usize {
        self.row_map.len()
    }
    fn cols(&self) -> usize {
        self.col_map.len()
    }
    fn get(&self, row: usize, col: usize) -> Result<f64> {
        let r = self.row_map[check_index(row, self.row_map.len())?];
        let c = self.col_map[check_index(col, self.col_map.len())?];
        self.inner.get(r, c)
    }
}

/// Mutable [`SubMatrixView`].
pub struct SubMatrixViewMut<'a> {
    inner: &'a mut dyn MatrixWrite,
    row_map: Vec<usize>,
    col_map: Vec<usize>,
}

impl<'a> SubMatrixViewMut<'a> {
    pub fn new(
        inner: &'a mut dyn MatrixWrite,
        delete_row: usize,
        delete_col: usize,
    ) -> Result<Self> {
        check_index(delete_row, inner.rows())?;
        check_index(delete_col, inner.cols())?;
        if inner.rows() < 2 || inner.cols() < 2 {
            return Err(AlgebraError::InvalidOperation(
                "submatrix of a single row or column would be empty",
            ));
        }
        Ok(SubMatrixViewMut {
            row_map: skip_table(inner.rows(), delete_row),
            col_map: skip_table(inner.cols(), delete_col),
            inner,
        })
    }
}

impl MatrixRead for SubMatrixViewMut<'_> {
    fn rows(&self) -> usize {
        self.row_map.len()
    }
    fn cols(&self) -> usize {
        self.col_map.len()
    }
    fn get(&self, row: usize, col: usize) -> Result<f64> {
        let r = self.row_map[check_index(row, self.row_map.len())?];
        let c = self.col_map[check_index(col, self.col_map.len())?];
        self.inner.get(r, c)
    }
}

impl MatrixWrite for SubMatrixViewMut<'_> {
    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        let r = self.row_map[check_index(row, self.row_map.len())?];
        let c = self.col_map[check_index(col, self.col_map.len())?];
        self.inner.set(r, c, value)
    }
}

/// A vector exposed as a 1xN (row) or Nx1 (column) matrix.
pub struct VectorAsMatrix<'a> {
    inner: &'a dyn VectorRead,
    as_row: bool,
}

impl<'a> VectorAsMatrix<'a> {
    pub fn new(inner: &'a dyn VectorRead, as_row: bool) -> Self {
        VectorAsMatrix { inner, as_row }
    }
}

impl MatrixRead for VectorAsMatrix<'_> {
    fn rows(&self) -> usize {
        if self.as_row {
            1
        } else {
            self.inner.dim()
        }
    }
    fn cols(&self) -> usize {
        if self.as_row {
            self.inner.dim()
        } else {
            1
        }
    }
    fn get(&self, row: usize, col: usize) -> Result<f64> {
        if self.as_row {
            check_index(row, 1)?;
            self.inner.get(col)
        } else {
            check_index(col, 1)?;
            self.inner.get(row)
        }
    }
}

/// Mutable [`VectorAsMatrix`]; writes pass through to the vector, so a locked
/// owner still rejects them.
pub struct VectorAsMatrixMut<'a> {
    inner: &'a mut dyn VectorWrite,
    as_row: bool,
}

impl<'a> VectorAsMatrixMut<'a> {
    pub fn new(inner: &'a mut dyn VectorWrite, as_row: bool) -> Self {
        VectorAsMatrixMut { inner, as_row }
    }
}

impl MatrixRead for VectorAsMatrixMut<'_> {
    fn rows(&self) -> usize {
        if self.as_row {
            1
        } else {
            self.inner.dim()
        }
    }
    fn cols(&self) -> usize {
        if self.as_row {
            self.inner.dim()
        } else {
            1
        }
    }
    fn get(&self, row: usize, col: usize) -> Result<f64> {
        if self.as_row {
            check_index(row, 1)?;
            self.inner.get(col)
        } else {
            check_index(col, 1)?;
            self.inner.get(row)
        }
    }
}

impl MatrixWrite for VectorAsMatrixMut<'_> {
    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        if self.as_row {
            check_index(row, 1)?;
            self.inner.set(col, value)
        } else {
            check_index(col, 1)?;
            self.inner.set(row, value)
        }
    }
}

/// A 1xN or Nx1 matrix exposed as a vector.
pub struct MatrixAsVector<'a> {
    inner: &'a dyn MatrixRead,
    from_row: bool,
}

impl<'a> MatrixAsVector<'a> {
    pub fn new(inner: &'a dyn MatrixRead) -> Result<Self> {
        if inner.rows() == 1 {
            Ok(MatrixAsVector {
                inner,
                from_row: true,
            })
        } else if inner.cols() == 1 {
            Ok(MatrixAsVector {
                inner,
                from_row: false,
            })
        } else {
            Err(AlgebraError::InvalidOperation(
                "matrix is neither a single row nor a single column",
            ))
        }
    }
}

impl VectorRead for MatrixAsVector<'_> {
    fn dim(&self) -> usize {
        if self.from_row {
            self.inner.cols()
        } else {
            self.inner.rows()
        }
    }
    fn get(&self, i: usize) -> Result<f64> {
        if self.from_row {
            self.inner.get(0, i)
        } else {
            self.inner.get(i, 0)
        }
    }
}

/// Mutable [`MatrixAsVector`].
pub struct MatrixAsVectorMut<'a> {
    inner: &'a mut dyn MatrixWrite,
    from_row: bool,
}

impl<'a> MatrixAsVectorMut<'a> {
    pub fn new(inner: &'a mut dyn MatrixWrite) -> Result<Self> {
        if inner.rows() == 1 {
            Ok(MatrixAsVectorMut {
                inner,
                from_row: true,
            })
        } else if inner.cols() == 1 {
            Ok(MatrixAsVectorMut {
                inner,
                from_row: false,
            })
        } else {
            Err(AlgebraError::InvalidOperation(
                "matrix is neither a single row nor a single column",
            ))
        }
    }
}

impl VectorRead for MatrixAsVectorMut<'_> {
    fn dim(&self) -> usize {
        if self.from_row {
            self.inner.cols()
        } else {
            self.inner.rows()
        }
    }
    fn get(&self, i: usize) -> Result<f64> {
        if self.from_row {
            self.inner.get(0, i)
        } else {
            self.inner.get(i, 0)
        }
    }
}

impl VectorWrite for MatrixAsVectorMut<'_> {
    fn set(&mut self, i: usize, value: f64) -> Result<()> {
        if self.from_row {
            self.inner.set(0, i, value)
        } else {
            self.inner.set(i, 0, value)
        }
    }
}
