use std::fmt;

use itertools::Itertools;

use crate::error::{AlgebraError, Result};
use crate::matrix::Matrix;
use crate::view::{VectorAsMatrix, VectorAsMatrixMut};

/// Read access to an ordered sequence of real components. Object-safe, so
/// algorithms can take `&dyn VectorRead` and work on owned vectors and live
/// views alike.
pub trait VectorRead {
    fn dim(&self) -> usize;
    fn get(&self, i: usize) -> Result<f64>;
}

/// Write access on top of [`VectorRead`]. Implementors may refuse individual
/// writes (a locked [`Vector`] does, with `InvalidOperation`).
pub trait VectorWrite: VectorRead {
    fn set(&mut self, i: usize, value: f64) -> Result<()>;
}

impl<'a, T: VectorRead + ?Sized> VectorRead for &'a T {
    fn dim(&self) -> usize {
        (**self).dim()
    }
    fn get(&self, i: usize) -> Result<f64> {
        (**self).get(i)
    }
}

impl<'a, T: VectorRead + ?Sized> VectorRead for &'a mut T {
    fn dim(&self) -> usize {
        (**self).dim()
    }
    fn get(&self, i: usize) -> Result<f64> {
        (**self).get(i)
    }
}

impl<'a, T: VectorWrite + ?Sized> VectorWrite for &'a mut T {
    fn set(&mut self, i: usize, value: f64) -> Result<()> {
        (**self).set(i, value)
    }
}

fn same_dim(a: usize, b: usize) -> Result<()> {
    if a == b {
        Ok(())
    } else {
        Err(AlgebraError::DimensionMismatch(a, b))
    }
}

/// Non-mutating vector operations, available on every [`VectorRead`]
/// implementor. Operations that produce a vector always return an owned,
/// unlocked [`Vector`]; mutating the result never affects the source.
pub trait VectorOps: VectorRead {
    /// Component-wise sum into a fresh vector.
    fn added(&self, other: &dyn VectorRead) -> Result<Vector> {
        same_dim(self.dim(), other.dim())?;
        let elems = (0..self.dim())
            .map(|i| Ok(self.get(i)? + other.get(i)?))
            .collect::<Result<Vec<_>>>()?;
        Vector::new(elems)
    }

    /// Component-wise difference into a fresh vector.
    fn subbed(&self, other: &dyn VectorRead) -> Result<Vector> {
        same_dim(self.dim(), other.dim())?;
        let elems = (0..self.dim())
            .map(|i| Ok(self.get(i)? - other.get(i)?))
            .collect::<Result<Vec<_>>>()?;
        Vector::new(elems)
    }

    /// Scalar multiple into a fresh vector.
    fn scaled(&self, k: f64) -> Result<Vector> {
        let elems = (0..self.dim())
            .map(|i| Ok(self.get(i)? * k))
            .collect::<Result<Vec<_>>>()?;
        Vector::new(elems)
    }

    /// Euclidean norm.
    fn norm(&self) -> Result<f64> {
        let mut sum = 0.0;
        for i in 0..self.dim() {
            let x = self.get(i)?;
            sum += x * x;
        }
        Ok(sum.sqrt())
    }

    /// Unit-length copy. A zero vector yields non-finite components; the
    /// division is not guarded.
    fn normalized(&self) -> Result<Vector> {
        let norm = self.norm()?;
        self.scaled(1.0 / norm)
    }

    fn dot(&self, other: &dyn VectorRead) -> Result<f64> {
        same_dim(self.dim(), other.dim())?;
        let mut sum = 0.0;
        for i in 0..self.dim() {
            sum += self.get(i)? * other.get(i)?;
        }
        Ok(sum)
    }

    /// Cross product, defined only when both operands are 3-D.
    fn cross(&self, other: &dyn VectorRead) -> Result<Vector> {
        if self.dim() != 3 || other.dim() != 3 {
            return Err(AlgebraError::InvalidOperation(
                "cross product is defined only for 3-D vectors",
            ));
        }
        let (ax, ay, az) = (self.get(0)?, self.get(1)?, self.get(2)?);
        let (bx, by, bz) = (other.get(0)?, other.get(1)?, other.get(2)?);
        Ok(Vector::from3(
            ay * bz - az * by,
            az * bx - ax * bz,
            ax * by - ay * bx,
        ))
    }

    /// Cosine of the angle between `self` and `other`.
    fn cosine(&self, other: &dyn VectorRead) -> Result<f64> {
        Ok(self.dot(other)? / (self.norm()? * other.norm()?))
    }

    /// Homogeneous divide: every component except the last divided by the
    /// last, which is then dropped. Requires dimension >= 2.
    fn from_homogeneous(&self) -> Result<Vector> {
        if self.dim() < 2 {
            return Err(AlgebraError::InvalidOperation(
                "homogeneous divide needs at least two components",
            ));
        }
        let w = self.get(self.dim() - 1)?;
        let elems = (0..self.dim() - 1)
            .map(|i| Ok(self.get(i)? / w))
            .collect::<Result<Vec<_>>>()?;
        Vector::new(elems)
    }

    /// Components copied out into a plain `Vec`.
    fn to_vec(&self) -> Result<Vec<f64>> {
        (0..self.dim()).map(|i| self.get(i)).collect()
    }

    /// Copy of `self` as a 1xN matrix.
    fn to_row_matrix(&self) -> Result<Matrix> {
        Matrix::new(1, self.dim(), self.to_vec()?)
    }

    /// Copy of `self` as an Nx1 matrix.
    fn to_column_matrix(&self) -> Result<Matrix> {
        Matrix::new(self.dim(), 1, self.to_vec()?)
    }

    /// Live 1xN view of `self`.
    fn as_row_matrix(&self) -> VectorAsMatrix<'_>
    where
        Self: Sized,
    {
        VectorAsMatrix::new(self, true)
    }

    /// Live Nx1 view of `self`.
    fn as_column_matrix(&self) -> VectorAsMatrix<'_>
    where
        Self: Sized,
    {
        VectorAsMatrix::new(self, false)
    }
}

impl<T: VectorRead + ?Sized> VectorOps for T {}

/// In-place counterparts of the copying operations in [`VectorOps`]. All of
/// them funnel through [`VectorWrite::set`], so a locked vector rejects them.
pub trait VectorOpsMut: VectorWrite {
    fn add(&mut self, other: &dyn VectorRead) -> Result<()> {
        same_dim(self.dim(), other.dim())?;
        for i in 0..self.dim() {
            let v = self.get(i)? + other.get(i)?;
            self.set(i, v)?;
        }
        Ok(())
    }

    fn sub(&mut self, other: &dyn VectorRead) -> Result<()> {
        same_dim(self.dim(), other.dim())?;
        for i in 0..self.dim() {
            let v = self.get(i)? - other.get(i)?;
            self.set(i, v)?;
        }
        Ok(())
    }

    fn scale(&mut self, k: f64) -> Result<()> {
        for i in 0..self.dim() {
            let v = self.get(i)? * k;
            self.set(i, v)?;
        }
        Ok(())
    }

    /// Normalizes in place. As with [`VectorOps::normalized`], a zero norm is
    /// not guarded.
    fn normalize(&mut self) -> Result<()> {
        let norm = self.norm()?;
        self.scale(1.0 / norm)
    }

    /// Live mutable 1xN view; writes pass through to `self`.
    fn as_row_matrix_mut(&mut self) -> VectorAsMatrixMut<'_>
    where
        Self: Sized,
    {
        VectorAsMatrixMut::new(self, true)
    }

    /// Live mutable Nx1 view; writes pass through to `self`.
    fn as_column_matrix_mut(&mut self) -> VectorAsMatrixMut<'_>
    where
        Self: Sized,
    {
        VectorAsMatrixMut::new(self, false)
    }
}

impl<T: VectorWrite + ?Sized> VectorOpsMut for T {}

/// Owned, heap-backed real vector with a fixed positive dimension.
///
/// A locked vector rejects every element write with `InvalidOperation`,
/// including writes reached through in-place arithmetic or a live view.
/// Copying operations build unlocked results, so locked vectors remain fully
/// usable as read-only operands.
#[derive(Debug, Clone)]
pub struct Vector {
    elems: Vec<f64>,
    locked: bool,
}

impl Vector {
    pub fn new(elems: Vec<f64>) -> Result<Vector> {
        if elems.is_empty() {
            return Err(AlgebraError::InvalidOperation(
                "vector dimension must be positive",
            ));
        }
        Ok(Vector {
            elems,
            locked: false,
        })
    }

    /// Write-protected vector; see the type-level docs.
    pub fn locked(elems: Vec<f64>) -> Result<Vector> {
        let mut v = Vector::new(elems)?;
        v.locked = true;
        Ok(v)
    }

    pub fn zeros(dim: usize) -> Result<Vector> {
        Vector::new(vec![0.0; dim])
    }

    pub fn from3(x: f64, y: f64, z: f64) -> Vector {
        Vector {
            elems: vec![x, y, z],
            locked: false,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }
}

impl VectorRead for Vector {
    fn dim(&self) -> usize {
        self.elems.len()
    }
    fn get(&self, i: usize) -> Result<f64> {
        self.elems
            .get(i)
            .copied()
            .ok_or(AlgebraError::OutOfRange {
                index: i,
                extent: self.elems.len(),
            })
    }
}

impl VectorWrite for Vector {
    fn set(&mut self, i: usize, value: f64) -> Result<()> {
        if i >= self.elems.len() {
            return Err(AlgebraError::OutOfRange {
                index: i,
                extent: self.elems.len(),
            });
        }
        if self.locked {
            return Err(AlgebraError::InvalidOperation("vector is locked"));
        }
        self.elems[i] = value;
        Ok(())
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(3);
        write!(
            f,
            "({})",
            self.elems.iter().map(|x| format!("{:.*}", p, x)).join(", ")
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn add_sub_round_trip() {
        let a = Vector::new(vec![1.0, -2.5, 4.0]).unwrap();
        let b = Vector::new(vec![0.5, 3.0, -1.0]).unwrap();
        let round = a.added(&b).unwrap().subbed(&b).unwrap();
        for i in 0..3 {
            assert!(close(round.get(i).unwrap(), a.get(i).unwrap()));
        }
    }

    #[test]
    fn copies_are_independent() {
        let a = Vector::new(vec![1.0, 2.0]).unwrap();
        let mut c = a.scaled(1.0).unwrap();
        c.set(0, 99.0).unwrap();
        assert_eq!(a.get(0).unwrap(), 1.0);
        assert_eq!(c.get(0).unwrap(), 99.0);
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let a = Vector::new(vec![1.0, 2.0]).unwrap();
        let b = Vector::new(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            a.added(&b).unwrap_err(),
            AlgebraError::DimensionMismatch(2, 3)
        );
        assert_eq!(a.dot(&b), Err(AlgebraError::DimensionMismatch(2, 3)));
    }

    #[test]
    fn locked_vector_rejects_writes() {
        let mut v = Vector::locked(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(
            v.set(0, 5.0),
            Err(AlgebraError::InvalidOperation("vector is locked"))
        );
        // In-place arithmetic funnels through set and fails the same way.
        let other = Vector::new(vec![1.0, 1.0, 1.0]).unwrap();
        assert!(v.add(&other).is_err());
        assert!(v.normalize().is_err());
        // Reads and copying operations still work, and the copy is unlocked.
        assert_eq!(v.get(1).unwrap(), 2.0);
        let mut copy = v.added(&other).unwrap();
        assert!(!copy.is_locked());
        copy.set(0, 0.0).unwrap();
    }

    #[test]
    fn cross_is_anti_commutative() {
        let a = Vector::from3(1.0, 2.0, 3.0);
        let b = Vector::from3(-4.0, 0.5, 2.0);
        let ab = a.cross(&b).unwrap();
        let ba = b.cross(&a).unwrap();
        for i in 0..3 {
            assert!(close(ab.get(i).unwrap(), -ba.get(i).unwrap()));
        }
    }

    #[test]
    fn cross_requires_three_dimensions() {
        let a = Vector::new(vec![1.0, 2.0]).unwrap();
        let b = Vector::new(vec![3.0, 4.0]).unwrap();
        assert!(matches!(
            a.cross(&b),
            Err(AlgebraError::InvalidOperation(_))
        ));
    }

    #[test]
    fn normalize_and_norm() {
        let mut v = Vector::from3(3.0, 0.0, 4.0);
        assert!(close(v.norm().unwrap(), 5.0));
        v.normalize().unwrap();
        assert!(close(v.norm().unwrap(), 1.0));
        assert!(close(v.get(0).unwrap(), 0.6));
    }

    #[test]
    fn homogeneous_divide() {
        let v = Vector::new(vec![2.0, 4.0, 6.0, 2.0]).unwrap();
        let w = v.from_homogeneous().unwrap();
        assert_eq!(w.dim(), 3);
        assert!(close(w.get(0).unwrap(), 1.0));
        assert!(close(w.get(1).unwrap(), 2.0));
        assert!(close(w.get(2).unwrap(), 3.0));
        // The source is untouched.
        assert_eq!(v.get(0).unwrap(), 2.0);
    }

    #[test]
    fn out_of_range_access() {
        let v = Vector::from3(1.0, 2.0, 3.0);
        assert_eq!(
            v.get(3),
            Err(AlgebraError::OutOfRange {
                index: 3,
                extent: 3
            })
        );
    }

    #[test]
    fn empty_vector_is_rejected() {
        assert!(Vector::new(vec![]).is_err());
    }

    #[test]
    fn cosine_of_known_angle() {
        let a = Vector::from3(1.0, 0.0, 0.0);
        let b = Vector::from3(1.0, 1.0, 0.0);
        assert!(close(a.cosine(&b).unwrap(), std::f64::consts::FRAC_1_SQRT_2));
    }
}
