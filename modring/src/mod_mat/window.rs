//! Borrowing views into a sub-rectangle of a [`ModMatrix`].
//!
//! A window never owns storage: it holds a borrow of its parent, so it cannot outlive the
//! parent and dropping it leaves the parent's grid untouched.

use super::ModMatrix;

use crate::errors::ModRingError;
use crate::ring::{IntMatrix, IntMatrixView, Ring};

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Read-only window `[r1, r2) × [c1, c2)` of a parent matrix.
///
/// A window can be an operand to the binary operations of [`ModMatrix`] and can itself be
/// added, multiplied or concatenated; results are fresh owning matrices.
#[derive(Debug, Clone, Copy)]
pub struct ModMatrixWindow<'a> {
    view: IntMatrixView<'a>,
    ring: &'a Ring,
}

impl<'a> ModMatrixWindow<'a> {
    pub(super) fn new(view: IntMatrixView<'a>, ring: &'a Ring) -> Self {
        Self { view, ring }
    }

    pub fn nrows(&self) -> usize {
        self.view.rows()
    }

    pub fn ncols(&self) -> usize {
        self.view.cols()
    }

    pub fn ring(&self) -> &'a Ring {
        self.ring
    }

    pub fn modulus(&self) -> &'a BigInt {
        self.ring.modulus()
    }

    /// Entry `(i, j)` of the window, i.e. entry `(r1 + i, c1 + j)` of the parent.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` lies outside the window.
    pub fn entry(&self, i: usize, j: usize) -> &'a BigInt {
        self.view.entry(i, j)
    }

    /// The borrowed integer grid behind the window.
    pub fn as_view(&self) -> IntMatrixView<'a> {
        self.view
    }

    pub fn is_zero(&self) -> bool {
        self.view.is_zero()
    }

    pub fn is_empty(&self) -> bool {
        self.view.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.view.is_square()
    }

    /// Copies the window into a new owning matrix with the parent's modulus, reducing the
    /// entries into `[0, N)`.
    pub fn to_matrix(&self) -> Result<ModMatrix, ModRingError> {
        Ok(self.with_grid(self.view.to_matrix()?))
    }

    fn with_grid(&self, mat: IntMatrix) -> ModMatrix {
        ModMatrix::from_int_matrix(mat, self.ring.clone())
    }

    fn check_compatible(&self, other: &ModMatrixWindow<'_>, op: &str) -> Result<(), ModRingError> {
        if self.ring != other.ring {
            log::debug!(
                "{}: modulus mismatch ({} vs {})",
                op,
                self.ring.modulus(),
                other.ring.modulus()
            );
            return Err(ModRingError::ModulusMismatch(format!(
                "{}: operands have moduli {} and {}",
                op,
                self.ring.modulus(),
                other.ring.modulus()
            )));
        }
        Ok(())
    }

    /// Computes `self + other mod N`; see [`ModMatrix::add`].
    pub fn add<'b>(
        &self,
        other: impl Into<ModMatrixWindow<'b>>,
    ) -> Result<ModMatrix, ModRingError> {
        let other = other.into();
        self.check_compatible(&other, "add")?;
        Ok(self.with_grid(self.view.add(&other.view)?))
    }

    /// Computes `self - other mod N`; see [`ModMatrix::sub`].
    pub fn sub<'b>(
        &self,
        other: impl Into<ModMatrixWindow<'b>>,
    ) -> Result<ModMatrix, ModRingError> {
        let other = other.into();
        self.check_compatible(&other, "sub")?;
        Ok(self.with_grid(self.view.sub(&other.view)?))
    }

    /// Computes `self · other mod N`; see [`ModMatrix::mul`].
    pub fn mul<'b>(
        &self,
        other: impl Into<ModMatrixWindow<'b>>,
    ) -> Result<ModMatrix, ModRingError> {
        let other = other.into();
        self.check_compatible(&other, "mul")?;
        Ok(self.with_grid(self.view.mul(&other.view)?))
    }

    /// Places `other` to the right of `self`.
    pub fn concat_horizontal<'b>(
        &self,
        other: impl Into<ModMatrixWindow<'b>>,
    ) -> Result<ModMatrix, ModRingError> {
        let other = other.into();
        self.check_compatible(&other, "concat_horizontal")?;
        Ok(self.with_grid(self.view.concat_horizontal(&other.view)?))
    }

    /// Places `other` below `self`.
    pub fn concat_vertical<'b>(
        &self,
        other: impl Into<ModMatrixWindow<'b>>,
    ) -> Result<ModMatrix, ModRingError> {
        let other = other.into();
        self.check_compatible(&other, "concat_vertical")?;
        Ok(self.with_grid(self.view.concat_vertical(&other.view)?))
    }
}

impl<'a> From<&'a ModMatrix> for ModMatrixWindow<'a> {
    fn from(mat: &'a ModMatrix) -> Self {
        mat.as_window()
    }
}

/// Mutable window `[r1, r2) × [c1, c2)` of a parent matrix.
#[derive(Debug)]
pub struct ModMatrixWindowMut<'a> {
    parent: &'a mut ModMatrix,
    r1: usize,
    c1: usize,
    rows: usize,
    cols: usize,
}

impl<'a> ModMatrixWindowMut<'a> {
    pub(super) fn new(
        parent: &'a mut ModMatrix,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
    ) -> Self {
        Self {
            parent,
            r1,
            c1,
            rows: r2 - r1,
            cols: c2 - c1,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn modulus(&self) -> &BigInt {
        self.parent.modulus()
    }

    fn check(&self, i: usize, j: usize) {
        assert!(i < self.rows && j < self.cols, "window entry ({}, {}) out of bounds", i, j);
    }

    pub fn entry(&self, i: usize, j: usize) -> &BigInt {
        self.check(i, j);
        self.parent.entry(self.r1 + i, self.c1 + j)
    }

    /// Raw mutable access; see [`ModMatrix::entry_mut`].
    pub fn entry_mut(&mut self, i: usize, j: usize) -> &mut BigInt {
        self.check(i, j);
        self.parent.entry_mut(self.r1 + i, self.c1 + j)
    }

    /// Stores `value mod N` at window position `(i, j)`.
    pub fn set_entry(&mut self, i: usize, j: usize, value: &BigInt) {
        self.check(i, j);
        self.parent.set_entry(self.r1 + i, self.c1 + j, value);
    }

    /// Zeroes the window region of the parent.
    pub fn zero(&mut self) {
        self.fill_with(|_, _| BigInt::zero());
    }

    /// Sets the window region to the `rows × cols` identity pattern, reduced mod N.
    pub fn one(&mut self) {
        let one = self.parent.ring.normalize(&BigInt::one());
        self.fill_with(|i, j| if i == j { one.clone() } else { BigInt::zero() });
    }

    /// Reduces the window region into `[0, N)`.
    pub fn reduce_entries(&mut self) {
        let ModMatrix { mat, ring } = &mut *self.parent;
        for i in self.r1..self.r1 + self.rows {
            for j in self.c1..self.c1 + self.cols {
                ring.normalize_in_place(mat.entry_mut(i, j));
            }
        }
    }

    fn fill_with(&mut self, f: impl Fn(usize, usize) -> BigInt) {
        for i in 0..self.rows {
            for j in 0..self.cols {
                *self.parent.mat.entry_mut(self.r1 + i, self.c1 + j) = f(i, j);
            }
        }
    }

    /// Reborrows as a read-only window.
    pub fn as_window(&self) -> ModMatrixWindow<'_> {
        let ModMatrix { mat, ring } = &*self.parent;
        let view = IntMatrixView::new(mat, self.r1, self.c1, self.rows, self.cols);
        ModMatrixWindow::new(view, ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parent() -> ModMatrix {
        ModMatrix::from_rows(
            vec![vec![1, 2, 3, 4], vec![5, 6, 7, 8], vec![9, 10, 11, 12]],
            13,
        )
        .unwrap()
    }

    #[test]
    fn test_window_bounds() {
        let a = parent();
        assert!(a.window(0, 0, 3, 4).is_ok());
        assert!(a.window(1, 1, 1, 1).unwrap().is_empty());
        assert!(matches!(
            a.window(0, 0, 4, 1),
            Err(ModRingError::IndexOutOfBounds(_))
        ));
        assert!(matches!(
            a.window(2, 0, 1, 1),
            Err(ModRingError::IndexOutOfBounds(_))
        ));
    }

    #[test]
    fn test_window_reads_parent() -> Result<(), ModRingError> {
        let a = parent();
        let w = a.window(1, 1, 3, 3)?;
        assert_eq!((w.nrows(), w.ncols()), (2, 2));
        assert!(w.is_square());
        assert_eq!(w.entry(0, 0), &BigInt::from(6));
        assert_eq!(w.entry(1, 1), &BigInt::from(11));
        assert_eq!(
            w.to_matrix()?,
            ModMatrix::from_rows(vec![vec![6, 7], vec![10, 11]], 13)?
        );
        Ok(())
    }

    #[test]
    fn test_window_mut_writes_through() -> Result<(), ModRingError> {
        let mut a = parent();
        {
            let mut w = a.window_mut(0, 2, 2, 4)?;
            w.one();
            w.set_entry(1, 0, &BigInt::from(-1));
        }
        assert_eq!(
            a,
            ModMatrix::from_rows(
                vec![vec![1, 2, 1, 0], vec![5, 6, 12, 1], vec![9, 10, 11, 12]],
                13
            )?
        );

        {
            let mut w = a.window_mut(2, 0, 3, 4)?;
            *w.entry_mut(0, 3) = BigInt::from(40);
            w.reduce_entries();
            assert_eq!(w.as_window().entry(0, 3), &BigInt::from(1));
            w.zero();
        }
        assert!(a.window(2, 0, 3, 4)?.is_zero());
        assert!(a.is_reduced());
        Ok(())
    }

    #[test]
    fn test_to_matrix_reduces_raw_parent_entries() -> Result<(), ModRingError> {
        let mut a = parent();
        *a.entry_mut(1, 2) = BigInt::from(-1);
        *a.entry_mut(2, 3) = BigInt::from(40);

        let copy = a.window(1, 2, 3, 4)?.to_matrix()?;
        assert!(copy.is_reduced());
        assert_eq!(copy, ModMatrix::from_rows(vec![vec![12, 8], vec![11, 1]], 13)?);
        Ok(())
    }

    #[test]
    fn test_windows_as_operands() -> Result<(), ModRingError> {
        let a = parent();
        let left = a.window(0, 0, 2, 2)?;
        let right = a.window(0, 2, 2, 4)?;

        assert_eq!(
            left.add(right)?,
            ModMatrix::from_rows(vec![vec![4, 6], vec![12, 1]], 13)?
        );
        assert_eq!(
            left.sub(right)?,
            ModMatrix::from_rows(vec![vec![11, 11], vec![11, 11]], 13)?
        );
        assert_eq!(left.mul(right)?, left.to_matrix()?.mul(&right.to_matrix()?)?);

        // a whole matrix and a window of another mix freely
        let b = ModMatrix::from_rows(vec![vec![1, 0], vec![0, 1]], 13)?;
        assert_eq!(b.mul(left)?, left.to_matrix()?);
        assert_eq!(left.add(&b)?, ModMatrix::from_rows(vec![vec![2, 2], vec![5, 7]], 13)?);
        assert_eq!(
            a.window(2, 0, 3, 4)?.concat_vertical(a.window(0, 0, 1, 4)?)?,
            ModMatrix::from_rows(vec![vec![9, 10, 11, 12], vec![1, 2, 3, 4]], 13)?
        );
        assert_eq!(
            left.concat_horizontal(right)?,
            a.window(0, 0, 2, 4)?.to_matrix()?
        );

        assert!(matches!(
            left.add(a.window(0, 0, 3, 3)?),
            Err(ModRingError::DimensionMismatch(_))
        ));
        let other = ModMatrix::new(2, 2, 7)?;
        assert!(matches!(
            left.add(&other),
            Err(ModRingError::ModulusMismatch(_))
        ));
        Ok(())
    }

    #[test]
    fn test_dropping_window_keeps_parent() -> Result<(), ModRingError> {
        let a = parent();
        let copy = {
            let w = a.window(0, 0, 2, 2)?;
            w.to_matrix()?
        };
        assert_eq!(a, parent());
        assert_eq!(copy.nrows(), 2);
        Ok(())
    }
}
