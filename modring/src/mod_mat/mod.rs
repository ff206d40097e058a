//! # Modular Matrices
//!
//! [`ModMatrix`] pairs an unreduced [`IntMatrix`] with a [`Ring`]. Raw arithmetic is delegated
//! to the integer engine and every operation ends with a sweep that reduces each entry into
//! `[0, N)`, so entries observed through the API are always canonical residues.
//!
//! Binary operations require both operands to share a modulus and fail with
//! [`ModRingError::ModulusMismatch`] otherwise.

pub mod window;

use crate::errors::ModRingError;
use crate::ring::{IntMatrix, Ring};

pub use window::{ModMatrixWindow, ModMatrixWindowMut};

use num_bigint::BigInt;

use rand::Rng;

use serde::{Deserialize, Serialize};

use std::fmt;

/// A matrix over Z/NZ.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ModMatrixRepr", into = "ModMatrixRepr")]
pub struct ModMatrix {
    mat: IntMatrix,
    ring: Ring,
}

#[derive(Serialize, Deserialize)]
struct ModMatrixRepr {
    modulus: Ring,
    rows: usize,
    cols: usize,
    entries: Vec<BigInt>,
}

impl ModMatrix {
    /// Allocates a `rows × cols` zero matrix modulo `modulus`.
    ///
    /// # Errors
    ///
    /// Returns `ModRingError::InvalidModulus` if `modulus <= 0` and
    /// `ModRingError::AllocationError` if the grid cannot be allocated.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::mod_mat::ModMatrix;
    /// let a = ModMatrix::new(2, 3, 7).unwrap();
    /// assert_eq!((a.nrows(), a.ncols()), (2, 3));
    /// assert!(a.is_zero());
    /// ```
    pub fn new(rows: usize, cols: usize, modulus: impl Into<BigInt>) -> Result<Self, ModRingError> {
        Self::with_ring(rows, cols, Ring::try_with(modulus)?)
    }

    /// Allocates a `rows × cols` zero matrix over `ring`.
    pub fn with_ring(rows: usize, cols: usize, ring: Ring) -> Result<Self, ModRingError> {
        Ok(Self {
            mat: IntMatrix::zeros(rows, cols)?,
            ring,
        })
    }

    /// Builds a matrix from rows of integers, reducing every entry modulo `modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::mod_mat::ModMatrix;
    /// # use num_bigint::BigInt;
    /// let a = ModMatrix::from_rows(vec![vec![-1, 9]], 7).unwrap();
    /// assert_eq!(a.entry(0, 0), &BigInt::from(6));
    /// assert_eq!(a.entry(0, 1), &BigInt::from(2));
    /// ```
    pub fn from_rows<T: Into<BigInt>>(
        rows: Vec<Vec<T>>,
        modulus: impl Into<BigInt>,
    ) -> Result<Self, ModRingError> {
        let ring = Ring::try_with(modulus)?;
        Ok(Self::from_int_matrix(IntMatrix::from_rows(rows)?, ring))
    }

    /// Wraps an unreduced integer matrix, reducing it into the ring.
    pub fn from_int_matrix(mat: IntMatrix, ring: Ring) -> Self {
        let mut res = Self { mat, ring };
        res.reduce_entries();
        res
    }

    pub fn nrows(&self) -> usize {
        self.mat.rows()
    }

    pub fn ncols(&self) -> usize {
        self.mat.cols()
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn modulus(&self) -> &BigInt {
        self.ring.modulus()
    }

    /// The underlying integer grid.
    pub fn as_int_matrix(&self) -> &IntMatrix {
        &self.mat
    }

    /// Returns the entry at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` is out of bounds.
    pub fn entry(&self, i: usize, j: usize) -> &BigInt {
        self.mat.entry(i, j)
    }

    /// Raw mutable access to the entry at `(i, j)`.
    ///
    /// Values written here are not reduced. The caller must keep them in `[0, N)` or call
    /// [`ModMatrix::reduce_entries`] before relying on the matrix being canonical; the next
    /// arithmetic operation reduces its own result.
    pub fn entry_mut(&mut self, i: usize, j: usize) -> &mut BigInt {
        self.mat.entry_mut(i, j)
    }

    /// Stores `value mod N` at `(i, j)`.
    pub fn set_entry(&mut self, i: usize, j: usize, value: &BigInt) {
        *self.mat.entry_mut(i, j) = self.ring.normalize(value);
    }

    /// Reduces every entry into `[0, N)`.
    pub fn reduce_entries(&mut self) {
        log::trace!(
            "reducing {}x{} matrix mod {}",
            self.mat.rows(),
            self.mat.cols(),
            self.ring.modulus()
        );
        let ring = &self.ring;
        for e in self.mat.entries_mut() {
            ring.normalize_in_place(e);
        }
    }

    fn with_grid(&self, mat: IntMatrix) -> Self {
        Self::from_int_matrix(mat, self.ring.clone())
    }

    /// Deep-copies `src`, grid and modulus, into `self`.
    pub fn set(&mut self, src: &Self) {
        self.clone_from(src);
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Sets entry `(i, i)` to 1 for `i < min(rows, cols)` and every other entry to 0.
    /// The modulus is left unchanged; over Z/1Z the diagonal reduces to 0.
    pub fn one(&mut self) {
        self.mat.set_one();
        self.reduce_entries();
    }

    /// Sets every entry to 0. The modulus is left unchanged.
    pub fn zero(&mut self) {
        self.mat.set_zero();
    }

    /// Computes `self + other mod N`. `other` is a matrix or a window of one.
    ///
    /// # Errors
    ///
    /// Returns `ModRingError::ModulusMismatch` if the moduli differ and
    /// `ModRingError::DimensionMismatch` if the shapes differ.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::mod_mat::ModMatrix;
    /// let a = ModMatrix::from_rows(vec![vec![3, 5], vec![6, 2]], 7).unwrap();
    /// let b = ModMatrix::from_rows(vec![vec![4, 4], vec![1, 6]], 7).unwrap();
    /// let c = a.add(&b).unwrap();
    /// assert_eq!(c, ModMatrix::from_rows(vec![vec![0, 2], vec![0, 1]], 7).unwrap());
    /// ```
    pub fn add<'b>(&self, other: impl Into<ModMatrixWindow<'b>>) -> Result<Self, ModRingError> {
        self.as_window().add(other)
    }

    /// Computes `self - other mod N`.
    pub fn sub<'b>(&self, other: impl Into<ModMatrixWindow<'b>>) -> Result<Self, ModRingError> {
        self.as_window().sub(other)
    }

    /// Computes `-self mod N`.
    pub fn neg(&self) -> Self {
        self.with_grid(self.mat.neg())
    }

    pub fn neg_assign(&mut self) {
        self.mat.neg_assign();
        self.reduce_entries();
    }

    /// Computes `c · self mod N`.
    pub fn scalar_mul(&self, c: &BigInt) -> Self {
        self.with_grid(self.mat.scalar_mul(c))
    }

    pub fn scalar_mul_si(&self, c: i64) -> Self {
        self.scalar_mul(&BigInt::from(c))
    }

    pub fn scalar_mul_ui(&self, c: u64) -> Self {
        self.scalar_mul(&BigInt::from(c))
    }

    pub fn scalar_mul_assign(&mut self, c: &BigInt) {
        self.mat.scalar_mul_assign(c);
        self.reduce_entries();
    }

    /// Computes the matrix product `self · other mod N`.
    ///
    /// # Errors
    ///
    /// Returns `ModRingError::ModulusMismatch` if the moduli differ and
    /// `ModRingError::DimensionMismatch` if the inner dimensions do not match.
    pub fn mul<'b>(&self, other: impl Into<ModMatrixWindow<'b>>) -> Result<Self, ModRingError> {
        self.as_window().mul(other)
    }

    /// Computes `self² mod N`. The matrix must be square.
    pub fn sqr(&self) -> Result<Self, ModRingError> {
        Ok(self.with_grid(self.mat.sqr()?))
    }

    /// Trace of the matrix, reduced mod N. The matrix must be square.
    pub fn trace(&self) -> Result<BigInt, ModRingError> {
        Ok(self.ring.normalize(&self.mat.trace()?))
    }

    pub fn transpose(&self) -> Self {
        Self {
            mat: self.mat.transpose(),
            ring: self.ring.clone(),
        }
    }

    /// Places `other` to the right of `self`.
    pub fn concat_horizontal<'b>(
        &self,
        other: impl Into<ModMatrixWindow<'b>>,
    ) -> Result<Self, ModRingError> {
        self.as_window().concat_horizontal(other)
    }

    /// Places `other` below `self`.
    pub fn concat_vertical<'b>(
        &self,
        other: impl Into<ModMatrixWindow<'b>>,
    ) -> Result<Self, ModRingError> {
        self.as_window().concat_vertical(other)
    }

    /// Two matrices are equal when both their moduli and their grids are equal.
    pub fn equal(&self, other: &Self) -> bool {
        self == other
    }

    pub fn is_zero(&self) -> bool {
        self.mat.is_zero()
    }

    pub fn is_empty(&self) -> bool {
        self.mat.is_empty()
    }

    pub fn is_square(&self) -> bool {
        self.mat.is_square()
    }

    /// Returns `true` if every entry lies in `[0, N)`.
    pub fn is_reduced(&self) -> bool {
        self.mat.entries().iter().all(|e| self.ring.is_reduced(e))
    }

    /// Fills the matrix with random entries whose bit length is at most that of `N`, then
    /// reduces them.
    pub fn randtest<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.mat.randtest(rng, self.ring.modulus().bits());
        self.reduce_entries();
    }

    /// Read-only view of the sub-rectangle `[r1, r2) × [c1, c2)`.
    ///
    /// # Errors
    ///
    /// Returns `ModRingError::IndexOutOfBounds` if the rectangle does not fit.
    pub fn window(
        &self,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
    ) -> Result<ModMatrixWindow<'_>, ModRingError> {
        Ok(ModMatrixWindow::new(self.mat.window(r1, c1, r2, c2)?, &self.ring))
    }

    /// The whole matrix as a read-only window.
    pub fn as_window(&self) -> ModMatrixWindow<'_> {
        ModMatrixWindow::new(self.mat.view(), &self.ring)
    }

    /// Mutable view of the sub-rectangle `[r1, r2) × [c1, c2)`.
    pub fn window_mut(
        &mut self,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
    ) -> Result<ModMatrixWindowMut<'_>, ModRingError> {
        self.mat.check_window(r1, c1, r2, c2)?;
        Ok(ModMatrixWindowMut::new(self, r1, c1, r2, c2))
    }

    pub fn to_json(&self) -> Result<String, ModRingError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a matrix, reducing its entries into `[0, N)`.
    pub fn from_json(data: &str) -> Result<Self, ModRingError> {
        Ok(serde_json::from_str(data)?)
    }
}

impl TryFrom<ModMatrixRepr> for ModMatrix {
    type Error = ModRingError;

    fn try_from(repr: ModMatrixRepr) -> Result<Self, Self::Error> {
        if repr.rows.checked_mul(repr.cols) != Some(repr.entries.len()) {
            return Err(ModRingError::DimensionMismatch(format!(
                "Expected {}x{} entries, got {}",
                repr.rows,
                repr.cols,
                repr.entries.len()
            )));
        }

        let mut mat = IntMatrix::zeros(repr.rows, repr.cols)?;
        mat.entries_mut().clone_from_slice(&repr.entries);
        Ok(Self::from_int_matrix(mat, repr.modulus))
    }
}

impl From<ModMatrix> for ModMatrixRepr {
    fn from(m: ModMatrix) -> Self {
        let (rows, cols) = (m.nrows(), m.ncols());
        Self {
            modulus: m.ring,
            rows,
            cols,
            entries: m.mat.entries().to_vec(),
        }
    }
}

impl fmt::Display for ModMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mod {}", self.mat, self.ring.modulus())
    }
}
