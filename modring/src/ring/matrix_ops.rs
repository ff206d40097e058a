//! Unreduced integer matrices.
//!
//! [`IntMatrix`] does raw arithmetic over Z with no notion of a modulus. The modular
//! containers delegate every numeric kernel here and reduce the result afterwards.

use crate::errors::ModRingError;

use itertools::Itertools;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

use rand::Rng;

use std::fmt;

/// A `rows × cols` grid of arbitrary-precision integers stored in row-major order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct IntMatrix {
    rows: usize,
    cols: usize,
    entries: Vec<BigInt>,
}

impl IntMatrix {
    /// Allocates a zero matrix of the given shape.
    ///
    /// # Errors
    ///
    /// Returns `ModRingError::AllocationError` if `rows * cols` overflows or the storage
    /// cannot be reserved.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, ModRingError> {
        let len = rows.checked_mul(cols).ok_or_else(|| {
            ModRingError::AllocationError(format!("{}x{} matrix size overflows usize", rows, cols))
        })?;

        let mut entries = Vec::new();
        entries.try_reserve_exact(len).map_err(|e| {
            ModRingError::AllocationError(format!(
                "Could not allocate {}x{} matrix: {}",
                rows, cols, e
            ))
        })?;
        entries.resize(len, BigInt::zero());

        Ok(Self {
            rows,
            cols,
            entries,
        })
    }

    /// Builds a matrix from a list of rows.
    ///
    /// An empty list gives a `0 × 0` matrix.
    ///
    /// # Errors
    ///
    /// Returns `ModRingError::DimensionMismatch` if the rows have different lengths.
    pub fn from_rows<T: Into<BigInt>>(rows: Vec<Vec<T>>) -> Result<Self, ModRingError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);

        let mut entries = Vec::with_capacity(nrows * ncols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(ModRingError::DimensionMismatch(format!(
                    "Row {} has length {} but expected {}",
                    i,
                    row.len(),
                    ncols
                )));
            }
            entries.extend(row.into_iter().map(Into::into));
        }

        Ok(Self {
            rows: nrows,
            cols: ncols,
            entries,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the entry at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    pub fn entry(&self, i: usize, j: usize) -> &BigInt {
        assert!(i < self.rows && j < self.cols, "entry ({}, {}) out of bounds", i, j);
        &self.entries[i * self.cols + j]
    }

    /// Mutable access to the entry at `(i, j)`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= rows` or `j >= cols`.
    pub fn entry_mut(&mut self, i: usize, j: usize) -> &mut BigInt {
        assert!(i < self.rows && j < self.cols, "entry ({}, {}) out of bounds", i, j);
        &mut self.entries[i * self.cols + j]
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[BigInt] {
        &self.entries[i * self.cols..(i + 1) * self.cols]
    }

    /// All entries in row-major order.
    pub fn entries(&self) -> &[BigInt] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [BigInt] {
        &mut self.entries
    }

    pub fn set_zero(&mut self) {
        self.entries.iter_mut().for_each(BigInt::set_zero);
    }

    /// Sets entry `(i, i)` to 1 for `i < min(rows, cols)` and every other entry to 0.
    pub fn set_one(&mut self) {
        self.set_zero();
        for i in 0..self.rows.min(self.cols) {
            self.entries[i * self.cols + i] = BigInt::one();
        }
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(Zero::is_zero)
    }

    /// A matrix is empty if it has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn check_square(&self, op: &str) -> Result<(), ModRingError> {
        if !self.is_square() {
            return Err(ModRingError::DimensionMismatch(format!(
                "{}: matrix must be square, got {}x{}",
                op, self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Checks that `[r1, r2) × [c1, c2)` is a valid sub-rectangle of this matrix.
    pub fn check_window(
        &self,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
    ) -> Result<(), ModRingError> {
        if r1 > r2 || c1 > c2 || r2 > self.rows || c2 > self.cols {
            return Err(ModRingError::IndexOutOfBounds(format!(
                "Window [{}, {}) x [{}, {}) does not fit in a {}x{} matrix",
                r1, r2, c1, c2, self.rows, self.cols
            )));
        }
        Ok(())
    }

    /// Borrows the whole grid as a view.
    pub fn view(&self) -> IntMatrixView<'_> {
        IntMatrixView::new(self, 0, 0, self.rows, self.cols)
    }

    /// Borrows the sub-rectangle `[r1, r2) × [c1, c2)`.
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
    ) -> Result<IntMatrixView<'_>, ModRingError> {
        self.check_window(r1, c1, r2, c2)?;
        Ok(IntMatrixView::new(self, r1, c1, r2 - r1, c2 - c1))
    }

    /// Computes `self + other` entrywise.
    pub fn add(&self, other: &Self) -> Result<Self, ModRingError> {
        self.view().add(&other.view())
    }

    /// Computes `self - other` entrywise.
    pub fn sub(&self, other: &Self) -> Result<Self, ModRingError> {
        self.view().sub(&other.view())
    }

    pub fn neg(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            entries: self.entries.iter().map(|a| -a).collect(),
        }
    }

    pub fn neg_assign(&mut self) {
        for a in self.entries.iter_mut() {
            *a = -std::mem::take(a);
        }
    }

    pub fn scalar_mul(&self, c: &BigInt) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            entries: self.entries.iter().map(|a| a * c).collect(),
        }
    }

    pub fn scalar_mul_assign(&mut self, c: &BigInt) {
        for a in self.entries.iter_mut() {
            *a *= c;
        }
    }

    /// Computes the matrix product `C = AB`.
    pub fn mul(&self, other: &Self) -> Result<Self, ModRingError> {
        self.view().mul(&other.view())
    }

    /// Computes `A²`.
    pub fn sqr(&self) -> Result<Self, ModRingError> {
        self.check_square("sqr")?;
        self.view().mul(&self.view())
    }

    /// Sum of the diagonal entries. The trace of a `0 × 0` matrix is 0.
    pub fn trace(&self) -> Result<BigInt, ModRingError> {
        self.check_square("trace")?;
        Ok((0..self.rows).map(|i| self.entry(i, i)).sum())
    }

    pub fn transpose(&self) -> Self {
        let entries = (0..self.cols)
            .cartesian_product(0..self.rows)
            .map(|(j, i)| self.entry(i, j).clone())
            .collect();
        Self {
            rows: self.cols,
            cols: self.rows,
            entries,
        }
    }

    /// Places `other` to the right of `self`.
    pub fn concat_horizontal(&self, other: &Self) -> Result<Self, ModRingError> {
        self.view().concat_horizontal(&other.view())
    }

    /// Places `other` below `self`.
    pub fn concat_vertical(&self, other: &Self) -> Result<Self, ModRingError> {
        self.view().concat_vertical(&other.view())
    }

    /// Fills the matrix with random signed entries of at most `bits` bits.
    pub fn randtest<R: Rng + ?Sized>(&mut self, rng: &mut R, bits: u64) {
        for a in self.entries.iter_mut() {
            *a = random_bigint(rng, bits);
        }
    }
}

/// A borrowed `rows × cols` sub-rectangle of an [`IntMatrix`], anchored at `(r1, c1)`.
///
/// The binary kernels run on views, so a window of a matrix can be an operand without
/// copying it first.
#[derive(Debug, Clone, Copy)]
pub struct IntMatrixView<'a> {
    mat: &'a IntMatrix,
    r1: usize,
    c1: usize,
    rows: usize,
    cols: usize,
}

impl<'a> IntMatrixView<'a> {
    /// The rectangle must lie inside `mat`.
    pub(crate) fn new(mat: &'a IntMatrix, r1: usize, c1: usize, rows: usize, cols: usize) -> Self {
        debug_assert!(r1 + rows <= mat.rows && c1 + cols <= mat.cols);
        Self {
            mat,
            r1,
            c1,
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Entry `(i, j)` of the view.
    ///
    /// # Panics
    ///
    /// Panics if `(i, j)` lies outside the view.
    pub fn entry(&self, i: usize, j: usize) -> &'a BigInt {
        assert!(i < self.rows && j < self.cols, "view entry ({}, {}) out of bounds", i, j);
        self.mat.entry(self.r1 + i, self.c1 + j)
    }

    /// Row `i` of the view as a slice of the parent's storage.
    pub fn row(&self, i: usize) -> &'a [BigInt] {
        assert!(i < self.rows, "view row {} out of bounds", i);
        let start = (self.r1 + i) * self.mat.cols + self.c1;
        &self.mat.entries[start..start + self.cols]
    }

    fn rows_iter(self) -> impl Iterator<Item = &'a [BigInt]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn is_zero(&self) -> bool {
        self.rows_iter().flatten().all(Zero::is_zero)
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Copies the view into an owning matrix.
    pub fn to_matrix(&self) -> Result<IntMatrix, ModRingError> {
        let mut m = IntMatrix::zeros(self.rows, self.cols)?;
        for (dst, src) in m.entries.chunks_mut(self.cols.max(1)).zip(self.rows_iter()) {
            dst.clone_from_slice(src);
        }
        Ok(m)
    }

    fn check_same_shape(&self, other: &IntMatrixView<'_>, op: &str) -> Result<(), ModRingError> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(ModRingError::DimensionMismatch(format!(
                "Matrix shapes must match for {} ({}x{} vs {}x{})",
                op, self.rows, self.cols, other.rows, other.cols
            )));
        }
        Ok(())
    }

    fn zip_with(
        &self,
        other: &IntMatrixView<'_>,
        f: impl Fn(&BigInt, &BigInt) -> BigInt,
    ) -> IntMatrix {
        let f = &f;
        let entries = self
            .rows_iter()
            .zip(other.rows_iter())
            .flat_map(move |(a, b)| a.iter().zip(b).map(move |(x, y)| f(x, y)))
            .collect();
        IntMatrix {
            rows: self.rows,
            cols: self.cols,
            entries,
        }
    }

    /// Computes `self + other` entrywise.
    pub fn add(&self, other: &IntMatrixView<'_>) -> Result<IntMatrix, ModRingError> {
        self.check_same_shape(other, "addition")?;
        Ok(self.zip_with(other, |a, b| a + b))
    }

    /// Computes `self - other` entrywise.
    pub fn sub(&self, other: &IntMatrixView<'_>) -> Result<IntMatrix, ModRingError> {
        self.check_same_shape(other, "subtraction")?;
        Ok(self.zip_with(other, |a, b| a - b))
    }

    /// Computes the matrix product `C = AB`.
    ///
    /// # Errors
    ///
    /// Returns `ModRingError::DimensionMismatch` if the inner dimensions do not match.
    pub fn mul(&self, other: &IntMatrixView<'_>) -> Result<IntMatrix, ModRingError> {
        if self.cols != other.rows {
            return Err(ModRingError::DimensionMismatch(format!(
                "Inner dimensions must match for matrix multiplication ({} vs {})",
                self.cols, other.rows
            )));
        }

        let mut c = IntMatrix::zeros(self.rows, other.cols)?;
        for (i, a_row) in self.rows_iter().enumerate() {
            for (k, a_ik) in a_row.iter().enumerate() {
                if a_ik.is_zero() {
                    continue;
                }
                let b_row = other.row(k);
                let c_row = &mut c.entries[i * other.cols..(i + 1) * other.cols];
                for (c_ij, b_kj) in c_row.iter_mut().zip(b_row) {
                    *c_ij += a_ik * b_kj;
                }
            }
        }
        Ok(c)
    }

    /// Places `other` to the right of `self`.
    pub fn concat_horizontal(&self, other: &IntMatrixView<'_>) -> Result<IntMatrix, ModRingError> {
        if self.rows != other.rows {
            return Err(ModRingError::DimensionMismatch(format!(
                "Row counts must match for horizontal concatenation ({} vs {})",
                self.rows, other.rows
            )));
        }

        let entries = self
            .rows_iter()
            .zip(other.rows_iter())
            .flat_map(|(a, b)| a.iter().chain(b).cloned())
            .collect();
        Ok(IntMatrix {
            rows: self.rows,
            cols: self.cols + other.cols,
            entries,
        })
    }

    /// Places `other` below `self`.
    pub fn concat_vertical(&self, other: &IntMatrixView<'_>) -> Result<IntMatrix, ModRingError> {
        if self.cols != other.cols {
            return Err(ModRingError::DimensionMismatch(format!(
                "Column counts must match for vertical concatenation ({} vs {})",
                self.cols, other.cols
            )));
        }

        let entries = self
            .rows_iter()
            .chain(other.rows_iter())
            .flatten()
            .cloned()
            .collect();
        Ok(IntMatrix {
            rows: self.rows + other.rows,
            cols: self.cols,
            entries,
        })
    }
}

impl<'a> From<&'a IntMatrix> for IntMatrixView<'a> {
    fn from(mat: &'a IntMatrix) -> Self {
        mat.view()
    }
}

fn random_bigint<R: Rng + ?Sized>(rng: &mut R, bits: u64) -> BigInt {
    if bits == 0 {
        return BigInt::zero();
    }

    let nbits = rng.random_range(0..=bits);
    let words = nbits.div_ceil(32) as usize;
    let mut digits: Vec<u32> = (0..words).map(|_| rng.random()).collect();
    if let Some(top) = digits.last_mut() {
        *top >>= (words as u64 * 32 - nbits) as u32;
    }

    let sign = if rng.random_bool(0.5) {
        Sign::Minus
    } else {
        Sign::Plus
    };
    BigInt::from_biguint(sign, BigUint::new(digits))
}

impl fmt::Display for IntMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = (0..self.rows).map(|i| format!("[{}]", self.row(i).iter().join(" ")));
        write!(f, "[{}]", rows.format("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn m(rows: Vec<Vec<i64>>) -> IntMatrix {
        IntMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_from_rows_ragged() {
        assert!(matches!(
            IntMatrix::from_rows(vec![vec![1, 2], vec![3]]),
            Err(ModRingError::DimensionMismatch(_))
        ));
        let empty = IntMatrix::from_rows(Vec::<Vec<i64>>::new()).unwrap();
        assert!(empty.is_empty());
        assert!(empty.is_square());
    }

    #[test]
    fn test_zeros_overflow() {
        assert!(matches!(
            IntMatrix::zeros(usize::MAX, 2),
            Err(ModRingError::AllocationError(_))
        ));
    }

    #[test]
    fn test_add_sub_neg() {
        let a = m(vec![vec![3, 5], vec![6, 2]]);
        let b = m(vec![vec![4, 4], vec![1, 6]]);
        assert_eq!(a.add(&b).unwrap(), m(vec![vec![7, 9], vec![7, 8]]));
        assert_eq!(a.sub(&b).unwrap(), m(vec![vec![-1, 1], vec![5, -4]]));
        assert_eq!(a.neg(), m(vec![vec![-3, -5], vec![-6, -2]]));

        let mut c = a.clone();
        c.neg_assign();
        assert_eq!(c, a.neg());
        assert!(a.add(&m(vec![vec![1, 2]])).is_err());
    }

    #[test]
    fn test_matrix_mul_ok() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![5, 6], vec![7, 8]]);
        assert_eq!(a.mul(&b).unwrap(), m(vec![vec![19, 22], vec![43, 50]]));
        assert_eq!(a.sqr().unwrap(), m(vec![vec![7, 10], vec![15, 22]]));
    }

    #[test]
    fn test_matrix_mul_dimension_mismatch() {
        let a = m(vec![vec![1, 2], vec![3, 4]]); // 2x2
        let b = m(vec![vec![5, 6, 7], vec![8, 9, 10]]); // 2x3 -> Should work
        assert_eq!(a.mul(&b).unwrap().cols(), 3);

        let f = m(vec![vec![1], vec![2], vec![3]]); // 3x1 -> Should fail
        assert!(a.mul(&f).is_err());
        assert!(b.sqr().is_err());
    }

    #[test]
    fn test_identity_non_square() {
        let mut a = IntMatrix::zeros(2, 3).unwrap();
        a.set_one();
        assert_eq!(a, m(vec![vec![1, 0, 0], vec![0, 1, 0]]));

        let mut b = IntMatrix::zeros(3, 1).unwrap();
        b.set_one();
        assert_eq!(b, m(vec![vec![1], vec![0], vec![0]]));
    }

    #[test]
    fn test_trace_transpose() {
        let a = m(vec![vec![1, 2, 3], vec![4, 5, 6]]);
        assert!(a.trace().is_err());
        assert_eq!(a.transpose(), m(vec![vec![1, 4], vec![2, 5], vec![3, 6]]));
        assert_eq!(m(vec![vec![2, 9], vec![9, -7]]).trace().unwrap(), BigInt::from(-5));
    }

    #[test]
    fn test_concat() {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let b = m(vec![vec![5], vec![6]]);
        assert_eq!(
            a.concat_horizontal(&b).unwrap(),
            m(vec![vec![1, 2, 5], vec![3, 4, 6]])
        );
        assert!(a.concat_vertical(&b).is_err());
        assert_eq!(
            a.concat_vertical(&m(vec![vec![7, 8]])).unwrap(),
            m(vec![vec![1, 2], vec![3, 4], vec![7, 8]])
        );
    }

    #[test]
    fn test_view_operands() -> Result<(), ModRingError> {
        let a = m(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
        assert!(matches!(
            a.window(0, 0, 4, 1),
            Err(ModRingError::IndexOutOfBounds(_))
        ));

        let top_left = a.window(0, 0, 2, 2)?;
        let bottom_right = a.window(1, 1, 3, 3)?;
        assert_eq!(top_left.row(1), &[BigInt::from(4), BigInt::from(5)]);
        assert_eq!(bottom_right.entry(1, 0), &BigInt::from(8));

        assert_eq!(top_left.add(&bottom_right)?, m(vec![vec![6, 8], vec![12, 14]]));
        assert_eq!(top_left.sub(&bottom_right)?, m(vec![vec![-4, -4], vec![-4, -4]]));
        assert_eq!(
            top_left.mul(&bottom_right)?,
            top_left.to_matrix()?.mul(&bottom_right.to_matrix()?)?
        );
        assert_eq!(
            a.window(0, 2, 3, 3)?.concat_horizontal(&a.window(0, 0, 3, 1)?)?,
            m(vec![vec![3, 1], vec![6, 4], vec![9, 7]])
        );
        assert_eq!(
            a.window(2, 1, 3, 3)?.concat_vertical(&top_left)?,
            m(vec![vec![8, 9], vec![1, 2], vec![4, 5]])
        );
        assert!(top_left.add(&a.view()).is_err());
        Ok(())
    }

    #[test]
    fn test_empty_views() -> Result<(), ModRingError> {
        let a = m(vec![vec![1, 2], vec![3, 4]]);
        let no_cols = a.window(0, 1, 2, 1)?;
        assert!(no_cols.is_empty());
        assert!(no_cols.is_zero());
        assert_eq!(no_cols.to_matrix()?, IntMatrix::zeros(2, 0)?);
        assert_eq!(no_cols.mul(&a.window(1, 0, 1, 2)?)?, IntMatrix::zeros(2, 2)?);
        Ok(())
    }

    #[test]
    fn test_randtest_respects_bits() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut a = IntMatrix::zeros(6, 6).unwrap();
        a.randtest(&mut rng, 70);
        assert!(a.entries().iter().all(|e| e.bits() <= 70));

        a.randtest(&mut rng, 0);
        assert!(a.is_zero());
    }

    #[test]
    fn test_display() {
        let a = m(vec![vec![1, -2], vec![3, 4]]);
        assert_eq!(a.to_string(), "[[1 -2]\n[3 4]]");
    }
}
