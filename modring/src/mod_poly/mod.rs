//! # Dense Modular Polynomials
//!
//! [`ModPoly`] stores the coefficients of a univariate polynomial over Z/NZ, index = degree.
//! Coefficients are always reduced and the top coefficient is never zero, so the stored
//! length is one plus the degree and the zero polynomial has length 0.

use crate::errors::ModRingError;
use crate::ring::{Ring, Vector};

use itertools::Itertools;

use num_bigint::BigInt;
use num_traits::{One, Zero};

use serde::{Deserialize, Serialize};

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ModPolyRepr", into = "ModPolyRepr")]
pub struct ModPoly {
    coeffs: Vector,
    ring: Ring,
}

#[derive(Serialize, Deserialize)]
struct ModPolyRepr {
    modulus: Ring,
    coeffs: Vector,
}

impl ModPoly {
    /// The zero polynomial over `ring`.
    pub fn zero(ring: Ring) -> Self {
        Self {
            coeffs: Vector::new(),
            ring,
        }
    }

    /// Builds a polynomial from coefficients in increasing degree order, reducing each
    /// coefficient modulo `modulus` and dropping zero leading terms.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::mod_poly::ModPoly;
    /// let p = ModPoly::from_coeffs(vec![3, 0, 6, 11], 11).unwrap();
    /// assert_eq!(p.len(), 3);
    /// assert_eq!(p.degree(), Some(2));
    /// ```
    pub fn from_coeffs<T: Into<BigInt>>(
        coeffs: Vec<T>,
        modulus: impl Into<BigInt>,
    ) -> Result<Self, ModRingError> {
        let ring = Ring::try_with(modulus)?;
        Ok(Self::with_ring(coeffs.into_iter().map(Into::into).collect(), ring))
    }

    /// Builds a polynomial over `ring`; see [`ModPoly::from_coeffs`].
    pub fn with_ring(mut coeffs: Vector, ring: Ring) -> Self {
        for c in coeffs.iter_mut() {
            ring.normalize_in_place(c);
        }
        let mut poly = Self { coeffs, ring };
        poly.normalise();
        poly
    }

    fn normalise(&mut self) {
        while self.coeffs.last().is_some_and(Zero::is_zero) {
            self.coeffs.pop();
        }
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn modulus(&self) -> &BigInt {
        self.ring.modulus()
    }

    /// Number of stored coefficients, one more than the degree.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    /// Coefficient of `x^i`; zero beyond the degree.
    pub fn coeff(&self, i: usize) -> BigInt {
        self.coeffs.get(i).cloned().unwrap_or_default()
    }

    /// Leading coefficient, `None` for the zero polynomial.
    pub fn lead(&self) -> Option<&BigInt> {
        self.coeffs.last()
    }

    pub fn is_monic(&self) -> bool {
        self.lead().is_some_and(One::is_one)
    }

    pub fn set_zero(&mut self) {
        self.coeffs.clear();
    }

    /// Multiplies every coefficient by `c` mod N.
    pub fn scalar_mul(&self, c: &BigInt) -> Self {
        let mut res = Self::zero(self.ring.clone());
        scalar_mul_vec(&mut res.coeffs, &self.coeffs, c, &self.ring);
        res.normalise();
        res
    }

    /// Returns the monic polynomial `lead⁻¹ · self`.
    ///
    /// The zero polynomial maps to the zero polynomial.
    ///
    /// # Errors
    ///
    /// Returns `ModRingError::NoInverse` if the leading coefficient is not a unit mod N.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::mod_poly::ModPoly;
    /// let p = ModPoly::from_coeffs(vec![3, 0, 6], 11).unwrap();
    /// let m = p.make_monic().unwrap();
    /// assert_eq!(m, ModPoly::from_coeffs(vec![6, 0, 1], 11).unwrap());
    /// ```
    pub fn make_monic(&self) -> Result<Self, ModRingError> {
        let mut res = Self::zero(self.ring.clone());
        self.make_monic_into(&mut res)?;
        Ok(res)
    }

    /// Writes the monic form of `self` into `res`, reusing its storage.
    ///
    /// On error `res` is left untouched.
    pub fn make_monic_into(&self, res: &mut Self) -> Result<(), ModRingError> {
        let Some(lead) = self.lead() else {
            res.ring.clone_from(&self.ring);
            res.set_zero();
            return Ok(());
        };
        let inv = self.ring.inv(lead)?;

        res.ring.clone_from(&self.ring);
        scalar_mul_vec(&mut res.coeffs, &self.coeffs, &inv, &self.ring);
        Ok(())
    }

    /// In-place form of [`ModPoly::make_monic`]. On error `self` is left untouched.
    pub fn make_monic_assign(&mut self) -> Result<(), ModRingError> {
        let Some(lead) = self.lead() else {
            return Ok(());
        };
        let inv = self.ring.inv(lead)?;

        for c in self.coeffs.iter_mut() {
            *c = self.ring.mul(c, &inv);
        }
        Ok(())
    }
}

/// Sets `res` to `src · c mod N`, resizing `res` to the length of `src`.
fn scalar_mul_vec(res: &mut Vector, src: &[BigInt], c: &BigInt, ring: &Ring) {
    res.resize(src.len(), BigInt::zero());
    for (r, s) in res.iter_mut().zip(src) {
        *r = ring.mul(s, c);
    }
}

impl From<ModPolyRepr> for ModPoly {
    fn from(repr: ModPolyRepr) -> Self {
        Self::with_ring(repr.coeffs, repr.modulus)
    }
}

impl From<ModPoly> for ModPolyRepr {
    fn from(poly: ModPoly) -> Self {
        Self {
            modulus: poly.ring,
            coeffs: poly.coeffs,
        }
    }
}

impl fmt::Display for ModPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] mod {}", self.coeffs.iter().join(" "), self.ring.modulus())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poly11(coeffs: Vec<i64>) -> ModPoly {
        ModPoly::from_coeffs(coeffs, 11).unwrap()
    }

    #[test]
    fn test_from_coeffs_normalises() {
        let p = poly11(vec![-1, 12, 0, 22]);
        assert_eq!(p.coeffs(), &[BigInt::from(10), BigInt::from(1)]);
        assert_eq!(p.degree(), Some(1));
        assert_eq!(p.coeff(5), BigInt::from(0));

        let z = poly11(vec![0, 11, -22]);
        assert!(z.is_zero());
        assert_eq!(z.degree(), None);
        assert!(ModPoly::from_coeffs(vec![1], 0).is_err());
    }

    #[test]
    fn test_make_monic() -> Result<(), ModRingError> {
        let p = poly11(vec![3, 0, 6]);
        let m = p.make_monic()?;
        assert_eq!(m, poly11(vec![6, 0, 1]));
        assert!(m.is_monic());
        assert_eq!(m.len(), p.len());
        Ok(())
    }

    #[test]
    fn test_make_monic_zero() -> Result<(), ModRingError> {
        let z = ModPoly::zero(Ring::try_with(11)?);
        assert!(z.make_monic()?.is_zero());

        let mut res = poly11(vec![1, 2, 3]);
        z.make_monic_into(&mut res)?;
        assert!(res.is_zero());
        Ok(())
    }

    #[test]
    fn test_make_monic_idempotent() -> Result<(), ModRingError> {
        let m = poly11(vec![4, 7, 9, 2]).make_monic()?;
        assert_eq!(m.make_monic()?, m);
        Ok(())
    }

    #[test]
    fn test_make_monic_in_place() -> Result<(), ModRingError> {
        let mut p = poly11(vec![3, 0, 6]);
        p.make_monic_assign()?;
        assert_eq!(p, poly11(vec![6, 0, 1]));
        Ok(())
    }

    #[test]
    fn test_make_monic_not_invertible() -> Result<(), ModRingError> {
        let p = ModPoly::from_coeffs(vec![1, 3, 4], 12)?;
        assert!(matches!(p.make_monic(), Err(ModRingError::NoInverse(_))));

        let mut res = ModPoly::from_coeffs(vec![5, 5], 12)?;
        let before = res.clone();
        assert!(p.make_monic_into(&mut res).is_err());
        assert_eq!(res, before);

        let mut q = p.clone();
        assert!(q.make_monic_assign().is_err());
        assert_eq!(q, p);
        Ok(())
    }

    #[test]
    fn test_make_monic_into_reuses_larger_target() -> Result<(), ModRingError> {
        let p = poly11(vec![2, 4]);
        let mut res = poly11(vec![1, 1, 1, 1, 1]);
        p.make_monic_into(&mut res)?;
        assert_eq!(res, poly11(vec![6, 1]));

        let mut other_ring = ModPoly::from_coeffs(vec![1, 1], 7)?;
        p.make_monic_into(&mut other_ring)?;
        assert_eq!(other_ring.modulus(), &BigInt::from(11));
        Ok(())
    }

    #[test]
    fn test_scalar_mul_drops_vanishing_lead() -> Result<(), ModRingError> {
        let p = ModPoly::from_coeffs(vec![3, 1, 6], 12)?;
        assert_eq!(p.scalar_mul(&BigInt::from(2)), ModPoly::from_coeffs(vec![6, 2], 12)?);
        Ok(())
    }

    #[test]
    fn test_serde_normalises() -> Result<(), ModRingError> {
        let p = poly11(vec![3, 0, 6]);
        let json = serde_json::to_string(&p)?;
        assert_eq!(serde_json::from_str::<ModPoly>(&json)?, p);
        Ok(())
    }
}
