//! # Sparse Multivariate Polynomials
//!
//! [`MPoly`] keeps parallel arrays of nonzero coefficients and packed exponents, with terms in
//! descending lexicographic order. No stored coefficient is ever zero: the number of terms is
//! exactly the number of nonzero monomials.

pub mod exponents;

use crate::errors::ModRingError;

use itertools::Itertools;

use num_bigint::BigInt;
use num_traits::Zero;

use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A sparse polynomial with integer coefficients in `nvars` variables.
///
/// Equality and hashing look at the terms, not at the exponent width they are packed with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MPolyRepr", into = "MPolyRepr")]
pub struct MPoly {
    nvars: usize,
    bits: u32,
    coeffs: Vec<BigInt>,
    exps: Vec<u64>,
}

#[derive(Serialize, Deserialize)]
struct MPolyRepr {
    nvars: usize,
    terms: Vec<(BigInt, Vec<u64>)>,
}

impl MPoly {
    /// The zero polynomial in `nvars` variables.
    pub fn new(nvars: usize) -> Self {
        Self {
            nvars,
            bits: exponents::MIN_BITS,
            coeffs: Vec::new(),
            exps: Vec::new(),
        }
    }

    /// Builds a polynomial from `(coefficient, exponent vector)` pairs.
    ///
    /// Repeated monomials are summed, zero coefficients dropped, and the exponent width is
    /// chosen from the largest exponent.
    ///
    /// # Errors
    ///
    /// Returns `ModRingError::DimensionMismatch` if an exponent vector does not have
    /// `nvars` entries.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::mpoly::MPoly;
    /// let p = MPoly::from_terms(2, vec![(5, vec![2, 0]), (-3, vec![0, 1]), (0, vec![1, 1])]).unwrap();
    /// assert_eq!(p.len(), 2);
    /// ```
    pub fn from_terms<T: Into<BigInt>>(
        nvars: usize,
        terms: Vec<(T, Vec<u64>)>,
    ) -> Result<Self, ModRingError> {
        let mut merged: BTreeMap<Vec<u64>, BigInt> = BTreeMap::new();
        for (coeff, exp) in terms {
            if exp.len() != nvars {
                return Err(ModRingError::DimensionMismatch(format!(
                    "Exponent vector has {} entries but the polynomial has {} variables",
                    exp.len(),
                    nvars
                )));
            }
            let coeff: BigInt = coeff.into();
            *merged.entry(exp).or_default() += coeff;
        }

        let kept = merged
            .into_iter()
            .rev()
            .filter(|(_, c)| !c.is_zero())
            .collect_vec();
        let max_exp = kept
            .iter()
            .flat_map(|(exp, _)| exp.iter().copied())
            .max()
            .unwrap_or(0);

        let mut poly = Self::new(nvars);
        poly.bits = exponents::bits_for(max_exp);
        poly.exps
            .reserve(kept.len() * exponents::words_per_exp(poly.bits, nvars));
        for (exp, coeff) in kept {
            exponents::pack(&exp, poly.bits, &mut poly.exps);
            poly.coeffs.push(coeff);
        }
        Ok(poly)
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn nvars(&self) -> usize {
        self.nvars
    }

    /// Bits per exponent field.
    pub fn bits(&self) -> u32 {
        self.bits
    }

    pub fn words_per_exp(&self) -> usize {
        exponents::words_per_exp(self.bits, self.nvars)
    }

    pub fn coeffs(&self) -> &[BigInt] {
        &self.coeffs
    }

    /// The packed exponent words of every term, term after term.
    pub fn packed_exps(&self) -> &[u64] {
        &self.exps
    }

    /// Exponent vector of term `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    pub fn exponents(&self, i: usize) -> Vec<u64> {
        let n = self.words_per_exp();
        exponents::unpack(&self.exps[i * n..(i + 1) * n], self.bits, self.nvars)
    }

    pub fn terms(&self) -> Vec<(BigInt, Vec<u64>)> {
        (0..self.len())
            .map(|i| (self.coeffs[i].clone(), self.exponents(i)))
            .collect()
    }

    fn set_length_zero(&mut self) {
        self.bits = exponents::MIN_BITS;
        self.coeffs.clear();
        self.exps.clear();
    }

    /// Writes `c · self` into `out`, reusing its storage.
    ///
    /// A zero scalar leaves `out` as the empty polynomial. Otherwise `out` takes the
    /// exponent width and exponent words of `self` verbatim and every coefficient is
    /// multiplied by `c`.
    pub fn scalar_mul_into(&self, out: &mut Self, c: &BigInt) {
        out.nvars = self.nvars;
        if c.is_zero() {
            log::trace!("scalar multiple by zero, clearing {} terms", out.len());
            out.set_length_zero();
            return;
        }

        out.bits = self.bits;
        out.exps.clone_from(&self.exps);
        out.coeffs.resize(self.coeffs.len(), BigInt::zero());
        for (o, b) in out.coeffs.iter_mut().zip(&self.coeffs) {
            *o = b * c;
        }
    }

    /// Returns `c · self`.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::mpoly::MPoly;
    /// # use num_bigint::BigInt;
    /// let p = MPoly::from_terms(2, vec![(5, vec![2, 0]), (-3, vec![0, 1])]).unwrap();
    /// let q = p.scalar_mul(&BigInt::from(3));
    /// assert_eq!(q.coeffs(), &[BigInt::from(15), BigInt::from(-9)]);
    /// assert!(p.scalar_mul(&BigInt::from(0)).is_zero());
    /// ```
    pub fn scalar_mul(&self, c: &BigInt) -> Self {
        let mut out = Self::new(self.nvars);
        self.scalar_mul_into(&mut out, c);
        out
    }

    pub fn scalar_mul_ui(&self, c: u64) -> Self {
        self.scalar_mul(&BigInt::from(c))
    }

    pub fn scalar_mul_si(&self, c: i64) -> Self {
        self.scalar_mul(&BigInt::from(c))
    }

    /// Multiplies in place; the exponent words are left as they are.
    pub fn scalar_mul_assign(&mut self, c: &BigInt) {
        if c.is_zero() {
            self.set_length_zero();
            return;
        }

        for coeff in self.coeffs.iter_mut() {
            *coeff *= c;
        }
    }
}

impl PartialEq for MPoly {
    fn eq(&self, other: &Self) -> bool {
        if self.nvars != other.nvars || self.coeffs != other.coeffs {
            return false;
        }
        if self.bits == other.bits {
            return self.exps == other.exps;
        }
        (0..self.len()).all(|i| self.exponents(i) == other.exponents(i))
    }
}

impl Eq for MPoly {}

impl Hash for MPoly {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.nvars.hash(state);
        self.coeffs.hash(state);
        for i in 0..self.len() {
            self.exponents(i).hash(state);
        }
    }
}

impl TryFrom<MPolyRepr> for MPoly {
    type Error = ModRingError;

    fn try_from(repr: MPolyRepr) -> Result<Self, Self::Error> {
        MPoly::from_terms(repr.nvars, repr.terms)
    }
}

impl From<MPoly> for MPolyRepr {
    fn from(poly: MPoly) -> Self {
        Self {
            nvars: poly.nvars,
            terms: poly.terms(),
        }
    }
}

impl fmt::Display for MPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let terms = self.terms().into_iter().map(|(coeff, exp)| {
            let monomial = exp
                .iter()
                .enumerate()
                .filter(|(_, e)| **e > 0)
                .map(|(v, &e)| if e == 1 { format!("x{}", v) } else { format!("x{}^{}", v, e) })
                .collect_vec();
            if monomial.is_empty() {
                coeff.to_string()
            } else {
                format!("{}*{}", coeff, monomial.join("*"))
            }
        });
        write!(f, "{}", terms.format(" + "))
    }
}
