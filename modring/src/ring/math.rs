//! Implementation of ring ops using modular arithmetic over arbitrary-precision integers.

use crate::errors::ModRingError;

use super::extended_gcd;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use serde::{Deserialize, Serialize};

/// Reduces `value` into the canonical range `[0, modulus)`.
///
/// # Errors
///
/// Returns `ModRingError::InvalidModulus` if `modulus <= 0`.
///
/// # Example
///
/// ```
/// # use modring::ring::reduce;
/// # use num_bigint::BigInt;
/// let r = reduce(&BigInt::from(-3), &BigInt::from(7)).unwrap();
/// assert_eq!(r, BigInt::from(4));
/// assert!(reduce(&BigInt::from(3), &BigInt::from(0)).is_err());
/// ```
pub fn reduce(value: &BigInt, modulus: &BigInt) -> Result<BigInt, ModRingError> {
    check_modulus(modulus)?;
    Ok(value.mod_floor(modulus))
}

fn check_modulus(modulus: &BigInt) -> Result<(), ModRingError> {
    if !modulus.is_positive() {
        return Err(ModRingError::InvalidModulus(format!(
            "Modulus must be positive, got {}",
            modulus
        )));
    }

    Ok(())
}

/// Represents the residue ring Z/NZ for a runtime-chosen modulus `N > 0`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BigInt", into = "BigInt")]
pub struct Ring {
    modulus: BigInt,
}

impl Ring {
    /// Create a new Ring with the given modulus.
    ///
    /// The modulus must be positive. `N = 1` is accepted and yields the zero ring.
    pub fn try_with(modulus: impl Into<BigInt>) -> Result<Self, ModRingError> {
        let modulus = modulus.into();
        check_modulus(&modulus)?;

        Ok(Ring { modulus })
    }

    /// Returns the modulus of the ring.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::ring::Ring;
    /// # use num_bigint::BigInt;
    /// let ring = Ring::try_with(13).unwrap();
    /// assert_eq!(ring.modulus(), &BigInt::from(13));
    /// ```
    pub fn modulus(&self) -> &BigInt {
        &self.modulus
    }

    /// Normalizes a value to be within the range `[0, modulus - 1]`.
    ///
    /// Negative values wrap around.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::ring::Ring;
    /// # use num_bigint::BigInt;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.normalize(&BigInt::from(15)), BigInt::from(5));
    /// assert_eq!(ring.normalize(&BigInt::from(-3)), BigInt::from(7));
    /// assert_eq!(ring.normalize(&BigInt::from(10)), BigInt::from(0));
    /// ```
    pub fn normalize(&self, value: &BigInt) -> BigInt {
        value.mod_floor(&self.modulus)
    }

    /// Reduces `value` in place.
    pub fn normalize_in_place(&self, value: &mut BigInt) {
        if value.is_negative() || *value >= self.modulus {
            *value = value.mod_floor(&self.modulus);
        }
    }

    /// Returns `true` if `value` already lies in `[0, modulus)`.
    pub fn is_reduced(&self, value: &BigInt) -> bool {
        !value.is_negative() && *value < self.modulus
    }

    /// Computes `(a + b) mod modulus`.
    pub fn add(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.normalize(&(a + b))
    }

    /// Computes `(a - b) mod modulus`.
    pub fn sub(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.normalize(&(a - b))
    }

    /// Computes `(a * b) mod modulus`.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::ring::Ring;
    /// # use num_bigint::BigInt;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.mul(&BigInt::from(7), &BigInt::from(5)), BigInt::from(5));
    /// assert_eq!(ring.mul(&BigInt::from(-2), &BigInt::from(6)), BigInt::from(8));
    /// ```
    pub fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        self.normalize(&(a * b))
    }

    /// Computes the additive inverse `-a mod modulus`.
    pub fn neg(&self, a: &BigInt) -> BigInt {
        self.normalize(&(-a))
    }

    /// Computes the modular multiplicative inverse `a^-1 mod modulus`.
    ///
    /// The inverse exists if and only if `gcd(a, modulus) == 1`.
    /// Uses the Extended Euclidean Algorithm.
    ///
    /// # Errors
    ///
    /// Returns `ModRingError::NoInverse` if the inverse does not exist, which
    /// includes `a ≡ 0` for any modulus other than 1.
    ///
    /// # Example
    ///
    /// ```
    /// # use modring::ring::Ring;
    /// # use num_bigint::BigInt;
    /// let ring = Ring::try_with(10).unwrap();
    /// assert_eq!(ring.inv(&BigInt::from(3)).unwrap(), BigInt::from(7));
    /// assert!(ring.inv(&BigInt::from(2)).is_err()); // gcd(2, 10) = 2
    /// assert!(ring.inv(&BigInt::from(0)).is_err());
    /// ```
    pub fn inv(&self, a: &BigInt) -> Result<BigInt, ModRingError> {
        // In Z/1Z every element is 0 = 1, which is its own inverse.
        if self.modulus.is_one() {
            return Ok(BigInt::zero());
        }

        let a_norm = self.normalize(a);
        if a_norm.is_zero() {
            return Err(ModRingError::NoInverse(format!(
                "Cannot invert 0 in mod {}",
                self.modulus
            )));
        }

        let (g, x, _) = extended_gcd(&a_norm, &self.modulus);
        if !g.is_one() {
            log::debug!("no inverse for {} mod {} (gcd={})", a_norm, self.modulus, g);
            return Err(ModRingError::NoInverse(format!(
                "Modular inverse does not exist for {} mod {} (gcd={})",
                a_norm, self.modulus, g
            )));
        }

        Ok(self.normalize(&x))
    }
}

impl TryFrom<BigInt> for Ring {
    type Error = ModRingError;

    fn try_from(modulus: BigInt) -> Result<Self, Self::Error> {
        Ring::try_with(modulus)
    }
}

impl From<Ring> for BigInt {
    fn from(ring: Ring) -> Self {
        ring.modulus
    }
}
