//! # Ring Module
//!
//! Provides the [`Ring`] struct for representing residue rings Z/NZ and performing modular
//! arithmetic, plus the unreduced [`IntMatrix`] engine the modular containers are built on.

pub mod helper;
pub mod math;
pub mod matrix_ops;

/// Represents a mathematical vector of arbitrary-precision integers.
pub type Vector = Vec<num_bigint::BigInt>;

pub use helper::{extended_gcd, gcd};
pub use math::{Ring, reduce};
pub use matrix_ops::{IntMatrix, IntMatrixView};
