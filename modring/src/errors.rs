#[derive(thiserror::Error, Debug)]
pub enum ModRingError {
    /// Error when trying to find a modular inverse that doesn't exist (gcd(a, n) != 1).
    #[error("NoInverse: {0}")]
    NoInverse(String),
    /// Error when creating a ring or reducing with an invalid modulus (n <= 0).
    #[error("InvalidModulus: {0}")]
    InvalidModulus(String),
    #[error("DimensionMismatch: {0}")]
    DimensionMismatch(String),
    /// Binary operation between containers defined over different moduli.
    #[error("ModulusMismatch: {0}")]
    ModulusMismatch(String),
    #[error("AllocationError: {0}")]
    AllocationError(String),
    #[error("IndexOutOfBounds: {0}")]
    IndexOutOfBounds(String),

    #[error("Data serialization: {0}")]
    SerializationError(#[from] serde_json::Error),
}
