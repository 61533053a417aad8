use paillier_traits::randomness::RandomnessError;
use thiserror::Error;

/// Result type of fallible Paillier operations.
pub type Result<T> = std::result::Result<T, PaillierError>;

/// Errors returned by the Paillier cryptosystem.
#[derive(Debug, Error)]
pub enum PaillierError {
    /// A plaintext is not below the modulus $N$, or a ciphertext is not below $N^2$.
    #[error("message too long for Paillier public key size")]
    MessageTooLong,
    /// Key material does not describe a usable Paillier key.
    #[error("invalid Paillier key: {0}")]
    InvalidKey(&'static str),
    /// The random source failed while drawing a nonce or searching for a prime.
    #[error(transparent)]
    Randomness(#[from] RandomnessError),
}
