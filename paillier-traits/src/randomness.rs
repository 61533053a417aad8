use rug::Integer;
use std::error::Error;
use thiserror::Error;

/// An RNG that is suitable for cryptographic purposes.
pub trait SecureRng: rand_core::RngCore + rand_core::CryptoRng {}

impl<R: rand_core::RngCore + rand_core::CryptoRng> SecureRng for R {}

/// Failure reported by a `RandomSource`, for example because the operating system could not
/// supply entropy. The underlying error is kept as-is and can be reached through `source()`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct RandomnessError(Box<dyn Error + Send + Sync>);

impl RandomnessError {
    /// Wraps an arbitrary error (or message) reported by a random source.
    pub fn new<E: Into<Box<dyn Error + Send + Sync>>>(error: E) -> Self {
        RandomnessError(error.into())
    }
}

impl From<rand_core::Error> for RandomnessError {
    fn from(error: rand_core::Error) -> Self {
        RandomnessError::new(error)
    }
}

/// A cryptographically secure source of random integers and probable primes.
///
/// The source is shared by reference, possibly between threads during key generation, so any
/// interior state must be synchronized by the implementation.
pub trait RandomSource: Sync {
    /// Draws an integer uniformly at random from `[0, bound)`.
    fn random_below(&self, bound: &Integer) -> Result<Integer, RandomnessError>;

    /// Draws a random probable prime of exactly `bit_length` bits.
    fn probable_prime(&self, bit_length: u32) -> Result<Integer, RandomnessError>;
}

impl<S: RandomSource + ?Sized> RandomSource for &S {
    fn random_below(&self, bound: &Integer) -> Result<Integer, RandomnessError> {
        (**self).random_below(bound)
    }

    fn probable_prime(&self, bit_length: u32) -> Result<Integer, RandomnessError> {
        (**self).probable_prime(bit_length)
    }
}
