use paillier_traits::randomness::{RandomSource, RandomnessError, SecureRng};
use rug::Integer;
use std::sync::{Mutex, PoisonError};

use crate::{gen_below, gen_prime};

/// General RNG that turns any cryptographically secure `rand_core` RNG into a `RandomSource`.
///
/// The RNG sits behind a lock that is only held while bytes are drawn, so one `GeneralRng` can
/// serve several prime searches at the same time.
pub struct GeneralRng<R: SecureRng> {
    rng: Mutex<R>,
}

impl<R: SecureRng> GeneralRng<R> {
    /// Creates a new `GeneralRng` based on an RNG that implements both `RngCore` and `CryptoRng` to
    /// ensure that the underlying RNG is indeed cryptographically secure.
    pub fn new(rng: R) -> Self {
        GeneralRng {
            rng: Mutex::new(rng),
        }
    }

    /// Returns the underlying RNG.
    pub fn into_inner(self) -> R {
        self.rng.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fills `dest` with random bytes, reporting failures of the underlying RNG instead of
    /// panicking.
    pub fn try_fill_bytes(&self, dest: &mut [u8]) -> Result<(), RandomnessError> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.try_fill_bytes(dest)?;
        Ok(())
    }
}

impl<R: SecureRng + Send> RandomSource for GeneralRng<R> {
    fn random_below(&self, bound: &Integer) -> Result<Integer, RandomnessError> {
        gen_below(bound, self)
    }

    fn probable_prime(&self, bit_length: u32) -> Result<Integer, RandomnessError> {
        gen_prime(bit_length, self)
    }
}

#[cfg(test)]
mod tests {
    use crate::GeneralRng;
    use paillier_traits::randomness::RandomSource;
    use rand_core::OsRng;
    use rug::Integer;

    #[test]
    fn test_shared_between_threads() {
        let rng = GeneralRng::new(OsRng);
        let bound = Integer::from(1_000_000u32);

        let (a, b) = std::thread::scope(|scope| {
            let a = scope.spawn(|| rng.random_below(&bound));
            let b = scope.spawn(|| rng.probable_prime(64));
            (a.join(), b.join())
        });

        assert!(a.unwrap().unwrap() < bound);
        assert_eq!(b.unwrap().unwrap().significant_bits(), 64);
    }

    #[test]
    fn test_try_fill_bytes_fills() {
        let rng = GeneralRng::new(OsRng);
        let mut bytes = [0u8; 64];
        rng.try_fill_bytes(&mut bytes).unwrap();

        // The chance that 64 random bytes are all zero is negligible
        assert!(bytes.iter().any(|&byte| byte != 0));
    }
}
