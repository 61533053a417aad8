#![warn(missing_docs, unused_imports)]

//! _This is a part of **paillier**. For more information, head to the `paillier` crate._
//!
//! Number theoretic algorithms used by the Paillier cryptosystem: uniform sampling of integers,
//! random probable prime generation, and the modular helpers behind CRT decryption. The
//! `GeneralRng` type exposes the sampling functions as a `RandomSource`.

/// Modular helpers for CRT-based decryption.
pub mod modular;
mod randomness;

pub use randomness::GeneralRng;

use paillier_traits::randomness::{RandomnessError, SecureRng};
use rug::integer::{IsPrime, Order};
use rug::Integer;
use tracing::{instrument, trace};

const REPS: u32 = 25;

/// Draws a uniformly random integer of at most `bit_length` bits.
fn gen_bits<R: SecureRng>(bit_length: u32, rng: &GeneralRng<R>) -> Result<Integer, RandomnessError> {
    let byte_length = ((bit_length + 7) / 8) as usize;
    let mut bytes = vec![0u8; byte_length];
    rng.try_fill_bytes(&mut bytes)?;

    if let Some(first) = bytes.first_mut() {
        let excess_bits = byte_length as u32 * 8 - bit_length;
        *first &= 0xff >> excess_bits;
    }

    Ok(Integer::from_digits(&bytes, Order::Msf))
}

/// Generates a uniformly random prime number of a given bit length. So, the number contains
/// `bit_length` bits, of which the first and the last bit are always 1.
///
/// Returns an error when `bit_length` is smaller than 2 or when the RNG fails.
#[instrument(level = "debug", skip(rng))]
pub fn gen_prime<R: SecureRng>(bit_length: u32, rng: &GeneralRng<R>) -> Result<Integer, RandomnessError> {
    if bit_length < 2 {
        return Err(RandomnessError::new(format!(
            "cannot generate a prime of {} bits",
            bit_length
        )));
    }

    let mut candidates = 0u64;
    loop {
        let mut candidate = gen_bits(bit_length, rng)?;
        candidate.set_bit(bit_length - 1, true);
        candidate.set_bit(0, true);
        candidates += 1;

        if candidate.is_probably_prime(REPS) != IsPrime::No {
            trace!(candidates, "found probable prime");
            return Ok(candidate);
        }
    }
}

/// Generates a uniformly random integer from `[0, bound)` by rejection sampling, so that no
/// value is more likely than another.
///
/// Returns an error when `bound` is not positive or when the RNG fails.
pub fn gen_below<R: SecureRng>(bound: &Integer, rng: &GeneralRng<R>) -> Result<Integer, RandomnessError> {
    if *bound <= 0 {
        return Err(RandomnessError::new("the upper bound must be positive"));
    }

    let bit_length = Integer::from(bound - 1).significant_bits();
    if bit_length == 0 {
        return Ok(Integer::new());
    }

    loop {
        let candidate = gen_bits(bit_length, rng)?;
        if candidate < *bound {
            return Ok(candidate);
        }
    }
}
