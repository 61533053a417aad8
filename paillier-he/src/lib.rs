#![warn(missing_docs, unused_imports)]

//! _This is a part of **paillier**. For more information, head to the `paillier` crate._
//!
//! The Paillier cryptosystem: key generation with CRT precomputation, probabilistic encryption,
//! CRT-accelerated decryption and homomorphic operations on ciphertexts.

/// Partially homomorphic cryptosystems with one key.
pub mod cryptosystems;

/// The Paillier operations on unsigned big-endian byte strings.
pub mod bytes;

mod error;

pub use error::{PaillierError, Result};
pub use paillier_traits;
