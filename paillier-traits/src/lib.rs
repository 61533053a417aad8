#![warn(missing_docs, unused_imports)]

//! _This is a part of **paillier**. For more information, head to the `paillier` crate._
//!
//! General traits for additively homomorphic cryptosystems, together with the abstract source of
//! randomness they consume and the security levels used to configure them.

/// Abstract randomness that is consumed by key generation and encryption.
pub mod randomness;

/// Concepts expressing the security level or setting of a given primitive or protocol.
pub mod security;

/// General notion of a cryptosystem
pub mod cryptosystems;

/// Homomorphic operations on ciphertexts and the operators that build on them.
pub mod homomorphic;
