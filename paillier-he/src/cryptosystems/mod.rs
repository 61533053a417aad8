/// Implementation of the Paillier cryptosystem with decryption through the Chinese Remainder
/// Theorem.
pub mod paillier;
