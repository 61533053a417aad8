use std::ops::{Add, Mul};

use crate::cryptosystems::{Associable, AssociatedCiphertext, EncryptionKey};

/// Homomorphic addition of plaintexts through their ciphertexts. None of these operations require
/// randomness or the secret key, and none of them fail: results wrap around the plaintext
/// modulus.
pub trait HomomorphicAddition: EncryptionKey {
    /// Combines two ciphertexts into one that decrypts to the sum of their plaintexts.
    fn add(&self, ciphertext_a: Self::Ciphertext, ciphertext_b: Self::Ciphertext) -> Self::Ciphertext;

    /// Adds a plaintext constant to the plaintext inside `ciphertext`.
    fn add_constant(&self, ciphertext: Self::Ciphertext, constant: &Self::Input) -> Self::Ciphertext;

    /// Multiplies the plaintext inside `ciphertext` by a plaintext constant.
    fn mul(&self, ciphertext: Self::Ciphertext, constant: &Self::Input) -> Self::Ciphertext;
}

impl<'pk, C: Associable<PK>, PK: EncryptionKey<Ciphertext = C> + HomomorphicAddition> Add
    for AssociatedCiphertext<'pk, C, PK>
{
    type Output = AssociatedCiphertext<'pk, C, PK>;

    fn add(self, rhs: Self) -> Self::Output {
        debug_assert_eq!(self.public_key, rhs.public_key);
        HomomorphicAddition::add(self.public_key, self.ciphertext, rhs.ciphertext)
            .associate(self.public_key)
    }
}

impl<'pk, I, C, PK> Mul<I> for AssociatedCiphertext<'pk, C, PK>
where
    C: Associable<PK>,
    PK: EncryptionKey<Input = I, Ciphertext = C> + HomomorphicAddition,
{
    type Output = AssociatedCiphertext<'pk, C, PK>;

    fn mul(self, rhs: I) -> Self::Output {
        HomomorphicAddition::mul(self.public_key, self.ciphertext, &rhs)
            .associate(self.public_key)
    }
}

impl<'pk, C: Associable<PK>, PK: EncryptionKey<Ciphertext = C> + HomomorphicAddition>
    AssociatedCiphertext<'pk, C, PK>
{
    /// Adds a plaintext constant to this ciphertext. Unlike ciphertext addition this has no
    /// operator, as it would overlap with `Add<Self>`.
    pub fn add_constant(self, constant: &PK::Input) -> AssociatedCiphertext<'pk, C, PK> {
        self.public_key
            .add_constant(self.ciphertext, constant)
            .associate(self.public_key)
    }
}
