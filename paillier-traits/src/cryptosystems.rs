use crate::randomness::{RandomSource, RandomnessError};
use crate::security::BitsOfSecurity;
use std::fmt::Debug;

/// An asymmetric cryptosystem is a system of methods to encrypt plaintexts into ciphertexts, and
/// decrypt those ciphertexts back into plaintexts. Anyone who has access to the public key can
/// perform encryptions, but only those with the secret key can decrypt.
///
/// The struct that implements an `AsymmetricCryptosystem` will hold the general parameters of that
/// cryptosystem. Depending on the cryptosystem, those parameters could play an important role in
/// deciding the level of security. As such, each cryptosystem should clearly indicate these.
pub trait AsymmetricCryptosystem {
    /// The public key, used for encrypting plaintexts.
    type PublicKey: EncryptionKey;
    /// The secret key, used for decrypting ciphertexts.
    type SecretKey: DecryptionKey<Self::PublicKey>;

    /// Sets up an instance of this cryptosystem with parameters satisfying the security parameter.
    fn setup(security_parameter: &BitsOfSecurity) -> Self;

    /// Generate a public and private key pair using a cryptographic random source. The level of
    /// security is determined by the parameters chosen in `setup`.
    #[allow(clippy::type_complexity)]
    fn generate_keys<S: RandomSource>(
        &self,
        rng: &S,
    ) -> Result<(Self::PublicKey, Self::SecretKey), <Self::PublicKey as EncryptionKey>::Error>;
}

/// The encryption key.
pub trait EncryptionKey: Sized + Debug + PartialEq {
    /// Constants that can be combined with a ciphertext homomorphically.
    type Input;
    /// The type of the plaintexts to be encrypted.
    type Plaintext;
    /// The type of the encrypted plaintexts.
    type Ciphertext: Associable<Self>;
    /// The error returned when encryption or decryption fails.
    type Error: From<RandomnessError>;

    /// Encrypt the plaintext using the public key and a cryptographic random source and
    /// immediately associate it with the public key.
    fn encrypt<'pk, S: RandomSource>(
        &'pk self,
        plaintext: &Self::Plaintext,
        rng: &S,
    ) -> Result<AssociatedCiphertext<'pk, Self::Ciphertext, Self>, Self::Error> {
        Ok(self.encrypt_raw(plaintext, rng)?.associate(self))
    }

    /// Encrypt the plaintext using the public key and a cryptographic random source.
    fn encrypt_raw<S: RandomSource>(
        &self,
        plaintext: &Self::Plaintext,
        rng: &S,
    ) -> Result<Self::Ciphertext, Self::Error>;
}

/// The decryption key.
pub trait DecryptionKey<PK: EncryptionKey> {
    /// Decrypt the associated ciphertext using the secret key.
    fn decrypt(
        &self,
        ciphertext: &AssociatedCiphertext<'_, PK::Ciphertext, PK>,
    ) -> Result<PK::Plaintext, PK::Error> {
        self.decrypt_raw(ciphertext.public_key, &ciphertext.ciphertext)
    }

    /// Decrypt the ciphertext using the secret key and its related public key.
    fn decrypt_raw(
        &self,
        public_key: &PK,
        ciphertext: &PK::Ciphertext,
    ) -> Result<PK::Plaintext, PK::Error>;
}

/// A ciphertext together with the public key it was encrypted under. This allows homomorphic
/// operations to be written with operators.
#[derive(PartialEq, Debug)]
pub struct AssociatedCiphertext<'pk, C: Associable<PK>, PK: EncryptionKey<Ciphertext = C>> {
    /// The ciphertext itself.
    pub ciphertext: C,
    /// The key that `ciphertext` was encrypted under.
    pub public_key: &'pk PK,
}

impl<'pk, C: Associable<PK> + Clone, PK: EncryptionKey<Ciphertext = C>> Clone
    for AssociatedCiphertext<'pk, C, PK>
{
    fn clone(&self) -> Self {
        AssociatedCiphertext {
            ciphertext: self.ciphertext.clone(),
            public_key: self.public_key,
        }
    }
}

/// Functionality to easily turn a ciphertext into an associated ciphertext
pub trait Associable<PK: EncryptionKey<Ciphertext = Self>>: Sized {
    /// 'Enriches' a ciphertext by associating it with a corresponding public key. This allows to
    /// overload operators for homomorphic operations.
    fn associate(self, public_key: &PK) -> AssociatedCiphertext<'_, Self, PK> {
        AssociatedCiphertext {
            ciphertext: self,
            public_key,
        }
    }
}
