//! Every integer that crosses this interface (plaintexts, ciphertexts, nonces, constants and key
//! material) is an unsigned big-endian byte string of minimal length. The empty string is zero,
//! leading zero bytes are accepted on input, and no output is padded: callers that need a fixed
//! width must pad to the byte length of the modulus themselves.
//!
//! ```
//! # use paillier_he::bytes;
//! # use paillier_numbertheory::GeneralRng;
//! # use rand_core::OsRng;
//! let rng = GeneralRng::new(OsRng);
//! let secret_key = bytes::generate_key(&rng, 256).unwrap();
//! let public_key = secret_key.public_key();
//!
//! let ciphertext = bytes::encrypt(public_key, &[5], &rng).unwrap();
//! let doubled = bytes::mul(public_key, &ciphertext, &[2]);
//! assert_eq!(bytes::decrypt(&secret_key, &doubled).unwrap(), vec![10]);
//! ```

use paillier_traits::cryptosystems::AsymmetricCryptosystem;
use paillier_traits::homomorphic::HomomorphicAddition;
use paillier_traits::randomness::RandomSource;
use rug::integer::Order;
use rug::Integer;

use crate::cryptosystems::paillier::{Paillier, PaillierCiphertext, PaillierPK, PaillierSK};
use crate::error::Result;

fn to_integer(bytes: &[u8]) -> Integer {
    Integer::from_digits(bytes, Order::Msf)
}

fn to_bytes(integer: &Integer) -> Vec<u8> {
    integer.to_digits(Order::Msf)
}

/// Generates a keypair whose modulus has `bits` bits, using two concurrent prime searches of
/// `bits / 2` bits each.
pub fn generate_key<S: RandomSource>(random: &S, bits: u32) -> Result<PaillierSK> {
    let (_, secret_key) = Paillier::with_modulus_size(bits).generate_keys(random)?;
    Ok(secret_key)
}

/// Rebuilds a public key from its modulus.
pub fn public_key_from_bytes(n: &[u8]) -> Result<PaillierPK> {
    PaillierPK::from_modulus(to_integer(n))
}

/// Rebuilds a secret key from the two prime factors of its modulus.
pub fn private_key_from_bytes(p: &[u8], q: &[u8]) -> Result<PaillierSK> {
    PaillierSK::from_primes(to_integer(p), to_integer(q))
}

/// Encrypts `plaintext` with a fresh nonce drawn from `random`. Fails with `MessageTooLong` if
/// the plaintext is not below the modulus.
pub fn encrypt<S: RandomSource>(public_key: &PaillierPK, plaintext: &[u8], random: &S) -> Result<Vec<u8>> {
    let (ciphertext, _) = encrypt_and_nonce(public_key, plaintext, random)?;
    Ok(ciphertext)
}

/// Encrypts `plaintext` with a fresh nonce drawn from `random`, and returns the ciphertext
/// together with that nonce.
pub fn encrypt_and_nonce<S: RandomSource>(
    public_key: &PaillierPK,
    plaintext: &[u8],
    random: &S,
) -> Result<(Vec<u8>, Vec<u8>)> {
    let (ciphertext, nonce) = public_key.encrypt_and_nonce(&to_integer(plaintext), random)?;
    Ok((ciphertext.to_bytes(), to_bytes(&nonce)))
}

/// Encrypts `plaintext` with the given nonce. The result only depends on its inputs.
pub fn encrypt_with_nonce(public_key: &PaillierPK, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let ciphertext = public_key.encrypt_with_nonce(&to_integer(plaintext), &to_integer(nonce))?;
    Ok(ciphertext.to_bytes())
}

/// Decrypts `ciphertext`. Fails with `MessageTooLong` if the ciphertext is not below $N^2$.
pub fn decrypt(secret_key: &PaillierSK, ciphertext: &[u8]) -> Result<Vec<u8>> {
    let plaintext = secret_key.decrypt_ciphertext(&PaillierCiphertext::from_bytes(ciphertext))?;
    Ok(to_bytes(&plaintext))
}

/// Returns a ciphertext of the sum of the plaintexts of `ciphertext_a` and `ciphertext_b`.
pub fn add_cipher(public_key: &PaillierPK, ciphertext_a: &[u8], ciphertext_b: &[u8]) -> Vec<u8> {
    public_key
        .add(
            PaillierCiphertext::from_bytes(ciphertext_a),
            PaillierCiphertext::from_bytes(ciphertext_b),
        )
        .to_bytes()
}

/// Returns a ciphertext of the plaintext of `ciphertext` plus `constant`.
pub fn add(public_key: &PaillierPK, ciphertext: &[u8], constant: &[u8]) -> Vec<u8> {
    public_key
        .add_constant(PaillierCiphertext::from_bytes(ciphertext), &to_integer(constant))
        .to_bytes()
}

/// Returns a ciphertext of the plaintext of `ciphertext` times `constant`.
pub fn mul(public_key: &PaillierPK, ciphertext: &[u8], constant: &[u8]) -> Vec<u8> {
    HomomorphicAddition::mul(
        public_key,
        PaillierCiphertext::from_bytes(ciphertext),
        &to_integer(constant),
    )
    .to_bytes()
}

#[cfg(test)]
mod tests {
    use crate::bytes::{
        add, add_cipher, decrypt, encrypt, encrypt_and_nonce, encrypt_with_nonce, generate_key,
        mul, private_key_from_bytes, public_key_from_bytes,
    };
    use crate::error::PaillierError;
    use paillier_numbertheory::GeneralRng;
    use rand_core::OsRng;

    #[test]
    fn test_toy_scenario() {
        let secret_key = private_key_from_bytes(&[7], &[11]).unwrap();
        let public_key = public_key_from_bytes(&[77]).unwrap();
        assert_eq!(&public_key, secret_key.public_key());

        let five = encrypt_with_nonce(&public_key, &[2], &[5]).unwrap();
        let nine = encrypt_with_nonce(&public_key, &[3], &[9]).unwrap();

        assert_eq!(decrypt(&secret_key, &add(&public_key, &five, &[3])).unwrap(), vec![8]);
        assert_eq!(decrypt(&secret_key, &mul(&public_key, &five, &[3])).unwrap(), vec![15]);
        assert_eq!(decrypt(&secret_key, &add_cipher(&public_key, &five, &nine)).unwrap(), vec![14]);
    }

    #[test]
    fn test_empty_is_zero() {
        let secret_key = private_key_from_bytes(&[7], &[11]).unwrap();
        let public_key = secret_key.public_key();

        let ciphertext = encrypt_with_nonce(public_key, &[2], &[]).unwrap();
        assert_eq!(ciphertext, encrypt_with_nonce(public_key, &[2], &[0]).unwrap());

        // Zero decrypts to the empty string
        assert!(decrypt(&secret_key, &ciphertext).unwrap().is_empty());

        // The empty ciphertext is zero, which both primes divide
        assert_eq!(decrypt(&secret_key, &[]).unwrap(), vec![30]);

        // Adding or multiplying by an empty constant is adding or multiplying by zero
        let plus_nothing = add(public_key, &encrypt_with_nonce(public_key, &[2], &[5]).unwrap(), &[]);
        assert_eq!(decrypt(&secret_key, &plus_nothing).unwrap(), vec![5]);
        let times_nothing = mul(public_key, &plus_nothing, &[]);
        assert!(decrypt(&secret_key, &times_nothing).unwrap().is_empty());
    }

    #[test]
    fn test_leading_zeros_are_ignored() {
        let secret_key = private_key_from_bytes(&[7], &[11]).unwrap();
        let public_key = secret_key.public_key();

        assert_eq!(
            encrypt_with_nonce(public_key, &[0, 0, 2], &[0, 5]).unwrap(),
            encrypt_with_nonce(public_key, &[2], &[5]).unwrap()
        );
    }

    #[test]
    fn test_bounds() {
        let secret_key = private_key_from_bytes(&[7], &[11]).unwrap();
        let public_key = secret_key.public_key();

        let result = encrypt_with_nonce(public_key, &[2], &[77]);
        assert!(matches!(result, Err(PaillierError::MessageTooLong)));

        // 77^2 = 5929 = 0x1729
        let result = decrypt(&secret_key, &[0x17, 0x29]);
        assert!(matches!(result, Err(PaillierError::MessageTooLong)));
        assert!(decrypt(&secret_key, &[0x17, 0x28]).is_ok());
    }

    #[test]
    fn test_generated_round_trip() {
        let rng = GeneralRng::new(OsRng);
        let secret_key = generate_key(&rng, 512).unwrap();
        let public_key = secret_key.public_key();

        let plaintext = b"attack at dawn".to_vec();
        let ciphertext = encrypt(public_key, &plaintext, &rng).unwrap();
        assert_eq!(decrypt(&secret_key, &ciphertext).unwrap(), plaintext);

        let (ciphertext, nonce) = encrypt_and_nonce(public_key, &plaintext, &rng).unwrap();
        assert_eq!(ciphertext, encrypt_with_nonce(public_key, &nonce, &plaintext).unwrap());
    }

    #[test]
    fn test_generated_plaintext_too_long() {
        let rng = GeneralRng::new(OsRng);
        let secret_key = generate_key(&rng, 256).unwrap();
        let public_key = secret_key.public_key();

        let result = encrypt(public_key, &public_key.modulus_bytes(), &rng);
        assert!(matches!(result, Err(PaillierError::MessageTooLong)));
    }

    #[test]
    fn test_generated_homomorphic_operations() {
        let rng = GeneralRng::new(OsRng);
        let secret_key = generate_key(&rng, 256).unwrap();
        let public_key = secret_key.public_key();

        let ciphertext_a = encrypt(public_key, &[0x01, 0x00], &rng).unwrap();
        let ciphertext_b = encrypt(public_key, &[0x23], &rng).unwrap();

        let sum = add_cipher(public_key, &ciphertext_a, &ciphertext_b);
        assert_eq!(decrypt(&secret_key, &sum).unwrap(), vec![0x01, 0x23]);

        let shifted = add(public_key, &sum, &[0x10, 0x00]);
        assert_eq!(decrypt(&secret_key, &shifted).unwrap(), vec![0x11, 0x23]);

        let scaled = mul(public_key, &ciphertext_b, &[0x01, 0x00]);
        assert_eq!(decrypt(&secret_key, &scaled).unwrap(), vec![0x23, 0x00]);
    }
}
