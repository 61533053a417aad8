use paillier_numbertheory::modular::{crt_recombine, l_function, pow_mod};
use paillier_traits::cryptosystems::{
    Associable, AsymmetricCryptosystem, DecryptionKey, EncryptionKey,
};
use paillier_traits::homomorphic::HomomorphicAddition;
use paillier_traits::randomness::RandomSource;
use paillier_traits::security::BitsOfSecurity;
use rug::integer::{IsPrime, Order};
use rug::ops::RemRounding;
use rug::Integer;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument, trace};

use crate::error::{PaillierError, Result};

const REPS: u32 = 25;

/// The Paillier cryptosystem.
#[derive(Copy, Clone, Debug)]
pub struct Paillier {
    modulus_size: u32,
}

impl Paillier {
    /// Sets up Paillier with a modulus of exactly `modulus_size` bits, split evenly over the two
    /// primes. The size is not validated beyond what the prime search of the random source
    /// enforces.
    pub fn with_modulus_size(modulus_size: u32) -> Self {
        Paillier { modulus_size }
    }

    /// The number of bits of the modulus of generated keys.
    pub fn modulus_size(&self) -> u32 {
        self.modulus_size
    }
}

/// Public key for the Paillier cryptosystem.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct PaillierPK {
    n: Integer,
    n_squared: Integer,
    g: Integer,
}

/// Decryption key for the Paillier cryptosystem. Next to the factorization of the modulus it
/// holds the precomputed values for decryption through the Chinese Remainder Theorem.
#[derive(Clone)]
pub struct PaillierSK {
    public_key: PaillierPK,
    p: Integer,
    pp: Integer,
    p_minus_one: Integer,
    q: Integer,
    qq: Integer,
    q_minus_one: Integer,
    p_inv_q: Integer,
    hp: Integer,
    hq: Integer,
}

/// Ciphertext of the Paillier cryptosystem, which is additively homomorphic.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct PaillierCiphertext {
    /// Encrypted message (Ciphertext)
    pub c: Integer,
}

impl Associable<PaillierPK> for PaillierCiphertext {}

impl PaillierCiphertext {
    /// Interprets `bytes` as an unsigned big-endian integer. The empty slice is zero.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        PaillierCiphertext {
            c: Integer::from_digits(bytes, Order::Msf),
        }
    }

    /// Encodes the ciphertext as a minimal unsigned big-endian integer, without padding.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.c.to_digits(Order::Msf)
    }
}

impl AsymmetricCryptosystem for Paillier {
    type PublicKey = PaillierPK;
    type SecretKey = PaillierSK;

    fn setup(security_param: &BitsOfSecurity) -> Self {
        Paillier {
            modulus_size: security_param.to_public_key_bit_length(),
        }
    }

    /// Generates a fresh Paillier keypair. Both primes are searched for at the same time, and
    /// the first error of either search is returned without retrying.
    /// ```
    /// # use paillier_numbertheory::GeneralRng;
    /// # use paillier_he::cryptosystems::paillier::Paillier;
    /// # use paillier_traits::security::BitsOfSecurity;
    /// # use paillier_traits::cryptosystems::AsymmetricCryptosystem;
    /// # use rand_core::OsRng;
    /// let rng = GeneralRng::new(OsRng);
    /// let paillier = Paillier::setup(&BitsOfSecurity::ToyParameters);
    /// let (public_key, secret_key) = paillier.generate_keys(&rng).unwrap();
    /// ```
    #[instrument(level = "info", skip_all, fields(modulus_size = self.modulus_size))]
    fn generate_keys<S: RandomSource>(&self, rng: &S) -> Result<(PaillierPK, PaillierSK)> {
        let prime_size = self.modulus_size / 2;

        // join waits for both searches, so an error surfaces once the other search returns
        let (p, q) = rayon::join(
            || rng.probable_prime(prime_size),
            || rng.probable_prime(prime_size),
        );
        let q = q?;
        let p = p?;
        debug!("prime search finished");

        if p == q {
            return Err(PaillierError::InvalidKey(
                "the prime search returned the same prime twice",
            ));
        }

        let secret_key = PaillierSK::from_primes(p, q)?;
        Ok((secret_key.public_key.clone(), secret_key))
    }
}

impl PaillierPK {
    /// Rebuilds a public key from its modulus $N$, which must be odd and greater than one.
    pub fn from_modulus(n: Integer) -> Result<Self> {
        if n <= 1 || n.is_even() {
            return Err(PaillierError::InvalidKey(
                "the modulus must be odd and greater than one",
            ));
        }

        Ok(PaillierPK::new(n))
    }

    fn new(n: Integer) -> Self {
        let n_squared = Integer::from(n.square_ref());
        let g = Integer::from(&n + 1);

        PaillierPK { n, n_squared, g }
    }

    /// The modulus $N = pq$.
    pub fn modulus(&self) -> &Integer {
        &self.n
    }

    /// The squared modulus $N^2$, which bounds all ciphertexts.
    pub fn n_squared(&self) -> &Integer {
        &self.n_squared
    }

    /// The generator $g = N + 1$.
    pub fn generator(&self) -> &Integer {
        &self.g
    }

    /// The modulus as a minimal unsigned big-endian integer.
    pub fn modulus_bytes(&self) -> Vec<u8> {
        self.n.to_digits(Order::Msf)
    }

    /// Encrypts `plaintext` with the given `nonce`, so the result is deterministic. The nonce
    /// must be kept secret and should never be reused.
    /// ```
    /// # use paillier_he::cryptosystems::paillier::PaillierSK;
    /// # use rug::Integer;
    /// let secret_key = PaillierSK::from_primes(Integer::from(7), Integer::from(11)).unwrap();
    /// let public_key = secret_key.public_key();
    ///
    /// let ciphertext = public_key
    ///     .encrypt_with_nonce(&Integer::from(5), &Integer::from(2))
    ///     .unwrap();
    /// assert_eq!(secret_key.decrypt_ciphertext(&ciphertext).unwrap(), 5);
    /// ```
    pub fn encrypt_with_nonce(&self, plaintext: &Integer, nonce: &Integer) -> Result<PaillierCiphertext> {
        if *plaintext < 0 || *plaintext >= self.n {
            trace!("rejected plaintext outside of [0, N)");
            return Err(PaillierError::MessageTooLong);
        }

        // g^m = (1 + N)^m = 1 + mN (mod N^2)
        let mut c = Integer::from(plaintext * &self.n);
        c += 1;
        c %= &self.n_squared;

        c *= self.nonce_power(nonce);
        c %= &self.n_squared;

        Ok(PaillierCiphertext { c })
    }

    /// Encrypts `plaintext` with a nonce drawn uniformly from $[0, N)$, and returns that nonce
    /// alongside the ciphertext.
    pub fn encrypt_and_nonce<S: RandomSource>(
        &self,
        plaintext: &Integer,
        rng: &S,
    ) -> Result<(PaillierCiphertext, Integer)> {
        let nonce = rng.random_below(&self.n)?;
        let ciphertext = self.encrypt_with_nonce(plaintext, &nonce)?;

        Ok((ciphertext, nonce))
    }

    /// Computes $r^N \bmod N^2$. The nonce is secret, so this uses constant-structure
    /// exponentiation.
    fn nonce_power(&self, nonce: &Integer) -> Integer {
        if *nonce < 0 {
            let nonce = nonce.clone().rem_euc(&self.n_squared);
            return Integer::from(nonce.secure_pow_mod_ref(&self.n, &self.n_squared));
        }

        Integer::from(nonce.secure_pow_mod_ref(&self.n, &self.n_squared))
    }
}

impl EncryptionKey for PaillierPK {
    type Input = Integer;
    type Plaintext = Integer;
    type Ciphertext = PaillierCiphertext;
    type Error = PaillierError;

    /// Encrypts a plaintext integer using the Paillier public key.
    /// ```
    /// # use paillier_numbertheory::GeneralRng;
    /// # use paillier_he::cryptosystems::paillier::Paillier;
    /// # use paillier_traits::security::BitsOfSecurity;
    /// # use paillier_traits::cryptosystems::{AsymmetricCryptosystem, EncryptionKey};
    /// # use rug::Integer;
    /// # use rand_core::OsRng;
    /// # let rng = GeneralRng::new(OsRng);
    /// # let paillier = Paillier::setup(&BitsOfSecurity::ToyParameters);
    /// # let (public_key, secret_key) = paillier.generate_keys(&rng).unwrap();
    /// let ciphertext = public_key.encrypt(&Integer::from(5), &rng).unwrap();
    /// ```
    fn encrypt_raw<S: RandomSource>(&self, plaintext: &Integer, rng: &S) -> Result<PaillierCiphertext> {
        let (ciphertext, _) = self.encrypt_and_nonce(plaintext, rng)?;
        Ok(ciphertext)
    }
}

impl PaillierSK {
    /// Rebuilds a secret key, including all values for CRT decryption, from the two prime
    /// factors of the modulus.
    ///
    /// The primes must be distinct odd probable primes for which $\gcd(N, (p-1)(q-1)) = 1$, as
    /// only then is $g = N + 1$ a valid generator. Primes of the same bit length always satisfy
    /// the latter.
    pub fn from_primes(p: Integer, q: Integer) -> Result<Self> {
        if p == q {
            return Err(PaillierError::InvalidKey("the primes must be distinct"));
        }

        if p <= 2 || q <= 2 {
            return Err(PaillierError::InvalidKey("the primes must be odd"));
        }

        if p.is_probably_prime(REPS) == IsPrime::No || q.is_probably_prime(REPS) == IsPrime::No {
            return Err(PaillierError::InvalidKey("the factors must be prime"));
        }

        let n = Integer::from(&p * &q);
        let phi = Integer::from(&p - 1) * Integer::from(&q - 1);
        if Integer::from(n.gcd_ref(&phi)) != 1 {
            return Err(PaillierError::InvalidKey(
                "the modulus must be coprime to (p - 1)(q - 1)",
            ));
        }

        let pp = Integer::from(p.square_ref());
        let qq = Integer::from(q.square_ref());

        let p_inv_q = p
            .invert_ref(&q)
            .map(Integer::from)
            .ok_or(PaillierError::InvalidKey("p is not invertible modulo q"))?;
        let hp = h(&p, &pp, &n).ok_or(PaillierError::InvalidKey("hp does not exist"))?;
        let hq = h(&q, &qq, &n).ok_or(PaillierError::InvalidKey("hq does not exist"))?;

        Ok(PaillierSK {
            public_key: PaillierPK::new(n),
            p_minus_one: Integer::from(&p - 1),
            q_minus_one: Integer::from(&q - 1),
            p,
            pp,
            q,
            qq,
            p_inv_q,
            hp,
            hq,
        })
    }

    /// The public key that belongs to this secret key.
    pub fn public_key(&self) -> &PaillierPK {
        &self.public_key
    }

    /// The first prime factor of the modulus.
    pub fn p(&self) -> &Integer {
        &self.p
    }

    /// The second prime factor of the modulus.
    pub fn q(&self) -> &Integer {
        &self.q
    }

    /// Decrypts a ciphertext without requiring it to be associated with the public key.
    /// Ciphertexts outside of $[0, N^2)$ are rejected.
    pub fn decrypt_ciphertext(&self, ciphertext: &PaillierCiphertext) -> Result<Integer> {
        let c = &ciphertext.c;
        if *c < 0 || *c >= self.public_key.n_squared {
            trace!("rejected ciphertext outside of [0, N^2)");
            return Err(PaillierError::MessageTooLong);
        }

        let mp = decrypt_modulo_prime(c, &self.p, &self.pp, &self.p_minus_one, &self.hp);
        let mq = decrypt_modulo_prime(c, &self.q, &self.qq, &self.q_minus_one, &self.hq);

        Ok(crt_recombine(&mp, &mq, &self.p, &self.q, &self.p_inv_q))
    }
}

impl AsRef<PaillierPK> for PaillierSK {
    fn as_ref(&self) -> &PaillierPK {
        &self.public_key
    }
}

impl fmt::Debug for PaillierSK {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaillierSK")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// $h_p = L((1 - N) \bmod p^2, p)^{-1} \bmod p$
fn h(p: &Integer, pp: &Integer, n: &Integer) -> Option<Integer> {
    let gp = Integer::from(1 - n).rem_euc(pp);
    let lp = l_function(&gp, p);

    lp.invert(p).ok()
}

/// Computes $m_p = L(c^{p-1} \bmod p^2, p) \cdot h_p \bmod p$.
fn decrypt_modulo_prime(
    c: &Integer,
    p: &Integer,
    pp: &Integer,
    p_minus_one: &Integer,
    hp: &Integer,
) -> Integer {
    let reduced = Integer::from(c % pp);
    let cp = Integer::from(reduced.secure_pow_mod_ref(p_minus_one, pp));

    let mut mp = l_function(&cp, p);
    mp *= hp;
    mp.rem_euc(p)
}

impl DecryptionKey<PaillierPK> for PaillierSK {
    /// Decrypts a rich Paillier ciphertext using the secret key.
    /// ```
    /// # use paillier_numbertheory::GeneralRng;
    /// # use paillier_he::cryptosystems::paillier::Paillier;
    /// # use paillier_traits::security::BitsOfSecurity;
    /// # use paillier_traits::cryptosystems::{AsymmetricCryptosystem, EncryptionKey, DecryptionKey};
    /// # use rug::Integer;
    /// # use rand_core::OsRng;
    /// # let rng = GeneralRng::new(OsRng);
    /// # let paillier = Paillier::setup(&BitsOfSecurity::ToyParameters);
    /// # let (public_key, secret_key) = paillier.generate_keys(&rng).unwrap();
    /// # let ciphertext = public_key.encrypt(&Integer::from(5), &rng).unwrap();
    /// println!("The decrypted message is {}", secret_key.decrypt(&ciphertext).unwrap());
    /// // Prints: "The decrypted message is 5".
    /// ```
    fn decrypt_raw(&self, public_key: &PaillierPK, ciphertext: &PaillierCiphertext) -> Result<Integer> {
        debug_assert_eq!(public_key, &self.public_key);
        self.decrypt_ciphertext(ciphertext)
    }
}

impl HomomorphicAddition for PaillierPK {
    fn add(
        &self,
        ciphertext_a: Self::Ciphertext,
        ciphertext_b: Self::Ciphertext,
    ) -> Self::Ciphertext {
        PaillierCiphertext {
            c: (ciphertext_a.c * &ciphertext_b.c).rem_euc(&self.n_squared),
        }
    }

    /// Multiplies by $g^k$. A negative constant is reduced modulo $N$ first, which is exact as
    /// $g$ has order $N$.
    fn add_constant(&self, ciphertext: Self::Ciphertext, constant: &Integer) -> Self::Ciphertext {
        let g_to_constant = pow_mod(&self.g, constant, &self.n, &self.n_squared);

        PaillierCiphertext {
            c: (ciphertext.c * g_to_constant).rem_euc(&self.n_squared),
        }
    }

    /// Raises the ciphertext to the power `constant`. A negative constant is reduced modulo $N$
    /// first, which gives a different ciphertext of the same plaintext.
    fn mul(&self, ciphertext: Self::Ciphertext, constant: &Integer) -> Self::Ciphertext {
        PaillierCiphertext {
            c: pow_mod(&ciphertext.c, constant, &self.n, &self.n_squared),
        }
    }
}
