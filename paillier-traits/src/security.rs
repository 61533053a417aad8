/// The number of bits of security as compared to the AES cryptosystem. Check
/// <https://www.keylength.com/en/4/> for recommendations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BitsOfSecurity {
    /// Security that is equivalent to the security of the 2TDEA cryptosystem. This choice of
    /// parameters is not secure and is only used for legacy.
    AES80,
    /// This level of security is expected to be safe until 2030.
    AES112,
    /// Security that is equivalent to that of 128 bits in the AES cryptosystem. This level of
    /// security is expected to be safe until 2030 & beyond.
    #[default]
    AES128,
    /// Security that is equivalent to that of 192 bits in the AES cryptosystem. This level of
    /// security is expected to be safe until 2030 & beyond.
    AES192,
    /// Security that is equivalent to that of 256 bits in the AES cryptosystem. This level of
    /// security is expected to be safe until 2030 & beyond.
    AES256,
    /// Parameters that are only useful for testing, as they are very small. They do not offer
    /// any security.
    ToyParameters,
    /// Security that is equivalent to a number of bits `pk_bits` in accordance to the size of a
    /// public key modulus. Note that any number lower than 1024 is considered extremely insecure.
    Other {
        /// The number of bits in a public key (factoring) modulus.
        pk_bits: u32,
    },
}

impl BitsOfSecurity {
    /// Returns the required modulus size for a given symmetric security level in the asymmetric
    /// setting.
    pub fn to_public_key_bit_length(&self) -> u32 {
        match self {
            Self::AES80 => 1024,
            Self::AES112 => 2048,
            Self::AES128 => 3072,
            Self::AES192 => 7680,
            Self::AES256 => 15360,
            Self::ToyParameters => 256,
            Self::Other { pk_bits } => *pk_bits,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::security::BitsOfSecurity;

    #[test]
    fn test_default_is_aes128() {
        assert_eq!(BitsOfSecurity::default(), BitsOfSecurity::AES128);
        assert_eq!(BitsOfSecurity::default().to_public_key_bit_length(), 3072);
    }

    #[test]
    fn test_other_passes_bits_through() {
        let security = BitsOfSecurity::Other { pk_bits: 1536 };
        assert_eq!(security.to_public_key_bit_length(), 1536);
    }
}
