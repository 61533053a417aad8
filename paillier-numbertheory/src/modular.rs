use rug::ops::{DivRounding, RemRounding};
use rug::Integer;

/// The function $L(u) = (u - 1) / n$ from Paillier's scheme, with Euclidean division. The
/// division is exact whenever $u \equiv 1 \pmod n$. A ciphertext sharing a factor with $n$ gives
/// $u = 0$, and then $L(0) = -1$.
pub fn l_function(u: &Integer, n: &Integer) -> Integer {
    Integer::from(u - 1).div_euc(n)
}

/// Computes `base^exponent mod modulus` for a public `exponent`. A negative exponent is first
/// reduced modulo `exponent_modulus` (Euclidean), so that the exponentiation never needs an
/// inverse.
pub fn pow_mod(base: &Integer, exponent: &Integer, exponent_modulus: &Integer, modulus: &Integer) -> Integer {
    let exponent = if *exponent < 0 {
        exponent.clone().rem_euc(exponent_modulus)
    } else {
        exponent.clone()
    };

    // pow_mod_ref only fails on a negative exponent without an inverse of the base
    Integer::from(
        base.pow_mod_ref(&exponent, modulus)
            .unwrap_or_else(|| unreachable!("the exponent is non-negative")),
    )
}

/// Recombines $m_p = m \bmod p$ and $m_q = m \bmod q$ into $m \bmod pq$ (Garner's form of the
/// Chinese Remainder Theorem), where `p_inv_q` is $p^{-1} \bmod q$.
pub fn crt_recombine(mp: &Integer, mq: &Integer, p: &Integer, q: &Integer, p_inv_q: &Integer) -> Integer {
    let mut u = Integer::from(mq - mp);
    u *= p_inv_q;
    let u = u.rem_euc(q);

    // mp < p and u < q, so the result is already below pq
    let mut m = u * p;
    m += mp;
    m
}

#[cfg(test)]
mod tests {
    use crate::modular::{crt_recombine, l_function, pow_mod};
    use rug::Integer;

    #[test]
    fn test_l_function_exact() {
        // 22 = 3 * 7 + 1
        assert_eq!(l_function(&Integer::from(22), &Integer::from(7)), 3);
        assert_eq!(l_function(&Integer::from(1), &Integer::from(7)), 0);
    }

    #[test]
    fn test_l_function_rounds_down() {
        // (0 - 1) / 7 rounds towards negative infinity
        assert_eq!(l_function(&Integer::from(0), &Integer::from(7)), -1);
        assert_eq!(l_function(&Integer::from(0), &Integer::from(11)), -1);
    }

    #[test]
    fn test_crt_recombine_small() {
        let p = Integer::from(7);
        let q = Integer::from(11);
        let p_inv_q = Integer::from(p.invert_ref(&q).unwrap());

        for m in 0..77 {
            let mp = Integer::from(m % 7);
            let mq = Integer::from(m % 11);
            assert_eq!(crt_recombine(&mp, &mq, &p, &q, &p_inv_q), m);
        }
    }

    #[test]
    fn test_crt_recombine_negative_difference() {
        // mq - mp is negative here, which must still give a non-negative result
        let p = Integer::from(11);
        let q = Integer::from(7);
        let p_inv_q = Integer::from(p.invert_ref(&q).unwrap());

        let result = crt_recombine(&Integer::from(10), &Integer::from(0), &p, &q, &p_inv_q);
        assert_eq!(result, 21);
    }

    #[test]
    fn test_pow_mod_positive_exponent() {
        let result = pow_mod(
            &Integer::from(3),
            &Integer::from(4),
            &Integer::from(10),
            &Integer::from(7),
        );
        assert_eq!(result, 81 % 7);
    }

    #[test]
    fn test_pow_mod_zero_exponent() {
        let result = pow_mod(
            &Integer::from(5),
            &Integer::from(0),
            &Integer::from(10),
            &Integer::from(49),
        );
        assert_eq!(result, 1);
    }

    #[test]
    fn test_pow_mod_negative_exponent_is_reduced() {
        // 2 has order 3 modulo 7, so 2^-1 = 2^2 = 4
        let result = pow_mod(
            &Integer::from(2),
            &Integer::from(-1),
            &Integer::from(3),
            &Integer::from(7),
        );
        assert_eq!(result, 4);
    }
}
