//! Big-integer helpers.

use num_bigint::BigInt;

/// Number of bits in the magnitude of `x` (`0` for zero).
#[inline]
pub fn bit_length(x: &BigInt) -> u64 {
    x.bits()
}

/// Maps `0, 1, 2, 3, 4, ...` to `0, 1, -1, 2, -2, ...`.
///
/// This is the zero-first order in which the exhaustive engine visits
/// signed values.
///
/// # Examples
///
/// ```
/// use valuegen_core::math::bigint::zigzag;
///
/// let firsts: Vec<i64> = (0..5).map(zigzag).collect();
/// assert_eq!(firsts, vec![0, 1, -1, 2, -2]);
/// ```
#[inline]
pub fn zigzag(index: u64) -> i64 {
    let half = index.div_ceil(2) as i64;
    if index % 2 == 1 {
        half
    } else {
        -half
    }
}

/// `10^exponent`.
pub fn pow10(exponent: u32) -> BigInt {
    BigInt::from(10u32).pow(exponent)
}

/// Whether `x` is odd, using two's-complement parity so negatives work.
#[inline]
pub fn is_odd(x: &BigInt) -> bool {
    x.bit(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    #[test]
    fn test_zigzag_is_bijective_prefix() {
        let mut seen: Vec<i64> = (0..101).map(zigzag).collect();
        seen.sort_unstable();
        assert_eq!(seen, (-50..=50).collect::<Vec<_>>());
    }

    #[test]
    fn test_parity_and_lengths() {
        assert!(is_odd(&BigInt::from(-3)));
        assert!(!is_odd(&BigInt::from(-4)));
        assert!(!is_odd(&BigInt::zero()));
        assert_eq!(bit_length(&BigInt::from(-8)), 4);
        assert_eq!(bit_length(&BigInt::zero()), 0);
        assert_eq!(pow10(3), BigInt::from(1000));
    }
}
