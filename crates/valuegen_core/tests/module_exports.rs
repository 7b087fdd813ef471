//! Integration tests for module exports.
//!
//! Verifies that the public modules and types are reachable via absolute
//! paths and cooperate across module boundaries.

use num_bigint::BigInt;

/// Bit source is reachable and behaves as a `rand::RngCore`.
#[test]
fn test_rng_module_exports() {
    use rand::RngCore;
    use valuegen_core::rng::isaac::IsaacRng;
    use valuegen_core::rng::seed::EXAMPLE_SEED;
    use valuegen_core::rng::SEED_SIZE;

    assert_eq!(EXAMPLE_SEED.len(), SEED_SIZE);

    let mut words = IsaacRng::new(&EXAMPLE_SEED).unwrap();
    let mut bytes = words.clone();
    let first = words.next_word() as u32;
    let mut buffer = [0u8; 4];
    bytes.fill_bytes(&mut buffer);
    assert_eq!(u32::from_le_bytes(buffer), first);
}

/// Value types are reachable and interoperate.
#[test]
fn test_types_module_exports() {
    use valuegen_core::types::binary_fraction::BinaryFraction;
    use valuegen_core::types::decimal::BigDecimal;
    use valuegen_core::types::error::{ParseError, SeedError};

    let eighth = BinaryFraction::new(BigInt::from(1), -3);
    assert_eq!(eighth.to_big_decimal().to_string(), "0.125");
    assert_eq!(
        BinaryFraction::from(12i64).to_big_decimal(),
        BigDecimal::new(BigInt::from(12), 0)
    );

    assert!(matches!(
        "2 >> 2".parse::<BinaryFraction>(),
        Err(ParseError::NonCanonical(_))
    ));

    let error = valuegen_core::rng::IsaacRng::new(&[0; 3]).unwrap_err();
    assert_eq!(
        error,
        SeedError::InvalidLength {
            expected: 256,
            actual: 3
        }
    );
}

/// IEEE helpers are reachable through the `math` re-export.
#[test]
fn test_math_module_exports() {
    use valuegen_core::math::bigint::{is_odd, pow10, zigzag};
    use valuegen_core::math::IeeeFloat;

    assert_eq!(f64::MAX.successor(), f64::INFINITY);
    assert_eq!((-0.0_f64).to_ordinal(), Some(0));
    assert_eq!(f32::from_ordinal(1), f32::min_positive_subnormal());

    assert_eq!(zigzag(3), 2);
    assert!(is_odd(&BigInt::from(-7)));
    assert_eq!(pow10(2), BigInt::from(100));
}

/// Binary fractions convert to floats with directed rounding.
#[test]
fn test_binary_fraction_float_bridge() {
    use valuegen_core::types::BinaryFraction;

    let third_ish = BinaryFraction::new(BigInt::from(0x5555_5555_5555_5555u64), -64);
    let below: f64 = third_ish.to_float_floor();
    let above: f64 = third_ish.to_float_ceiling();
    assert!(below < above);
    assert_eq!(below.successor(), above);
    assert!(BinaryFraction::from_float(below).unwrap() < third_ish);
    assert!(BinaryFraction::from_float(above).unwrap() > third_ish);

    use valuegen_core::math::IeeeFloat;
    let nearest: f32 = third_ish.to_float_nearest();
    assert!(nearest == third_ish.to_float_floor::<f32>() || nearest == third_ish.to_float_ceiling::<f32>());
}
