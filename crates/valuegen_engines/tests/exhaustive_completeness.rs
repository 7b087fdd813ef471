//! Completeness and ordering tests for the exhaustive engine.
//!
//! Finite domains are enumerated to the end and counted; infinite domains
//! are checked to reach every small value within a bounded prefix.

use std::cmp::Ordering;
use std::collections::HashSet;

use num_bigint::BigInt;
use valuegen_core::types::{BigDecimal, BinaryFraction};
use valuegen_engines::{ExhaustiveProvider, Provider};

fn provider() -> ExhaustiveProvider {
    ExhaustiveProvider::new()
}

fn fraction(s: &str) -> BinaryFraction {
    s.parse().unwrap()
}

fn decimal(s: &str) -> BigDecimal {
    s.parse().unwrap()
}

fn all_distinct<T: std::hash::Hash + Eq>(xs: &[T]) -> bool {
    xs.iter().collect::<HashSet<_>>().len() == xs.len()
}

// ============================================================================
// Finite domains
// ============================================================================

/// Test booleans and orderings are listed in full
#[test]
fn test_small_enumerations() {
    let p = provider();
    assert_eq!(p.booleans().collect::<Vec<_>>(), vec![false, true]);
    assert_eq!(
        p.orderings().collect::<Vec<_>>(),
        vec![Ordering::Equal, Ordering::Less, Ordering::Greater]
    );
}

/// Test every byte value appears once, zero first
#[test]
fn test_all_i8_values() {
    let xs: Vec<i8> = provider().values().collect();
    assert_eq!(xs.len(), 256);
    assert_eq!(xs[..5], [0, 1, -1, 2, -2]);
    assert!(all_distinct(&xs));
    assert_eq!(xs.last(), Some(&i8::MIN));
}

/// Test ranges start at the endpoint nearest zero
#[test]
fn test_range_orders() {
    let p = provider();
    assert_eq!(p.range(-3i8, 3).collect::<Vec<_>>(), vec![0, 1, -1, 2, -2, 3, -3]);
    assert_eq!(p.range(5i32, 8).collect::<Vec<_>>(), vec![5, 6, 7, 8]);
    assert_eq!(p.range(-8i64, -5).collect::<Vec<_>>(), vec![-5, -6, -7, -8]);
    assert_eq!(p.range(-1i16, 3).collect::<Vec<_>>(), vec![0, 1, -1, 2, 3]);
    assert_eq!(p.range_up(120i8).count(), 8);
    assert_eq!(p.range_down(i16::MIN).collect::<Vec<_>>(), vec![i16::MIN]);
    assert_eq!(p.nonzeros::<i8>().count(), 255);
    assert_eq!(p.positives::<i8>().count(), 127);
    assert_eq!(p.negatives::<i8>().count(), 128);
}

/// Test equal bounds enumerate the one value once, and reversed bounds nothing
#[test]
fn test_degenerate_int_ranges() {
    let p = provider();
    assert_eq!(p.range(11i32, 11).collect::<Vec<_>>(), vec![11]);
    assert_eq!(p.range(i64::MIN, i64::MIN).collect::<Vec<_>>(), vec![i64::MIN]);
    assert_eq!(p.range(1i32, -1).count(), 0);
    assert_eq!(p.range(5i32, 3).count(), 0);
}

/// Test characters: friendly ASCII order, then every other scalar value
#[test]
fn test_all_chars() {
    let p = provider();
    let ascii: Vec<char> = p.ascii_chars().collect();
    assert_eq!(ascii.len(), 128);
    assert!(all_distinct(&ascii));
    assert_eq!(ascii[..3], ['a', 'b', 'c']);
    assert_eq!(ascii[26], 'A');
    assert_eq!(ascii[52], '0');
    assert_eq!(p.chars().count(), 0x11_0000 - 0x800);
    assert_eq!(p.strings_with_length(1).next(), Some("a".to_string()));
}

/// Test finite collections end after every element
#[test]
fn test_finite_collections() {
    let p = provider();
    assert_eq!(p.triples(p.booleans(), p.booleans(), p.booleans()).count(), 8);
    assert_eq!(p.maps(vec![1, 2, 3], p.booleans()).count(), 8);
    assert_eq!(p.maps(vec![2, 2], p.booleans()).count(), 2);
    assert_eq!(p.bags_with_length(2, p.range(1i8, 3)).count(), 6);
    assert_eq!(p.subsets_with_length(2, p.range(1i8, 4)).count(), 6);
    assert_eq!(p.subsets(p.range(1i8, 4)).unwrap().count(), 16);
    assert_eq!(p.permutations(vec!['a', 'b', 'c', 'd']).count(), 24);
    assert_eq!(p.permutations(vec![1, 1, 2]).count(), 3);
    let product: Vec<Vec<u8>> = p
        .cartesian_product(vec![vec![1, 2], vec![3, 4], vec![5]])
        .unwrap()
        .collect();
    assert_eq!(product.len(), 4);
    assert!(all_distinct(&product));
}

/// Test fixed-length lists over a finite source are complete
#[test]
fn test_lists_with_length_complete() {
    let p = provider();
    let lists: Vec<Vec<bool>> = p.lists_with_length(3, p.booleans()).collect();
    assert_eq!(lists.len(), 8);
    assert!(all_distinct(&lists));
    assert_eq!(p.lists_with_length(0, p.booleans()).count(), 1);
}

// ============================================================================
// Infinite domains
// ============================================================================

/// Test geometric ints are visited zero-first
#[test]
fn test_geometric_orders() {
    let p = provider();
    let firsts = |xs: valuegen_engines::Values<i32>| xs.take(5).collect::<Vec<_>>();
    assert_eq!(firsts(p.positive_ints_geometric().unwrap()), vec![1, 2, 3, 4, 5]);
    assert_eq!(firsts(p.negative_ints_geometric().unwrap()), vec![-1, -2, -3, -4, -5]);
    assert_eq!(firsts(p.ints_geometric().unwrap()), vec![0, 1, -1, 2, -2]);
    assert_eq!(firsts(p.nonzero_ints_geometric().unwrap()), vec![1, -1, 2, -2, 3]);
    assert_eq!(firsts(p.range_up_geometric(-1).unwrap()), vec![0, 1, -1, 2, 3]);
}

/// Test big integers are visited zero-first
#[test]
fn test_bigint_orders() {
    let p = provider();
    let ints: Vec<BigInt> = p.bigints().unwrap().take(5).collect();
    let expected: Vec<BigInt> = [0, 1, -1, 2, -2].into_iter().map(BigInt::from).collect();
    assert_eq!(ints, expected);
    let between: Vec<BigInt> = p
        .range_bigint(BigInt::from(-2), BigInt::from(1))
        .collect();
    assert_eq!(between.len(), 4);
    let up: Vec<BigInt> = p.range_up_bigint(BigInt::from(3)).unwrap().take(3).collect();
    let expected: Vec<BigInt> = [3, 4, 5].into_iter().map(BigInt::from).collect();
    assert_eq!(up, expected);
}

/// Test small binary fractions are reached within a bounded prefix
#[test]
fn test_binary_fractions_reach_small_values() {
    let p = provider();
    let xs: Vec<BinaryFraction> = p.binary_fractions().unwrap().take(400).collect();
    assert_eq!(xs[0], BinaryFraction::zero());
    assert!(all_distinct(&xs));
    for mantissa in (-15i64..=15).filter(|m| m % 2 != 0) {
        for exponent in -4..=4 {
            let x = BinaryFraction::new(BigInt::from(mantissa), exponent);
            assert!(xs.contains(&x), "missing {x}");
        }
    }
    let positives: Vec<BinaryFraction> = p.positive_binary_fractions().unwrap().take(3).collect();
    assert_eq!(positives[0], BinaryFraction::one());
    assert!(positives.iter().all(|x| x.signum() == 1));
}

/// Test fraction ranges refine level by level
#[test]
fn test_binary_fraction_range_refines() {
    let p = provider();
    let xs: Vec<BinaryFraction> = p
        .range_binary_fraction(BinaryFraction::zero(), BinaryFraction::one())
        .unwrap()
        .take(5)
        .collect();
    let expected: Vec<BinaryFraction> = ["0", "1", "1 >> 1", "1 >> 2", "3 >> 2"]
        .into_iter()
        .map(fraction)
        .collect();
    assert_eq!(xs, expected);
    let up: Vec<BinaryFraction> = p
        .range_up_binary_fraction(fraction("1 >> 1"))
        .unwrap()
        .take(2)
        .collect();
    assert_eq!(up[0], fraction("1 >> 1"));
    assert_eq!(up[1], fraction("3 >> 1"));
}

/// Test small decimals are reached in every representation
#[test]
fn test_decimals_reach_small_values() {
    let p = provider();
    let xs: Vec<BigDecimal> = p.big_decimals().unwrap().take(400).collect();
    for unscaled in -5i64..=5 {
        for scale in -3..=3 {
            assert!(
                xs.iter()
                    .any(|x| x.unscaled() == &BigInt::from(unscaled) && x.scale() == scale),
                "missing {unscaled}E{}",
                -scale
            );
        }
    }
    let canonical: Vec<BigDecimal> = p.canonical_big_decimals().unwrap().take(200).collect();
    assert!(canonical.iter().all(BigDecimal::is_canonical));
    for (i, x) in canonical.iter().enumerate() {
        assert!(canonical[..i].iter().all(|y| !x.numeric_eq(y)));
    }
}

/// Test degenerate decimal ranges
#[test]
fn test_degenerate_decimal_ranges() {
    let p = provider();
    let one = decimal("1.0");
    let single: Vec<BigDecimal> = p
        .range_canonical_big_decimal(one.clone(), decimal("1.00"))
        .unwrap()
        .collect();
    assert_eq!(single.len(), 1);
    assert!(single[0].is_canonical() && single[0].numeric_eq(&one));
    assert!(p
        .range_big_decimal(one.clone(), one.clone())
        .unwrap()
        .take(5)
        .all(|x| x.numeric_eq(&one)));
    let firsts: Vec<BigDecimal> = p
        .range_canonical_big_decimal(decimal("0"), decimal("1"))
        .unwrap()
        .take(40)
        .collect();
    for expected in ["0", "1", "0.1", "0.5", "0.01"] {
        assert!(firsts.iter().any(|x| x.numeric_eq(&decimal(expected))));
    }
    assert!(all_distinct(&firsts));
}

/// Test float enumeration: specials, then by precision
#[test]
fn test_float_orders() {
    let p = provider();
    let xs: Vec<f32> = p.floats().unwrap().take(9).collect();
    assert!(xs[0].is_nan());
    assert_eq!(xs[1..5], [f32::INFINITY, f32::NEG_INFINITY, 0.0, -0.0]);
    assert_eq!(xs[5..], [1.0, -1.0, 2.0, -2.0]);
    let positives: Vec<u64> = p
        .positive_floats::<f64>()
        .unwrap()
        .take(5000)
        .map(f64::to_bits)
        .collect();
    assert!(all_distinct(&positives));
    let uniform: Vec<f64> = p.floats_uniform().take(3).collect();
    assert_eq!(uniform, vec![0.0, 1.0, -1.0]);
}

/// Test narrow float ranges list every float between the bounds
#[test]
fn test_narrow_float_range_complete() {
    let p = provider();
    let hi = f32::from_bits(1.0f32.to_bits() + 3);
    let xs: Vec<f32> = p.range_float(1.0f32, hi).unwrap().collect();
    assert_eq!(xs.len(), 4);
    assert_eq!(xs[0], 1.0);
    let ys: Vec<f32> = p.range_float_uniform(1.0f32, hi).unwrap().collect();
    assert_eq!(xs, ys);
}

/// Test lists and sets over infinite sources reach small structures
#[test]
fn test_structures_reach_small_values() {
    let p = provider();
    let pairs: HashSet<(i32, i32)> = p.pairs(p.naturals(), p.naturals()).take(45).collect();
    for a in 0..5 {
        for b in 0..5 {
            assert!(pairs.contains(&(a, b)));
        }
    }
    let lists: Vec<Vec<bool>> = p.lists(p.booleans()).unwrap().take(500).collect();
    assert_eq!(lists[0], Vec::<bool>::new());
    assert!(all_distinct(&lists));
    assert!(lists.contains(&vec![true, false, true]));
    let subsets: Vec<Vec<i32>> = p.subsets(p.naturals()).unwrap().take(300).collect();
    assert!(all_distinct(&subsets));
    assert!(subsets.contains(&vec![0, 2, 3]));
    let with_element: Vec<Vec<bool>> = p
        .lists_with_element(true, p.booleans())
        .unwrap()
        .take(100)
        .collect();
    assert_eq!(with_element[0], vec![true]);
    assert!(all_distinct(&with_element));
}

/// Test sampling and optional values
#[test]
fn test_sampling_and_none() {
    let p = provider();
    let sample: Vec<u8> = p.uniform_sample(vec![1, 2]).unwrap().take(5).collect();
    assert_eq!(sample, vec![1, 2, 1, 2, 1]);
    let optional: Vec<Option<bool>> = p.with_none(p.booleans()).unwrap().collect();
    assert_eq!(optional, vec![None, Some(false), Some(true)]);
}
