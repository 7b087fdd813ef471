//! Random numeric generators.
//!
//! Each function takes a clone of the provider's cursor and returns an
//! infinite (or provably empty) sequence. Scale floors are checked by the
//! caller; the functions here assume valid parameters.

use std::cmp::Ordering;
use std::iter::repeat_with;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use tracing::trace;
use valuegen_core::math::bigint::bit_length;
use valuegen_core::math::IeeeFloat;
use valuegen_core::types::{BigDecimal, BinaryFraction};

use super::cursor::Cursor;
use crate::iter::{constant, empty};
use crate::provider::{Integral, Ranged, Values};

// ----------------------------------------------------------------------
// Fixed-width primitives
// ----------------------------------------------------------------------

pub(super) fn values<T: Ranged>(c: Cursor) -> Values<T> {
    let (lo, hi) = (T::MIN.to_ordinal(), T::MAX.to_ordinal());
    Box::new(repeat_with(move || T::from_ordinal(c.gen_range(lo..=hi))))
}

pub(super) fn nonzeros<T: Integral>(c: Cursor) -> Values<T> {
    Box::new(values::<T>(c).filter(|x| x.to_ordinal() != 0))
}

pub(super) fn range<T: Ranged>(c: Cursor, a: T, b: T) -> Values<T> {
    match a.cmp(&b) {
        Ordering::Greater => empty(),
        Ordering::Equal => constant(a),
        Ordering::Less => {
            let (lo, hi) = (a.to_ordinal(), b.to_ordinal());
            Box::new(repeat_with(move || T::from_ordinal(c.gen_range(lo..=hi))))
        }
    }
}

// ----------------------------------------------------------------------
// Geometric integers
// ----------------------------------------------------------------------

/// Repeats `draw` until the result fits in an `i32`.
fn fitting_i32(mut draw: impl FnMut() -> i64) -> i32 {
    loop {
        match i32::try_from(draw()) {
            Ok(x) => return x,
            Err(_) => trace!("geometric draw outside i32, redrawing"),
        }
    }
}

pub(super) fn positive_ints(c: Cursor, scale: i32) -> Values<i32> {
    let mean = f64::from(scale);
    Box::new(repeat_with(move || {
        fitting_i32(|| c.positive_geometric(mean))
    }))
}

pub(super) fn natural_ints(c: Cursor, scale: i32) -> Values<i32> {
    let mean = f64::from(scale);
    Box::new(repeat_with(move || fitting_i32(|| c.natural_geometric(mean))))
}

pub(super) fn nonzero_ints(c: Cursor, scale: i32) -> Values<i32> {
    let mean = f64::from(scale);
    Box::new(repeat_with(move || {
        fitting_i32(|| c.sign() * c.positive_geometric(mean))
    }))
}

pub(super) fn ints(c: Cursor, scale: i32) -> Values<i32> {
    let mean = f64::from(scale);
    Box::new(repeat_with(move || {
        fitting_i32(|| c.sign() * c.natural_geometric(mean))
    }))
}

/// `a + natural geometric(scale - a)`, so the mean is `scale`.
pub(super) fn range_up_ints(c: Cursor, scale: i32, a: i32) -> Values<i32> {
    let mean = f64::from(scale) - f64::from(a);
    Box::new(repeat_with(move || {
        fitting_i32(|| i64::from(a) + c.natural_geometric(mean))
    }))
}

pub(super) fn range_down_ints(c: Cursor, scale: i32, a: i32) -> Values<i32> {
    let mean = f64::from(a) - f64::from(scale);
    Box::new(repeat_with(move || {
        fitting_i32(|| i64::from(a) - c.natural_geometric(mean))
    }))
}

// ----------------------------------------------------------------------
// Big integers
// ----------------------------------------------------------------------

fn positive_bigint(c: &Cursor, mean: f64) -> BigInt {
    c.with_bit_length(c.positive_geometric(mean) as u64)
}

fn natural_bigint(c: &Cursor, mean: f64) -> BigInt {
    match c.natural_geometric(mean) {
        0 => BigInt::zero(),
        bits => c.with_bit_length(bits as u64),
    }
}

pub(super) fn positive_bigints(c: Cursor, scale: i32) -> Values<BigInt> {
    let mean = f64::from(scale);
    Box::new(repeat_with(move || positive_bigint(&c, mean)))
}

pub(super) fn natural_bigints(c: Cursor, scale: i32) -> Values<BigInt> {
    let mean = f64::from(scale);
    Box::new(repeat_with(move || natural_bigint(&c, mean)))
}

pub(super) fn nonzero_bigints(c: Cursor, scale: i32) -> Values<BigInt> {
    let mean = f64::from(scale);
    Box::new(repeat_with(move || c.sign() * positive_bigint(&c, mean)))
}

pub(super) fn bigints(c: Cursor, scale: i32) -> Values<BigInt> {
    let mean = f64::from(scale);
    Box::new(repeat_with(move || c.sign() * natural_bigint(&c, mean)))
}

/// Bit length every value `>= a` can have at minimum.
fn bit_length_floor(a: &BigInt) -> u64 {
    if a.is_negative() {
        0
    } else {
        bit_length(a)
    }
}

/// Integers `>= a` whose bit length is `floor + natural geometric(scale - floor)`.
pub(super) fn range_up_bigints(c: Cursor, scale: i32, a: BigInt) -> Values<BigInt> {
    let floor = bit_length_floor(&a);
    let mean = f64::from(scale) - floor as f64;
    Box::new(repeat_with(move || loop {
        let bits = floor + c.natural_geometric(mean) as u64;
        if !a.is_negative() {
            if bits > floor {
                return c.with_bit_length(bits);
            }
            // Every value of this length that is `>= a`.
            let span = (BigInt::from(1u32) << bits) - &a;
            return &a + c.below_big(&span);
        }
        let x = if bits == 0 {
            BigInt::zero()
        } else {
            c.sign() * c.with_bit_length(bits)
        };
        if x >= a {
            return x;
        }
        trace!("big integer below range, redrawing");
    }))
}

pub(super) fn range_down_bigints(c: Cursor, scale: i32, a: BigInt) -> Values<BigInt> {
    Box::new(range_up_bigints(c, scale, -a).map(|x| -x))
}

pub(super) fn range_bigints(c: Cursor, a: BigInt, b: BigInt) -> Values<BigInt> {
    match a.cmp(&b) {
        Ordering::Greater => empty(),
        Ordering::Equal => constant(a),
        Ordering::Less => {
            let span = &b - &a + 1u32;
            Box::new(repeat_with(move || &a + c.below_big(&span)))
        }
    }
}

// ----------------------------------------------------------------------
// Binary fractions
// ----------------------------------------------------------------------

/// Signed exponent whose magnitude is natural geometric(`mean`).
fn signed_exponent(c: &Cursor, mean: f64) -> i32 {
    fitting_i32(|| {
        let sign = c.sign();
        sign * c.natural_geometric(mean)
    })
}

/// Positive fraction with an odd mantissa of exactly `bits` bits.
fn fraction_with_length(c: &Cursor, bits: u64, secondary_mean: f64) -> BinaryFraction {
    let mantissa = if bits == 1 {
        BigInt::from(1u32)
    } else {
        (BigInt::from(1u32) << (bits - 1)) + (c.random_bits(bits - 2) << 1u32) + 1u32
    };
    BinaryFraction::new(mantissa, signed_exponent(c, secondary_mean))
}

fn positive_fraction(c: &Cursor, mean: f64, secondary_mean: f64) -> BinaryFraction {
    fraction_with_length(c, c.positive_geometric(mean) as u64, secondary_mean)
}

fn natural_fraction(c: &Cursor, mean: f64, secondary_mean: f64) -> BinaryFraction {
    match c.natural_geometric(mean) {
        0 => BinaryFraction::zero(),
        bits => fraction_with_length(c, bits as u64, secondary_mean),
    }
}

pub(super) fn positive_fractions(c: Cursor, scale: i32, secondary: i32) -> Values<BinaryFraction> {
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || positive_fraction(&c, mean, secondary_mean)))
}

pub(super) fn nonzero_fractions(c: Cursor, scale: i32, secondary: i32) -> Values<BinaryFraction> {
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || {
        let negative = !c.next_bool();
        let x = positive_fraction(&c, mean, secondary_mean);
        if negative {
            x.negate()
        } else {
            x
        }
    }))
}

pub(super) fn fractions(c: Cursor, scale: i32, secondary: i32) -> Values<BinaryFraction> {
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || {
        let negative = !c.next_bool();
        let x = natural_fraction(&c, mean, secondary_mean);
        if negative {
            x.negate()
        } else {
            x
        }
    }))
}

/// `a + d` for nonnegative fractions `d`.
pub(super) fn range_up_fractions(
    c: Cursor,
    scale: i32,
    secondary: i32,
    a: BinaryFraction,
) -> Values<BinaryFraction> {
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || a.add(&natural_fraction(&c, mean, secondary_mean))))
}

pub(super) fn range_down_fractions(
    c: Cursor,
    scale: i32,
    secondary: i32,
    a: BinaryFraction,
) -> Values<BinaryFraction> {
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || a.sub(&natural_fraction(&c, mean, secondary_mean))))
}

/// Uniform grid point of `[a, b]` at a geometric refinement depth.
///
/// With `b - a = m × 2^e`, depth `p` picks `n` uniformly in `[0, m × 2^p]`
/// and returns `a + n × 2^(e - p)`, so both endpoints are reachable.
pub(super) fn range_fractions(
    c: Cursor,
    secondary: i32,
    a: BinaryFraction,
    b: BinaryFraction,
) -> Values<BinaryFraction> {
    match a.cmp(&b) {
        Ordering::Greater => empty(),
        Ordering::Equal => constant(a),
        Ordering::Less => {
            let difference = b.sub(&a);
            let secondary_mean = f64::from(secondary);
            Box::new(repeat_with(move || loop {
                let depth = c.natural_geometric(secondary_mean);
                let exponent = i64::from(difference.exponent()) - depth;
                let Ok(exponent) = i32::try_from(exponent) else {
                    trace!("refinement depth out of range, redrawing");
                    continue;
                };
                let points = (difference.mantissa() << depth as u64) + 1u32;
                let n = c.below_big(&points);
                return a.add(&BinaryFraction::new(n, exponent));
            }))
        }
    }
}

// ----------------------------------------------------------------------
// Floats
// ----------------------------------------------------------------------

/// Random fraction field of `F`.
fn fraction_bits<F: IeeeFloat>(c: &Cursor) -> u64 {
    c.next_u64() & F::fraction_mask()
}

/// Positive finite float from a signed geometric exponent and a uniform fraction.
///
/// The slot just below the normal range is read as the subnormal binade.
fn positive_float<F: IeeeFloat>(c: &Cursor, mean: f64) -> F {
    loop {
        let exponent = c.sign() * c.natural_geometric(mean);
        if exponent > i64::from(F::MAX_EXPONENT) || exponent < i64::from(F::MIN_EXPONENT) - 1 {
            trace!(exponent, "float exponent out of range, redrawing");
            continue;
        }
        let fraction = fraction_bits::<F>(c);
        if exponent == i64::from(F::MIN_EXPONENT) - 1 {
            if fraction == 0 {
                continue;
            }
            return F::from_raw(fraction);
        }
        let biased = (exponent + i64::from(F::MAX_EXPONENT)) as u64;
        return F::from_raw((biased << (F::PRECISION - 1)) | fraction);
    }
}

pub(super) fn positive_floats<F: IeeeFloat>(c: Cursor, scale: i32) -> Values<F> {
    let mean = f64::from(scale);
    Box::new(repeat_with(move || positive_float::<F>(&c, mean)))
}

fn nonzero_float<F: IeeeFloat>(c: &Cursor, mean: f64) -> F {
    let negative = !c.next_bool();
    let x = positive_float::<F>(c, mean);
    if negative {
        -x
    } else {
        x
    }
}

pub(super) fn nonzero_floats<F: IeeeFloat>(c: Cursor, scale: i32) -> Values<F> {
    let mean = f64::from(scale);
    Box::new(repeat_with(move || nonzero_float::<F>(&c, mean)))
}

/// Odds against drawing a special value in `floats`.
const SPECIAL_ODDS: u32 = 32;

pub(super) fn floats<F: IeeeFloat>(c: Cursor, scale: i32) -> Values<F> {
    let mean = f64::from(scale);
    let specials = [
        F::nan(),
        F::infinity(),
        F::neg_infinity(),
        F::zero(),
        F::neg_zero(),
    ];
    Box::new(repeat_with(move || {
        if c.gen_ratio(1, SPECIAL_ODDS) {
            if let Some(&x) = c.choose(&specials) {
                return x;
            }
        }
        nonzero_float::<F>(&c, mean)
    }))
}

fn non_nan_floats<F: IeeeFloat>(c: Cursor, scale: i32) -> Values<F> {
    Box::new(floats::<F>(c, scale).filter(|x| !x.is_nan()))
}

/// Ordinal step of natural geometric bit length; `i64::MAX` past 62 bits.
fn ordinal_offset(c: &Cursor, mean: f64) -> i64 {
    match c.natural_geometric(mean) {
        0 => 0,
        bits @ 1..=62 => {
            let low = 1i64 << (bits - 1);
            c.gen_range(low..low << 1)
        }
        _ => i64::MAX,
    }
}

/// Floats `>= a`; `a` must not be NaN.
///
/// Each draw flips a coin between two routes. The additive route rounds
/// `a + d` up for a positive fraction `d`, which spreads values realistically
/// when `a` is small. The ordinal route steps a geometric number of
/// representable values up from `a`, which keeps large bounds from collapsing
/// onto the successor of `a` and reaches `a` itself. No finite value lies above
/// `F::max_value()`, so that bound yields `+∞` alone.
pub(super) fn range_up_floats<F: IeeeFloat>(
    c: Cursor,
    scale: i32,
    secondary: i32,
    a: F,
) -> Values<F> {
    if a == F::infinity() || a == F::max_value() {
        return constant(F::infinity());
    }
    let (Some(start), Some(origin)) = (BinaryFraction::from_float(a), a.to_ordinal()) else {
        return non_nan_floats(c, scale);
    };
    let top = ordinal(F::infinity());
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || {
        if c.next_bool() {
            start
                .add(&positive_fraction(&c, mean, secondary_mean))
                .to_float_ceiling()
        } else {
            F::from_ordinal(origin.saturating_add(ordinal_offset(&c, mean)).min(top))
        }
    }))
}

/// Mirror image of [`range_up_floats`].
pub(super) fn range_down_floats<F: IeeeFloat>(
    c: Cursor,
    scale: i32,
    secondary: i32,
    a: F,
) -> Values<F> {
    Box::new(range_up_floats(c, scale, secondary, -a).map(|x| -x))
}

/// Nearest float to a fraction drawn from `[a, b]`; neither bound may be NaN.
pub(super) fn range_floats<F: IeeeFloat>(
    c: Cursor,
    scale: i32,
    secondary: i32,
    a: F,
    b: F,
) -> Values<F> {
    if a > b {
        return empty();
    }
    if a == b {
        return constant(a);
    }
    match (BinaryFraction::from_float(a), BinaryFraction::from_float(b)) {
        (Some(lo), Some(hi)) => {
            Box::new(range_fractions(c, secondary, lo, hi).map(|x| x.to_float_nearest()))
        }
        (None, Some(_)) => range_down_floats(c, scale, secondary, b),
        (Some(_), None) => range_up_floats(c, scale, secondary, a),
        (None, None) => non_nan_floats(c, scale),
    }
}

fn ordinal<F: IeeeFloat>(x: F) -> i64 {
    x.to_ordinal().unwrap_or_default()
}

/// Uniform over the finite floats between two finite bounds.
fn uniform_between<F: IeeeFloat>(c: Cursor, a: F, b: F) -> Values<F> {
    let (lo, hi) = (ordinal(a), ordinal(b));
    Box::new(repeat_with(move || F::from_ordinal(c.gen_range(lo..=hi))))
}

pub(super) fn floats_uniform<F: IeeeFloat>(c: Cursor) -> Values<F> {
    uniform_between(c, -F::max_value(), F::max_value())
}

pub(super) fn range_up_floats_uniform<F: IeeeFloat>(c: Cursor, a: F) -> Values<F> {
    if a == F::infinity() {
        return constant(a);
    }
    uniform_between(c, a.max(-F::max_value()), F::max_value())
}

pub(super) fn range_down_floats_uniform<F: IeeeFloat>(c: Cursor, a: F) -> Values<F> {
    if a == F::neg_infinity() {
        return constant(a);
    }
    uniform_between(c, -F::max_value(), a.min(F::max_value()))
}

pub(super) fn range_floats_uniform<F: IeeeFloat>(c: Cursor, a: F, b: F) -> Values<F> {
    if a > b {
        return empty();
    }
    if a == b {
        return constant(a);
    }
    let lo = a.max(-F::max_value());
    let hi = b.min(F::max_value());
    uniform_between(c, lo, hi)
}

// ----------------------------------------------------------------------
// Big decimals
// ----------------------------------------------------------------------

fn decimal_from(c: &Cursor, unscaled: BigInt, secondary_mean: f64) -> BigDecimal {
    BigDecimal::new(unscaled, signed_exponent(c, secondary_mean))
}

pub(super) fn positive_decimals(c: Cursor, scale: i32, secondary: i32) -> Values<BigDecimal> {
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || {
        let unscaled = positive_bigint(&c, mean);
        decimal_from(&c, unscaled, secondary_mean)
    }))
}

pub(super) fn nonzero_decimals(c: Cursor, scale: i32, secondary: i32) -> Values<BigDecimal> {
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || {
        let unscaled = c.sign() * positive_bigint(&c, mean);
        decimal_from(&c, unscaled, secondary_mean)
    }))
}

pub(super) fn decimals(c: Cursor, scale: i32, secondary: i32) -> Values<BigDecimal> {
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || {
        let unscaled = c.sign() * natural_bigint(&c, mean);
        decimal_from(&c, unscaled, secondary_mean)
    }))
}

fn natural_decimal(c: &Cursor, mean: f64, secondary_mean: f64) -> BigDecimal {
    let unscaled = natural_bigint(c, mean);
    decimal_from(c, unscaled, secondary_mean)
}

pub(super) fn range_up_decimals(
    c: Cursor,
    scale: i32,
    secondary: i32,
    a: BigDecimal,
) -> Values<BigDecimal> {
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || a.add(&natural_decimal(&c, mean, secondary_mean))))
}

pub(super) fn range_down_decimals(
    c: Cursor,
    scale: i32,
    secondary: i32,
    a: BigDecimal,
) -> Values<BigDecimal> {
    let (mean, secondary_mean) = (f64::from(scale), f64::from(secondary));
    Box::new(repeat_with(move || {
        a.add(&natural_decimal(&c, mean, secondary_mean).negate())
    }))
}

/// Uniform grid point of `[a, b]` at scale `max(scale(a), scale(b)) + p`.
pub(super) fn range_decimals(
    c: Cursor,
    secondary: i32,
    a: BigDecimal,
    b: BigDecimal,
) -> Values<BigDecimal> {
    match a.compare_value(&b) {
        Ordering::Greater => empty(),
        Ordering::Equal => constant(a),
        Ordering::Less => {
            let base = i64::from(a.scale().max(b.scale()));
            let secondary_mean = f64::from(secondary);
            Box::new(repeat_with(move || loop {
                let Ok(scale) = i32::try_from(base + c.natural_geometric(secondary_mean)) else {
                    trace!("decimal scale out of range, redrawing");
                    continue;
                };
                let lo = a.rescale_floor(scale);
                let span = b.rescale_floor(scale) - &lo + 1u32;
                return BigDecimal::new(lo + c.below_big(&span), scale);
            }))
        }
    }
}

pub(super) fn canonical(xs: Values<BigDecimal>) -> Values<BigDecimal> {
    Box::new(xs.map(|x| x.canonical()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuegen_core::rng::{IsaacRng, EXAMPLE_SEED};

    fn cursor() -> Cursor {
        Cursor::new(IsaacRng::from_words(&EXAMPLE_SEED))
    }

    #[test]
    fn test_range_up_bigints_respects_bound() {
        for a in [-1000i64, -1, 0, 1, 5, 1 << 40] {
            let a = BigInt::from(a);
            let floor = bit_length_floor(&a) as i32;
            let xs = range_up_bigints(cursor(), floor + 3, a.clone());
            assert!(xs.take(500).all(|x| x >= a));
        }
    }

    #[test]
    fn test_range_fractions_reaches_endpoints() {
        let a: BinaryFraction = "-1".parse().unwrap();
        let b: BinaryFraction = "1 >> 1".parse().unwrap();
        let drawn: Vec<_> = range_fractions(cursor(), 1, a.clone(), b.clone())
            .take(2000)
            .collect();
        assert!(drawn.iter().all(|x| &a <= x && x <= &b));
        assert!(drawn.contains(&a));
        assert!(drawn.contains(&b));
    }

    #[test]
    fn test_positive_floats_are_positive_and_finite() {
        for x in positive_floats::<f32>(cursor(), 64).take(2000) {
            assert!(x > 0.0 && x.is_finite());
        }
        for x in positive_floats::<f64>(cursor(), 1).take(2000) {
            assert!(x > 0.0 && x.is_finite());
        }
    }

    #[test]
    fn test_subnormals_appear_at_large_scale() {
        let subnormal = positive_floats::<f32>(cursor(), 200)
            .take(20_000)
            .any(|x| !x.is_normal());
        assert!(subnormal);
    }

    #[test]
    fn test_range_decimals_contained() {
        let a: BigDecimal = "-1.5".parse().unwrap();
        let b: BigDecimal = "2.25".parse().unwrap();
        for x in range_decimals(cursor(), 2, a.clone(), b.clone()).take(1000) {
            assert_ne!(x.compare_value(&a), Ordering::Less);
            assert_ne!(x.compare_value(&b), Ordering::Greater);
            assert!(x.scale() >= 2);
        }
    }
}
