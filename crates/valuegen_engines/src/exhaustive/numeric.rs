//! Exhaustive numeric domains.
//!
//! Integers are visited zero-first; binary fractions and decimals as
//! diagonal products of a mantissa index and a zig-zag exponent index.

use std::cmp::Ordering;
use std::iter::once;
use std::rc::Rc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{CheckedAdd, CheckedSub, One, Zero};
use valuegen_core::math::bigint::zigzag;
use valuegen_core::types::{BigDecimal, BinaryFraction};

use super::diagonal::{DiagonalRows, Extent, ShellProduct, TupleOrder, Unbounded};
use crate::iter::{empty, single};
use crate::provider::{Integral, Ranged, Values};

// ----------------------------------------------------------------------
// Zero-first ranges
// ----------------------------------------------------------------------

/// Integers of `[lo, hi]` (unbounded where `None`), simplest first.
///
/// Starts at `lo` when `lo >= 0` and walks up, at `hi` when `hi <= 0` and
/// walks down, and otherwise alternates `0, 1, -1, 2, -2, ...` until one
/// side is used up, then continues on the other.
pub(crate) struct ZeroFirst<T> {
    first: Option<T>,
    up: Option<T>,
    down: Option<T>,
    lo: Option<T>,
    hi: Option<T>,
    up_turn: bool,
}

pub(crate) fn zero_first<T>(lo: Option<T>, hi: Option<T>) -> ZeroFirst<T>
where
    T: Clone + Ord + Zero + One + CheckedAdd + CheckedSub,
{
    let zero = T::zero();
    let empty_range = matches!((&lo, &hi), (Some(l), Some(h)) if l > h);
    let start = match (&lo, &hi) {
        _ if empty_range => None,
        (Some(l), _) if l >= &zero => Some(l.clone()),
        (_, Some(h)) if h <= &zero => Some(h.clone()),
        _ => Some(zero),
    };
    let up = start
        .as_ref()
        .and_then(|s| s.checked_add(&T::one()))
        .filter(|x| hi.as_ref().map_or(true, |h| x <= h));
    let down = start
        .as_ref()
        .and_then(|s| s.checked_sub(&T::one()))
        .filter(|x| lo.as_ref().map_or(true, |l| x >= l));
    ZeroFirst {
        first: start,
        up,
        down,
        lo,
        hi,
        up_turn: true,
    }
}

impl<T> Iterator for ZeroFirst<T>
where
    T: Clone + Ord + Zero + One + CheckedAdd + CheckedSub,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(x) = self.first.take() {
            return Some(x);
        }
        for _ in 0..2 {
            let up_turn = self.up_turn;
            self.up_turn = !up_turn;
            if up_turn {
                if let Some(x) = self.up.take() {
                    let hi = &self.hi;
                    self.up = x
                        .checked_add(&T::one())
                        .filter(|y| hi.as_ref().map_or(true, |h| y <= h));
                    return Some(x);
                }
            } else if let Some(x) = self.down.take() {
                let lo = &self.lo;
                self.down = x
                    .checked_sub(&T::one())
                    .filter(|y| lo.as_ref().map_or(true, |l| y >= l));
                return Some(x);
            }
        }
        None
    }
}

// ----------------------------------------------------------------------
// Fixed-width primitives
// ----------------------------------------------------------------------

pub(super) fn range<T: Ranged>(a: T, b: T) -> Values<T> {
    Box::new(zero_first(Some(a.to_ordinal()), Some(b.to_ordinal())).map(T::from_ordinal))
}

pub(super) fn values<T: Ranged>() -> Values<T> {
    range(T::MIN, T::MAX)
}

pub(super) fn nonzeros<T: Integral>() -> Values<T> {
    Box::new(values::<T>().skip(1))
}

fn ascii_printable_rest(c: &char) -> bool {
    !c.is_ascii_alphanumeric()
}

/// ASCII in the order letters, digits, other printable, control.
pub(super) fn ascii_chars() -> Values<char> {
    Box::new(
        ('a'..='z')
            .chain('A'..='Z')
            .chain('0'..='9')
            .chain((' '..='~').filter(ascii_printable_rest))
            .chain('\0'..' ')
            .chain(once('\u{7f}')),
    )
}

/// [`ascii_chars`] followed by every other scalar value by code point.
pub(super) fn chars() -> Values<char> {
    Box::new(ascii_chars().chain('\u{80}'..=char::MAX))
}

// ----------------------------------------------------------------------
// Integers
// ----------------------------------------------------------------------

pub(super) fn ints_between(lo: i32, hi: i32) -> Values<i32> {
    Box::new(zero_first(Some(i64::from(lo)), Some(i64::from(hi))).map(|x| x as i32))
}

pub(super) fn bigints_between(lo: Option<BigInt>, hi: Option<BigInt>) -> Values<BigInt> {
    Box::new(zero_first(lo, hi))
}

/// Nonzero integers in the order `1, -1, 2, -2, ...`.
pub(super) fn nonzero_bigints() -> Values<BigInt> {
    Box::new(zero_first::<BigInt>(None, None).skip(1))
}

// ----------------------------------------------------------------------
// Binary fractions
// ----------------------------------------------------------------------

fn unbounded_pairs() -> ShellProduct {
    let extents: Vec<Rc<dyn Extent>> = vec![Rc::new(Unbounded), Rc::new(Unbounded)];
    ShellProduct::new(extents, TupleOrder::Free)
}

fn exponent_at(index: usize) -> Option<i32> {
    i32::try_from(zigzag(index as u64)).ok()
}

/// Odd mantissa at `index`: `1, 3, 5, ...`, or `1, -1, 3, -3, ...` when signed.
fn odd_mantissa(index: usize, signed: bool) -> BigInt {
    if signed {
        let magnitude = BigInt::from(2 * (index / 2) + 1);
        if index % 2 == 0 {
            magnitude
        } else {
            -magnitude
        }
    } else {
        BigInt::from(2 * index + 1)
    }
}

fn fractions_by_mantissa(signed: bool) -> Values<BinaryFraction> {
    Box::new(unbounded_pairs().filter_map(move |ix| {
        BinaryFraction::checked_new(odd_mantissa(ix[0], signed), exponent_at(ix[1])?)
    }))
}

pub(super) fn positive_fractions() -> Values<BinaryFraction> {
    fractions_by_mantissa(false)
}

pub(super) fn nonzero_fractions() -> Values<BinaryFraction> {
    fractions_by_mantissa(true)
}

pub(super) fn fractions() -> Values<BinaryFraction> {
    Box::new(once(BinaryFraction::zero()).chain(nonzero_fractions()))
}

pub(super) fn range_up_fractions(a: BinaryFraction) -> Values<BinaryFraction> {
    let base = a.clone();
    Box::new(once(a).chain(positive_fractions().map(move |d| base.add(&d))))
}

pub(super) fn range_down_fractions(a: BinaryFraction) -> Values<BinaryFraction> {
    let base = a.clone();
    Box::new(once(a).chain(positive_fractions().map(move |d| base.sub(&d))))
}

/// `floor(x × 2^-level)`.
fn floor_at_level(x: &BinaryFraction, level: i64) -> BigInt {
    let shift = i64::from(x.exponent()) - level;
    if shift >= 0 {
        x.mantissa() << shift as u64
    } else {
        Integer::div_floor(x.mantissa(), &(BigInt::one() << shift.unsigned_abs()))
    }
}

/// `floor(log2 |x|)` for nonzero `x`.
fn magnitude_exponent(x: &BinaryFraction) -> i64 {
    x.bit_size() as i64 - 1 + i64::from(x.exponent())
}

/// Fractions of `[a, b]` by refinement level.
///
/// Yields `a`, `b`, then `0` when it lies strictly inside, then for levels
/// `q` from the coarsest downward the points `k × 2^q` with odd `k` strictly
/// between the endpoints.
pub(super) fn range_fractions(a: BinaryFraction, b: BinaryFraction) -> Values<BinaryFraction> {
    match a.cmp(&b) {
        Ordering::Greater => return empty(),
        Ordering::Equal => return single(a),
        Ordering::Less => {}
    }
    let mut head = vec![a.clone(), b.clone()];
    if a.signum() < 0 && b.signum() > 0 {
        head.push(BinaryFraction::zero());
    }
    let coarsest = [&a, &b]
        .into_iter()
        .filter(|x| !x.is_zero())
        .map(magnitude_exponent)
        .max()
        .unwrap_or(0)
        .min(i64::from(i32::MAX));
    let mut level = coarsest + 1;
    let mut k = BigInt::one();
    let mut last = BigInt::zero();
    let refinements = std::iter::from_fn(move || loop {
        if k <= last {
            let exponent = i32::try_from(level).ok()?;
            let x = BinaryFraction::checked_new(k.clone(), exponent);
            k += 2;
            return x;
        }
        level -= 1;
        if level < i64::from(i32::MIN) {
            return None;
        }
        let mut first: BigInt = floor_at_level(&a, level) + 1;
        if !first.bit(0) {
            first += 1;
        }
        k = first;
        last = -floor_at_level(&b.negate(), level) - 1;
    });
    Box::new(head.into_iter().chain(refinements))
}

// ----------------------------------------------------------------------
// Big decimals
// ----------------------------------------------------------------------

fn decimals_by_unscaled(unscaled: impl Fn(usize) -> BigInt + 'static) -> Values<BigDecimal> {
    Box::new(
        unbounded_pairs()
            .filter_map(move |ix| Some(BigDecimal::new(unscaled(ix[0]), exponent_at(ix[1])?))),
    )
}

pub(super) fn positive_decimals() -> Values<BigDecimal> {
    decimals_by_unscaled(|i| BigInt::from(i) + 1u32)
}

pub(super) fn nonzero_decimals() -> Values<BigDecimal> {
    decimals_by_unscaled(|i| BigInt::from(zigzag(i as u64 + 1)))
}

pub(super) fn decimals() -> Values<BigDecimal> {
    decimals_by_unscaled(|i| BigInt::from(zigzag(i as u64)))
}

/// One zero-first row of unscaled values per decimal scale, scales in zig-zag order.
fn decimal_rows(
    bounds: impl Fn(i32) -> (Option<BigInt>, Option<BigInt>) + 'static,
) -> Values<BigDecimal> {
    Box::new(DiagonalRows::new(move |k| {
        let scale = exponent_at(k)?;
        let (lo, hi) = bounds(scale);
        let row = zero_first(lo, hi).map(move |u| BigDecimal::new(u, scale));
        Some(Box::new(row) as Values<BigDecimal>)
    }))
}

pub(super) fn range_up_decimals(a: BigDecimal) -> Values<BigDecimal> {
    decimal_rows(move |scale| (Some(a.rescale_ceiling(scale)), None))
}

pub(super) fn range_down_decimals(a: BigDecimal) -> Values<BigDecimal> {
    decimal_rows(move |scale| (None, Some(a.rescale_floor(scale))))
}

pub(super) fn range_decimals(a: BigDecimal, b: BigDecimal) -> Values<BigDecimal> {
    if a.compare_value(&b) == Ordering::Greater {
        return empty();
    }
    decimal_rows(move |scale| {
        (
            Some(a.rescale_ceiling(scale)),
            Some(b.rescale_floor(scale)),
        )
    })
}

pub(super) fn canonical_only(xs: Values<BigDecimal>) -> Values<BigDecimal> {
    Box::new(xs.filter(BigDecimal::is_canonical))
}
