//! The generation surface shared by both engines.
//!
//! This module provides:
//! - [`Values`]: the lazy, owned, possibly infinite sequence every generator returns
//! - [`Ranged`] / [`Integral`]: fixed-width types addressed through `i64` ordinals
//! - [`Provider`]: the operation set implemented by
//!   [`RandomProvider`](crate::random::RandomProvider) and
//!   [`ExhaustiveProvider`](crate::exhaustive::ExhaustiveProvider)
//!
//! Generators that depend on `scale` or `secondary_scale` return a
//! `GenerationResult` and check their floor when called, before any value is
//! drawn. Test code written against `P: Provider` runs unchanged on either
//! engine.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::Debug;

use num_bigint::BigInt;
use valuegen_core::math::IeeeFloat;
use valuegen_core::types::{BigDecimal, BinaryFraction};

use crate::error::GenerationResult;
use crate::iter::filter_bounded;

/// Lazy sequence of owned values.
///
/// Pulling `n` values never evaluates past the `n`-th.
pub type Values<T> = Box<dyn Iterator<Item = T>>;

/// Fixed-width value types addressed through dense `i64` ordinals.
///
/// Ordinals are order preserving and contiguous from `MIN.to_ordinal()` to
/// `MAX.to_ordinal()`.
pub trait Ranged: Copy + Ord + Debug + 'static {
    /// Smallest value.
    const MIN: Self;
    /// Largest value.
    const MAX: Self;

    /// Position of the value.
    fn to_ordinal(self) -> i64;

    /// Value at an ordinal between `MIN.to_ordinal()` and `MAX.to_ordinal()`.
    fn from_ordinal(ordinal: i64) -> Self;
}

/// Signed integers, whose ordinal is the value itself.
pub trait Integral: Ranged {}

macro_rules! impl_integral {
    ($($t:ty),*) => {$(
        impl Ranged for $t {
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline]
            fn to_ordinal(self) -> i64 {
                i64::from(self)
            }

            #[inline]
            fn from_ordinal(ordinal: i64) -> Self {
                ordinal as $t
            }
        }

        impl Integral for $t {}
    )*};
}

impl_integral!(i8, i16, i32, i64);

const SURROGATE_START: u32 = 0xD800;
const SURROGATE_COUNT: u32 = 0x800;

/// Chars skip the surrogate gap so ordinals stay contiguous.
impl Ranged for char {
    const MIN: Self = '\0';
    const MAX: Self = char::MAX;

    #[inline]
    fn to_ordinal(self) -> i64 {
        let code = u32::from(self);
        let code = if code < SURROGATE_START {
            code
        } else {
            code - SURROGATE_COUNT
        };
        i64::from(code)
    }

    #[inline]
    fn from_ordinal(ordinal: i64) -> Self {
        let code = ordinal as u32;
        let code = if code < SURROGATE_START {
            code
        } else {
            code + SURROGATE_COUNT
        };
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

/// Operation set of a value-generation engine.
///
/// Sign variants follow one vocabulary throughout: *positive* excludes zero,
/// *natural* includes it, *nonzero* covers both signs without zero, and the
/// unqualified generator covers everything.
///
/// `range_up(a)` yields values `>= a`, `range_down(a)` values `<= a` and
/// `range(a, b)` values in `[a, b]`. A range with `a > b` is empty; the
/// random engine yields an infinite constant sequence for `range(a, a)`.
pub trait Provider: Sized {
    /// Primary scale.
    fn scale(&self) -> i32;

    /// Secondary scale.
    fn secondary_scale(&self) -> i32;

    /// Same engine with a different primary scale.
    fn with_scale(&self, scale: i32) -> Self;

    /// Same engine with a different secondary scale.
    fn with_secondary_scale(&self, secondary_scale: i32) -> Self;

    // ------------------------------------------------------------------
    // Fixed-width primitives
    // ------------------------------------------------------------------

    /// Booleans.
    fn booleans(&self) -> Values<bool>;

    /// The three orderings.
    fn orderings(&self) -> Values<Ordering>;

    /// Every value of a fixed-width type.
    fn values<T: Ranged>(&self) -> Values<T>;

    /// Values greater than zero.
    fn positives<T: Integral>(&self) -> Values<T> {
        self.range(T::from_ordinal(1), T::MAX)
    }

    /// Values less than zero.
    fn negatives<T: Integral>(&self) -> Values<T> {
        self.range(T::MIN, T::from_ordinal(-1))
    }

    /// Values greater than or equal to zero.
    fn naturals<T: Integral>(&self) -> Values<T> {
        self.range(T::from_ordinal(0), T::MAX)
    }

    /// Every value except zero.
    fn nonzeros<T: Integral>(&self) -> Values<T>;

    /// Values `>= a`; constant when `a` is the maximum.
    fn range_up<T: Ranged>(&self, a: T) -> Values<T>;

    /// Values `<= a`; constant when `a` is the minimum.
    fn range_down<T: Ranged>(&self, a: T) -> Values<T>;

    /// Values in `[a, b]`.
    fn range<T: Ranged>(&self, a: T, b: T) -> Values<T>;

    /// ASCII characters.
    fn ascii_chars(&self) -> Values<char>;

    /// Every Unicode scalar value.
    fn chars(&self) -> Values<char>;

    // ------------------------------------------------------------------
    // Geometric integers
    // ------------------------------------------------------------------

    /// Positive `i32` with mean `scale`. Needs `scale >= 2`.
    fn positive_ints_geometric(&self) -> GenerationResult<Values<i32>>;

    /// Negative `i32` with mean `-scale`. Needs `scale >= 2`.
    fn negative_ints_geometric(&self) -> GenerationResult<Values<i32>>;

    /// Nonnegative `i32` with mean `scale`. Needs `1 <= scale < i32::MAX`.
    fn natural_ints_geometric(&self) -> GenerationResult<Values<i32>>;

    /// Nonzero `i32` with mean magnitude `scale`. Needs `scale >= 2`.
    fn nonzero_ints_geometric(&self) -> GenerationResult<Values<i32>>;

    /// `i32` with mean magnitude `scale`. Needs `1 <= scale < i32::MAX`.
    fn ints_geometric(&self) -> GenerationResult<Values<i32>>;

    /// `i32 >= a` with mean `scale`. Needs `scale > a`.
    fn range_up_geometric(&self, a: i32) -> GenerationResult<Values<i32>>;

    /// `i32 <= a` with mean `scale`. Needs `scale < a`.
    fn range_down_geometric(&self, a: i32) -> GenerationResult<Values<i32>>;

    // ------------------------------------------------------------------
    // Big integers
    // ------------------------------------------------------------------

    /// Positive integers with mean bit length `scale`. Needs `scale >= 2`.
    fn positive_bigints(&self) -> GenerationResult<Values<BigInt>>;

    /// Negative integers. Needs `scale >= 2`.
    fn negative_bigints(&self) -> GenerationResult<Values<BigInt>>;

    /// Nonnegative integers. Needs `1 <= scale < i32::MAX`.
    fn natural_bigints(&self) -> GenerationResult<Values<BigInt>>;

    /// Nonzero integers. Needs `scale >= 2`.
    fn nonzero_bigints(&self) -> GenerationResult<Values<BigInt>>;

    /// All integers. Needs `1 <= scale < i32::MAX`.
    fn bigints(&self) -> GenerationResult<Values<BigInt>>;

    /// Integers `>= a`. Needs `scale` above the bit length `a` forces.
    fn range_up_bigint(&self, a: BigInt) -> GenerationResult<Values<BigInt>>;

    /// Integers `<= a`. Needs `scale` above the bit length `a` forces.
    fn range_down_bigint(&self, a: BigInt) -> GenerationResult<Values<BigInt>>;

    /// Integers in `[a, b]`.
    fn range_bigint(&self, a: BigInt, b: BigInt) -> Values<BigInt>;

    // ------------------------------------------------------------------
    // Binary fractions
    // ------------------------------------------------------------------

    /// Positive fractions. Needs `scale >= 2` and `1 <= secondary_scale < i32::MAX`.
    fn positive_binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>>;

    /// Negative fractions, floors as for the positive variant.
    fn negative_binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>>;

    /// Nonzero fractions, floors as for the positive variant.
    fn nonzero_binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>>;

    /// All fractions. Needs `1 <= scale < i32::MAX` and `1 <= secondary_scale < i32::MAX`.
    fn binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>>;

    /// Fractions `>= a`, floors as for [`binary_fractions`](Self::binary_fractions).
    fn range_up_binary_fraction(
        &self,
        a: BinaryFraction,
    ) -> GenerationResult<Values<BinaryFraction>>;

    /// Fractions `<= a`, floors as for [`binary_fractions`](Self::binary_fractions).
    fn range_down_binary_fraction(
        &self,
        a: BinaryFraction,
    ) -> GenerationResult<Values<BinaryFraction>>;

    /// Fractions in `[a, b]`. Needs `1 <= secondary_scale < i32::MAX`.
    fn range_binary_fraction(
        &self,
        a: BinaryFraction,
        b: BinaryFraction,
    ) -> GenerationResult<Values<BinaryFraction>>;

    // ------------------------------------------------------------------
    // Floats
    // ------------------------------------------------------------------

    /// Positive finite floats. Needs `1 <= scale < i32::MAX`.
    fn positive_floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>>;

    /// Negative finite floats. Needs `1 <= scale < i32::MAX`.
    fn negative_floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>>;

    /// Nonzero finite floats. Needs `1 <= scale < i32::MAX`.
    fn nonzero_floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>>;

    /// All floats including both zeros, both infinities and NaN.
    fn floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>>;

    /// Non-NaN floats `>= a`.
    ///
    /// # Errors
    ///
    /// `ArithmeticInapplicable` when `a` is NaN, plus the scale floors.
    fn range_up_float<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>>;

    /// Non-NaN floats `<= a`; mirror of [`range_up_float`](Self::range_up_float).
    fn range_down_float<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>>;

    /// Non-NaN floats in `[a, b]`.
    fn range_float<F: IeeeFloat>(&self, a: F, b: F) -> GenerationResult<Values<F>>;

    /// Finite floats, each representable value equally likely, `-0.0` folded into `0.0`.
    fn floats_uniform<F: IeeeFloat>(&self) -> Values<F>;

    /// Uniform over the finite floats `>= a`.
    fn range_up_float_uniform<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>>;

    /// Uniform over the finite floats `<= a`.
    fn range_down_float_uniform<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>>;

    /// Uniform over the finite floats in `[a, b]`.
    fn range_float_uniform<F: IeeeFloat>(&self, a: F, b: F) -> GenerationResult<Values<F>>;

    // ------------------------------------------------------------------
    // Big decimals
    // ------------------------------------------------------------------

    /// Positive decimals. Needs `scale >= 2` and `1 <= secondary_scale < i32::MAX`.
    fn positive_big_decimals(&self) -> GenerationResult<Values<BigDecimal>>;

    /// Negative decimals, floors as for the positive variant.
    fn negative_big_decimals(&self) -> GenerationResult<Values<BigDecimal>>;

    /// Nonzero decimals, floors as for the positive variant.
    fn nonzero_big_decimals(&self) -> GenerationResult<Values<BigDecimal>>;

    /// All decimals. Needs `1 <= scale < i32::MAX` and `1 <= secondary_scale < i32::MAX`.
    fn big_decimals(&self) -> GenerationResult<Values<BigDecimal>>;

    /// Positive decimals in canonical form.
    fn positive_canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>>;

    /// Negative decimals in canonical form.
    fn negative_canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>>;

    /// Nonzero decimals in canonical form.
    fn nonzero_canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>>;

    /// All decimals in canonical form.
    fn canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>>;

    /// Decimals numerically `>= a`.
    fn range_up_big_decimal(&self, a: BigDecimal) -> GenerationResult<Values<BigDecimal>>;

    /// Decimals numerically `<= a`.
    fn range_down_big_decimal(&self, a: BigDecimal) -> GenerationResult<Values<BigDecimal>>;

    /// Decimals numerically in `[a, b]`.
    fn range_big_decimal(
        &self,
        a: BigDecimal,
        b: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>>;

    /// Canonical decimals `>= a`.
    fn range_up_canonical_big_decimal(
        &self,
        a: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>>;

    /// Canonical decimals `<= a`.
    fn range_down_canonical_big_decimal(
        &self,
        a: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>>;

    /// Canonical decimals in `[a, b]`.
    fn range_canonical_big_decimal(
        &self,
        a: BigDecimal,
        b: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>>;

    // ------------------------------------------------------------------
    // Structures
    // ------------------------------------------------------------------

    /// Lists over `xs` with mean length `scale`. Needs `1 <= scale < i32::MAX`.
    fn lists<T: Clone + 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Vec<T>>>;

    /// Lists of length at least `n`. Needs `scale > n`.
    fn lists_at_least<T: Clone + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>>;

    /// Lists of length exactly `n`.
    fn lists_with_length<T: Clone + 'static>(&self, n: usize, xs: Values<T>) -> Values<Vec<T>>;

    /// Lists containing `x` at least once.
    fn lists_with_element<T: Clone + PartialEq + 'static>(
        &self,
        x: T,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>>;

    /// Strings over [`chars`](Self::chars).
    fn strings(&self) -> GenerationResult<Values<String>> {
        self.strings_over(self.chars())
    }

    /// Strings over the given characters.
    fn strings_over(&self, cs: Values<char>) -> GenerationResult<Values<String>> {
        Ok(into_strings(self.lists(cs)?))
    }

    /// Strings of at least `n` characters. Needs `scale > n`.
    fn strings_at_least(&self, n: usize) -> GenerationResult<Values<String>> {
        Ok(into_strings(self.lists_at_least(n, self.chars())?))
    }

    /// Strings of exactly `n` characters.
    fn strings_with_length(&self, n: usize) -> Values<String> {
        into_strings(self.lists_with_length(n, self.chars()))
    }

    /// Strings containing `c`.
    fn strings_with_char(&self, c: char) -> GenerationResult<Values<String>> {
        Ok(into_strings(self.lists_with_element(c, self.chars())?))
    }

    /// Sorted lists (multisets) over `xs`.
    fn bags<T: Clone + Ord + 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Vec<T>>>;

    /// Bags of size at least `n`. Needs `scale > n`.
    fn bags_at_least<T: Clone + Ord + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>>;

    /// Bags of size exactly `n`.
    fn bags_with_length<T: Clone + Ord + 'static>(&self, n: usize, xs: Values<T>) -> Values<Vec<T>>;

    /// Bags containing `x`.
    fn bags_with_element<T: Clone + Ord + 'static>(
        &self,
        x: T,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>> {
        let inserted = x.clone();
        Ok(Box::new(self.bags(xs)?.map(move |mut bag| {
            let at = bag.partition_point(|y| y < &inserted);
            bag.insert(at, inserted.clone());
            bag
        })))
    }

    /// Sorted lists of distinct elements of `xs`.
    fn subsets<T: Clone + Ord + 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Vec<T>>>;

    /// Subsets of size at least `n`. Needs `scale > n`.
    fn subsets_at_least<T: Clone + Ord + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>>;

    /// Subsets of size exactly `n`.
    fn subsets_with_length<T: Clone + Ord + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> Values<Vec<T>>;

    /// Subsets containing `x`.
    fn subsets_with_element<T: Clone + Ord + 'static>(
        &self,
        x: T,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>> {
        let excluded = x.clone();
        let rest = filter_bounded(xs, move |y| y != &excluded);
        Ok(Box::new(self.subsets(rest)?.map(move |mut set| {
            let at = set.partition_point(|y| y < &x);
            set.insert(at, x.clone());
            set
        })))
    }

    /// Orderings of `xs`.
    fn permutations<T: Clone + PartialEq + 'static>(&self, xs: Vec<T>) -> Values<Vec<T>>;

    /// Maps assigning a value from `values` to every distinct key.
    fn maps<K: Clone + Ord + 'static, V: Clone + 'static>(
        &self,
        keys: Vec<K>,
        values: Values<V>,
    ) -> Values<BTreeMap<K, V>>;

    /// Pairs drawn from two sources.
    fn pairs<A: Clone + 'static, B: Clone + 'static>(
        &self,
        xs: Values<A>,
        ys: Values<B>,
    ) -> Values<(A, B)>;

    /// Triples drawn from three sources.
    fn triples<A: Clone + 'static, B: Clone + 'static, C: Clone + 'static>(
        &self,
        xs: Values<A>,
        ys: Values<B>,
        zs: Values<C>,
    ) -> Values<(A, B, C)>;

    /// Lists taking component `i` from `lists[i]`.
    fn cartesian_product<T: Clone + 'static>(
        &self,
        lists: Vec<Vec<T>>,
    ) -> GenerationResult<Values<Vec<T>>>;

    /// Elements of `xs`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `xs` is empty.
    fn uniform_sample<T: Clone + 'static>(&self, xs: Vec<T>) -> GenerationResult<Values<T>>;

    /// `xs` with interspersed `None`s. Needs `scale >= 2`.
    fn with_none<T: 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Option<T>>>;
}

fn into_strings(lists: Values<Vec<char>>) -> Values<String> {
    Box::new(lists.map(|cs| cs.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_ordinals() {
        assert_eq!(i8::MIN.to_ordinal(), -128);
        assert_eq!(i64::from_ordinal(i64::MAX), i64::MAX);
        assert_eq!(<i16 as Ranged>::from_ordinal(-5), -5i16);
    }

    #[test]
    fn test_char_ordinals_skip_surrogates() {
        let before = '\u{D7FF}';
        let after = '\u{E000}';
        assert_eq!(after.to_ordinal(), before.to_ordinal() + 1);
        assert_eq!(char::from_ordinal(before.to_ordinal() + 1), after);
        assert_eq!(char::from_ordinal(char::MAX.to_ordinal()), char::MAX);
        assert_eq!(char::MAX.to_ordinal(), 0x10FFFF - 0x800);
        for c in ['a', '\u{FFFD}', '\u{1F600}'] {
            assert_eq!(char::from_ordinal(c.to_ordinal()), c);
        }
    }
}
