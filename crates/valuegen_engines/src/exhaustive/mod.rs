//! # Exhaustive Engine
//!
//! [`ExhaustiveProvider`] enumerates every value of a domain exactly once,
//! simplest first. Infinite products are walked along total-size shells
//! ([`diagonal`]) so no coordinate starves the others.
//!
//! ## Enumeration Orders
//!
//! - integers zero-first: `0, 1, -1, 2, -2, ...`, clipped to ranges
//! - characters: `a-z`, `A-Z`, `0-9`, other printable ASCII, then by code point
//! - binary fractions and decimals: diagonal of mantissa and zig-zag exponent
//! - floats: specials, then by significand precision level ([`floats`])
//! - collections: by index shell over a memoised source
//!
//! The provider carries `scale` and `secondary_scale` only to check the same
//! preconditions as [`RandomProvider`](crate::random::RandomProvider), so a
//! test written against [`Provider`] fails identically on both engines.
//!
//! ## Usage Example
//!
//! ```rust
//! use valuegen_engines::{ExhaustiveProvider, Provider};
//!
//! let provider = ExhaustiveProvider::new();
//! let firsts: Vec<i32> = provider.values().take(5).collect();
//! assert_eq!(firsts, vec![0, 1, -1, 2, -2]);
//!
//! let pairs: Vec<(i32, bool)> = provider
//!     .pairs(provider.naturals(), provider.booleans())
//!     .take(3)
//!     .collect();
//! assert_eq!(pairs, vec![(0, false), (0, true), (1, false)]);
//! ```

pub mod diagonal;
pub mod floats;
mod numeric;
mod structures;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use num_bigint::BigInt;
use tracing::debug;
use valuegen_core::math::IeeeFloat;
use valuegen_core::types::{BigDecimal, BinaryFraction};

use crate::config::{floor, ProviderConfig, DEFAULT_SCALE, DEFAULT_SECONDARY_SCALE};
use crate::error::GenerationResult;
use crate::iter::single;
use crate::provider::{Integral, Provider, Ranged, Values};

/// Deterministic enumerating provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExhaustiveProvider {
    scale: i32,
    secondary_scale: i32,
}

impl ExhaustiveProvider {
    /// Provider with the default scales.
    pub fn new() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            secondary_scale: DEFAULT_SECONDARY_SCALE,
        }
    }

    /// Provider with the scales of a validated configuration; the seed is ignored.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` or `InvalidArgument` when validation fails.
    pub fn from_config(config: &ProviderConfig) -> GenerationResult<Self> {
        config.validate()?;
        debug!(
            scale = config.scale(),
            secondary_scale = config.secondary_scale(),
            "exhaustive provider constructed"
        );
        Ok(Self {
            scale: config.scale(),
            secondary_scale: config.secondary_scale(),
        })
    }
}

impl Default for ExhaustiveProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for ExhaustiveProvider {
    fn scale(&self) -> i32 {
        self.scale
    }

    fn secondary_scale(&self) -> i32 {
        self.secondary_scale
    }

    fn with_scale(&self, scale: i32) -> Self {
        Self { scale, ..*self }
    }

    fn with_secondary_scale(&self, secondary_scale: i32) -> Self {
        Self {
            secondary_scale,
            ..*self
        }
    }

    fn booleans(&self) -> Values<bool> {
        Box::new([false, true].into_iter())
    }

    fn orderings(&self) -> Values<Ordering> {
        Box::new([Ordering::Equal, Ordering::Less, Ordering::Greater].into_iter())
    }

    fn values<T: Ranged>(&self) -> Values<T> {
        numeric::values()
    }

    fn nonzeros<T: Integral>(&self) -> Values<T> {
        numeric::nonzeros()
    }

    fn range_up<T: Ranged>(&self, a: T) -> Values<T> {
        numeric::range(a, T::MAX)
    }

    fn range_down<T: Ranged>(&self, a: T) -> Values<T> {
        numeric::range(T::MIN, a)
    }

    fn range<T: Ranged>(&self, a: T, b: T) -> Values<T> {
        numeric::range(a, b)
    }

    fn ascii_chars(&self) -> Values<char> {
        numeric::ascii_chars()
    }

    fn chars(&self) -> Values<char> {
        numeric::chars()
    }

    fn positive_ints_geometric(&self) -> GenerationResult<Values<i32>> {
        floor::positive("scale", self.scale)?;
        Ok(numeric::ints_between(1, i32::MAX))
    }

    fn negative_ints_geometric(&self) -> GenerationResult<Values<i32>> {
        floor::positive("scale", self.scale)?;
        Ok(numeric::ints_between(i32::MIN, -1))
    }

    fn natural_ints_geometric(&self) -> GenerationResult<Values<i32>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::ints_between(0, i32::MAX))
    }

    fn nonzero_ints_geometric(&self) -> GenerationResult<Values<i32>> {
        floor::positive("scale", self.scale)?;
        Ok(Box::new(numeric::ints_between(i32::MIN, i32::MAX).skip(1)))
    }

    fn ints_geometric(&self) -> GenerationResult<Values<i32>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::ints_between(i32::MIN, i32::MAX))
    }

    fn range_up_geometric(&self, a: i32) -> GenerationResult<Values<i32>> {
        floor::above("scale", self.scale, i64::from(a))?;
        Ok(numeric::ints_between(a, i32::MAX))
    }

    fn range_down_geometric(&self, a: i32) -> GenerationResult<Values<i32>> {
        floor::below("scale", self.scale, i64::from(a))?;
        Ok(numeric::ints_between(i32::MIN, a))
    }

    fn positive_bigints(&self) -> GenerationResult<Values<BigInt>> {
        floor::positive("scale", self.scale)?;
        Ok(numeric::bigints_between(Some(BigInt::from(1)), None))
    }

    fn negative_bigints(&self) -> GenerationResult<Values<BigInt>> {
        floor::positive("scale", self.scale)?;
        Ok(numeric::bigints_between(None, Some(BigInt::from(-1))))
    }

    fn natural_bigints(&self) -> GenerationResult<Values<BigInt>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::bigints_between(Some(BigInt::from(0)), None))
    }

    fn nonzero_bigints(&self) -> GenerationResult<Values<BigInt>> {
        floor::positive("scale", self.scale)?;
        Ok(numeric::nonzero_bigints())
    }

    fn bigints(&self) -> GenerationResult<Values<BigInt>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::bigints_between(None, None))
    }

    fn range_up_bigint(&self, a: BigInt) -> GenerationResult<Values<BigInt>> {
        floor::above_bit_length("scale", self.scale, &a)?;
        Ok(numeric::bigints_between(Some(a), None))
    }

    fn range_down_bigint(&self, a: BigInt) -> GenerationResult<Values<BigInt>> {
        floor::above_bit_length("scale", self.scale, &-&a)?;
        Ok(numeric::bigints_between(None, Some(a)))
    }

    fn range_bigint(&self, a: BigInt, b: BigInt) -> Values<BigInt> {
        numeric::bigints_between(Some(a), Some(b))
    }

    fn positive_binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>> {
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::positive_fractions())
    }

    fn negative_binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>> {
        Ok(Box::new(self.positive_binary_fractions()?.map(|x| x.negate())))
    }

    fn nonzero_binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>> {
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::nonzero_fractions())
    }

    fn binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::fractions())
    }

    fn range_up_binary_fraction(
        &self,
        a: BinaryFraction,
    ) -> GenerationResult<Values<BinaryFraction>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_up_fractions(a))
    }

    fn range_down_binary_fraction(
        &self,
        a: BinaryFraction,
    ) -> GenerationResult<Values<BinaryFraction>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_down_fractions(a))
    }

    fn range_binary_fraction(
        &self,
        a: BinaryFraction,
        b: BinaryFraction,
    ) -> GenerationResult<Values<BinaryFraction>> {
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_fractions(a, b))
    }

    fn positive_floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>> {
        floor::natural("scale", self.scale)?;
        Ok(floats::positive_floats())
    }

    fn negative_floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>> {
        floor::natural("scale", self.scale)?;
        Ok(floats::negative_floats())
    }

    fn nonzero_floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>> {
        floor::natural("scale", self.scale)?;
        Ok(floats::nonzero_floats())
    }

    fn floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>> {
        floor::natural("scale", self.scale)?;
        Ok(floats::floats())
    }

    fn range_up_float<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_up_float", &[a])?;
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(floats::range_up_floats(a))
    }

    fn range_down_float<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_down_float", &[a])?;
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(floats::range_down_floats(a))
    }

    fn range_float<F: IeeeFloat>(&self, a: F, b: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_float", &[a, b])?;
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(floats::range_floats(a, b))
    }

    fn floats_uniform<F: IeeeFloat>(&self) -> Values<F> {
        floats::floats_uniform()
    }

    fn range_up_float_uniform<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_up_float_uniform", &[a])?;
        Ok(floats::range_up_floats_uniform(a))
    }

    fn range_down_float_uniform<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_down_float_uniform", &[a])?;
        Ok(floats::range_down_floats_uniform(a))
    }

    fn range_float_uniform<F: IeeeFloat>(&self, a: F, b: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_float_uniform", &[a, b])?;
        Ok(floats::range_floats_uniform(a, b))
    }

    fn positive_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::positive_decimals())
    }

    fn negative_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        Ok(Box::new(self.positive_big_decimals()?.map(|x| x.negate())))
    }

    fn nonzero_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::nonzero_decimals())
    }

    fn big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::decimals())
    }

    fn positive_canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical_only(self.positive_big_decimals()?))
    }

    fn negative_canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical_only(self.negative_big_decimals()?))
    }

    fn nonzero_canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical_only(self.nonzero_big_decimals()?))
    }

    fn canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical_only(self.big_decimals()?))
    }

    fn range_up_big_decimal(&self, a: BigDecimal) -> GenerationResult<Values<BigDecimal>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_up_decimals(a))
    }

    fn range_down_big_decimal(&self, a: BigDecimal) -> GenerationResult<Values<BigDecimal>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_down_decimals(a))
    }

    fn range_big_decimal(
        &self,
        a: BigDecimal,
        b: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>> {
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_decimals(a, b))
    }

    fn range_up_canonical_big_decimal(
        &self,
        a: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical_only(self.range_up_big_decimal(a)?))
    }

    fn range_down_canonical_big_decimal(
        &self,
        a: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical_only(self.range_down_big_decimal(a)?))
    }

    fn range_canonical_big_decimal(
        &self,
        a: BigDecimal,
        b: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>> {
        // Only one canonical value lies in a degenerate range.
        if a.numeric_eq(&b) {
            floor::natural("secondary_scale", self.secondary_scale)?;
            return Ok(single(a.canonical()));
        }
        Ok(numeric::canonical_only(self.range_big_decimal(a, b)?))
    }

    fn lists<T: Clone + 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Vec<T>>> {
        floor::natural("scale", self.scale)?;
        Ok(structures::lists(xs))
    }

    fn lists_at_least<T: Clone + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>> {
        floor::above("scale", self.scale, n as i64)?;
        Ok(structures::lists_at_least(n, xs))
    }

    fn lists_with_length<T: Clone + 'static>(&self, n: usize, xs: Values<T>) -> Values<Vec<T>> {
        structures::lists_with_length(n, xs)
    }

    fn lists_with_element<T: Clone + PartialEq + 'static>(
        &self,
        x: T,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>> {
        floor::natural("scale", self.scale)?;
        Ok(structures::lists_with_element(x, xs))
    }

    fn bags<T: Clone + Ord + 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Vec<T>>> {
        floor::natural("scale", self.scale)?;
        Ok(structures::bags_at_least(0, xs))
    }

    fn bags_at_least<T: Clone + Ord + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>> {
        floor::above("scale", self.scale, n as i64)?;
        Ok(structures::bags_at_least(n, xs))
    }

    fn bags_with_length<T: Clone + Ord + 'static>(&self, n: usize, xs: Values<T>) -> Values<Vec<T>> {
        structures::bags_with_length(n, xs)
    }

    fn subsets<T: Clone + Ord + 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Vec<T>>> {
        floor::natural("scale", self.scale)?;
        Ok(structures::subsets_at_least(0, xs))
    }

    fn subsets_at_least<T: Clone + Ord + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>> {
        floor::above("scale", self.scale, n as i64)?;
        Ok(structures::subsets_at_least(n, xs))
    }

    fn subsets_with_length<T: Clone + Ord + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> Values<Vec<T>> {
        structures::subsets_with_length(n, xs)
    }

    fn permutations<T: Clone + PartialEq + 'static>(&self, xs: Vec<T>) -> Values<Vec<T>> {
        structures::permutations(xs)
    }

    fn maps<K: Clone + Ord + 'static, V: Clone + 'static>(
        &self,
        keys: Vec<K>,
        values: Values<V>,
    ) -> Values<BTreeMap<K, V>> {
        structures::maps(keys, values)
    }

    fn pairs<A: Clone + 'static, B: Clone + 'static>(
        &self,
        xs: Values<A>,
        ys: Values<B>,
    ) -> Values<(A, B)> {
        structures::pairs(xs, ys)
    }

    fn triples<A: Clone + 'static, B: Clone + 'static, C: Clone + 'static>(
        &self,
        xs: Values<A>,
        ys: Values<B>,
        zs: Values<C>,
    ) -> Values<(A, B, C)> {
        structures::triples(xs, ys, zs)
    }

    fn cartesian_product<T: Clone + 'static>(
        &self,
        lists: Vec<Vec<T>>,
    ) -> GenerationResult<Values<Vec<T>>> {
        floor::nonempty_components(&lists)?;
        Ok(structures::cartesian_product(lists))
    }

    fn uniform_sample<T: Clone + 'static>(&self, xs: Vec<T>) -> GenerationResult<Values<T>> {
        floor::nonempty_sample(&xs)?;
        Ok(structures::uniform_sample(xs))
    }

    fn with_none<T: 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Option<T>>> {
        floor::positive("scale", self.scale)?;
        Ok(structures::with_none(xs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;

    #[test]
    fn test_scales_are_plain_values() {
        let provider = ExhaustiveProvider::new().with_scale(3).with_secondary_scale(2);
        assert_eq!(provider.scale(), 3);
        assert_eq!(provider.secondary_scale(), 2);
        assert_eq!(ExhaustiveProvider::default().scale(), DEFAULT_SCALE);
    }

    #[test]
    fn test_floors_match_random_engine() {
        let provider = ExhaustiveProvider::new().with_scale(1);
        assert!(matches!(
            provider.positive_bigints(),
            Err(GenerationError::InvalidConfiguration { parameter: "scale", .. })
        ));
        assert!(provider.natural_bigints().is_ok());
        assert!(provider.with_none(provider.booleans()).is_err());
        assert!(provider.range_up_geometric(1).is_err());
        assert!(provider.range_down_geometric(2).is_ok());
        let no_secondary = ExhaustiveProvider::new().with_secondary_scale(0);
        assert!(no_secondary.binary_fractions().is_err());
        assert!(no_secondary.bigints().is_ok());
    }

    #[test]
    fn test_degenerate_ranges() {
        let provider = ExhaustiveProvider::new();
        assert_eq!(provider.range(3i8, 3).collect::<Vec<_>>(), vec![3]);
        assert_eq!(provider.range(4i8, 3).count(), 0);
        assert_eq!(provider.range_up(i16::MAX).collect::<Vec<_>>(), vec![i16::MAX]);
        let one: BigDecimal = "1".parse().unwrap();
        let one_point_oh: BigDecimal = "1.00".parse().unwrap();
        let single: Vec<BigDecimal> = provider
            .range_canonical_big_decimal(one_point_oh, one.clone())
            .unwrap()
            .collect();
        assert_eq!(single, vec![one]);
    }

    #[test]
    fn test_orderings_and_booleans() {
        let provider = ExhaustiveProvider::new();
        assert_eq!(provider.booleans().count(), 2);
        assert_eq!(provider.orderings().count(), 3);
    }

    #[test]
    fn test_from_config() {
        let config = ProviderConfig::builder().scale(4).build().unwrap();
        let provider = ExhaustiveProvider::from_config(&config).unwrap();
        assert_eq!(provider.scale(), 4);
        assert_eq!(provider.secondary_scale(), DEFAULT_SECONDARY_SCALE);
    }
}
