//! # Random Engine
//!
//! [`RandomProvider`] maps words from a seeded ISAAC cursor to values of every
//! supported domain under distributions whose means are set by `scale` and
//! `secondary_scale`.
//!
//! ## Cursor Ownership
//!
//! - [`RandomProvider::copy`] and the `with_*` transforms share one cursor:
//!   draws through any of them advance all of them
//! - [`RandomProvider::deep_copy`] forks an independent cursor
//! - [`RandomProvider::reset`] rewinds the shared cursor to the seed start
//! - [`RandomProvider::snapshot`] / [`RandomProvider::restore`] capture and
//!   rewind to an arbitrary position
//!
//! Handles are `!Send`; the engine is single-threaded by contract.
//!
//! ## Usage Example
//!
//! ```rust
//! use valuegen_engines::{Provider, RandomProvider};
//!
//! let provider = RandomProvider::example().with_scale(4);
//! let first: Vec<i32> = provider.positive_ints_geometric().unwrap().take(5).collect();
//! assert!(first.iter().all(|&x| x > 0));
//!
//! provider.reset();
//! let again: Vec<i32> = provider.positive_ints_geometric().unwrap().take(5).collect();
//! assert_eq!(first, again);
//! ```

mod cursor;
mod numeric;
mod structures;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;
use rand::Rng;
use tracing::debug;
use valuegen_core::math::IeeeFloat;
use valuegen_core::rng::{IsaacRng, EXAMPLE_SEED, SEED_SIZE};
use valuegen_core::types::{BigDecimal, BinaryFraction, SeedError};

use self::cursor::Cursor;
use crate::config::{floor, ProviderConfig, DEFAULT_SCALE, DEFAULT_SECONDARY_SCALE};
use crate::error::GenerationResult;
use crate::provider::{Integral, Provider, Ranged, Values};

/// Captured cursor position, see [`RandomProvider::restore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot(IsaacRng);

/// Seeded pseudorandom provider.
///
/// Does not implement `Clone`: choose between [`copy`](Self::copy) (shared
/// cursor) and [`deep_copy`](Self::deep_copy) (forked cursor) explicitly.
pub struct RandomProvider {
    cursor: Cursor,
    seed: Rc<[i32; SEED_SIZE]>,
    scale: i32,
    secondary_scale: i32,
}

impl RandomProvider {
    fn from_seed_words(seed: [i32; SEED_SIZE], scale: i32, secondary_scale: i32) -> Self {
        let provider = Self {
            cursor: Cursor::new(IsaacRng::from_words(&seed)),
            seed: Rc::new(seed),
            scale,
            secondary_scale,
        };
        debug!(scale, secondary_scale, "random provider constructed");
        provider
    }

    /// Provider seeded from the thread-local entropy source, default scales.
    pub fn new() -> Self {
        let mut entropy = rand::thread_rng();
        let seed: [i32; SEED_SIZE] = std::array::from_fn(|_| entropy.gen());
        Self::from_seed_words(seed, DEFAULT_SCALE, DEFAULT_SECONDARY_SCALE)
    }

    /// Provider with an explicit seed and default scales.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `seed.len() == SEED_SIZE`.
    pub fn with_seed(seed: &[i32]) -> GenerationResult<Self> {
        let words: [i32; SEED_SIZE] = seed.try_into().map_err(|_| SeedError::InvalidLength {
            expected: SEED_SIZE,
            actual: seed.len(),
        })?;
        Ok(Self::from_seed_words(
            words,
            DEFAULT_SCALE,
            DEFAULT_SECONDARY_SCALE,
        ))
    }

    /// Provider seeded with [`EXAMPLE_SEED`], default scales.
    pub fn example() -> Self {
        Self::from_seed_words(EXAMPLE_SEED, DEFAULT_SCALE, DEFAULT_SECONDARY_SCALE)
    }

    /// Provider built from a validated configuration; no seed means entropy.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` or `InvalidArgument` when validation fails.
    pub fn from_config(config: &ProviderConfig) -> GenerationResult<Self> {
        config.validate()?;
        let base = match config.seed() {
            Some(seed) => Self::with_seed(seed)?,
            None => Self::new(),
        };
        Ok(base
            .with_scale(config.scale())
            .with_secondary_scale(config.secondary_scale()))
    }

    /// The seed this provider's cursor started from.
    pub fn seed(&self) -> &[i32] {
        &self.seed[..]
    }

    /// Second handle on the same advancing cursor.
    pub fn copy(&self) -> Self {
        Self {
            cursor: self.cursor.clone(),
            seed: Rc::clone(&self.seed),
            scale: self.scale,
            secondary_scale: self.secondary_scale,
        }
    }

    /// Handle on an independent cursor starting at the current position.
    pub fn deep_copy(&self) -> Self {
        debug!("random provider forked");
        Self {
            cursor: self.cursor.fork(),
            seed: Rc::clone(&self.seed),
            scale: self.scale,
            secondary_scale: self.secondary_scale,
        }
    }

    /// Rewinds the shared cursor to the start of the seed.
    ///
    /// Every handle aliasing the cursor, and every generator drawn from
    /// them, continues from the rewound position.
    pub fn reset(&self) {
        debug!("random provider reset");
        self.cursor.reseed(&self.seed);
    }

    /// Captures the current cursor position.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot(self.cursor.state())
    }

    /// Moves the shared cursor back to a captured position.
    pub fn restore(&self, snapshot: &Snapshot) {
        debug!("random provider restored");
        self.cursor.set_state(snapshot.0.clone());
    }

    fn cursor(&self) -> Cursor {
        self.cursor.clone()
    }

    fn with_scales(&self, scale: i32, secondary_scale: i32) -> Self {
        debug!(scale, secondary_scale, "random provider reconfigured");
        Self {
            scale,
            secondary_scale,
            ..self.copy()
        }
    }
}

impl Default for RandomProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RandomProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomProvider")
            .field("scale", &self.scale)
            .field("secondary_scale", &self.secondary_scale)
            .finish_non_exhaustive()
    }
}

impl Provider for RandomProvider {
    fn scale(&self) -> i32 {
        self.scale
    }

    fn secondary_scale(&self) -> i32 {
        self.secondary_scale
    }

    fn with_scale(&self, scale: i32) -> Self {
        self.with_scales(scale, self.secondary_scale)
    }

    fn with_secondary_scale(&self, secondary_scale: i32) -> Self {
        self.with_scales(self.scale, secondary_scale)
    }

    fn booleans(&self) -> Values<bool> {
        let c = self.cursor();
        Box::new(std::iter::repeat_with(move || c.next_bool()))
    }

    fn orderings(&self) -> Values<Ordering> {
        const ORDERINGS: [Ordering; 3] = [Ordering::Less, Ordering::Equal, Ordering::Greater];
        let c = self.cursor();
        Box::new(std::iter::from_fn(move || c.choose(&ORDERINGS).copied()))
    }

    fn values<T: Ranged>(&self) -> Values<T> {
        numeric::values(self.cursor())
    }

    fn nonzeros<T: Integral>(&self) -> Values<T> {
        numeric::nonzeros(self.cursor())
    }

    fn range_up<T: Ranged>(&self, a: T) -> Values<T> {
        numeric::range(self.cursor(), a, T::MAX)
    }

    fn range_down<T: Ranged>(&self, a: T) -> Values<T> {
        numeric::range(self.cursor(), T::MIN, a)
    }

    fn range<T: Ranged>(&self, a: T, b: T) -> Values<T> {
        numeric::range(self.cursor(), a, b)
    }

    fn ascii_chars(&self) -> Values<char> {
        self.range('\0', '\u{7f}')
    }

    fn chars(&self) -> Values<char> {
        self.values()
    }

    fn positive_ints_geometric(&self) -> GenerationResult<Values<i32>> {
        floor::positive("scale", self.scale)?;
        Ok(numeric::positive_ints(self.cursor(), self.scale))
    }

    fn negative_ints_geometric(&self) -> GenerationResult<Values<i32>> {
        Ok(Box::new(self.positive_ints_geometric()?.map(|x| -x)))
    }

    fn natural_ints_geometric(&self) -> GenerationResult<Values<i32>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::natural_ints(self.cursor(), self.scale))
    }

    fn nonzero_ints_geometric(&self) -> GenerationResult<Values<i32>> {
        floor::positive("scale", self.scale)?;
        Ok(numeric::nonzero_ints(self.cursor(), self.scale))
    }

    fn ints_geometric(&self) -> GenerationResult<Values<i32>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::ints(self.cursor(), self.scale))
    }

    fn range_up_geometric(&self, a: i32) -> GenerationResult<Values<i32>> {
        floor::above("scale", self.scale, i64::from(a))?;
        Ok(numeric::range_up_ints(self.cursor(), self.scale, a))
    }

    fn range_down_geometric(&self, a: i32) -> GenerationResult<Values<i32>> {
        floor::below("scale", self.scale, i64::from(a))?;
        Ok(numeric::range_down_ints(self.cursor(), self.scale, a))
    }

    fn positive_bigints(&self) -> GenerationResult<Values<BigInt>> {
        floor::positive("scale", self.scale)?;
        Ok(numeric::positive_bigints(self.cursor(), self.scale))
    }

    fn negative_bigints(&self) -> GenerationResult<Values<BigInt>> {
        Ok(Box::new(self.positive_bigints()?.map(|x| -x)))
    }

    fn natural_bigints(&self) -> GenerationResult<Values<BigInt>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::natural_bigints(self.cursor(), self.scale))
    }

    fn nonzero_bigints(&self) -> GenerationResult<Values<BigInt>> {
        floor::positive("scale", self.scale)?;
        Ok(numeric::nonzero_bigints(self.cursor(), self.scale))
    }

    fn bigints(&self) -> GenerationResult<Values<BigInt>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::bigints(self.cursor(), self.scale))
    }

    fn range_up_bigint(&self, a: BigInt) -> GenerationResult<Values<BigInt>> {
        floor::above_bit_length("scale", self.scale, &a)?;
        Ok(numeric::range_up_bigints(self.cursor(), self.scale, a))
    }

    fn range_down_bigint(&self, a: BigInt) -> GenerationResult<Values<BigInt>> {
        floor::above_bit_length("scale", self.scale, &-&a)?;
        Ok(numeric::range_down_bigints(self.cursor(), self.scale, a))
    }

    fn range_bigint(&self, a: BigInt, b: BigInt) -> Values<BigInt> {
        numeric::range_bigints(self.cursor(), a, b)
    }

    fn positive_binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>> {
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::positive_fractions(
            self.cursor(),
            self.scale,
            self.secondary_scale,
        ))
    }

    fn negative_binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>> {
        Ok(Box::new(self.positive_binary_fractions()?.map(|x| x.negate())))
    }

    fn nonzero_binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>> {
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::nonzero_fractions(
            self.cursor(),
            self.scale,
            self.secondary_scale,
        ))
    }

    fn binary_fractions(&self) -> GenerationResult<Values<BinaryFraction>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::fractions(
            self.cursor(),
            self.scale,
            self.secondary_scale,
        ))
    }

    fn range_up_binary_fraction(
        &self,
        a: BinaryFraction,
    ) -> GenerationResult<Values<BinaryFraction>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_up_fractions(
            self.cursor(),
            self.scale,
            self.secondary_scale,
            a,
        ))
    }

    fn range_down_binary_fraction(
        &self,
        a: BinaryFraction,
    ) -> GenerationResult<Values<BinaryFraction>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_down_fractions(
            self.cursor(),
            self.scale,
            self.secondary_scale,
            a,
        ))
    }

    fn range_binary_fraction(
        &self,
        a: BinaryFraction,
        b: BinaryFraction,
    ) -> GenerationResult<Values<BinaryFraction>> {
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_fractions(
            self.cursor(),
            self.secondary_scale,
            a,
            b,
        ))
    }

    fn positive_floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::positive_floats(self.cursor(), self.scale))
    }

    fn negative_floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>> {
        Ok(Box::new(self.positive_floats::<F>()?.map(|x| -x)))
    }

    fn nonzero_floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::nonzero_floats(self.cursor(), self.scale))
    }

    fn floats<F: IeeeFloat>(&self) -> GenerationResult<Values<F>> {
        floor::natural("scale", self.scale)?;
        Ok(numeric::floats(self.cursor(), self.scale))
    }

    fn range_up_float<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_up_float", &[a])?;
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_up_floats(
            self.cursor(),
            self.scale,
            self.secondary_scale,
            a,
        ))
    }

    fn range_down_float<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_down_float", &[a])?;
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_down_floats(
            self.cursor(),
            self.scale,
            self.secondary_scale,
            a,
        ))
    }

    fn range_float<F: IeeeFloat>(&self, a: F, b: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_float", &[a, b])?;
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_floats(
            self.cursor(),
            self.scale,
            self.secondary_scale,
            a,
            b,
        ))
    }

    fn floats_uniform<F: IeeeFloat>(&self) -> Values<F> {
        numeric::floats_uniform(self.cursor())
    }

    fn range_up_float_uniform<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_up_float_uniform", &[a])?;
        Ok(numeric::range_up_floats_uniform(self.cursor(), a))
    }

    fn range_down_float_uniform<F: IeeeFloat>(&self, a: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_down_float_uniform", &[a])?;
        Ok(numeric::range_down_floats_uniform(self.cursor(), a))
    }

    fn range_float_uniform<F: IeeeFloat>(&self, a: F, b: F) -> GenerationResult<Values<F>> {
        floor::not_nan("range_float_uniform", &[a, b])?;
        Ok(numeric::range_floats_uniform(self.cursor(), a, b))
    }

    fn positive_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::positive_decimals(
            self.cursor(),
            self.scale,
            self.secondary_scale,
        ))
    }

    fn negative_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        Ok(Box::new(self.positive_big_decimals()?.map(|x| x.negate())))
    }

    fn nonzero_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        floor::positive("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::nonzero_decimals(
            self.cursor(),
            self.scale,
            self.secondary_scale,
        ))
    }

    fn big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::decimals(
            self.cursor(),
            self.scale,
            self.secondary_scale,
        ))
    }

    fn positive_canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical(self.positive_big_decimals()?))
    }

    fn negative_canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical(self.negative_big_decimals()?))
    }

    fn nonzero_canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical(self.nonzero_big_decimals()?))
    }

    fn canonical_big_decimals(&self) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical(self.big_decimals()?))
    }

    fn range_up_big_decimal(&self, a: BigDecimal) -> GenerationResult<Values<BigDecimal>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_up_decimals(
            self.cursor(),
            self.scale,
            self.secondary_scale,
            a,
        ))
    }

    fn range_down_big_decimal(&self, a: BigDecimal) -> GenerationResult<Values<BigDecimal>> {
        floor::natural("scale", self.scale)?;
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_down_decimals(
            self.cursor(),
            self.scale,
            self.secondary_scale,
            a,
        ))
    }

    fn range_big_decimal(
        &self,
        a: BigDecimal,
        b: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>> {
        floor::natural("secondary_scale", self.secondary_scale)?;
        Ok(numeric::range_decimals(
            self.cursor(),
            self.secondary_scale,
            a,
            b,
        ))
    }

    fn range_up_canonical_big_decimal(
        &self,
        a: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical(self.range_up_big_decimal(a)?))
    }

    fn range_down_canonical_big_decimal(
        &self,
        a: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical(self.range_down_big_decimal(a)?))
    }

    fn range_canonical_big_decimal(
        &self,
        a: BigDecimal,
        b: BigDecimal,
    ) -> GenerationResult<Values<BigDecimal>> {
        Ok(numeric::canonical(self.range_big_decimal(a, b)?))
    }

    fn lists<T: Clone + 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Vec<T>>> {
        floor::natural("scale", self.scale)?;
        Ok(structures::lists(self.cursor(), self.scale, xs))
    }

    fn lists_at_least<T: Clone + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>> {
        floor::above("scale", self.scale, n as i64)?;
        Ok(structures::lists_at_least(self.cursor(), self.scale, n, xs))
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
        Ok(structures::lists_with_element(
            self.cursor(),
            self.scale,
            x,
            xs,
        ))
    }

    fn bags<T: Clone + Ord + 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Vec<T>>> {
        Ok(structures::sorted(self.lists(xs)?))
    }

    fn bags_at_least<T: Clone + Ord + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>> {
        Ok(structures::sorted(self.lists_at_least(n, xs)?))
    }

    fn bags_with_length<T: Clone + Ord + 'static>(&self, n: usize, xs: Values<T>) -> Values<Vec<T>> {
        structures::sorted(self.lists_with_length(n, xs))
    }

    fn subsets<T: Clone + Ord + 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Vec<T>>> {
        floor::natural("scale", self.scale)?;
        Ok(structures::subsets(self.cursor(), self.scale, xs))
    }

    fn subsets_at_least<T: Clone + Ord + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> GenerationResult<Values<Vec<T>>> {
        floor::above("scale", self.scale, n as i64)?;
        Ok(structures::subsets_at_least(self.cursor(), self.scale, n, xs))
    }

    fn subsets_with_length<T: Clone + Ord + 'static>(
        &self,
        n: usize,
        xs: Values<T>,
    ) -> Values<Vec<T>> {
        structures::subsets_with_length(n, xs)
    }

    fn permutations<T: Clone + PartialEq + 'static>(&self, xs: Vec<T>) -> Values<Vec<T>> {
        structures::permutations(self.cursor(), xs)
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
        Ok(structures::cartesian_product(self.cursor(), lists))
    }

    fn uniform_sample<T: Clone + 'static>(&self, xs: Vec<T>) -> GenerationResult<Values<T>> {
        floor::nonempty_sample(&xs)?;
        Ok(structures::uniform_sample(self.cursor(), xs))
    }

    fn with_none<T: 'static>(&self, xs: Values<T>) -> GenerationResult<Values<Option<T>>> {
        floor::positive("scale", self.scale)?;
        structures::with_none(self.cursor(), self.scale, xs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;

    #[test]
    fn test_seed_length_is_checked() {
        assert!(matches!(
            RandomProvider::with_seed(&[1, 2, 3]),
            Err(GenerationError::InvalidArgument(_))
        ));
        let provider = RandomProvider::with_seed(&EXAMPLE_SEED).unwrap();
        assert_eq!(provider.seed(), &EXAMPLE_SEED[..]);
    }

    #[test]
    fn test_copy_interleaves_draws() {
        let a = RandomProvider::example();
        let b = a.copy();
        let fresh = RandomProvider::example();
        let mut xs = a.values::<i64>();
        let mut ys = b.values::<i64>();
        let merged = [xs.next(), ys.next(), xs.next()];
        let straight: Vec<_> = fresh.values::<i64>().take(3).map(Some).collect();
        assert_eq!(merged.to_vec(), straight);
    }

    #[test]
    fn test_with_scale_shares_cursor() {
        let a = RandomProvider::example();
        let b = a.with_scale(5).with_secondary_scale(2);
        assert_eq!(b.scale(), 5);
        assert_eq!(b.secondary_scale(), 2);
        a.booleans().next();
        b.reset();
        let fresh = RandomProvider::example();
        assert_eq!(a.snapshot(), fresh.snapshot());
    }

    #[test]
    fn test_deep_copy_forks() {
        let a = RandomProvider::example();
        let b = a.deep_copy();
        let first: Vec<i32> = a.values().take(4).collect();
        let second: Vec<i32> = b.values().take(4).collect();
        assert_eq!(first, second);
        a.booleans().next();
        assert_ne!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn test_snapshot_restore() {
        let provider = RandomProvider::example();
        provider.values::<i64>().take(10).for_each(drop);
        let mark = provider.snapshot();
        let expected: Vec<i64> = provider.values().take(5).collect();
        provider.values::<i64>().take(100).for_each(drop);
        provider.restore(&mark);
        let actual: Vec<i64> = provider.values().take(5).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_nan_ranges_fail() {
        let provider = RandomProvider::example();
        assert!(matches!(
            provider.range_up_float(f32::NAN),
            Err(GenerationError::ArithmeticInapplicable(_))
        ));
        assert!(matches!(
            provider.range_float_uniform(0.0, f64::NAN),
            Err(GenerationError::ArithmeticInapplicable(_))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = ProviderConfig::builder()
            .scale(3)
            .secondary_scale(2)
            .seed(EXAMPLE_SEED.to_vec())
            .build()
            .unwrap();
        let provider = RandomProvider::from_config(&config).unwrap();
        assert_eq!(provider.scale(), 3);
        assert_eq!(provider.secondary_scale(), 2);
        assert_eq!(provider.snapshot(), RandomProvider::example().snapshot());
    }

    #[test]
    fn test_empty_sources_are_rejected() {
        let provider = RandomProvider::example();
        assert!(matches!(
            provider.uniform_sample(Vec::<u8>::new()),
            Err(GenerationError::InvalidArgument(_))
        ));
        assert!(matches!(
            provider.cartesian_product(vec![vec![1], vec![]]),
            Err(GenerationError::Exhausted(_))
        ));
    }
}
