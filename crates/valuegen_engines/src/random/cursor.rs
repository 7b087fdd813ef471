//! Shared bit-source cursor and the draws built directly on it.
//!
//! Every generator produced by a [`RandomProvider`](super::RandomProvider)
//! holds a clone of the provider's [`Cursor`]; clones alias one advancing
//! [`IsaacRng`], so interleaved pulls from different generators observe a
//! single merged draw sequence. Draws go through the `rand` and `rand_distr`
//! samplers, which see the cursor as an ordinary [`RngCore`].

use std::cell::RefCell;
use std::rc::Rc;

use num_bigint::{BigInt, RandBigInt};
use num_traits::Zero;
use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::distributions::Distribution;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use rand_distr::Geometric;
use valuegen_core::rng::{IsaacRng, SEED_SIZE};

/// Shared handle on one advancing ISAAC generator.
#[derive(Clone)]
pub(crate) struct Cursor {
    rng: Rc<RefCell<IsaacRng>>,
}

impl Cursor {
    pub(crate) fn new(rng: IsaacRng) -> Self {
        Self {
            rng: Rc::new(RefCell::new(rng)),
        }
    }

    /// Independent cursor starting from the current position.
    pub(crate) fn fork(&self) -> Self {
        Self::new(self.state())
    }

    /// Copy of the generator at the current position.
    pub(crate) fn state(&self) -> IsaacRng {
        self.rng.borrow().clone()
    }

    /// Moves every alias of this cursor to `state`.
    pub(crate) fn set_state(&self, state: IsaacRng) {
        *self.rng.borrow_mut() = state;
    }

    /// Moves every alias of this cursor back to the start of `seed`.
    pub(crate) fn reseed(&self, seed: &[i32; SEED_SIZE]) {
        self.set_state(IsaacRng::from_words(seed));
    }

    #[inline]
    pub(crate) fn next_u64(&self) -> u64 {
        self.rng.borrow_mut().next_u64()
    }

    #[inline]
    pub(crate) fn sample<T, D: Distribution<T>>(&self, distribution: &D) -> T {
        self.rng.borrow_mut().sample(distribution)
    }

    /// Uniform over `range`, which must be nonempty.
    #[inline]
    pub(crate) fn gen_range<T: SampleUniform, R: SampleRange<T>>(&self, range: R) -> T {
        self.rng.borrow_mut().gen_range(range)
    }

    /// `true` with probability `numerator / denominator`.
    #[inline]
    pub(crate) fn gen_ratio(&self, numerator: u32, denominator: u32) -> bool {
        self.rng.borrow_mut().gen_ratio(numerator, denominator)
    }

    #[inline]
    pub(crate) fn next_bool(&self) -> bool {
        self.rng.borrow_mut().gen()
    }

    /// `-1` or `1` with equal probability.
    #[inline]
    pub(crate) fn sign(&self) -> i64 {
        if self.next_bool() {
            1
        } else {
            -1
        }
    }

    pub(crate) fn choose<'a, T>(&self, xs: &'a [T]) -> Option<&'a T> {
        xs.choose(&mut *self.rng.borrow_mut())
    }

    pub(crate) fn shuffle<T>(&self, xs: &mut [T]) {
        xs.shuffle(&mut *self.rng.borrow_mut());
    }

    /// Nonnegative integer of `bits` uniform bits.
    pub(crate) fn random_bits(&self, bits: u64) -> BigInt {
        BigInt::from(self.rng.borrow_mut().gen_biguint(bits))
    }

    /// Uniform integer with exactly `bits` bits (top bit set), `bits >= 1`.
    pub(crate) fn with_bit_length(&self, bits: u64) -> BigInt {
        debug_assert!(bits >= 1);
        (BigInt::from(1u32) << (bits - 1)) + self.random_bits(bits - 1)
    }

    /// Uniform in `[0, n)`, `n >= 1`.
    pub(crate) fn below_big(&self, n: &BigInt) -> BigInt {
        self.rng.borrow_mut().gen_bigint_range(&BigInt::zero(), n)
    }

    /// Geometric draw on `{0, 1, ...}` with the given mean.
    ///
    /// Counts failures before the first success at rate `1 / (mean + 1)`.
    /// A mean that gives no valid rate draws nothing and yields zero.
    pub(crate) fn natural_geometric(&self, mean: f64) -> i64 {
        match Geometric::new(1.0 / (mean + 1.0)) {
            Ok(geometric) => i64::try_from(self.sample(&geometric)).unwrap_or(i64::MAX),
            Err(_) => 0,
        }
    }

    /// Geometric draw on `{1, 2, ...}` with the given mean.
    #[inline]
    pub(crate) fn positive_geometric(&self, mean: f64) -> i64 {
        if mean <= 1.0 {
            return 1;
        }
        self.natural_geometric(mean - 1.0).saturating_add(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use valuegen_core::math::bigint::bit_length;
    use valuegen_core::rng::EXAMPLE_SEED;

    fn cursor() -> Cursor {
        Cursor::new(IsaacRng::from_words(&EXAMPLE_SEED))
    }

    #[test]
    fn test_aliases_share_position() {
        let a = cursor();
        let b = a.clone();
        let fresh = cursor();
        let merged = [a.next_u64(), b.next_u64(), a.next_u64()];
        let straight = [fresh.next_u64(), fresh.next_u64(), fresh.next_u64()];
        assert_eq!(merged, straight);
    }

    #[test]
    fn test_fork_is_independent() {
        let a = cursor();
        a.next_u64();
        let b = a.fork();
        assert_eq!(a.next_u64(), b.next_u64());
        a.next_u64();
        assert_ne!(a.state(), b.state());
    }

    #[test]
    fn test_ranges_stay_in_bounds() {
        let c = cursor();
        for n in [1u64, 2, 3, 7, 1000, u64::MAX] {
            for _ in 0..200 {
                assert!(c.gen_range(0..n) < n);
            }
        }
        for _ in 0..200 {
            c.gen_range(i64::MIN..=i64::MAX);
            let y = c.gen_range(-3i64..=3);
            assert!((-3..=3).contains(&y));
        }
    }

    #[test]
    fn test_bit_lengths() {
        let c = cursor();
        for bits in [1u64, 5, 32, 33, 64, 100] {
            for _ in 0..50 {
                assert!(bit_length(&c.random_bits(bits)) <= bits);
                assert_eq!(bit_length(&c.with_bit_length(bits)), bits);
            }
        }
        let n = BigInt::from(1000);
        for _ in 0..200 {
            let x = c.below_big(&n);
            assert!(x >= BigInt::zero() && x < n);
        }
        assert!((0..50).all(|_| c.below_big(&BigInt::from(1)).is_zero()));
    }

    #[test]
    fn test_choose_and_shuffle() {
        let c = cursor();
        let empty: [u8; 0] = [];
        assert_eq!(c.choose(&empty), None);
        assert!((0..100).all(|_| c.choose(&[1, 2, 3]).is_some_and(|x| (1..=3).contains(x))));
        let mut xs = [4, 1, 3, 2];
        c.shuffle(&mut xs);
        xs.sort_unstable();
        assert_eq!(xs, [1, 2, 3, 4]);
    }

    #[test]
    fn test_geometric_means() {
        let c = cursor();
        for mean in [2.0, 5.0, 32.0] {
            let total: i64 = (0..20_000).map(|_| c.positive_geometric(mean)).sum();
            assert_relative_eq!(total as f64 / 20_000.0, mean, max_relative = 0.05);
        }
        let total: i64 = (0..20_000).map(|_| c.natural_geometric(3.0)).sum();
        assert_relative_eq!(total as f64 / 20_000.0, 3.0, max_relative = 0.05);
        assert!((0..1000).all(|_| c.positive_geometric(1.0) == 1));
        assert!((0..1000).all(|_| c.natural_geometric(0.0) == 0));
    }
}
