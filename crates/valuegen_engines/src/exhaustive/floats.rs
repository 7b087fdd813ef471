//! Exhaustive IEEE floats.
//!
//! Positive finite values are visited by precision level: level `t` holds
//! the values whose significand needs exactly `t` bits after the leading
//! one, binade by binade in zig-zag exponent order. Every value of the
//! format is reached, `1.0` first.

use std::iter::once;
use std::marker::PhantomData;

use valuegen_core::math::bigint::zigzag;
use valuegen_core::math::IeeeFloat;

use super::numeric::zero_first;
use crate::iter::{empty, interleave, single};
use crate::provider::Values;

/// Positive finite floats by precision level.
///
/// # Examples
///
/// ```
/// use valuegen_engines::exhaustive::floats::FloatLattice;
///
/// let firsts: Vec<f32> = FloatLattice::new().take(4).collect();
/// assert_eq!(firsts, vec![1.0, 2.0, 0.5, 4.0]);
/// ```
#[derive(Clone, Debug)]
pub struct FloatLattice<F> {
    level: u32,
    binade: u64,
    step: u64,
    _format: PhantomData<F>,
}

impl<F: IeeeFloat> FloatLattice<F> {
    /// Lattice starting at level zero.
    pub fn new() -> Self {
        Self {
            level: 0,
            binade: 0,
            step: 0,
            _format: PhantomData,
        }
    }
}

impl<F: IeeeFloat> Default for FloatLattice<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: IeeeFloat> Iterator for FloatLattice<F> {
    type Item = F;

    fn next(&mut self) -> Option<F> {
        loop {
            if self.level >= F::PRECISION {
                return None;
            }
            let t = self.level;
            let lowest = i64::from(F::MIN_SUBNORMAL_EXPONENT) + i64::from(t);
            let highest = i64::from(F::MAX_EXPONENT);
            let reach = 2 * highest.max(-lowest) as u64;
            if self.binade > reach {
                self.level += 1;
                self.binade = 0;
                self.step = 0;
                continue;
            }
            let e = zigzag(self.binade);
            // Odd tails j in [1, 2^t), or the bare leading bit at level zero.
            let tails = if t == 0 { 1 } else { 1u64 << (t - 1) };
            if e < lowest || e > highest || self.step >= tails {
                self.binade += 1;
                self.step = 0;
                continue;
            }
            let tail = if t == 0 { 0 } else { 2 * self.step + 1 };
            self.step += 1;
            return Some(F::from_scaled((1u64 << t) + tail, (e - i64::from(t)) as i32));
        }
    }
}

pub(super) fn positive_floats<F: IeeeFloat>() -> Values<F> {
    Box::new(FloatLattice::<F>::new())
}

pub(super) fn negative_floats<F: IeeeFloat>() -> Values<F> {
    Box::new(FloatLattice::<F>::new().map(|x| -x))
}

pub(super) fn nonzero_floats<F: IeeeFloat>() -> Values<F> {
    interleave(positive_floats(), negative_floats())
}

/// NaN, the infinities and both zeros, then every nonzero finite value.
pub(super) fn floats<F: IeeeFloat>() -> Values<F> {
    let specials = [
        F::nan(),
        F::infinity(),
        F::neg_infinity(),
        F::zero(),
        F::neg_zero(),
    ];
    Box::new(specials.into_iter().chain(nonzero_floats()))
}

pub(super) fn floats_uniform<F: IeeeFloat>() -> Values<F> {
    Box::new(once(F::zero()).chain(nonzero_floats()))
}

fn ordinal<F: IeeeFloat>(x: F) -> i64 {
    x.to_ordinal().unwrap_or_default()
}

/// Non-NaN floats between two non-NaN bounds, zero-first by ordinal.
pub(super) fn range_floats<F: IeeeFloat>(a: F, b: F) -> Values<F> {
    if a > b {
        return empty();
    }
    if a == b {
        return single(a);
    }
    Box::new(zero_first(Some(ordinal(a)), Some(ordinal(b))).map(F::from_ordinal))
}

pub(super) fn range_up_floats<F: IeeeFloat>(a: F) -> Values<F> {
    range_floats(a, F::infinity())
}

pub(super) fn range_down_floats<F: IeeeFloat>(a: F) -> Values<F> {
    range_floats(F::neg_infinity(), a)
}

/// Finite floats of `[a, b]`; an infinite degenerate bound is its own single value.
pub(super) fn range_floats_uniform<F: IeeeFloat>(a: F, b: F) -> Values<F> {
    if a > b {
        return empty();
    }
    if a == b {
        return single(a);
    }
    let lo = a.max(-F::max_value());
    let hi = b.min(F::max_value());
    if lo > hi {
        return empty();
    }
    range_floats(lo, hi)
}

pub(super) fn range_up_floats_uniform<F: IeeeFloat>(a: F) -> Values<F> {
    if a == F::infinity() {
        return single(a);
    }
    range_floats_uniform(a, F::max_value())
}

pub(super) fn range_down_floats_uniform<F: IeeeFloat>(a: F) -> Values<F> {
    if a == F::neg_infinity() {
        return single(a);
    }
    range_floats_uniform(-F::max_value(), a)
}
