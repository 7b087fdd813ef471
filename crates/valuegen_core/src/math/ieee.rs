//! IEEE-754 helpers for `f32` and `f64`.
//!
//! [`IeeeFloat`] extends `num_traits::Float` with the format constants and raw
//! bit access needed for exact conversions, neighbour stepping, and ordinal
//! indexing. Raw bits are widened to `u64` so one code path serves both widths.

use std::fmt::{Debug, Display};

use num_traits::Float;

/// Binary floating-point format with bit-level access.
///
/// Zero is treated as a single value by the neighbour and ordinal helpers:
/// `-0.0` and `+0.0` share ordinal `0`, and stepping never lands on `-0.0`.
///
/// # Examples
///
/// ```
/// use valuegen_core::math::IeeeFloat;
///
/// assert_eq!(1.0_f32.successor(), 1.0000001_f32);
/// assert_eq!(0.0_f64.successor(), f64::from_bits(1));
/// assert_eq!((-0.0_f64).to_ordinal(), Some(0));
/// assert_eq!(f32::from_ordinal(1), f32::from_bits(1));
/// ```
pub trait IeeeFloat: Float + Debug + Display + Default + 'static {
    /// Significand precision including the hidden bit.
    const PRECISION: u32;
    /// Largest unbiased exponent of a finite value (also the exponent bias).
    const MAX_EXPONENT: i32;
    /// Smallest unbiased exponent of a normal value.
    const MIN_EXPONENT: i32;
    /// Exponent of the least significant bit of the smallest subnormal.
    const MIN_SUBNORMAL_EXPONENT: i32;
    /// Total width of the format in bits.
    const WIDTH: u32;

    /// Raw bit pattern, zero-extended.
    fn to_raw(self) -> u64;

    /// Float from a raw bit pattern (upper bits beyond `WIDTH` ignored).
    fn from_raw(raw: u64) -> Self;

    /// Sign bit mask.
    #[inline]
    fn sign_mask() -> u64 {
        1 << (Self::WIDTH - 1)
    }

    /// Mask of the stored fraction field.
    #[inline]
    fn fraction_mask() -> u64 {
        (1 << (Self::PRECISION - 1)) - 1
    }

    /// Smallest positive subnormal value.
    #[inline]
    fn min_positive_subnormal() -> Self {
        Self::from_raw(1)
    }

    /// Next representable value towards `+∞`.
    ///
    /// NaN maps to NaN and `+∞` to itself; both zeros step to the smallest
    /// subnormal and the negative subnormal closest to zero steps to `+0.0`.
    fn successor(self) -> Self {
        if self.is_nan() || self == Self::infinity() {
            return self;
        }
        if self == Self::zero() {
            return Self::min_positive_subnormal();
        }
        let raw = self.to_raw();
        if self > Self::zero() {
            Self::from_raw(raw + 1)
        } else if raw & !Self::sign_mask() == 1 {
            Self::zero()
        } else {
            Self::from_raw(raw - 1)
        }
    }

    /// Next representable value towards `-∞`; mirror image of [`successor`](Self::successor).
    fn predecessor(self) -> Self {
        let negated = -self;
        let step = negated.successor();
        if step == Self::zero() {
            Self::zero()
        } else {
            -step
        }
    }

    /// Position of the value on the ordered line of non-NaN floats.
    ///
    /// Both zeros map to `0`, positive values to their raw bits, negative
    /// values to the negated magnitude bits. Returns `None` for NaN.
    fn to_ordinal(self) -> Option<i64> {
        if self.is_nan() {
            return None;
        }
        let raw = self.to_raw();
        let magnitude = (raw & !Self::sign_mask()) as i64;
        if raw & Self::sign_mask() == 0 {
            Some(magnitude)
        } else {
            Some(-magnitude)
        }
    }

    /// Inverse of [`to_ordinal`](Self::to_ordinal); ordinal `0` is `+0.0`.
    fn from_ordinal(ordinal: i64) -> Self {
        if ordinal >= 0 {
            Self::from_raw(ordinal as u64)
        } else {
            Self::from_raw(Self::sign_mask() | ordinal.unsigned_abs())
        }
    }

    /// Builds the positive value `k × 2^q`, or `+∞` when it exceeds the format.
    ///
    /// `k × 2^q` must be representable unless it overflows: `q` may not fall
    /// below [`MIN_SUBNORMAL_EXPONENT`](Self::MIN_SUBNORMAL_EXPONENT) and `k`
    /// must not carry more than `PRECISION` significant bits.
    fn from_scaled(k: u64, q: i32) -> Self {
        if k == 0 {
            return Self::zero();
        }
        let width = 64 - k.leading_zeros();
        let top_exponent = q + width as i32 - 1;
        if top_exponent > Self::MAX_EXPONENT {
            return Self::infinity();
        }
        if top_exponent < Self::MIN_EXPONENT {
            let shift = (q - Self::MIN_SUBNORMAL_EXPONENT) as u32;
            return Self::from_raw(k << shift);
        }
        let significand = if width >= Self::PRECISION {
            k >> (width - Self::PRECISION)
        } else {
            k << (Self::PRECISION - width)
        };
        let biased = (top_exponent + Self::MAX_EXPONENT) as u64;
        Self::from_raw((biased << (Self::PRECISION - 1)) | (significand & Self::fraction_mask()))
    }
}

impl IeeeFloat for f32 {
    const PRECISION: u32 = 24;
    const MAX_EXPONENT: i32 = 127;
    const MIN_EXPONENT: i32 = -126;
    const MIN_SUBNORMAL_EXPONENT: i32 = -149;
    const WIDTH: u32 = 32;

    #[inline]
    fn to_raw(self) -> u64 {
        u64::from(self.to_bits())
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        f32::from_bits(raw as u32)
    }
}

impl IeeeFloat for f64 {
    const PRECISION: u32 = 53;
    const MAX_EXPONENT: i32 = 1023;
    const MIN_EXPONENT: i32 = -1022;
    const MIN_SUBNORMAL_EXPONENT: i32 = -1074;
    const WIDTH: u32 = 64;

    #[inline]
    fn to_raw(self) -> u64 {
        self.to_bits()
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        f64::from_bits(raw)
    }
}
