//! Dyadic rationals in canonical form.
//!
//! A [`BinaryFraction`] is `mantissa × 2^exponent`. Every nonzero value keeps
//! an odd mantissa and zero is stored as `(0, 0)`, so each number has exactly
//! one representation and structural equality is numeric equality.
//!
//! The textual form is a compact shift notation:
//!
//! | Value        | Text       |
//! |--------------|------------|
//! | `5`          | `5`        |
//! | `5 × 2^3`    | `5 << 3`   |
//! | `-3 × 2^-2`  | `-3 >> 2`  |

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::decimal::BigDecimal;
use super::error::ParseError;
use crate::math::bigint::{bit_length, is_odd};
use crate::math::IeeeFloat;

/// Rounding direction used when a fraction is narrowed to a float.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Rounding {
    Floor,
    Ceiling,
    Nearest,
}

/// Arbitrary-precision dyadic rational `mantissa × 2^exponent`.
///
/// # Invariants
///
/// - nonzero values have an odd mantissa
/// - zero is `(0, 0)`
///
/// # Examples
///
/// ```
/// use num_bigint::BigInt;
/// use valuegen_core::types::BinaryFraction;
///
/// // 12 × 2^-4 normalises to 3 × 2^-2
/// let x = BinaryFraction::new(BigInt::from(12), -4);
/// assert_eq!(x.mantissa(), &BigInt::from(3));
/// assert_eq!(x.exponent(), -2);
/// assert_eq!(x.to_string(), "3 >> 2");
/// assert!(x.is_canonical());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryFraction {
    mantissa: BigInt,
    exponent: i32,
}

impl BinaryFraction {
    /// Creates `mantissa × 2^exponent`, dividing out factors of two.
    ///
    /// # Panics
    ///
    /// Panics if normalisation pushes the exponent past `i32::MAX`; use
    /// [`checked_new`](Self::checked_new) to handle that case.
    pub fn new(mantissa: BigInt, exponent: i32) -> Self {
        Self::checked_new(mantissa, exponent).expect("binary fraction exponent overflow")
    }

    /// Creates `mantissa × 2^exponent`, or `None` if the canonical exponent
    /// does not fit in an `i32`.
    pub fn checked_new(mantissa: BigInt, exponent: i32) -> Option<Self> {
        Self::from_wide(mantissa, i64::from(exponent))
    }

    fn from_wide(mantissa: BigInt, exponent: i64) -> Option<Self> {
        let Some(twos) = mantissa.trailing_zeros() else {
            return Some(Self::zero());
        };
        let exponent = i32::try_from(exponent + twos as i64).ok()?;
        Some(Self {
            mantissa: mantissa >> twos,
            exponent,
        })
    }

    /// The value `0`.
    #[inline]
    pub fn zero() -> Self {
        Self {
            mantissa: BigInt::zero(),
            exponent: 0,
        }
    }

    /// The value `1`.
    #[inline]
    pub fn one() -> Self {
        Self {
            mantissa: BigInt::one(),
            exponent: 0,
        }
    }

    /// The canonical mantissa.
    #[inline]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// The canonical exponent.
    #[inline]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// `-1`, `0` or `1`.
    #[inline]
    pub fn signum(&self) -> i32 {
        match self.mantissa.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    /// Whether the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Bit length of the mantissa's magnitude.
    #[inline]
    pub fn bit_size(&self) -> u64 {
        bit_length(&self.mantissa)
    }

    /// Whether the value is an integer.
    #[inline]
    pub fn is_integer(&self) -> bool {
        self.exponent >= 0
    }

    /// Checks the canonical-form invariants.
    ///
    /// Values built through this API always pass; the check exists for
    /// callers that validate generated output.
    pub fn is_canonical(&self) -> bool {
        if self.mantissa.is_zero() {
            self.exponent == 0
        } else {
            is_odd(&self.mantissa)
        }
    }

    /// `-self`.
    pub fn negate(&self) -> Self {
        Self {
            mantissa: -&self.mantissa,
            exponent: self.exponent,
        }
    }

    /// `|self|`.
    pub fn abs(&self) -> Self {
        Self {
            mantissa: self.mantissa.abs(),
            exponent: self.exponent,
        }
    }

    /// Exact sum.
    ///
    /// # Panics
    ///
    /// Panics if the canonical exponent of the result overflows `i32`.
    pub fn add(&self, other: &Self) -> Self {
        self.checked_add(other).expect("binary fraction exponent overflow")
    }

    /// Exact sum, or `None` on exponent overflow.
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.is_zero() {
            return Some(other.clone());
        }
        if other.is_zero() {
            return Some(self.clone());
        }
        let low = self.exponent.min(other.exponent);
        let left = &self.mantissa << exponent_gap(self.exponent, low);
        let right = &other.mantissa << exponent_gap(other.exponent, low);
        Self::checked_new(left + right, low)
    }

    /// Exact difference.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// Exact product.
    ///
    /// # Panics
    ///
    /// Panics if the exponent of the result overflows `i32`.
    pub fn mul(&self, other: &Self) -> Self {
        self.checked_mul(other).expect("binary fraction exponent overflow")
    }

    /// Exact product, or `None` on exponent overflow.
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        let exponent = i64::from(self.exponent) + i64::from(other.exponent);
        Self::from_wide(&self.mantissa * &other.mantissa, exponent)
    }

    /// `self × 2^bits`, or `None` on exponent overflow.
    pub fn checked_shl(&self, bits: i32) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::zero());
        }
        Some(Self {
            mantissa: self.mantissa.clone(),
            exponent: self.exponent.checked_add(bits)?,
        })
    }

    /// `self × 2^bits`.
    ///
    /// # Panics
    ///
    /// Panics on exponent overflow.
    pub fn shl(&self, bits: i32) -> Self {
        self.checked_shl(bits)
            .expect("binary fraction exponent overflow")
    }

    /// `self × 2^-bits`.
    ///
    /// # Panics
    ///
    /// Panics on exponent overflow.
    pub fn shr(&self, bits: i32) -> Self {
        self.checked_shr(bits)
            .expect("binary fraction exponent overflow")
    }

    /// `self × 2^-bits`, or `None` on exponent overflow.
    pub fn checked_shr(&self, bits: i32) -> Option<Self> {
        if self.is_zero() {
            return Some(Self::zero());
        }
        let shifted = i64::from(self.exponent) - i64::from(bits);
        Some(Self {
            mantissa: self.mantissa.clone(),
            exponent: i32::try_from(shifted).ok()?,
        })
    }

    /// Exact decimal value; the decimal scale is `max(0, -exponent)`.
    ///
    /// # Panics
    ///
    /// Panics if the exponent is `i32::MIN`, whose decimal scale does not fit.
    pub fn to_big_decimal(&self) -> BigDecimal {
        self.checked_to_big_decimal().expect("decimal scale overflow")
    }

    /// Exact decimal value, or `None` when the exponent is `i32::MIN`.
    pub fn checked_to_big_decimal(&self) -> Option<BigDecimal> {
        if self.exponent >= 0 {
            return Some(BigDecimal::new(&self.mantissa << self.exponent as u64, 0));
        }
        let digits = self.exponent.unsigned_abs();
        let scale = i32::try_from(digits).ok()?;
        let unscaled = &self.mantissa * BigInt::from(5u32).pow(digits);
        Some(BigDecimal::new(unscaled, scale))
    }

    /// Exact value of a finite float; `None` for NaN and infinities.
    ///
    /// Both zeros map to [`zero`](Self::zero).
    pub fn from_float<F: IeeeFloat>(value: F) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let raw = value.to_raw();
        let magnitude = raw & !F::sign_mask();
        let field = magnitude >> (F::PRECISION - 1);
        let fraction = magnitude & F::fraction_mask();
        let (significand, exponent) = if field == 0 {
            (fraction, F::MIN_SUBNORMAL_EXPONENT)
        } else {
            (
                fraction | (1 << (F::PRECISION - 1)),
                field as i32 - F::MAX_EXPONENT - (F::PRECISION as i32 - 1),
            )
        };
        let mut mantissa = BigInt::from(significand);
        if raw & F::sign_mask() != 0 {
            mantissa = -mantissa;
        }
        Self::checked_new(mantissa, exponent)
    }

    /// Largest float `<= self`; values past the finite range give `±MAX` or `-∞`.
    pub fn to_float_floor<F: IeeeFloat>(&self) -> F {
        self.to_float(Rounding::Floor)
    }

    /// Smallest float `>= self`; values past the finite range give `+∞` or `-MAX`.
    pub fn to_float_ceiling<F: IeeeFloat>(&self) -> F {
        self.to_float(Rounding::Ceiling)
    }

    /// Nearest float, ties to even; overflow rounds to `±∞`.
    pub fn to_float_nearest<F: IeeeFloat>(&self) -> F {
        self.to_float(Rounding::Nearest)
    }

    fn to_float<F: IeeeFloat>(&self, rounding: Rounding) -> F {
        match self.signum() {
            0 => F::zero(),
            1 => Self::positive_to_float(&self.mantissa, self.exponent, rounding),
            _ => {
                let mirrored = match rounding {
                    Rounding::Floor => Rounding::Ceiling,
                    Rounding::Ceiling => Rounding::Floor,
                    Rounding::Nearest => Rounding::Nearest,
                };
                let magnitude: F =
                    Self::positive_to_float(&(-&self.mantissa), self.exponent, mirrored);
                -magnitude
            }
        }
    }

    fn positive_to_float<F: IeeeFloat>(mantissa: &BigInt, exponent: i32, rounding: Rounding) -> F {
        let length = bit_length(mantissa) as i64;
        let exponent = i64::from(exponent);
        let top = exponent + length - 1;
        if top > i64::from(F::MAX_EXPONENT) {
            return match rounding {
                Rounding::Floor => F::max_value(),
                Rounding::Ceiling | Rounding::Nearest => F::infinity(),
            };
        }
        let quantum = (top - (F::PRECISION as i64 - 1)).max(i64::from(F::MIN_SUBNORMAL_EXPONENT));
        if exponent >= quantum {
            let k = (mantissa << (exponent - quantum) as u64)
                .to_u64()
                .unwrap_or(u64::MAX);
            return F::from_scaled(k, quantum as i32);
        }
        let shift = quantum - exponent;
        let (floor, round_up) = if shift > length {
            (0, rounding == Rounding::Ceiling)
        } else {
            let shift = shift as u64;
            let floor = mantissa >> shift;
            let remainder = mantissa - (&floor << shift);
            let half = BigInt::one() << (shift - 1);
            let floor = floor.to_u64().unwrap_or(u64::MAX);
            let round_up = match rounding {
                Rounding::Floor => false,
                Rounding::Ceiling => true,
                Rounding::Nearest => match remainder.cmp(&half) {
                    Ordering::Less => false,
                    Ordering::Greater => true,
                    Ordering::Equal => floor % 2 == 1,
                },
            };
            (floor, round_up)
        };
        let k = if round_up { floor + 1 } else { floor };
        F::from_scaled(k, quantum as i32)
    }
}

#[inline]
fn exponent_gap(exponent: i32, low: i32) -> u64 {
    (i64::from(exponent) - i64::from(low)) as u64
}

impl PartialOrd for BinaryFraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BinaryFraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_sign = self.signum().cmp(&other.signum());
        if by_sign != Ordering::Equal || self.is_zero() {
            return by_sign;
        }
        // Same nonzero sign: compare magnitudes by leading bit first so that
        // wildly different exponents never force a huge shift.
        let top_self = i64::from(self.exponent) + self.bit_size() as i64;
        let top_other = i64::from(other.exponent) + other.bit_size() as i64;
        let magnitude = if top_self != top_other {
            top_self.cmp(&top_other)
        } else {
            let low = self.exponent.min(other.exponent);
            let left = self.mantissa.abs() << exponent_gap(self.exponent, low);
            let right = other.mantissa.abs() << exponent_gap(other.exponent, low);
            left.cmp(&right)
        };
        if self.signum() > 0 {
            magnitude
        } else {
            magnitude.reverse()
        }
    }
}

impl From<BigInt> for BinaryFraction {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl From<i64> for BinaryFraction {
    fn from(value: i64) -> Self {
        Self::new(BigInt::from(value), 0)
    }
}

impl fmt::Display for BinaryFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.exponent.cmp(&0) {
            Ordering::Equal => write!(f, "{}", self.mantissa),
            Ordering::Greater => write!(f, "{} << {}", self.mantissa, self.exponent),
            Ordering::Less => write!(
                f,
                "{} >> {}",
                self.mantissa,
                -(i64::from(self.exponent))
            ),
        }
    }
}

impl FromStr for BinaryFraction {
    type Err = ParseError;

    /// Reads the shift notation, accepting only canonical text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::Malformed(s.to_string());
        let (mantissa_text, shift) = if let Some((m, e)) = s.split_once(" << ") {
            (m, Some((e, 1i64)))
        } else if let Some((m, e)) = s.split_once(" >> ") {
            (m, Some((e, -1i64)))
        } else {
            (s, None)
        };
        let mantissa: BigInt = mantissa_text.parse().map_err(|_| malformed())?;
        let exponent = match shift {
            None => 0,
            Some((text, direction)) => {
                if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed());
                }
                let magnitude: i64 = text
                    .parse()
                    .map_err(|_| ParseError::ExponentOutOfRange(s.to_string()))?;
                i32::try_from(direction * magnitude)
                    .map_err(|_| ParseError::ExponentOutOfRange(s.to_string()))?
            }
        };
        let value = Self {
            mantissa,
            exponent,
        };
        if !value.is_canonical() || value.to_string() != s {
            return Err(ParseError::NonCanonical(s.to_string()));
        }
        Ok(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BinaryFraction {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BinaryFraction {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
