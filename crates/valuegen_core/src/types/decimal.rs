//! Arbitrary-precision decimals.
//!
//! A [`BigDecimal`] is `unscaled × 10^-scale`. Distinct representations of the
//! same number (`1.0` and `1.00`) are distinct values; [`BigDecimal::canonical`]
//! picks the unique representative with no trailing decimal zero, and zero
//! becomes `(0, 0)`.
//!
//! The textual form follows the usual plain/scientific convention: plain
//! notation while `scale >= 0` and the adjusted exponent is at least `-6`,
//! scientific (`1.5E+3`, `1E-7`) otherwise.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{Signed, Zero};

use super::binary_fraction::BinaryFraction;
use super::error::ParseError;
use crate::math::bigint::pow10;

/// Decimal number `unscaled × 10^-scale`.
///
/// # Examples
///
/// ```
/// use num_bigint::BigInt;
/// use valuegen_core::types::BigDecimal;
///
/// let x = BigDecimal::new(BigInt::from(1500), 3);
/// assert_eq!(x.to_string(), "1.500");
/// assert_eq!(x.canonical().to_string(), "1.5");
///
/// let y: BigDecimal = "1.5E+3".parse().unwrap();
/// assert_eq!(y.unscaled(), &BigInt::from(15));
/// assert_eq!(y.scale(), -2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BigDecimal {
    unscaled: BigInt,
    scale: i32,
}

impl BigDecimal {
    /// Creates `unscaled × 10^-scale` exactly as given.
    #[inline]
    pub fn new(unscaled: BigInt, scale: i32) -> Self {
        Self { unscaled, scale }
    }

    /// Canonical zero, `(0, 0)`.
    #[inline]
    pub fn zero() -> Self {
        Self::new(BigInt::zero(), 0)
    }

    /// The unscaled integer.
    #[inline]
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }

    /// The decimal scale.
    #[inline]
    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// `-1`, `0` or `1`.
    pub fn signum(&self) -> i32 {
        match self.unscaled.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    /// Whether the value is zero (at any scale).
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }

    /// `-self`, keeping the scale.
    pub fn negate(&self) -> Self {
        Self::new(-&self.unscaled, self.scale)
    }

    /// Exact sum; the result scale is the larger operand scale.
    pub fn add(&self, other: &Self) -> Self {
        let scale = self.scale.max(other.scale);
        let left = &self.unscaled * pow10(scale.abs_diff(self.scale));
        let right = &other.unscaled * pow10(scale.abs_diff(other.scale));
        Self::new(left + right, scale)
    }

    /// Number of decimal digits in the unscaled magnitude (`1` for zero).
    pub fn precision(&self) -> usize {
        self.unscaled.magnitude().to_string().len()
    }

    /// The canonical representative of this value.
    ///
    /// # Panics
    ///
    /// Panics if stripping trailing zeros would push the scale below `i32::MIN`;
    /// [`checked_canonical`](Self::checked_canonical) reports that case instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use valuegen_core::types::BigDecimal;
    ///
    /// let x: BigDecimal = "120.00".parse().unwrap();
    /// assert_eq!(x.canonical().to_string(), "1.2E+2");
    /// assert_eq!(x.canonical().canonical(), x.canonical());
    ///
    /// let zero: BigDecimal = "0.000".parse().unwrap();
    /// assert_eq!(zero.canonical(), BigDecimal::zero());
    /// ```
    pub fn canonical(&self) -> Self {
        self.checked_canonical().expect("decimal scale underflow")
    }

    /// The canonical representative, or `None` if its scale would fall
    /// below `i32::MIN`.
    pub fn checked_canonical(&self) -> Option<Self> {
        if self.unscaled.is_zero() {
            return Some(Self::zero());
        }
        let ten = BigInt::from(10u32);
        let mut unscaled = self.unscaled.clone();
        let mut scale = self.scale;
        while (&unscaled % &ten).is_zero() {
            unscaled /= &ten;
            scale = scale.checked_sub(1)?;
        }
        Some(Self::new(unscaled, scale))
    }

    /// Whether this is the canonical representative of its value.
    pub fn is_canonical(&self) -> bool {
        if self.unscaled.is_zero() {
            self.scale == 0
        } else {
            !(&self.unscaled % BigInt::from(10u32)).is_zero()
        }
    }

    /// Numeric comparison, ignoring representation.
    pub fn compare_value(&self, other: &Self) -> Ordering {
        let by_sign = self.signum().cmp(&other.signum());
        if by_sign != Ordering::Equal || self.is_zero() {
            return by_sign;
        }
        // Position of the leading digit decides unless it coincides, which
        // bounds the alignment shift below.
        let top_self = self.precision() as i64 - i64::from(self.scale);
        let top_other = other.precision() as i64 - i64::from(other.scale);
        let magnitude = if top_self != top_other {
            top_self.cmp(&top_other)
        } else {
            let scale = self.scale.max(other.scale);
            let left = self.unscaled.abs() * pow10(scale.abs_diff(self.scale));
            let right = other.unscaled.abs() * pow10(scale.abs_diff(other.scale));
            left.cmp(&right)
        };
        if self.signum() > 0 {
            magnitude
        } else {
            magnitude.reverse()
        }
    }

    /// Whether both represent the same number.
    #[inline]
    pub fn numeric_eq(&self, other: &Self) -> bool {
        self.compare_value(other) == Ordering::Equal
    }

    /// `floor(self × 10^scale)`.
    pub fn rescale_floor(&self, scale: i32) -> BigInt {
        self.rescale(scale, <BigInt as Integer>::div_floor)
    }

    /// `ceil(self × 10^scale)`.
    pub fn rescale_ceiling(&self, scale: i32) -> BigInt {
        self.rescale(scale, <BigInt as Integer>::div_ceil)
    }

    fn rescale(&self, scale: i32, divide: fn(&BigInt, &BigInt) -> BigInt) -> BigInt {
        if scale >= self.scale {
            &self.unscaled * pow10(scale.abs_diff(self.scale))
        } else {
            divide(&self.unscaled, &pow10(scale.abs_diff(self.scale)))
        }
    }
}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigDecimal {
    /// Orders by value, then by scale so the order agrees with `Eq`.
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_value(other)
            .then_with(|| self.scale.cmp(&other.scale))
    }
}

impl From<BigInt> for BigDecimal {
    fn from(value: BigInt) -> Self {
        Self::new(value, 0)
    }
}

impl From<&BinaryFraction> for BigDecimal {
    fn from(value: &BinaryFraction) -> Self {
        value.to_big_decimal()
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_string();
        let sign = if self.unscaled.is_negative() { "-" } else { "" };
        let adjusted = digits.len() as i64 - 1 - i64::from(self.scale);
        if self.scale >= 0 && adjusted >= -6 {
            let scale = self.scale as usize;
            if scale == 0 {
                write!(f, "{sign}{digits}")
            } else if digits.len() > scale {
                let (whole, fraction) = digits.split_at(digits.len() - scale);
                write!(f, "{sign}{whole}.{fraction}")
            } else {
                let padding = "0".repeat(scale - digits.len());
                write!(f, "{sign}0.{padding}{digits}")
            }
        } else {
            let (lead, rest) = digits.split_at(1);
            let exponent_sign = if adjusted >= 0 { '+' } else { '-' };
            if rest.is_empty() {
                write!(f, "{sign}{lead}E{exponent_sign}{}", adjusted.abs())
            } else {
                write!(f, "{sign}{lead}.{rest}E{exponent_sign}{}", adjusted.abs())
            }
        }
    }
}

impl FromStr for BigDecimal {
    type Err = ParseError;

    /// Reads plain (`-12.50`) or scientific (`1.25E+3`, `4e-2`) notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseError::Malformed(s.to_string());
        let (body, exponent) = match s.find(['e', 'E']) {
            Some(at) => {
                let text = &s[at + 1..];
                let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(malformed());
                }
                let exponent: i64 = text
                    .strip_prefix('+')
                    .unwrap_or(text)
                    .parse()
                    .map_err(|_| ParseError::ExponentOutOfRange(s.to_string()))?;
                (&s[..at], exponent)
            }
            None => (s, 0),
        };
        let (negative, body) = match body.as_bytes().first() {
            Some(b'-') => (true, &body[1..]),
            Some(b'+') => (false, &body[1..]),
            _ => (false, body),
        };
        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(malformed());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let mut unscaled: BigInt = format!("{whole}{fraction}")
            .parse()
            .map_err(|_| malformed())?;
        if negative {
            unscaled = -unscaled;
        }
        let scale = i32::try_from(fraction.len() as i64 - exponent)
            .map_err(|_| ParseError::ExponentOutOfRange(s.to_string()))?;
        Ok(Self::new(unscaled, scale))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BigDecimal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BigDecimal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
