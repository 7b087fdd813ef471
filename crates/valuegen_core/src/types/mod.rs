//! Arbitrary-precision value types produced by the generation engines.
//!
//! This module provides:
//! - `binary_fraction`: Dyadic rationals `mantissa × 2^exponent` in canonical odd-mantissa form
//! - `decimal`: Decimals `unscaled × 10^-scale` with canonicalisation
//! - `error`: Structured error types for seeds and textual parsing
//!
//! # Re-exports
//!
//! - [`BinaryFraction`] from `binary_fraction`
//! - [`BigDecimal`] from `decimal`
//! - [`SeedError`], [`ParseError`] from `error`

pub mod binary_fraction;
pub mod decimal;
pub mod error;

pub use binary_fraction::BinaryFraction;
pub use decimal::BigDecimal;
pub use error::{ParseError, SeedError};
