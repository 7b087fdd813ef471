//! Error types for the foundation layer.
//!
//! This module provides:
//! - `SeedError`: Errors from constructing the bit source
//! - `ParseError`: Errors from reading the textual forms of value types

use thiserror::Error;

/// Errors raised while seeding the bit source.
///
/// # Examples
/// ```
/// use valuegen_core::types::SeedError;
///
/// let err = SeedError::InvalidLength { expected: 256, actual: 3 };
/// assert_eq!(err.to_string(), "Seed must contain exactly 256 words, got 3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedError {
    /// The seed does not have the fixed state size.
    #[error("Seed must contain exactly {expected} words, got {actual}")]
    InvalidLength {
        /// Required number of words
        expected: usize,
        /// Number of words supplied
        actual: usize,
    },
}

/// Errors raised while parsing `BinaryFraction` or `BigDecimal` text.
///
/// # Examples
/// ```
/// use valuegen_core::types::ParseError;
///
/// let err = ParseError::NonCanonical("2 << 1".to_string());
/// assert!(err.to_string().contains("2 << 1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Input does not follow the grammar.
    #[error("Malformed numeric literal: {0:?}")]
    Malformed(String),

    /// Input is well formed but not in canonical form.
    #[error("Non-canonical literal: {0:?}")]
    NonCanonical(String),

    /// An exponent or scale does not fit in 32 bits.
    #[error("Exponent out of range in literal: {0:?}")]
    ExponentOutOfRange(String),
}
