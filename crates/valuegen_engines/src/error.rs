//! Error types for the generation engines.
//!
//! This module provides:
//! - `GenerationError`: failures raised when requesting or drawing from a generator
//! - `ConfigError`: validation failures of [`ProviderConfig`](crate::config::ProviderConfig)

use thiserror::Error;
use valuegen_core::types::SeedError;

/// Errors raised by the generation engines.
///
/// Every variant is unrecoverable for the call that produced it. An empty
/// result (`range(a, b)` with `a > b`) is a valid sequence, not an error.
///
/// # Examples
///
/// ```
/// use valuegen_engines::GenerationError;
///
/// let err = GenerationError::InvalidConfiguration {
///     parameter: "scale",
///     value: 1,
///     requirement: "must be at least 2".to_string(),
/// };
/// assert_eq!(err.to_string(), "Invalid configuration: scale = 1 (must be at least 2)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A scale parameter is below the floor documented for the requested generator.
    ///
    /// Raised when the generator is constructed, before any value is drawn.
    #[error("Invalid configuration: {parameter} = {value} ({requirement})")]
    InvalidConfiguration {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Value it held
        value: i64,
        /// What the generator needs
        requirement: String,
    },

    /// A call-time argument is malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A range operation received a NaN operand.
    #[error("Arithmetic inapplicable: {0}")]
    ArithmeticInapplicable(String),

    /// A source advertised as null-free produced a missing value.
    #[error("Null value drawn at position {position}")]
    NullTaint {
        /// Zero-based index of the offending draw
        position: usize,
    },

    /// Sampling from a backing collection that turned out to be empty.
    #[error("Exhausted: {0}")]
    Exhausted(String),
}

impl From<SeedError> for GenerationError {
    fn from(err: SeedError) -> Self {
        GenerationError::InvalidArgument(err.to_string())
    }
}

impl From<ConfigError> for GenerationError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidScale { name, value } => GenerationError::InvalidConfiguration {
                parameter: name,
                value: i64::from(value),
                requirement: "must be positive".to_string(),
            },
            ConfigError::InvalidSeed(seed) => seed.into(),
        }
    }
}

/// Configuration error for [`ProviderConfig`](crate::config::ProviderConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A scale parameter is not positive.
    #[error("Invalid {name} {value}: must be positive")]
    InvalidScale {
        /// Parameter name
        name: &'static str,
        /// Rejected value
        value: i32,
    },

    /// The explicit seed has the wrong length.
    #[error(transparent)]
    InvalidSeed(#[from] SeedError),
}

/// Result alias used throughout the engines.
pub type GenerationResult<T> = Result<T, GenerationError>;
