//! Provider configuration.
//!
//! This module provides [`ProviderConfig`], the value-semantics record that
//! fixes the two scale knobs (and optionally the seed) an engine starts
//! from, together with its builder and the scale floors each generator
//! family checks before drawing.

use valuegen_core::rng::SEED_SIZE;
use valuegen_core::types::SeedError;

use crate::error::{ConfigError, GenerationError, GenerationResult};

/// Default primary scale.
pub const DEFAULT_SCALE: i32 = 32;

/// Default secondary scale.
pub const DEFAULT_SECONDARY_SCALE: i32 = 8;

/// Engine configuration.
///
/// Immutable; use [`ProviderConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use valuegen_engines::ProviderConfig;
///
/// let config = ProviderConfig::builder()
///     .scale(10)
///     .secondary_scale(3)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.scale(), 10);
/// assert_eq!(config.secondary_scale(), 3);
/// assert!(config.seed().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProviderConfig {
    /// Mean of the primary dimension (magnitude, length, bit size).
    scale: i32,
    /// Mean of the secondary dimension (exponent, decimal scale).
    secondary_scale: i32,
    /// Explicit seed; `None` means entropy seeding.
    #[cfg_attr(feature = "serde", serde(default))]
    seed: Option<Vec<i32>>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            secondary_scale: DEFAULT_SECONDARY_SCALE,
            seed: None,
        }
    }
}

impl ProviderConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::default()
    }

    /// Returns the primary scale.
    #[inline]
    pub fn scale(&self) -> i32 {
        self.scale
    }

    /// Returns the secondary scale.
    #[inline]
    pub fn secondary_scale(&self) -> i32 {
        self.secondary_scale
    }

    /// Returns the explicit seed, if any.
    #[inline]
    pub fn seed(&self) -> Option<&[i32]> {
        self.seed.as_deref()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `scale` or `secondary_scale` is not positive
    /// - the seed does not hold exactly `SEED_SIZE` words
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scale < 1 {
            return Err(ConfigError::InvalidScale {
                name: "scale",
                value: self.scale,
            });
        }
        if self.secondary_scale < 1 {
            return Err(ConfigError::InvalidScale {
                name: "secondary_scale",
                value: self.secondary_scale,
            });
        }
        if let Some(seed) = &self.seed {
            if seed.len() != SEED_SIZE {
                return Err(SeedError::InvalidLength {
                    expected: SEED_SIZE,
                    actual: seed.len(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Builder for [`ProviderConfig`].
///
/// Unset scales fall back to [`DEFAULT_SCALE`] and [`DEFAULT_SECONDARY_SCALE`].
#[derive(Clone, Debug, Default)]
pub struct ProviderConfigBuilder {
    scale: Option<i32>,
    secondary_scale: Option<i32>,
    seed: Option<Vec<i32>>,
}

impl ProviderConfigBuilder {
    /// Sets the primary scale.
    #[inline]
    pub fn scale(mut self, scale: i32) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Sets the secondary scale.
    #[inline]
    pub fn secondary_scale(mut self, secondary_scale: i32) -> Self {
        self.secondary_scale = Some(secondary_scale);
        self
    }

    /// Sets an explicit seed of `SEED_SIZE` words.
    #[inline]
    pub fn seed(mut self, seed: impl Into<Vec<i32>>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if validation fails.
    pub fn build(self) -> Result<ProviderConfig, ConfigError> {
        let config = ProviderConfig {
            scale: self.scale.unwrap_or(DEFAULT_SCALE),
            secondary_scale: self.secondary_scale.unwrap_or(DEFAULT_SECONDARY_SCALE),
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Preconditions checked when a generator is constructed.
///
/// Both engines call the same checks so a configuration rejected by one is
/// rejected by the other.
pub(crate) mod floor {
    use num_bigint::BigInt;
    use num_traits::Signed;
    use valuegen_core::math::IeeeFloat;

    use super::*;

    fn invalid(parameter: &'static str, value: i32, requirement: String) -> GenerationError {
        GenerationError::InvalidConfiguration {
            parameter,
            value: i64::from(value),
            requirement,
        }
    }

    /// Positive geometric draws: `scale >= 2`.
    pub(crate) fn positive(parameter: &'static str, value: i32) -> GenerationResult<()> {
        if value < 2 {
            return Err(invalid(parameter, value, "must be at least 2".to_string()));
        }
        Ok(())
    }

    /// Natural geometric draws: `1 <= scale < i32::MAX`.
    pub(crate) fn natural(parameter: &'static str, value: i32) -> GenerationResult<()> {
        if value < 1 {
            return Err(invalid(parameter, value, "must be at least 1".to_string()));
        }
        if value == i32::MAX {
            return Err(invalid(parameter, value, "must be below i32::MAX".to_string()));
        }
        Ok(())
    }

    /// Draws bounded below by `bound`: `scale > bound`.
    pub(crate) fn above(parameter: &'static str, value: i32, bound: i64) -> GenerationResult<()> {
        if i64::from(value) <= bound {
            return Err(invalid(parameter, value, format!("must exceed {bound}")));
        }
        Ok(())
    }

    /// Draws bounded above by `bound`: `scale < bound`.
    pub(crate) fn below(parameter: &'static str, value: i32, bound: i64) -> GenerationResult<()> {
        if i64::from(value) >= bound {
            return Err(invalid(parameter, value, format!("must be below {bound}")));
        }
        Ok(())
    }

    /// Big integers `>= a`: `scale` above the bit length of `max(a, 0)`.
    pub(crate) fn above_bit_length(
        parameter: &'static str,
        value: i32,
        a: &BigInt,
    ) -> GenerationResult<()> {
        let bits = if a.is_negative() { 0 } else { a.bits() };
        above(parameter, value, bits as i64)
    }

    /// Cartesian products: every component nonempty.
    pub(crate) fn nonempty_components<T>(lists: &[Vec<T>]) -> GenerationResult<()> {
        if let Some(position) = lists.iter().position(Vec::is_empty) {
            return Err(GenerationError::Exhausted(format!(
                "cartesian product component {position} is empty"
            )));
        }
        Ok(())
    }

    /// Uniform samples: a nonempty backing list.
    pub(crate) fn nonempty_sample<T>(xs: &[T]) -> GenerationResult<()> {
        if xs.is_empty() {
            return Err(GenerationError::InvalidArgument(
                "cannot sample uniformly from an empty list".to_string(),
            ));
        }
        Ok(())
    }

    /// Float ranges: no NaN operand.
    pub(crate) fn not_nan<F: IeeeFloat>(operation: &str, xs: &[F]) -> GenerationResult<()> {
        if xs.iter().any(|x| x.is_nan()) {
            return Err(GenerationError::ArithmeticInapplicable(format!(
                "{operation} of NaN"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_defaults() {
        let config = ProviderConfig::builder().build().unwrap();
        assert_eq!(config, ProviderConfig::default());
        assert_eq!(config.scale(), DEFAULT_SCALE);
        assert_eq!(config.secondary_scale(), DEFAULT_SECONDARY_SCALE);
    }

    #[test]
    fn test_config_builder_with_seed() {
        let config = ProviderConfig::builder()
            .seed(vec![1; SEED_SIZE])
            .build()
            .unwrap();
        assert_eq!(config.seed().map(<[i32]>::len), Some(SEED_SIZE));
    }

    #[test]
    fn test_config_invalid_scales() {
        let result = ProviderConfig::builder().scale(0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidScale { name: "scale", value: 0 })
        ));

        let result = ProviderConfig::builder().secondary_scale(-3).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidScale {
                name: "secondary_scale",
                ..
            })
        ));
    }

    #[test]
    fn test_config_invalid_seed() {
        let result = ProviderConfig::builder().seed(vec![0; 10]).build();
        assert!(matches!(result, Err(ConfigError::InvalidSeed(_))));
    }

    #[test]
    fn test_floors() {
        assert!(floor::positive("scale", 2).is_ok());
        assert!(floor::positive("scale", 1).is_err());
        assert!(floor::natural("scale", 1).is_ok());
        assert!(floor::natural("scale", 0).is_err());
        assert!(floor::natural("scale", i32::MAX).is_err());
        assert!(floor::above("scale", 5, 4).is_ok());
        assert!(floor::above("scale", 4, 4).is_err());
        assert!(floor::below("scale", -1, 0).is_ok());
        assert!(floor::below("scale", 0, 0).is_err());
        assert!(floor::above_bit_length("scale", 1, &(-1000).into()).is_ok());
        assert!(floor::above_bit_length("scale", 4, &8.into()).is_err());
        assert!(floor::above_bit_length("scale", 5, &8.into()).is_ok());
        assert!(floor::not_nan("range_float", &[0.0, 1.0]).is_ok());
        assert!(matches!(
            floor::not_nan("range_float", &[0.0, f32::NAN]),
            Err(GenerationError::ArithmeticInapplicable(_))
        ));
    }
}
