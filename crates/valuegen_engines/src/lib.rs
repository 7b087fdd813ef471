//! # valuegen_engines: Random and Exhaustive Generation Engines
//!
//! ## Layer 2 (Engines) Role
//!
//! valuegen_engines builds on valuegen_core and provides:
//! - The `Provider` trait: one generation surface for both engines (`provider`)
//! - `RandomProvider`: seeded, scale-parameterised pseudorandom generation (`random`)
//! - `ExhaustiveProvider`: complete enumeration in complexity order (`exhaustive`)
//! - `ProviderConfig` and the precondition floors (`config`)
//! - Error types: `GenerationError`, `ConfigError` (`error`)
//! - Sequence adapters such as `require_present` (`iter`)
//!
//! ## Dependencies
//!
//! - valuegen_core: bit source and value types
//! - num-bigint / num-traits: arbitrary-precision integers
//! - rand: entropy for unseeded providers
//! - thiserror: error derivation
//! - tracing: structured debug/trace events
//!
//! ## Usage Examples
//!
//! ```rust
//! use valuegen_engines::{ExhaustiveProvider, Provider, RandomProvider};
//!
//! fn smallest_positive<P: Provider>(provider: &P) -> i64 {
//!     provider.positives::<i64>().take(100).min().unwrap()
//! }
//!
//! assert_eq!(smallest_positive(&ExhaustiveProvider::new()), 1);
//! assert!(smallest_positive(&RandomProvider::example()) >= 1);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `ProviderConfig`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod error;
pub mod exhaustive;
pub mod iter;
pub mod provider;
pub mod random;

pub use config::{ProviderConfig, ProviderConfigBuilder};
pub use error::{ConfigError, GenerationError, GenerationResult};
pub use exhaustive::ExhaustiveProvider;
pub use provider::{Integral, Provider, Ranged, Values};
pub use random::{RandomProvider, Snapshot};
