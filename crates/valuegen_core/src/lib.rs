//! # valuegen_core: Value Types and Bit Source for Generation Engines
//!
//! ## Layer 1 (Foundation) Role
//!
//! valuegen_core is the bottom layer of the workspace and provides:
//! - The ISAAC-32 bit source with fixed-size seeds (`rng`)
//! - `BinaryFraction`, the canonical dyadic rational (`types::binary_fraction`)
//! - `BigDecimal`, an unscaled-integer decimal with canonicalisation (`types::decimal`)
//! - IEEE-754 edge-case helpers and big-integer utilities (`math`)
//! - Error types: `SeedError`, `ParseError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other valuegen_* crates:
//! - num-bigint: Arbitrary-precision integers
//! - num-traits: Numeric traits (`Zero`, `One`, `Signed`, `ToPrimitive`)
//! - rand: `RngCore` integration for the bit source
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use valuegen_core::rng::{IsaacRng, EXAMPLE_SEED};
//! use valuegen_core::types::BinaryFraction;
//!
//! let mut rng = IsaacRng::new(&EXAMPLE_SEED).unwrap();
//! let _word = rng.next_word();
//!
//! let x: BinaryFraction = "3 >> 2".parse().unwrap();
//! assert_eq!(x.to_string(), "3 >> 2");
//! assert_eq!(BinaryFraction::from_float(0.75_f64), Some(x));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `BinaryFraction` and `BigDecimal`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod rng;
pub mod types;
