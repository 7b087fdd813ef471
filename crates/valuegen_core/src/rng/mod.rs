//! # Bit Source Infrastructure
//!
//! This module provides the deterministic bit source that every random
//! generator in the engine layer draws from.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: identical seed and call sequence give identical words, forever
//! - **Fixed state size**: seeds are exactly [`SEED_SIZE`] 32-bit words; anything else is rejected
//! - **Cheap forking**: the generator is a plain value, so `Clone` is an independent fork
//! - **Ecosystem**: [`IsaacRng`] implements `rand::RngCore`
//!
//! ## Module Structure
//!
//! - [`isaac`]: ISAAC-32 generator
//! - [`seed`]: the fixed [`EXAMPLE_SEED`]
//!
//! ## Usage Example
//!
//! ```rust
//! use valuegen_core::rng::{IsaacRng, EXAMPLE_SEED, SEED_SIZE};
//!
//! let mut a = IsaacRng::new(&EXAMPLE_SEED).unwrap();
//! let mut b = a.clone();
//! assert_eq!(a.next_word(), b.next_word());
//!
//! assert!(IsaacRng::new(&[1, 2, 3]).is_err());
//! assert_eq!(EXAMPLE_SEED.len(), SEED_SIZE);
//! ```

pub mod isaac;
pub mod seed;

pub use isaac::{IsaacRng, SEED_SIZE};
pub use seed::EXAMPLE_SEED;
