//! Numeric edge-case helpers shared by both engines.
//!
//! - [`ieee`]: IEEE-754 bit access, successor/predecessor, ordinal indexing
//! - [`bigint`]: big-integer utilities (bit lengths, powers of ten, directed division)

pub mod bigint;
pub mod ieee;

pub use ieee::IeeeFloat;
