//! Tight packed value encoding for the mudpack table codec.
//!
//! This crate provides [`PackedValue`] and [`encode_packed`], which reproduce
//! Solidity's `abi.encodePacked` layout: fixed-width big-endian integers,
//! one-byte booleans, 32-byte `uint256` words and raw byte strings, all
//! concatenated with no padding, length prefixes or separators.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Widths in the type** - Each [`PackedValue`] variant fixes its width, so
//!   encoding cannot truncate.
//! - **Checked declarations** - Values arriving with a separately declared
//!   width go through [`ScalarKind`], which rejects magnitudes that don't fit.
//! - **No domain knowledge** - This crate knows nothing about tables or keys.
//!
//! # Example
//!
//! ```
//! use packed::{encode_packed, PackedValue};
//!
//! let bytes = encode_packed(&[PackedValue::U16(120), PackedValue::U16(45)]);
//! assert_eq!(bytes, [0x00, 0x78, 0x00, 0x2d]);
//! ```

mod error;
mod value;
mod writer;

pub use alloy_primitives::U256;
pub use error::{PackError, PackResult, TypeReason};
pub use value::{PackedValue, ScalarKind};
pub use writer::{encode_packed, PackedWriter};
