//! Table identifiers and length words for the mudpack table codec.
//!
//! This crate builds the fixed 32-byte words the table store reads alongside
//! record data:
//!
//! - [`ResourceId`] - `tag ++ namespace ++ name`, truncated and zero-padded.
//! - [`PackedCounter`] - dynamic field lengths plus their total.
//! - [`FieldLayout`] - static field widths and field counts.
//!
//! # Design Principles
//!
//! - **Golden layouts** - Every word has a fixed byte layout covered by golden
//!   tests; nothing in the format is self-describing.
//! - **Checked budgets** - Slot overflows are errors, never silent wraparound.
//! - **No domain knowledge** - This crate knows nothing about field values.

mod counter;
mod error;
mod layout;
mod resource;

pub use counter::{
    PackedCounter, ACC_BITS, MAX_DYNAMIC_FIELDS, MAX_FIELD_LENGTH, MAX_TOTAL_LENGTH, VAL_BITS,
};
pub use error::{LengthKind, NameSlot, WireError, WireResult};
pub use layout::{FieldLayout, MAX_STATIC_FIELDS, MAX_STATIC_WIDTH, MAX_TOTAL_FIELDS};
pub use resource::{
    ResourceId, NAMESPACE_BYTES, NAME_BYTES, RESOURCE_NAMESPACE, RESOURCE_OFFCHAIN_TABLE,
    RESOURCE_TABLE, TYPE_BYTES,
};
