//! Table definitions, field kinds and enum tables for the mudpack table codec.
//!
//! This crate describes what a store table holds and turns loosely typed
//! record values into [`PackedValue`](packed::PackedValue)s of the declared
//! widths:
//! - [`FieldKind`] / [`FieldDef`] - declared field types
//! - [`TableDef`] - key and value fields, layout and resource id
//! - [`EnumTable`] - enum variant names resolved to `uint8` discriminants
//!
//! # Design Principles
//!
//! - **Declared widths** - Values carry no width of their own; the table
//!   definition decides it and rejects values that do not fit.
//! - **Immutable configuration** - Enum tables are built once and passed by
//!   reference.
//! - **Deterministic order** - Field order is declaration order and map
//!   iteration is sorted.
//!
//! # Example
//!
//! ```
//! use schema::{EnumTable, FieldDef, FieldKind, TableDef};
//!
//! let table = TableDef::new("app", "Items")
//!     .key(FieldDef::new("id", FieldKind::U256))
//!     .value(FieldDef::new("tier", FieldKind::U8))
//!     .value(FieldDef::new("name", FieldKind::String));
//! table.validate().unwrap();
//!
//! let fields = table
//!     .pack_values(&[3u8.into(), "Sword".into()], &EnumTable::default())
//!     .unwrap();
//! assert_eq!(fields.static_values.len(), 1);
//! assert_eq!(fields.dynamic_values.len(), 1);
//! ```

mod enums;
mod error;
mod field;
mod table;

pub use enums::{EnumTable, EnumTableBuilder};
pub use error::{SchemaError, SchemaResult};
pub use field::{FieldDef, FieldKind, FieldValue};
pub use table::{PackedFields, TableDef};
