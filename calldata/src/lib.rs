//! Store calldata builder for the mudpack table codec.
//!
//! Wraps packed record data into calls on the table store's write surface:
//! - `setRecord(bytes32,bytes32[],bytes,bytes32,bytes)`
//! - `setDynamicField(bytes32,bytes32[],uint8,bytes)`
//! - `setStaticField(bytes32,bytes32[],uint8,bytes)`
//!
//! Each call is `selector ++ abi_encode(args)`. ABI encoding goes through the
//! [`AbiEncoder`] trait; [`SolEncoder`] is the default.
//!
//! # Design Principles
//!
//! - **No I/O in builders** - Builders return bytes; only
//!   [`CallBatch::write_hex_lines`] writes, and only to a caller's writer.
//! - **Errors per record** - A failure affects one call; the batch policy
//!   decides whether the run continues.
//! - **Deterministic output** - The same inputs always give the same bytes.
//!
//! # Example
//!
//! ```
//! use calldata::{KeyTuple, RecordParts, TableCallBuilder};
//! use packed::PackedValue;
//! use wire::ResourceId;
//!
//! let table = ResourceId::table("", "MapConfig");
//! let key = KeyTuple::from_values(&[PackedValue::U8(1)]).unwrap();
//! let record = RecordParts::encode(&[PackedValue::U32(42)], &[]).unwrap();
//!
//! let call = TableCallBuilder::new()
//!     .build_record(&table, &key, &record)
//!     .unwrap();
//! assert_eq!((call.len() - 4) % 32, 0);
//! ```

mod abi;
mod batch;
mod builder;
mod error;
mod key;
mod record;
mod table;

pub use abi::{check_alignment, AbiEncoder, IStore, SolEncoder, StoreCall, SELECTOR_BYTES, WORD_BYTES};
pub use batch::{BatchPolicy, CallBatch};
pub use builder::TableCallBuilder;
pub use error::{BuildError, CallError, CallResult};
pub use key::{key_word, KeyTuple};
pub use record::RecordParts;
pub use table::Table;
