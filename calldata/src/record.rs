//! Record arguments of `setRecord`.

use packed::{encode_packed, PackedValue, PackedWriter};
use wire::{PackedCounter, WireResult};

/// Static bytes, dynamic field lengths and dynamic bytes of one record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordParts {
    pub static_data: Vec<u8>,
    pub encoded_lengths: PackedCounter,
    pub dynamic_data: Vec<u8>,
}

impl RecordParts {
    /// Packs static and dynamic values in field order.
    ///
    /// # Errors
    ///
    /// Returns a [`WireError`](wire::WireError) if there are more than five
    /// dynamic values or a length does not fit its counter slot.
    pub fn encode(static_values: &[PackedValue], dynamic_values: &[PackedValue]) -> WireResult<Self> {
        let lengths: Vec<usize> = dynamic_values.iter().map(PackedValue::encoded_len).collect();
        let encoded_lengths = PackedCounter::from_field_lengths(&lengths)?;

        let mut dynamic = PackedWriter::with_capacity(lengths.iter().sum());
        dynamic.write_values(dynamic_values);

        Ok(Self {
            static_data: encode_packed(static_values),
            encoded_lengths,
            dynamic_data: dynamic.finish(),
        })
    }
}
