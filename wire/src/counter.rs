//! Packed counter: dynamic field lengths in one word.
//!
//! The word is read as a big-endian 256-bit integer. The total occupies the
//! low 56 bits and slot `i` starts at bit `56 + 40 * i`, so the last bytes of
//! the word hold the total and slot 4 ends at the first byte:
//!
//! ```text
//! | len 4 (5) | len 3 (5) | len 2 (5) | len 1 (5) | len 0 (5) | total (7 bytes) |
//! ```

use alloy_primitives::U256;

use crate::error::{LengthKind, WireError, WireResult};

/// Width of the accumulator in bits.
pub const ACC_BITS: usize = 7 * 8;

/// Width of one length slot in bits.
pub const VAL_BITS: usize = 5 * 8;

/// Maximum number of dynamic fields a counter can describe.
pub const MAX_DYNAMIC_FIELDS: usize = 5;

/// Largest length that fits one slot.
pub const MAX_FIELD_LENGTH: u64 = (1 << VAL_BITS) - 1;

/// Largest total that fits the accumulator.
pub const MAX_TOTAL_LENGTH: u64 = (1 << ACC_BITS) - 1;

const ACC_BYTES: usize = ACC_BITS / 8;
const VAL_BYTES: usize = VAL_BITS / 8;

const WORD_BYTES: usize = 32;

const fn slot_shift(index: usize) -> usize {
    ACC_BITS + VAL_BITS * index
}

/// Byte lengths of a record's dynamic fields plus their total, in one word.
///
/// The total is derivable from the slots but the store requires it to be
/// present and correct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedCounter([u8; 32]);

impl PackedCounter {
    /// Counter for a record with no dynamic data.
    pub const EMPTY: Self = Self([0; 32]);

    /// Encodes up to five dynamic field lengths.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::LengthOverflow`] if there are more than five
    /// lengths, any length needs more than 40 bits, or the total needs more
    /// than 56 bits.
    pub fn encode(lengths: &[u64]) -> WireResult<Self> {
        if lengths.len() > MAX_DYNAMIC_FIELDS {
            return Err(WireError::LengthOverflow {
                kind: LengthKind::DynamicFieldCount,
                limit: MAX_DYNAMIC_FIELDS as u64,
                actual: lengths.len() as u64,
            });
        }

        let mut total: u64 = 0;
        let mut word = U256::ZERO;
        for (index, &length) in lengths.iter().enumerate() {
            if length > MAX_FIELD_LENGTH {
                return Err(WireError::LengthOverflow {
                    kind: LengthKind::FieldLength { index },
                    limit: MAX_FIELD_LENGTH,
                    actual: length,
                });
            }
            // At most five 40-bit values; cannot overflow u64.
            total += length;
            word |= U256::from(length) << slot_shift(index);
        }

        if total > MAX_TOTAL_LENGTH {
            return Err(WireError::LengthOverflow {
                kind: LengthKind::Accumulator,
                limit: MAX_TOTAL_LENGTH,
                actual: total,
            });
        }
        word |= U256::from(total);

        Ok(Self(word.to_be_bytes::<32>()))
    }

    /// Encodes lengths taken from in-memory buffers.
    ///
    /// # Errors
    ///
    /// Same as [`encode`](Self::encode).
    pub fn from_field_lengths(lengths: &[usize]) -> WireResult<Self> {
        let lengths: Vec<u64> = lengths
            .iter()
            .map(|&len| u64::try_from(len).unwrap_or(u64::MAX))
            .collect();
        Self::encode(&lengths)
    }

    /// Wraps a raw word without validation.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw word.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Consumes the counter and returns the raw word.
    #[must_use]
    pub const fn into_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Returns the accumulator (total dynamic byte length).
    #[must_use]
    pub fn total(&self) -> u64 {
        read_be(&self.0[WORD_BYTES - ACC_BYTES..])
    }

    /// Returns the length stored in slot `index`, or `None` past the last slot.
    #[must_use]
    pub fn field_length(&self, index: usize) -> Option<u64> {
        if index >= MAX_DYNAMIC_FIELDS {
            return None;
        }
        let end = WORD_BYTES - ACC_BYTES - VAL_BYTES * index;
        Some(read_be(&self.0[end - VAL_BYTES..end]))
    }

    /// Returns all five slots.
    #[must_use]
    pub fn field_lengths(&self) -> [u64; MAX_DYNAMIC_FIELDS] {
        let mut out = [0; MAX_DYNAMIC_FIELDS];
        for (index, slot) in out.iter_mut().enumerate() {
            *slot = self.field_length(index).unwrap_or_default();
        }
        out
    }
}

impl From<PackedCounter> for [u8; 32] {
    fn from(counter: PackedCounter) -> Self {
        counter.0
    }
}

fn read_be(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, byte| (acc << 8) | u64::from(*byte))
}
