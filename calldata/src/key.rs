//! Key tuples: one ABI word per key field.

use std::ops::Deref;

use alloy_primitives::B256;
use packed::{PackError, PackResult, PackedValue};

/// Declared type name used in key word errors.
const KEY_WORD: &str = "bytes32";

/// Key words of one record, in key field order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct KeyTuple(Vec<B256>);

impl KeyTuple {
    /// Creates an empty key tuple (singleton tables).
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds key words from packed scalars.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnsupportedType`] for arrays and for byte strings
    /// longer than one word.
    pub fn from_values(values: &[PackedValue]) -> PackResult<Self> {
        values.iter().map(key_word).collect::<PackResult<Vec<_>>>().map(Self)
    }

    /// Appends a word.
    pub fn push(&mut self, word: B256) {
        self.0.push(word);
    }

    /// Returns the words.
    #[must_use]
    pub fn as_slice(&self) -> &[B256] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<B256> {
        self.0
    }
}

impl Deref for KeyTuple {
    type Target = [B256];

    fn deref(&self) -> &[B256] {
        &self.0
    }
}

impl From<Vec<B256>> for KeyTuple {
    fn from(words: Vec<B256>) -> Self {
        Self(words)
    }
}

impl FromIterator<B256> for KeyTuple {
    fn from_iter<I: IntoIterator<Item = B256>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Encodes one packed scalar as an ABI word.
///
/// Unsigned integers are left zero-padded, signed integers sign-extended,
/// booleans are 0 or 1 and byte strings are right-padded.
///
/// # Errors
///
/// Returns [`PackError::UnsupportedType`] for arrays and for byte strings
/// longer than 32 bytes.
pub fn key_word(value: &PackedValue) -> PackResult<B256> {
    let mut word = [0u8; 32];
    match value {
        PackedValue::U8(v) => word[31] = *v,
        PackedValue::U16(v) => word[30..].copy_from_slice(&v.to_be_bytes()),
        PackedValue::U32(v) => word[28..].copy_from_slice(&v.to_be_bytes()),
        PackedValue::U64(v) => word[24..].copy_from_slice(&v.to_be_bytes()),
        PackedValue::I8(v) => sign_extend(&mut word, i64::from(*v)),
        PackedValue::I16(v) => sign_extend(&mut word, i64::from(*v)),
        PackedValue::I32(v) => sign_extend(&mut word, i64::from(*v)),
        PackedValue::I64(v) => sign_extend(&mut word, *v),
        PackedValue::Bool(v) => word[31] = u8::from(*v),
        PackedValue::U256(v) => word = v.to_be_bytes::<32>(),
        PackedValue::Bytes(bytes) if bytes.len() <= word.len() => {
            word[..bytes.len()].copy_from_slice(bytes);
        }
        PackedValue::Bytes(_) => {
            return Err(PackError::mismatch(KEY_WORD, "bytes longer than 32"));
        }
        PackedValue::Array(_) => return Err(PackError::mismatch(KEY_WORD, "array")),
    }
    Ok(B256::from(word))
}

fn sign_extend(word: &mut [u8; 32], value: i64) {
    if value < 0 {
        word.fill(0xff);
    }
    word[24..].copy_from_slice(&value.to_be_bytes());
}
