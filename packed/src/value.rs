//! Packed values and their scalar kinds.

use alloy_primitives::U256;

use crate::error::{PackError, PackResult};

/// A value in packed form.
///
/// The variant fixes the encoded width, so encoding is infallible. The format
/// carries no tags, lengths or separators: the reader must know the field
/// order and widths in advance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackedValue {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Bool(bool),
    /// 256-bit unsigned integer, always 32 bytes.
    U256(U256),
    /// Raw bytes (or UTF-8 string bytes), no length prefix.
    Bytes(Vec<u8>),
    /// Elements concatenated in order.
    Array(Vec<PackedValue>),
}

impl PackedValue {
    /// Creates a byte value from a UTF-8 string.
    #[must_use]
    pub fn string(value: &str) -> Self {
        Self::Bytes(value.as_bytes().to_vec())
    }

    /// Creates a 256-bit value from big-endian bytes of any length.
    ///
    /// Inputs longer than 32 bytes are reduced modulo 2^256 (only the low 32
    /// bytes are kept).
    #[must_use]
    pub fn u256_from_be_slice(bytes: &[u8]) -> Self {
        let start = bytes.len().saturating_sub(32);
        Self::U256(U256::from_be_slice(&bytes[start..]))
    }

    /// Returns the exact number of bytes this value encodes to.
    #[must_use]
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::U8(_) | Self::I8(_) | Self::Bool(_) => 1,
            Self::U16(_) | Self::I16(_) => 2,
            Self::U32(_) | Self::I32(_) => 4,
            Self::U64(_) | Self::I64(_) => 8,
            Self::U256(_) => 32,
            Self::Bytes(bytes) => bytes.len(),
            Self::Array(items) => items.iter().map(Self::encoded_len).sum(),
        }
    }

    /// Returns the scalar kind, or `None` for bytes and arrays.
    #[must_use]
    pub const fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::U8(_) => Some(ScalarKind::U8),
            Self::U16(_) => Some(ScalarKind::U16),
            Self::U32(_) => Some(ScalarKind::U32),
            Self::U64(_) => Some(ScalarKind::U64),
            Self::I8(_) => Some(ScalarKind::I8),
            Self::I16(_) => Some(ScalarKind::I16),
            Self::I32(_) => Some(ScalarKind::I32),
            Self::I64(_) => Some(ScalarKind::I64),
            Self::Bool(_) => Some(ScalarKind::Bool),
            Self::U256(_) => Some(ScalarKind::U256),
            Self::Bytes(_) | Self::Array(_) => None,
        }
    }

    /// Returns a short type name for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self.scalar_kind() {
            Some(kind) => kind.name(),
            None => match self {
                Self::Array(_) => "array",
                _ => "bytes",
            },
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for PackedValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    bool => Bool,
    U256 => U256,
    Vec<u8> => Bytes,
}

impl From<&[u8]> for PackedValue {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<&str> for PackedValue {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for PackedValue {
    fn from(value: String) -> Self {
        Self::Bytes(value.into_bytes())
    }
}

impl<T: Into<PackedValue>> FromIterator<T> for PackedValue {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Array(iter.into_iter().map(Into::into).collect())
    }
}

/// Fixed-width scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    Bool,
    U256,
}

impl ScalarKind {
    /// Encoded width in bytes.
    #[must_use]
    pub const fn byte_width(self) -> usize {
        match self {
            Self::U8 | Self::I8 | Self::Bool => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 => 4,
            Self::U64 | Self::I64 => 8,
            Self::U256 => 32,
        }
    }

    /// Solidity-style type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::Bool => "bool",
            Self::U256 => "uint256",
        }
    }

    /// Returns `true` for two's-complement kinds.
    #[must_use]
    pub const fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    /// Builds a value of this kind from an unsigned magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnsupportedType`] if `value` does not fit. `Bool`
    /// accepts only 0 and 1.
    pub fn from_unsigned(self, value: u128) -> PackResult<PackedValue> {
        let err = || PackError::unsigned(self.name(), value);
        match self {
            Self::U8 => u8::try_from(value).map(PackedValue::U8).map_err(|_| err()),
            Self::U16 => u16::try_from(value).map(PackedValue::U16).map_err(|_| err()),
            Self::U32 => u32::try_from(value).map(PackedValue::U32).map_err(|_| err()),
            Self::U64 => u64::try_from(value).map(PackedValue::U64).map_err(|_| err()),
            Self::I8 => i8::try_from(value).map(PackedValue::I8).map_err(|_| err()),
            Self::I16 => i16::try_from(value).map(PackedValue::I16).map_err(|_| err()),
            Self::I32 => i32::try_from(value).map(PackedValue::I32).map_err(|_| err()),
            Self::I64 => i64::try_from(value).map(PackedValue::I64).map_err(|_| err()),
            Self::Bool => match value {
                0 => Ok(PackedValue::Bool(false)),
                1 => Ok(PackedValue::Bool(true)),
                _ => Err(err()),
            },
            Self::U256 => Ok(PackedValue::U256(U256::from(value))),
        }
    }

    /// Builds a value of this kind from a signed magnitude.
    ///
    /// Negative values are rejected for unsigned kinds, including `U256`:
    /// callers must convert them to a 256-bit two's-complement word first.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnsupportedType`] if `value` does not fit.
    pub fn from_signed(self, value: i128) -> PackResult<PackedValue> {
        let err = || PackError::signed(self.name(), value);
        match self {
            Self::I8 => i8::try_from(value).map(PackedValue::I8).map_err(|_| err()),
            Self::I16 => i16::try_from(value).map(PackedValue::I16).map_err(|_| err()),
            Self::I32 => i32::try_from(value).map(PackedValue::I32).map_err(|_| err()),
            Self::I64 => i64::try_from(value).map(PackedValue::I64).map_err(|_| err()),
            _ => {
                let magnitude = u128::try_from(value).map_err(|_| err())?;
                self.from_unsigned(magnitude).map_err(|_| err())
            }
        }
    }
}
