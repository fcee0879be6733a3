//! Field kinds, loosely typed field values and field definitions.

use packed::{PackError, PackResult, PackedValue, ScalarKind, U256};

use crate::enums::EnumTable;
use crate::error::{SchemaError, SchemaResult};

/// The declared type of a table field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldKind {
    #[cfg_attr(feature = "serde", serde(rename = "uint8"))]
    U8,
    #[cfg_attr(feature = "serde", serde(rename = "uint16"))]
    U16,
    #[cfg_attr(feature = "serde", serde(rename = "uint32"))]
    U32,
    #[cfg_attr(feature = "serde", serde(rename = "uint64"))]
    U64,
    #[cfg_attr(feature = "serde", serde(rename = "int8"))]
    I8,
    #[cfg_attr(feature = "serde", serde(rename = "int16"))]
    I16,
    #[cfg_attr(feature = "serde", serde(rename = "int32"))]
    I32,
    #[cfg_attr(feature = "serde", serde(rename = "int64"))]
    I64,
    #[cfg_attr(feature = "serde", serde(rename = "bool"))]
    Bool,
    #[cfg_attr(feature = "serde", serde(rename = "uint256"))]
    U256,
    #[cfg_attr(feature = "serde", serde(rename = "bytes"))]
    Bytes,
    #[cfg_attr(feature = "serde", serde(rename = "string"))]
    String,
    #[cfg_attr(feature = "serde", serde(rename = "array"))]
    Array(Box<FieldKind>),
}

impl FieldKind {
    /// Creates an array kind.
    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Returns the scalar kind, or `None` for bytes, strings and arrays.
    #[must_use]
    pub const fn scalar(&self) -> Option<ScalarKind> {
        match self {
            Self::U8 => Some(ScalarKind::U8),
            Self::U16 => Some(ScalarKind::U16),
            Self::U32 => Some(ScalarKind::U32),
            Self::U64 => Some(ScalarKind::U64),
            Self::I8 => Some(ScalarKind::I8),
            Self::I16 => Some(ScalarKind::I16),
            Self::I32 => Some(ScalarKind::I32),
            Self::I64 => Some(ScalarKind::I64),
            Self::Bool => Some(ScalarKind::Bool),
            Self::U256 => Some(ScalarKind::U256),
            Self::Bytes | Self::String | Self::Array(_) => None,
        }
    }

    /// Returns `true` for fixed-width kinds.
    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.scalar().is_some()
    }

    /// Encoded width of a static kind.
    #[must_use]
    pub fn static_width(&self) -> Option<usize> {
        self.scalar().map(ScalarKind::byte_width)
    }

    /// Solidity-style type name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self.scalar() {
            Some(kind) => kind.name(),
            None => match self {
                Self::Bytes => "bytes",
                Self::String => "string",
                _ => "array",
            },
        }
    }

    /// Converts a loosely typed value into a packed value of this kind.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::UnsupportedType`] if the value's type does not
    /// match or its magnitude does not fit.
    pub fn pack(&self, value: &FieldValue) -> PackResult<PackedValue> {
        if let Some(scalar) = self.scalar() {
            return match value {
                FieldValue::UInt(v) => scalar.from_unsigned(*v),
                FieldValue::Int(v) => scalar.from_signed(*v),
                FieldValue::Bool(v) if scalar == ScalarKind::Bool => Ok(PackedValue::Bool(*v)),
                FieldValue::Word(v) if scalar == ScalarKind::U256 => Ok(PackedValue::U256(*v)),
                other => Err(PackError::mismatch(self.name(), other.type_name())),
            };
        }

        match (self, value) {
            (Self::Bytes, FieldValue::Bytes(bytes)) => Ok(PackedValue::Bytes(bytes.clone())),
            (Self::String, FieldValue::String(s)) => Ok(PackedValue::string(s)),
            (Self::Array(element), FieldValue::Array(items)) => items
                .iter()
                .map(|item| element.pack(item))
                .collect::<PackResult<Vec<_>>>()
                .map(PackedValue::Array),
            (_, other) => Err(PackError::mismatch(self.name(), other.type_name())),
        }
    }
}

/// A field value as produced by upstream ingestion, before its width is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    UInt(u128),
    Int(i128),
    Bool(bool),
    /// Full 256-bit word.
    Word(U256),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<FieldValue>),
}

impl FieldValue {
    /// Creates an array value.
    pub fn array<T: Into<Self>>(items: impl IntoIterator<Item = T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }

    /// Short type name for diagnostics.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::UInt(_) => "unsigned integer",
            Self::Int(_) => "signed integer",
            Self::Bool(_) => "bool",
            Self::Word(_) => "uint256",
            Self::Bytes(_) => "bytes",
            Self::String(_) => "string",
            Self::Array(_) => "array",
        }
    }
}

macro_rules! impl_from_int {
    ($variant:ident: $($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(value: $ty) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_from_int!(UInt: u8, u16, u32, u64, u128);
impl_from_int!(Int: i8, i16, i32, i64, i128);

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<U256> for FieldValue {
    fn from(value: U256) -> Self {
        Self::Word(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for FieldValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// A named field within a table.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDef {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: FieldKind,
    /// Enum whose variant names may stand in for this field's integer values.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "enum", default, skip_serializing_if = "Option::is_none")
    )]
    pub enum_name: Option<String>,
}

impl FieldDef {
    /// Creates a field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            enum_name: None,
        }
    }

    /// Creates a field whose string values are resolved through `enum_name`.
    #[must_use]
    pub fn with_enum(name: impl Into<String>, kind: FieldKind, enum_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            enum_name: Some(enum_name.into()),
        }
    }

    /// Packs a value for this field, resolving enum variant names first.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Pack`] if the value does not fit the field's
    /// kind, or an enum lookup error for an unknown variant name.
    pub fn pack(&self, value: &FieldValue, enums: &EnumTable) -> SchemaResult<PackedValue> {
        let resolved;
        let value = match (&self.enum_name, value) {
            (Some(enum_name), FieldValue::String(variant)) => {
                resolved = FieldValue::UInt(enums.resolve(enum_name, variant)?.into());
                &resolved
            }
            _ => value,
        };
        self.kind.pack(value).map_err(|source| SchemaError::Pack {
            field: self.name.clone(),
            source,
        })
    }
}
