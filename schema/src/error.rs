//! Schema validation and value packing errors.

use std::fmt;

use packed::PackError;
use wire::WireError;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building a table definition or packing values
/// against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A value does not fit its field's declared kind.
    Pack { field: String, source: PackError },

    /// The definition exceeds a store word budget.
    Wire(WireError),

    /// Field name used twice within one table.
    DuplicateField { name: String },

    /// No field with this name.
    UnknownField { name: String },

    /// Key fields must have a static kind.
    KeyNotStatic { field: String },

    /// Array elements must have a static kind.
    NestedDynamic { field: String },

    /// The field is not in the expected class (static or dynamic).
    WrongFieldClass {
        field: String,
        expected: &'static str,
    },

    /// Wrong number of values for the key or the value fields.
    ValueCountMismatch {
        part: &'static str,
        expected: usize,
        actual: usize,
    },

    /// No enum with this name.
    UnknownEnum { name: String },

    /// No variant with this name in the enum.
    UnknownVariant { enum_name: String, variant: String },

    /// Variant name used twice within one enum.
    DuplicateVariant { enum_name: String, variant: String },

    /// Two variants of one enum share a discriminant.
    DuplicateDiscriminant { enum_name: String, value: u8 },

    /// An enum has more variants than a `uint8` can number.
    TooManyVariants { enum_name: String, count: usize },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pack { field, source } => write!(f, "field {field}: {source}"),
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::DuplicateField { name } => write!(f, "duplicate field {name}"),
            Self::UnknownField { name } => write!(f, "unknown field {name}"),
            Self::KeyNotStatic { field } => {
                write!(f, "key field {field} must have a static type")
            }
            Self::NestedDynamic { field } => {
                write!(f, "array field {field} must have static elements")
            }
            Self::WrongFieldClass { field, expected } => {
                write!(f, "field {field} is not a {expected} field")
            }
            Self::ValueCountMismatch {
                part,
                expected,
                actual,
            } => {
                write!(f, "{part} expects {expected} values, got {actual}")
            }
            Self::UnknownEnum { name } => write!(f, "unknown enum {name}"),
            Self::UnknownVariant { enum_name, variant } => {
                write!(f, "unknown variant {variant} of enum {enum_name}")
            }
            Self::DuplicateVariant { enum_name, variant } => {
                write!(f, "enum {enum_name} declares {variant} twice")
            }
            Self::DuplicateDiscriminant { enum_name, value } => {
                write!(f, "enum {enum_name} uses discriminant {value} twice")
            }
            Self::TooManyVariants { enum_name, count } => {
                write!(f, "enum {enum_name} has {count} variants, maximum is 256")
            }
        }
    }
}

impl std::error::Error for SchemaError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pack { source, .. } => Some(source),
            Self::Wire(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WireError> for SchemaError {
    fn from(err: WireError) -> Self {
        Self::Wire(err)
    }
}
