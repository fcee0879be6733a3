//! Error types for packed encoding.

use std::fmt;

/// Result type for packed encoding operations.
pub type PackResult<T> = Result<T, PackError>;

/// Errors that can occur while turning declared values into packed values.
///
/// Encoding a [`PackedValue`](crate::PackedValue) never fails: its variant
/// fixes the width. Errors only arise where a width is declared separately
/// from the value, because the packed format cannot detect truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackError {
    /// The value does not fit the declared type.
    UnsupportedType {
        /// Name of the declared type (e.g. `"uint8"`).
        declared: &'static str,
        /// Why the value was rejected.
        reason: TypeReason,
    },
}

/// Details for [`PackError::UnsupportedType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeReason {
    /// Unsigned magnitude exceeds the declared width.
    UnsignedOutOfRange { value: u128 },
    /// Signed magnitude exceeds the declared width, or is negative for an
    /// unsigned type.
    SignedOutOfRange { value: i128 },
    /// The value's runtime type is not the declared one.
    Mismatch { found: &'static str },
}

impl PackError {
    pub(crate) const fn unsigned(declared: &'static str, value: u128) -> Self {
        Self::UnsupportedType {
            declared,
            reason: TypeReason::UnsignedOutOfRange { value },
        }
    }

    pub(crate) const fn signed(declared: &'static str, value: i128) -> Self {
        Self::UnsupportedType {
            declared,
            reason: TypeReason::SignedOutOfRange { value },
        }
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub const fn mismatch(declared: &'static str, found: &'static str) -> Self {
        Self::UnsupportedType {
            declared,
            reason: TypeReason::Mismatch { found },
        }
    }
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType { declared, reason } => {
                write!(f, "unsupported value for {declared}: {reason}")
            }
        }
    }
}

impl fmt::Display for TypeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsignedOutOfRange { value } => {
                write!(f, "value {value} out of range")
            }
            Self::SignedOutOfRange { value } => {
                write!(f, "value {value} out of range")
            }
            Self::Mismatch { found } => write!(f, "found {found}"),
        }
    }
}

impl std::error::Error for PackError {}
