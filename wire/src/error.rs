//! Error types for store wire words.

use std::fmt;

/// Result type for wire word construction.
pub type WireResult<T> = Result<T, WireError>;

/// Errors that can occur while building store wire words.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WireError {
    /// A length, a summed length or a field count exceeds its bit budget.
    LengthOverflow {
        kind: LengthKind,
        limit: u64,
        actual: u64,
    },

    /// A namespace or table name does not fit its identifier slot.
    ///
    /// Only returned by the strict constructors; the default constructors
    /// truncate.
    NameTooLong {
        slot: NameSlot,
        limit: usize,
        actual: usize,
    },

    /// A static field width is outside `1..=32` bytes.
    InvalidStaticWidth { index: usize, width: usize },
}

/// The budget that a [`WireError::LengthOverflow`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthKind {
    /// One dynamic field's byte length (40-bit slot).
    FieldLength { index: usize },
    /// Sum of all dynamic field lengths (56-bit accumulator).
    Accumulator,
    /// Number of dynamic fields.
    DynamicFieldCount,
    /// Number of static fields.
    StaticFieldCount,
    /// Number of static plus dynamic fields.
    TotalFieldCount,
}

/// Identifier slot that overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameSlot {
    Namespace,
    Name,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthOverflow {
                kind,
                limit,
                actual,
            } => {
                write!(f, "{kind} overflow: {actual} > {limit}")
            }
            Self::NameTooLong {
                slot,
                limit,
                actual,
            } => {
                write!(f, "{slot} too long: {actual} bytes, slot holds {limit}")
            }
            Self::InvalidStaticWidth { index, width } => {
                write!(f, "static field {index} has invalid width {width}")
            }
        }
    }
}

impl fmt::Display for LengthKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldLength { index } => write!(f, "dynamic field {index} length"),
            Self::Accumulator => f.write_str("total dynamic length"),
            Self::DynamicFieldCount => f.write_str("dynamic field count"),
            Self::StaticFieldCount => f.write_str("static field count"),
            Self::TotalFieldCount => f.write_str("total field count"),
        }
    }
}

impl fmt::Display for NameSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace => f.write_str("namespace"),
            Self::Name => f.write_str("name"),
        }
    }
}

impl std::error::Error for WireError {}
