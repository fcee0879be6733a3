//! Error types for calldata building.

use std::fmt;

use packed::PackError;
use schema::SchemaError;
use wire::WireError;

/// Result type for calldata operations.
pub type CallResult<T> = Result<T, CallError>;

/// Errors that can occur while building one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// A value could not be packed.
    Pack(PackError),
    /// A store word could not be built.
    Wire(WireError),
    /// A value does not match the table definition.
    Schema(SchemaError),
    /// The ABI encoder failed.
    Build(BuildError),
}

/// Failure reported by an [`AbiEncoder`](crate::AbiEncoder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Encoded arguments are not a whole number of 32-byte words.
    Misaligned {
        signature: &'static str,
        len: usize,
    },
    /// The encoder rejected the call.
    Encoder {
        signature: &'static str,
        message: String,
    },
}

impl BuildError {
    /// Signature of the call that failed.
    #[must_use]
    pub const fn signature(&self) -> &'static str {
        match self {
            Self::Misaligned { signature, .. } | Self::Encoder { signature, .. } => signature,
        }
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pack(e) => write!(f, "pack error: {e}"),
            Self::Wire(e) => write!(f, "wire error: {e}"),
            Self::Schema(e) => write!(f, "schema error: {e}"),
            Self::Build(e) => write!(f, "build error: {e}"),
        }
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Misaligned { signature, len } => {
                write!(f, "{signature}: {len} bytes after selector is not word aligned")
            }
            Self::Encoder { signature, message } => write!(f, "{signature}: {message}"),
        }
    }
}

impl std::error::Error for CallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Pack(e) => Some(e),
            Self::Wire(e) => Some(e),
            Self::Schema(e) => Some(e),
            Self::Build(e) => Some(e),
        }
    }
}

impl std::error::Error for BuildError {}

impl From<PackError> for CallError {
    fn from(err: PackError) -> Self {
        Self::Pack(err)
    }
}

impl From<WireError> for CallError {
    fn from(err: WireError) -> Self {
        Self::Wire(err)
    }
}

impl From<SchemaError> for CallError {
    fn from(err: SchemaError) -> Self {
        Self::Schema(err)
    }
}

impl From<BuildError> for CallError {
    fn from(err: BuildError) -> Self {
        Self::Build(err)
    }
}
