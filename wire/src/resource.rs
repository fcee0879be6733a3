//! Resource identifiers for tables and namespaces.

use std::fmt;

use alloy_primitives::hex;

use crate::error::{NameSlot, WireError, WireResult};

/// Resource tag for on-chain tables.
pub const RESOURCE_TABLE: [u8; 2] = *b"tb";

/// Resource tag for offchain tables.
pub const RESOURCE_OFFCHAIN_TABLE: [u8; 2] = *b"ot";

/// Resource tag for namespaces.
pub const RESOURCE_NAMESPACE: [u8; 2] = *b"ns";

/// Width of the tag slot in bytes.
pub const TYPE_BYTES: usize = 2;

/// Width of the namespace slot in bytes.
pub const NAMESPACE_BYTES: usize = 14;

/// Width of the name slot in bytes.
pub const NAME_BYTES: usize = 16;

const NAMESPACE_START: usize = TYPE_BYTES;
const NAME_START: usize = TYPE_BYTES + NAMESPACE_BYTES;

/// A 32-byte resource identifier: `tag(2) ++ namespace(14) ++ name(16)`.
///
/// Namespace and name are left-aligned and zero-padded. Inputs longer than
/// their slot are truncated, so two names that differ only past the slot
/// boundary map to the same identifier. Use [`try_new`](Self::try_new) to
/// reject such inputs instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ResourceId([u8; 32]);

impl ResourceId {
    /// Builds an identifier, truncating oversized namespace or name.
    #[must_use]
    pub fn new(tag: [u8; 2], namespace: &str, name: &str) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..TYPE_BYTES].copy_from_slice(&tag);
        copy_truncated(&mut bytes[NAMESPACE_START..NAME_START], namespace.as_bytes());
        copy_truncated(&mut bytes[NAME_START..], name.as_bytes());
        Self(bytes)
    }

    /// Builds an identifier, rejecting oversized namespace or name.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::NameTooLong`] if either input exceeds its slot.
    pub fn try_new(tag: [u8; 2], namespace: &str, name: &str) -> WireResult<Self> {
        if namespace.len() > NAMESPACE_BYTES {
            return Err(WireError::NameTooLong {
                slot: NameSlot::Namespace,
                limit: NAMESPACE_BYTES,
                actual: namespace.len(),
            });
        }
        if name.len() > NAME_BYTES {
            return Err(WireError::NameTooLong {
                slot: NameSlot::Name,
                limit: NAME_BYTES,
                actual: name.len(),
            });
        }
        Ok(Self::new(tag, namespace, name))
    }

    /// Identifier of an on-chain table.
    #[must_use]
    pub fn table(namespace: &str, name: &str) -> Self {
        Self::new(RESOURCE_TABLE, namespace, name)
    }

    /// Identifier of an offchain table.
    #[must_use]
    pub fn offchain_table(namespace: &str, name: &str) -> Self {
        Self::new(RESOURCE_OFFCHAIN_TABLE, namespace, name)
    }

    /// Identifier of a namespace (empty name slot).
    #[must_use]
    pub fn for_namespace(namespace: &str) -> Self {
        Self::new(RESOURCE_NAMESPACE, namespace, "")
    }

    /// Returns `true` if [`new`](Self::new) would drop bytes of either input.
    #[must_use]
    pub const fn truncates(namespace: &str, name: &str) -> bool {
        namespace.len() > NAMESPACE_BYTES || name.len() > NAME_BYTES
    }

    /// Wraps a raw identifier.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Consumes the identifier and returns the raw bytes.
    #[must_use]
    pub const fn into_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Returns the resource tag.
    #[must_use]
    pub const fn tag(&self) -> [u8; 2] {
        [self.0[0], self.0[1]]
    }

    /// Returns the namespace slot with trailing zero padding removed.
    #[must_use]
    pub fn namespace(&self) -> &[u8] {
        trim_padding(&self.0[NAMESPACE_START..NAME_START])
    }

    /// Returns the name slot with trailing zero padding removed.
    #[must_use]
    pub fn name(&self) -> &[u8] {
        trim_padding(&self.0[NAME_START..])
    }
}

impl From<ResourceId> for [u8; 32] {
    fn from(id: ResourceId) -> Self {
        id.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

fn copy_truncated(slot: &mut [u8], src: &[u8]) {
    let len = src.len().min(slot.len());
    slot[..len].copy_from_slice(&src[..len]);
}

fn trim_padding(slot: &[u8]) -> &[u8] {
    let end = slot.iter().rposition(|b| *b != 0).map_or(0, |pos| pos + 1);
    &slot[..end]
}
