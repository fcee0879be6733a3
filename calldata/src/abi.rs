//! Store interface calls and the ABI encoder seam.

use alloy_primitives::{Bytes, B256};
use alloy_sol_types::{sol, SolCall};
use wire::{PackedCounter, ResourceId};

use crate::error::BuildError;

sol! {
    /// Write surface of the table store.
    interface IStore {
        function setRecord(
            bytes32 tableId,
            bytes32[] keyTuple,
            bytes staticData,
            bytes32 encodedLengths,
            bytes dynamicData
        ) external;

        function setDynamicField(
            bytes32 tableId,
            bytes32[] keyTuple,
            uint8 dynamicFieldIndex,
            bytes data
        ) external;

        function setStaticField(
            bytes32 tableId,
            bytes32[] keyTuple,
            uint8 fieldIndex,
            bytes data
        ) external;
    }
}

/// Bytes taken by a function selector.
pub const SELECTOR_BYTES: usize = 4;

/// ABI word size.
pub const WORD_BYTES: usize = 32;

/// One store call with borrowed arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreCall<'a> {
    SetRecord {
        table_id: &'a ResourceId,
        key: &'a [B256],
        static_data: &'a [u8],
        encoded_lengths: &'a PackedCounter,
        dynamic_data: &'a [u8],
    },
    SetDynamicField {
        table_id: &'a ResourceId,
        key: &'a [B256],
        field_index: u8,
        data: &'a [u8],
    },
    SetStaticField {
        table_id: &'a ResourceId,
        key: &'a [B256],
        field_index: u8,
        data: &'a [u8],
    },
}

impl StoreCall<'_> {
    /// Canonical function signature.
    #[must_use]
    pub const fn signature(&self) -> &'static str {
        match self {
            Self::SetRecord { .. } => IStore::setRecordCall::SIGNATURE,
            Self::SetDynamicField { .. } => IStore::setDynamicFieldCall::SIGNATURE,
            Self::SetStaticField { .. } => IStore::setStaticFieldCall::SIGNATURE,
        }
    }

    /// First four bytes of the signature hash.
    #[must_use]
    pub const fn selector(&self) -> [u8; 4] {
        match self {
            Self::SetRecord { .. } => IStore::setRecordCall::SELECTOR,
            Self::SetDynamicField { .. } => IStore::setDynamicFieldCall::SELECTOR,
            Self::SetStaticField { .. } => IStore::setStaticFieldCall::SELECTOR,
        }
    }

    /// Target table.
    #[must_use]
    pub const fn table_id(&self) -> &ResourceId {
        match self {
            Self::SetRecord { table_id, .. }
            | Self::SetDynamicField { table_id, .. }
            | Self::SetStaticField { table_id, .. } => table_id,
        }
    }
}

/// Turns a store call into `selector ++ abi_encode(args)`.
pub trait AbiEncoder {
    /// Encodes one call.
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] if the call cannot be encoded.
    fn encode_call(&self, call: &StoreCall<'_>) -> Result<Bytes, BuildError>;
}

impl<E: AbiEncoder + ?Sized> AbiEncoder for &E {
    fn encode_call(&self, call: &StoreCall<'_>) -> Result<Bytes, BuildError> {
        (**self).encode_call(call)
    }
}

/// Default encoder backed by `alloy-sol-types`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolEncoder;

impl AbiEncoder for SolEncoder {
    fn encode_call(&self, call: &StoreCall<'_>) -> Result<Bytes, BuildError> {
        let encoded = match *call {
            StoreCall::SetRecord {
                table_id,
                key,
                static_data,
                encoded_lengths,
                dynamic_data,
            } => IStore::setRecordCall {
                tableId: B256::from(*table_id.as_bytes()),
                keyTuple: key.to_vec(),
                staticData: Bytes::copy_from_slice(static_data),
                encodedLengths: B256::from(*encoded_lengths.as_bytes()),
                dynamicData: Bytes::copy_from_slice(dynamic_data),
            }
            .abi_encode(),
            StoreCall::SetDynamicField {
                table_id,
                key,
                field_index,
                data,
            } => IStore::setDynamicFieldCall {
                tableId: B256::from(*table_id.as_bytes()),
                keyTuple: key.to_vec(),
                dynamicFieldIndex: field_index,
                data: Bytes::copy_from_slice(data),
            }
            .abi_encode(),
            StoreCall::SetStaticField {
                table_id,
                key,
                field_index,
                data,
            } => IStore::setStaticFieldCall {
                tableId: B256::from(*table_id.as_bytes()),
                keyTuple: key.to_vec(),
                fieldIndex: field_index,
                data: Bytes::copy_from_slice(data),
            }
            .abi_encode(),
        };
        check_alignment(call.signature(), &encoded)?;
        Ok(Bytes::from(encoded))
    }
}

/// Checks that `calldata` is a selector followed by whole words.
///
/// # Errors
///
/// Returns [`BuildError::Misaligned`] otherwise.
pub fn check_alignment(signature: &'static str, calldata: &[u8]) -> Result<(), BuildError> {
    let len = calldata.len();
    if len < SELECTOR_BYTES || (len - SELECTOR_BYTES) % WORD_BYTES != 0 {
        return Err(BuildError::Misaligned { signature, len });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::keccak256;

    fn selector_of(signature: &str) -> [u8; 4] {
        let hash = keccak256(signature.as_bytes());
        [hash[0], hash[1], hash[2], hash[3]]
    }

    #[test]
    fn signatures_are_canonical() {
        assert_eq!(
            IStore::setRecordCall::SIGNATURE,
            "setRecord(bytes32,bytes32[],bytes,bytes32,bytes)"
        );
        assert_eq!(
            IStore::setDynamicFieldCall::SIGNATURE,
            "setDynamicField(bytes32,bytes32[],uint8,bytes)"
        );
        assert_eq!(
            IStore::setStaticFieldCall::SIGNATURE,
            "setStaticField(bytes32,bytes32[],uint8,bytes)"
        );
    }

    #[test]
    fn selectors_hash_signatures() {
        let id = ResourceId::table("", "T");
        let calls = [
            StoreCall::SetRecord {
                table_id: &id,
                key: &[],
                static_data: &[],
                encoded_lengths: &PackedCounter::EMPTY,
                dynamic_data: &[],
            },
            StoreCall::SetDynamicField {
                table_id: &id,
                key: &[],
                field_index: 0,
                data: &[],
            },
            StoreCall::SetStaticField {
                table_id: &id,
                key: &[],
                field_index: 0,
                data: &[],
            },
        ];
        for call in calls {
            assert_eq!(call.selector(), selector_of(call.signature()));
            let encoded = SolEncoder.encode_call(&call).unwrap();
            assert_eq!(encoded[..4], call.selector());
            assert_eq!(call.table_id(), &id);
        }
    }

    #[test]
    fn set_static_field_layout() {
        let id = ResourceId::table("", "MapConfig");
        let key = [B256::with_last_byte(7)];
        let call = StoreCall::SetStaticField {
            table_id: &id,
            key: &key,
            field_index: 2,
            data: &[0xab, 0xcd],
        };
        let out = SolEncoder.encode_call(&call).unwrap();
        let args = &out[4..];

        // head: table id, key offset, field index, data offset
        assert_eq!(args[..32], id.as_bytes()[..]);
        assert_eq!(args[32 + 31], 0x80);
        assert_eq!(args[64 + 31], 2);
        assert_eq!(args[96 + 31], 0xc0);
        // key tail: length then word
        assert_eq!(args[128 + 31], 1);
        assert_eq!(args[160..192], key[0][..]);
        // data tail: length then right-padded bytes
        assert_eq!(args[192 + 31], 2);
        assert_eq!(args[224..226], [0xab, 0xcd]);
        assert!(args[226..256].iter().all(|b| *b == 0));
        assert_eq!(args.len(), 256);
    }

    #[test]
    fn alignment_check() {
        assert!(check_alignment("f()", &[0; 4]).is_ok());
        assert!(check_alignment("f()", &[0; 36]).is_ok());
        assert_eq!(
            check_alignment("f()", &[0; 35]),
            Err(BuildError::Misaligned {
                signature: "f()",
                len: 35
            })
        );
        assert!(check_alignment("f()", &[0; 3]).is_err());
    }
}
