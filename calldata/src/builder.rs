//! Calldata builder for the three store writes.

use alloy_primitives::{Bytes, B256};
use wire::{PackedCounter, ResourceId};

use crate::abi::{AbiEncoder, SolEncoder, StoreCall};
use crate::error::{CallError, CallResult};
use crate::record::RecordParts;

/// Builds `selector ++ abi_encode(args)` for store writes.
///
/// Stateless apart from its encoder; one builder can serve every table.
#[derive(Debug, Clone, Default)]
pub struct TableCallBuilder<E = SolEncoder> {
    encoder: E,
}

impl TableCallBuilder {
    /// Creates a builder with the default encoder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            encoder: SolEncoder,
        }
    }
}

impl<E: AbiEncoder> TableCallBuilder<E> {
    /// Creates a builder with a custom encoder.
    #[must_use]
    pub const fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    #[must_use]
    pub const fn encoder(&self) -> &E {
        &self.encoder
    }

    /// Builds a `setRecord` call.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Build`] if the encoder fails.
    pub fn build_set_record(
        &self,
        table_id: &ResourceId,
        key: &[B256],
        static_data: &[u8],
        encoded_lengths: &PackedCounter,
        dynamic_data: &[u8],
    ) -> CallResult<Bytes> {
        self.encode(&StoreCall::SetRecord {
            table_id,
            key,
            static_data,
            encoded_lengths,
            dynamic_data,
        })
    }

    /// Builds a `setRecord` call from packed record parts.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Build`] if the encoder fails.
    pub fn build_record(
        &self,
        table_id: &ResourceId,
        key: &[B256],
        record: &RecordParts,
    ) -> CallResult<Bytes> {
        self.build_set_record(
            table_id,
            key,
            &record.static_data,
            &record.encoded_lengths,
            &record.dynamic_data,
        )
    }

    /// Builds a `setDynamicField` call.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Build`] if the encoder fails.
    pub fn build_set_dynamic_field(
        &self,
        table_id: &ResourceId,
        key: &[B256],
        field_index: u8,
        data: &[u8],
    ) -> CallResult<Bytes> {
        self.encode(&StoreCall::SetDynamicField {
            table_id,
            key,
            field_index,
            data,
        })
    }

    /// Builds a `setStaticField` call.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Build`] if the encoder fails.
    pub fn build_set_static_field(
        &self,
        table_id: &ResourceId,
        key: &[B256],
        field_index: u8,
        data: &[u8],
    ) -> CallResult<Bytes> {
        self.encode(&StoreCall::SetStaticField {
            table_id,
            key,
            field_index,
            data,
        })
    }

    fn encode(&self, call: &StoreCall<'_>) -> CallResult<Bytes> {
        self.encoder.encode_call(call).map_err(|err| {
            tracing::error!(
                table = %call.table_id(),
                signature = call.signature(),
                error = %err,
                "cannot build call data"
            );
            CallError::Build(err)
        })
    }
}
