//! Table-bound calldata from loosely typed values.

use alloy_primitives::Bytes;
use packed::encode_packed;
use schema::{EnumTable, FieldValue, SchemaError, TableDef};
use wire::{FieldLayout, ResourceId};

use crate::abi::{AbiEncoder, SolEncoder};
use crate::builder::TableCallBuilder;
use crate::error::CallResult;
use crate::key::KeyTuple;
use crate::record::RecordParts;

/// A validated table definition with its resource id and a call builder.
#[derive(Debug, Clone)]
pub struct Table<E = SolEncoder> {
    def: TableDef,
    id: ResourceId,
    layout: FieldLayout,
    builder: TableCallBuilder<E>,
}

impl Table {
    /// Validates `def` and binds it to the default encoder.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Schema`](crate::CallError::Schema) if the
    /// definition is invalid.
    pub fn new(def: TableDef) -> CallResult<Self> {
        Self::with_encoder(def, SolEncoder)
    }
}

impl<E: AbiEncoder> Table<E> {
    /// Validates `def` and binds it to `encoder`.
    ///
    /// # Errors
    ///
    /// Returns [`CallError::Schema`](crate::CallError::Schema) if the
    /// definition is invalid.
    pub fn with_encoder(def: TableDef, encoder: E) -> CallResult<Self> {
        def.validate()?;
        let layout = def.field_layout()?;
        let id = def.resource_id();
        if def.truncates_resource_id() {
            tracing::debug!(
                namespace = %def.namespace,
                name = %def.name,
                table = %id,
                "table id truncates namespace or name"
            );
        }
        Ok(Self {
            def,
            id,
            layout,
            builder: TableCallBuilder::with_encoder(encoder),
        })
    }

    #[must_use]
    pub const fn def(&self) -> &TableDef {
        &self.def
    }

    #[must_use]
    pub const fn id(&self) -> &ResourceId {
        &self.id
    }

    #[must_use]
    pub const fn field_layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Packs key values into key words.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not match the key fields.
    pub fn key_tuple(&self, key: &[FieldValue], enums: &EnumTable) -> CallResult<KeyTuple> {
        let packed = self.def.pack_key(key, enums)?;
        Ok(KeyTuple::from_values(&packed)?)
    }

    /// Packs a full record.
    ///
    /// # Errors
    ///
    /// Returns an error if the values do not match the value fields.
    pub fn record(&self, values: &[FieldValue], enums: &EnumTable) -> CallResult<RecordParts> {
        let fields = self.def.pack_values(values, enums)?;
        Ok(RecordParts::encode(
            &fields.static_values,
            &fields.dynamic_values,
        )?)
    }

    /// Builds a `setRecord` call for one record.
    ///
    /// # Errors
    ///
    /// Returns an error if a key or value does not match the definition or
    /// the encoder fails.
    pub fn set_record(
        &self,
        key: &[FieldValue],
        values: &[FieldValue],
        enums: &EnumTable,
    ) -> CallResult<Bytes> {
        let key = self.key_tuple(key, enums)?;
        let record = self.record(values, enums)?;
        self.builder.build_record(&self.id, &key, &record)
    }

    /// Builds a `setStaticField` call for the named static field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is unknown or dynamic, a value does not
    /// match, or the encoder fails.
    pub fn set_static_field(
        &self,
        key: &[FieldValue],
        field: &str,
        value: &FieldValue,
        enums: &EnumTable,
    ) -> CallResult<Bytes> {
        let index = self.def.static_field_index(field)?;
        let data = self.pack_field(field, value, enums)?;
        let key = self.key_tuple(key, enums)?;
        self.builder
            .build_set_static_field(&self.id, &key, index, &data)
    }

    /// Builds a `setDynamicField` call for the named dynamic field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is unknown or static, a value does not
    /// match, or the encoder fails.
    pub fn set_dynamic_field(
        &self,
        key: &[FieldValue],
        field: &str,
        value: &FieldValue,
        enums: &EnumTable,
    ) -> CallResult<Bytes> {
        let index = self.def.dynamic_field_index(field)?;
        let data = self.pack_field(field, value, enums)?;
        let key = self.key_tuple(key, enums)?;
        self.builder
            .build_set_dynamic_field(&self.id, &key, index, &data)
    }

    fn pack_field(&self, field: &str, value: &FieldValue, enums: &EnumTable) -> CallResult<Vec<u8>> {
        let def = self
            .def
            .value_field(field)
            .ok_or_else(|| SchemaError::UnknownField {
                name: field.to_string(),
            })?;
        Ok(encode_packed(&[def.pack(value, enums)?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CallError;
    use alloy_primitives::B256;
    use schema::{FieldDef, FieldKind};

    fn items() -> Table {
        Table::new(
            TableDef::new("app", "Items")
                .key(FieldDef::new("id", FieldKind::U32))
                .value(FieldDef::with_enum("category", FieldKind::U8, "ItemCategory"))
                .value(FieldDef::new("name", FieldKind::String))
                .value(FieldDef::new("weight", FieldKind::U16)),
        )
        .unwrap()
    }

    fn enums() -> EnumTable {
        EnumTable::builder()
            .variants("ItemCategory", ["Equipment", "Healing"])
            .build()
            .unwrap()
    }

    #[test]
    fn set_record_matches_builder() {
        let table = items();
        let out = table
            .set_record(
                &[7u32.into()],
                &["Healing".into(), "Herb".into(), 300u16.into()],
                &enums(),
            )
            .unwrap();

        let record = RecordParts::encode(
            &[packed::PackedValue::U8(1), packed::PackedValue::U16(300)],
            &[packed::PackedValue::string("Herb")],
        )
        .unwrap();
        let expected = TableCallBuilder::new()
            .build_record(table.id(), &[B256::with_last_byte(7)], &record)
            .unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn set_static_field_uses_static_index() {
        let table = items();
        let out = table
            .set_static_field(&[1u32.into()], "weight", &5u16.into(), &enums())
            .unwrap();
        // field index word
        assert_eq!(out[4 + 64 + 31], 1);
    }

    #[test]
    fn set_dynamic_field_rejects_static_name() {
        let table = items();
        let err = table
            .set_dynamic_field(&[1u32.into()], "weight", &5u16.into(), &enums())
            .unwrap_err();
        assert!(matches!(
            err,
            CallError::Schema(SchemaError::WrongFieldClass { .. })
        ));
    }

    #[test]
    fn invalid_definition_rejected() {
        let err = Table::new(
            TableDef::new("app", "Bad").key(FieldDef::new("name", FieldKind::String)),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CallError::Schema(SchemaError::KeyNotStatic { .. })
        ));
    }

    #[test]
    fn accessors() {
        let table = items();
        assert_eq!(table.id(), &ResourceId::table("app", "Items"));
        assert_eq!(table.field_layout().num_dynamic_fields(), 1);
        assert_eq!(table.def().values.len(), 3);
    }
}
