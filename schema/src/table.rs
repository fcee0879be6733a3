//! Table definitions and validation.

use std::collections::HashSet;

use packed::PackedValue;
use wire::{FieldLayout, LengthKind, ResourceId, WireError};

use crate::enums::EnumTable;
use crate::error::{SchemaError, SchemaResult};
use crate::field::{FieldDef, FieldKind, FieldValue};

/// A store table: identity, key fields and value fields.
///
/// Value fields keep declaration order. Static value fields are numbered in
/// the order they appear among static fields, and likewise for dynamic ones.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableDef {
    pub namespace: String,
    pub name: String,
    /// Offchain tables use the `ot` resource tag.
    #[cfg_attr(feature = "serde", serde(default))]
    pub offchain: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub key: Vec<FieldDef>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: Vec<FieldDef>,
}

/// Values of one record split by field class, each in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedFields {
    pub static_values: Vec<PackedValue>,
    pub dynamic_values: Vec<PackedValue>,
}

impl TableDef {
    /// Creates a table with no fields.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            offchain: false,
            key: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Marks the table as offchain.
    #[must_use]
    pub fn offchain(mut self) -> Self {
        self.offchain = true;
        self
    }

    /// Adds a key field.
    #[must_use]
    pub fn key(mut self, field: FieldDef) -> Self {
        self.key.push(field);
        self
    }

    /// Adds a value field.
    #[must_use]
    pub fn value(mut self, field: FieldDef) -> Self {
        self.values.push(field);
        self
    }

    /// Validates table invariants.
    ///
    /// # Errors
    ///
    /// Returns an error if a field name repeats, a key field is not static,
    /// an array has dynamic elements, or the value fields do not fit a
    /// [`FieldLayout`].
    pub fn validate(&self) -> SchemaResult<()> {
        let mut names = HashSet::new();
        for field in self.key.iter().chain(&self.values) {
            if !names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
            if let FieldKind::Array(element) = &field.kind {
                if !element.is_static() {
                    return Err(SchemaError::NestedDynamic {
                        field: field.name.clone(),
                    });
                }
            }
        }

        if let Some(field) = self.key.iter().find(|field| !field.kind.is_static()) {
            return Err(SchemaError::KeyNotStatic {
                field: field.name.clone(),
            });
        }

        self.field_layout()?;
        Ok(())
    }

    /// Resource id of this table.
    #[must_use]
    pub fn resource_id(&self) -> ResourceId {
        if self.offchain {
            ResourceId::offchain_table(&self.namespace, &self.name)
        } else {
            ResourceId::table(&self.namespace, &self.name)
        }
    }

    /// Returns `true` if the namespace or name is cut short in the resource id.
    #[must_use]
    pub fn truncates_resource_id(&self) -> bool {
        ResourceId::truncates(&self.namespace, &self.name)
    }

    /// Static value fields in declaration order.
    pub fn static_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.values.iter().filter(|field| field.kind.is_static())
    }

    /// Dynamic value fields in declaration order.
    pub fn dynamic_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.values.iter().filter(|field| !field.kind.is_static())
    }

    /// Field layout word of the value fields.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Wire`] if the field counts exceed the layout
    /// limits.
    pub fn field_layout(&self) -> SchemaResult<FieldLayout> {
        let widths: Vec<usize> = self
            .static_fields()
            .filter_map(|field| field.kind.static_width())
            .collect();
        Ok(FieldLayout::new(&widths, self.dynamic_fields().count())?)
    }

    /// Looks up a value field by name.
    #[must_use]
    pub fn value_field(&self, name: &str) -> Option<&FieldDef> {
        self.values.iter().find(|field| field.name == name)
    }

    /// Position of `name` among the static value fields.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownField`] if no value field has this name,
    /// [`SchemaError::WrongFieldClass`] if it is dynamic, or
    /// [`SchemaError::Wire`] if an unvalidated table puts it past index 255.
    pub fn static_field_index(&self, name: &str) -> SchemaResult<u8> {
        self.class_index(name, true)
    }

    /// Position of `name` among the dynamic value fields.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownField`] if no value field has this name,
    /// [`SchemaError::WrongFieldClass`] if it is static, or
    /// [`SchemaError::Wire`] if an unvalidated table puts it past index 255.
    pub fn dynamic_field_index(&self, name: &str) -> SchemaResult<u8> {
        self.class_index(name, false)
    }

    /// Packs key values in key field order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ValueCountMismatch`] if the number of values is
    /// wrong, or the first packing error.
    pub fn pack_key(&self, key: &[FieldValue], enums: &EnumTable) -> SchemaResult<Vec<PackedValue>> {
        check_count("key", self.key.len(), key.len())?;
        self.key
            .iter()
            .zip(key)
            .map(|(field, value)| field.pack(value, enums))
            .collect()
    }

    /// Packs a full record's values and splits them by field class.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::ValueCountMismatch`] if the number of values is
    /// wrong, or the first packing error.
    pub fn pack_values(&self, values: &[FieldValue], enums: &EnumTable) -> SchemaResult<PackedFields> {
        check_count("values", self.values.len(), values.len())?;
        let mut fields = PackedFields::default();
        for (field, value) in self.values.iter().zip(values) {
            let packed = field.pack(value, enums)?;
            if field.kind.is_static() {
                fields.static_values.push(packed);
            } else {
                fields.dynamic_values.push(packed);
            }
        }
        Ok(fields)
    }

    fn class_index(&self, name: &str, want_static: bool) -> SchemaResult<u8> {
        let field = self
            .value_field(name)
            .ok_or_else(|| SchemaError::UnknownField {
                name: name.to_string(),
            })?;
        if field.kind.is_static() != want_static {
            return Err(SchemaError::WrongFieldClass {
                field: name.to_string(),
                expected: if want_static { "static" } else { "dynamic" },
            });
        }
        let index = self
            .values
            .iter()
            .filter(|f| f.kind.is_static() == want_static)
            .position(|f| f.name == name)
            .unwrap_or_default();
        u8::try_from(index).map_err(|_| {
            SchemaError::Wire(WireError::LengthOverflow {
                kind: if want_static {
                    LengthKind::StaticFieldCount
                } else {
                    LengthKind::DynamicFieldCount
                },
                limit: u64::from(u8::MAX) + 1,
                actual: index as u64 + 1,
            })
        })
    }
}

fn check_count(part: &'static str, expected: usize, actual: usize) -> SchemaResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(SchemaError::ValueCountMismatch {
            part,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use packed::U256;

    fn items() -> TableDef {
        TableDef::new("app", "Items")
            .key(FieldDef::new("id", FieldKind::U256))
            .value(FieldDef::new("tier", FieldKind::U8))
            .value(FieldDef::new("name", FieldKind::String))
            .value(FieldDef::new("price", FieldKind::U32))
            .value(FieldDef::new("tags", FieldKind::array(FieldKind::U16)))
    }

    #[test]
    fn builder_and_validate() {
        let table = items();
        table.validate().unwrap();
        assert_eq!(table.static_fields().count(), 2);
        assert_eq!(table.dynamic_fields().count(), 2);
    }

    #[test]
    fn field_layout_from_values() {
        let layout = items().field_layout().unwrap();
        assert_eq!(layout.static_data_length(), 5);
        assert_eq!(layout.num_static_fields(), 2);
        assert_eq!(layout.num_dynamic_fields(), 2);
        assert_eq!(layout.static_field_width(0), Some(1));
        assert_eq!(layout.static_field_width(1), Some(4));
    }

    #[test]
    fn field_indices_per_class() {
        let table = items();
        assert_eq!(table.static_field_index("tier").unwrap(), 0);
        assert_eq!(table.static_field_index("price").unwrap(), 1);
        assert_eq!(table.dynamic_field_index("name").unwrap(), 0);
        assert_eq!(table.dynamic_field_index("tags").unwrap(), 1);
    }

    #[test]
    fn field_index_errors() {
        let table = items();
        assert!(matches!(
            table.static_field_index("name"),
            Err(SchemaError::WrongFieldClass {
                expected: "static",
                ..
            })
        ));
        assert!(matches!(
            table.dynamic_field_index("missing"),
            Err(SchemaError::UnknownField { .. })
        ));
        // key fields are not value fields
        assert!(table.static_field_index("id").is_err());
    }

    #[test]
    fn field_index_past_u8_is_an_error() {
        let table = (0..300).fold(TableDef::new("", "Wide"), |table, i| {
            table.value(FieldDef::new(format!("f{i}"), FieldKind::U8))
        });
        assert_eq!(table.static_field_index("f255").unwrap(), 255);
        assert_eq!(
            table.static_field_index("f256").unwrap_err(),
            SchemaError::Wire(WireError::LengthOverflow {
                kind: LengthKind::StaticFieldCount,
                limit: 256,
                actual: 257,
            })
        );
    }

    #[test]
    fn resource_id_follows_tag() {
        let onchain = TableDef::new("", "MapConfig");
        assert_eq!(onchain.resource_id(), ResourceId::table("", "MapConfig"));
        let offchain = TableDef::new("", "MapConfig").offchain();
        assert_eq!(offchain.resource_id().tag(), *b"ot");
    }

    #[test]
    fn truncation_flag() {
        assert!(!items().truncates_resource_id());
        assert!(TableDef::new("app", "AVeryLongTableNameIndeed").truncates_resource_id());
    }

    #[test]
    fn rejects_duplicate_names() {
        let table = items().value(FieldDef::new("id", FieldKind::U8));
        assert!(matches!(
            table.validate(),
            Err(SchemaError::DuplicateField { ref name }) if name == "id"
        ));
    }

    #[test]
    fn rejects_dynamic_key() {
        let table = TableDef::new("app", "ByName").key(FieldDef::new("name", FieldKind::String));
        assert!(matches!(
            table.validate(),
            Err(SchemaError::KeyNotStatic { .. })
        ));
    }

    #[test]
    fn rejects_nested_dynamic_array() {
        let table = TableDef::new("app", "Nested")
            .value(FieldDef::new("names", FieldKind::array(FieldKind::String)));
        assert!(matches!(
            table.validate(),
            Err(SchemaError::NestedDynamic { .. })
        ));
    }

    #[test]
    fn rejects_too_many_dynamic_fields() {
        let mut table = TableDef::new("app", "Wide");
        for i in 0..6 {
            table = table.value(FieldDef::new(format!("d{i}"), FieldKind::Bytes));
        }
        assert!(matches!(
            table.validate(),
            Err(SchemaError::Wire(WireError::LengthOverflow {
                kind: LengthKind::DynamicFieldCount,
                ..
            }))
        ));
    }

    #[test]
    fn pack_values_splits_classes() {
        let table = items();
        let fields = table
            .pack_values(
                &[
                    3u8.into(),
                    "Sword".into(),
                    1500u32.into(),
                    FieldValue::array([1u16, 2]),
                ],
                &EnumTable::default(),
            )
            .unwrap();
        assert_eq!(
            fields.static_values,
            vec![PackedValue::U8(3), PackedValue::U32(1500)]
        );
        assert_eq!(
            fields.dynamic_values,
            vec![
                PackedValue::Bytes(b"Sword".to_vec()),
                PackedValue::Array(vec![PackedValue::U16(1), PackedValue::U16(2)]),
            ]
        );
    }

    #[test]
    fn pack_key_checks_count() {
        let table = items();
        let err = table.pack_key(&[], &EnumTable::default()).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ValueCountMismatch {
                part: "key",
                expected: 1,
                actual: 0
            }
        );
        let key = table
            .pack_key(&[U256::from(9u64).into()], &EnumTable::default())
            .unwrap();
        assert_eq!(key, vec![PackedValue::U256(U256::from(9u64))]);
    }

    #[test]
    fn pack_values_reports_field() {
        let table = items();
        let err = table
            .pack_values(
                &[
                    300u32.into(),
                    "Sword".into(),
                    1u32.into(),
                    FieldValue::Array(vec![]),
                ],
                &EnumTable::default(),
            )
            .unwrap_err();
        assert!(matches!(err, SchemaError::Pack { ref field, .. } if field == "tier"));
    }
}
