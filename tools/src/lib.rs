//! Command-line calldata generation and inspection for the mudpack table codec.
//!
//! This crate turns JSON batch files into store calldata:
//!
//! - Table definitions and enum names come from the batch file
//! - Records are converted from JSON by their declared field kinds
//! - Output is one lowercase hex line per call
//!
//! # Design Principles
//!
//! - **Definitions are data** - Tables are described in JSON, not code.
//! - **Per-record failures** - A bad record is reported with its table and
//!   position; `--skip-invalid` decides whether the run continues.

use std::collections::BTreeMap;
use std::str::FromStr;

use alloy_primitives::{hex, Bytes};
use anyhow::{bail, Context, Result};
use calldata::{BatchPolicy, CallBatch, CallResult, Table};
use packed::{PackError, PackResult, U256};
use schema::{EnumTable, FieldDef, FieldKind, FieldValue, SchemaError, SchemaResult, TableDef};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A batch file: enum names, table definitions and records to encode.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchFile {
    /// Enum name to variant names, numbered from zero.
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub tables: Vec<TableDef>,
    #[serde(default)]
    pub records: Vec<RecordOp>,
}

/// One store write in a batch file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RecordOp {
    SetRecord {
        table: String,
        #[serde(default)]
        key: Vec<Value>,
        values: Vec<Value>,
    },
    SetStaticField {
        table: String,
        #[serde(default)]
        key: Vec<Value>,
        field: String,
        value: Value,
    },
    SetDynamicField {
        table: String,
        #[serde(default)]
        key: Vec<Value>,
        field: String,
        value: Value,
    },
}

impl RecordOp {
    /// Name of the target table.
    #[must_use]
    pub fn table(&self) -> &str {
        match self {
            Self::SetRecord { table, .. }
            | Self::SetStaticField { table, .. }
            | Self::SetDynamicField { table, .. } => table,
        }
    }

    #[must_use]
    pub fn key(&self) -> &[Value] {
        match self {
            Self::SetRecord { key, .. }
            | Self::SetStaticField { key, .. }
            | Self::SetDynamicField { key, .. } => key,
        }
    }
}

/// Identity and layout of one table, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSummary {
    pub namespace: String,
    pub name: String,
    pub table_id: String,
    pub field_layout: String,
    pub static_fields: usize,
    pub dynamic_fields: usize,
    pub truncated: bool,
}

impl TableSummary {
    #[must_use]
    pub fn new(table: &Table) -> Self {
        let def = table.def();
        let layout = table.field_layout();
        Self {
            namespace: def.namespace.clone(),
            name: def.name.clone(),
            table_id: table.id().to_string(),
            field_layout: hex::encode_prefixed(layout.as_bytes()),
            static_fields: layout.num_static_fields(),
            dynamic_fields: layout.num_dynamic_fields(),
            truncated: def.truncates_resource_id(),
        }
    }
}

/// Builds the enum table of a batch file.
pub fn enum_table(enums: &BTreeMap<String, Vec<String>>) -> Result<EnumTable> {
    enums
        .iter()
        .fold(EnumTable::builder(), |builder, (name, variants)| {
            builder.variants(name, variants.iter().cloned())
        })
        .build()
        .context("build enum table")
}

/// Validates table definitions and indexes them by name.
pub fn bind_tables(defs: &[TableDef]) -> Result<BTreeMap<String, Table>> {
    let mut tables = BTreeMap::new();
    for def in defs {
        let name = def.name.clone();
        let table = Table::new(def.clone()).with_context(|| format!("table {name}"))?;
        if tables.insert(name.clone(), table).is_some() {
            bail!("table {name} defined twice");
        }
    }
    Ok(tables)
}

/// Encodes every record of `file` into a new batch.
pub fn encode_batch(file: &BatchFile, policy: BatchPolicy) -> Result<CallBatch> {
    let mut batch = CallBatch::new(policy);
    encode_into(&mut batch, file)?;
    Ok(batch)
}

/// Encodes every record of `file`, appending to `batch`.
pub fn encode_into(batch: &mut CallBatch, file: &BatchFile) -> Result<()> {
    let enums = enum_table(&file.enums)?;
    let tables = bind_tables(&file.tables)?;

    for (index, op) in file.records.iter().enumerate() {
        let table = tables
            .get(op.table())
            .with_context(|| format!("record {index}: unknown table {}", op.table()))?;
        let result = build_call(table, op, &enums);
        batch
            .try_push(format!("{}#{index}", op.table()), result)
            .with_context(|| format!("record {index} ({})", op.table()))?;
    }
    Ok(())
}

/// Builds the calldata of one record.
pub fn build_call(table: &Table, op: &RecordOp, enums: &EnumTable) -> CallResult<Bytes> {
    let def = table.def();
    let key = field_values(&def.key, op.key(), "key")?;
    match op {
        RecordOp::SetRecord { values, .. } => {
            let values = field_values(&def.values, values, "values")?;
            table.set_record(&key, &values, enums)
        }
        RecordOp::SetStaticField { field, value, .. } => {
            let value = field_value(value_field(def, field)?, value)?;
            table.set_static_field(&key, field, &value, enums)
        }
        RecordOp::SetDynamicField { field, value, .. } => {
            let value = field_value(value_field(def, field)?, value)?;
            table.set_dynamic_field(&key, field, &value, enums)
        }
    }
}

fn value_field<'a>(def: &'a TableDef, name: &str) -> SchemaResult<&'a FieldDef> {
    def.value_field(name).ok_or_else(|| SchemaError::UnknownField {
        name: name.to_string(),
    })
}

fn field_values(defs: &[FieldDef], values: &[Value], part: &'static str) -> SchemaResult<Vec<FieldValue>> {
    if defs.len() != values.len() {
        return Err(SchemaError::ValueCountMismatch {
            part,
            expected: defs.len(),
            actual: values.len(),
        });
    }
    defs.iter()
        .zip(values)
        .map(|(def, value)| field_value(def, value))
        .collect()
}

/// Converts a JSON value by the field's declared kind.
///
/// Integers may be JSON numbers or decimal / `0x` hex strings; `bytes` are
/// hex strings. Fields bound to an enum also accept variant names.
pub fn field_value(def: &FieldDef, value: &Value) -> SchemaResult<FieldValue> {
    json_value(&def.kind, def.enum_name.is_some(), value).map_err(|source| SchemaError::Pack {
        field: def.name.clone(),
        source,
    })
}

fn json_value(kind: &FieldKind, names: bool, value: &Value) -> PackResult<FieldValue> {
    let mismatch = |found| PackError::mismatch(kind.name(), found);
    let integer = kind.is_static() && *kind != FieldKind::Bool;
    match (kind, value) {
        (FieldKind::Bool, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (FieldKind::String, Value::String(s)) => Ok(FieldValue::String(s.clone())),
        (FieldKind::Bytes, Value::String(s)) => hex::decode(s)
            .map(FieldValue::Bytes)
            .map_err(|_| mismatch("malformed hex string")),
        (FieldKind::Array(element), Value::Array(items)) => items
            .iter()
            .map(|item| json_value(element, false, item))
            .collect::<PackResult<Vec<_>>>()
            .map(FieldValue::Array),
        (_, Value::Number(n)) if integer => {
            json_number(n).ok_or_else(|| mismatch("non-integer number"))
        }
        (_, Value::String(s)) if integer => match integer_string(s) {
            Some(v) => Ok(v),
            None if names => Ok(FieldValue::String(s.clone())),
            None => Err(mismatch("malformed integer string")),
        },
        (_, other) => Err(mismatch(json_type(other))),
    }
}

fn json_number(n: &serde_json::Number) -> Option<FieldValue> {
    n.as_u64()
        .map(|v| FieldValue::UInt(v.into()))
        .or_else(|| n.as_i64().map(|v| FieldValue::Int(v.into())))
}

fn integer_string(s: &str) -> Option<FieldValue> {
    let s = s.trim();
    if s.starts_with('-') {
        return s.parse::<i128>().ok().map(FieldValue::Int);
    }
    let word = U256::from_str(s).ok()?;
    Some(u128::try_from(word).map_or(FieldValue::Word(word), FieldValue::UInt))
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
