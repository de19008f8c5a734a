//! Field metadata and scalar field values.
//!
//! [`FieldType`] names every primitive kind a schema-described record can
//! declare. Only the scalar numeric and string kinds are storable; the rest
//! exist so that an unsupported declaration is reported instead of ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared primitive type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Int32,
    Int64,
    UInt32,
    UInt64,
    Float,
    Double,
    Bool,
    Bytes,
    Enum,
    Message,
}

impl FieldType {
    /// The schema-language spelling of the type (`"int32"`, `"string"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Int32 => "int32",
            FieldType::Int64 => "int64",
            FieldType::UInt32 => "uint32",
            FieldType::UInt64 => "uint64",
            FieldType::Float => "float",
            FieldType::Double => "double",
            FieldType::Bool => "bool",
            FieldType::Bytes => "bytes",
            FieldType::Enum => "enum",
            FieldType::Message => "message",
        }
    }

    /// Whether values of this type can be stored in a table column.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            FieldType::String
                | FieldType::Int32
                | FieldType::Int64
                | FieldType::UInt32
                | FieldType::UInt64
                | FieldType::Float
                | FieldType::Double
        )
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The current value of one scalar field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    Float(f32),
    Double(f64),
}

impl FieldValue {
    /// The field type this value belongs to.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValue::Text(_) => FieldType::String,
            FieldValue::Int32(_) => FieldType::Int32,
            FieldValue::Int64(_) => FieldType::Int64,
            FieldValue::UInt32(_) => FieldType::UInt32,
            FieldValue::UInt64(_) => FieldType::UInt64,
            FieldValue::Float(_) => FieldType::Float,
            FieldValue::Double(_) => FieldType::Double,
        }
    }

    /// The zero value for a scalar field type (empty string, 0, 0.0).
    ///
    /// Returns `None` for non-scalar types.
    pub fn zero(field_type: FieldType) -> Option<FieldValue> {
        let value = match field_type {
            FieldType::String => FieldValue::Text(String::new()),
            FieldType::Int32 => FieldValue::Int32(0),
            FieldType::Int64 => FieldValue::Int64(0),
            FieldType::UInt32 => FieldValue::UInt32(0),
            FieldType::UInt64 => FieldValue::UInt64(0),
            FieldType::Float => FieldValue::Float(0.0),
            FieldType::Double => FieldValue::Double(0.0),
            _ => return None,
        };
        Some(value)
    }

    /// Renders the value as a SQL literal: strings single-quoted with embedded
    /// quotes doubled, numbers in plain decimal.
    pub fn to_sql_literal(&self) -> String {
        match self {
            FieldValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
            FieldValue::Int32(v) => v.to_string(),
            FieldValue::Int64(v) => v.to_string(),
            FieldValue::UInt32(v) => v.to_string(),
            FieldValue::UInt64(v) => v.to_string(),
            FieldValue::Float(v) => v.to_string(),
            FieldValue::Double(v) => v.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            other => f.write_str(&other.to_sql_literal()),
        }
    }
}

/// Metadata for one record field. The ordinal position is the field's index
/// in its record's descriptor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, field_type: FieldType) -> Self {
        FieldDescriptor { name, field_type }
    }
}
