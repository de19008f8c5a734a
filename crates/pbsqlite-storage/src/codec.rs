//! Row codec: records to bind values, and fetched rows back to records.
//!
//! Decoding is positional. Column `i` of a row is assigned to field `i` of
//! the layout, which holds because reads are `SELECT *` against a table
//! created from the same layout. A table whose columns were reordered by
//! hand decodes into the wrong fields without any error.
//!
//! `uint64` values are stored as the two's-complement bit pattern of an
//! SQLite INTEGER and restored bit-exactly. SQL NULL decodes to the field's
//! zero value. TEXT and BLOB columns must hold valid UTF-8 to decode into a
//! string field.

use pbsqlite_core::{FieldType, FieldValue, Record};
use rusqlite::types::{Value, ValueRef};
use rusqlite::Row;

use crate::error::StorageError;
use crate::layout::{Column, RecordLayout};

/// Reads every field of `record` in layout order.
///
/// NaN floats are rejected with [`StorageError::UnrepresentableValue`];
/// infinities are stored as-is.
pub fn encode<T: Record>(layout: &RecordLayout, record: &T) -> Result<Vec<FieldValue>, StorageError> {
    layout
        .columns()
        .iter()
        .enumerate()
        .map(|(i, column)| -> Result<FieldValue, StorageError> {
            let value = record.get_field(i)?;
            if is_nan(&value) {
                return Err(StorageError::UnrepresentableValue {
                    record: layout.record_name(),
                    field: column.name,
                    value: value.to_string(),
                });
            }
            Ok(value)
        })
        .collect()
}

fn is_nan(value: &FieldValue) -> bool {
    match value {
        FieldValue::Float(v) => v.is_nan(),
        FieldValue::Double(v) => v.is_nan(),
        _ => false,
    }
}

/// Converts encoded field values into SQLite bind values.
pub fn bind_values(values: &[FieldValue]) -> Vec<Value> {
    values.iter().map(to_sql_value).collect()
}

fn to_sql_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(s) => Value::Text(s.clone()),
        FieldValue::Int32(v) => Value::Integer(i64::from(*v)),
        FieldValue::Int64(v) => Value::Integer(*v),
        FieldValue::UInt32(v) => Value::Integer(i64::from(*v)),
        FieldValue::UInt64(v) => Value::Integer(*v as i64),
        FieldValue::Float(v) => Value::Real(f64::from(*v)),
        FieldValue::Double(v) => Value::Real(*v),
    }
}

/// Renders encoded field values as SQL literal fragments, in order.
pub fn to_literal_values(values: &[FieldValue]) -> Vec<String> {
    values.iter().map(FieldValue::to_sql_literal).collect()
}

/// Builds a fresh `T` from one result row.
pub fn decode_row<T: Record>(layout: &RecordLayout, row: &Row<'_>) -> Result<T, StorageError> {
    let mut record = T::default();
    for (i, column) in layout.columns().iter().enumerate() {
        let value = column_value(layout, column, row.get_ref(i)?)?;
        record
            .set_field(i, value)
            .map_err(|source| StorageError::Decode {
                record: layout.record_name(),
                field: column.name,
                source,
            })?;
    }
    Ok(record)
}

/// Converts one SQLite value to the field value of `column`'s declared type.
fn column_value(
    layout: &RecordLayout,
    column: &Column,
    value: ValueRef<'_>,
) -> Result<FieldValue, StorageError> {
    let mismatch = || StorageError::ColumnTypeMismatch {
        record: layout.record_name(),
        field: column.name,
        field_type: column.field_type,
        found: value.data_type(),
    };

    let decoded = match (column.field_type, value) {
        (_, ValueRef::Null) => FieldValue::zero(column.field_type).ok_or_else(mismatch)?,

        (FieldType::String, ValueRef::Text(bytes)) | (FieldType::String, ValueRef::Blob(bytes)) => {
            let text = std::str::from_utf8(bytes).map_err(|source| StorageError::InvalidUtf8 {
                record: layout.record_name(),
                field: column.name,
                source,
            })?;
            FieldValue::Text(text.to_string())
        }
        (FieldType::String, ValueRef::Integer(v)) => FieldValue::Text(v.to_string()),
        (FieldType::String, ValueRef::Real(v)) => FieldValue::Text(v.to_string()),

        (FieldType::UInt64, ValueRef::Integer(v)) => FieldValue::UInt64(v as u64),
        (FieldType::Int32 | FieldType::Int64 | FieldType::UInt32, ValueRef::Integer(v)) => {
            FieldValue::Int64(v)
        }

        (FieldType::Float | FieldType::Double, ValueRef::Real(v)) => FieldValue::Double(v),
        (FieldType::Float | FieldType::Double, ValueRef::Integer(v)) => FieldValue::Double(v as f64),

        _ => return Err(mismatch()),
    };
    Ok(decoded)
}
