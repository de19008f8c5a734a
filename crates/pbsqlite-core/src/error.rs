//! Error types for pbsqlite-core.
//!
//! Uses `thiserror` for matchable variants covering positional field access
//! and conversion of [`FieldValue`](crate::FieldValue)s into Rust scalars.

use thiserror::Error;

use crate::field::FieldType;

/// Errors produced when reading or writing record fields by position.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// The field index is past the end of the record's descriptor list.
    #[error("field index {index} out of range for {record} ({count} fields)")]
    FieldIndexOutOfRange {
        record: &'static str,
        index: usize,
        count: usize,
    },

    /// A value of one kind was assigned to a field of an incompatible kind.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: FieldType,
        found: FieldType,
    },

    /// A numeric value does not fit the field's declared type.
    #[error("value {value} out of range for {expected}")]
    ValueOutOfRange { expected: FieldType, value: String },
}
