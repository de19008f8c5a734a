//! Storage error types for pbsqlite-storage.
//!
//! [`StorageError`] covers connection failures, unsupported record shapes,
//! values SQLite cannot hold, statement failures reported by SQLite, row
//! decoding failures, use of a closed store, and invalid configuration.

use std::path::PathBuf;

use pbsqlite_core::{FieldType, RecordError};
use rusqlite::ErrorCode;
use thiserror::Error;

/// Errors produced by storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The database file could not be opened or created.
    #[error("failed to open database '{path}': {source}", path = path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A record declares a field type that has no column mapping.
    #[error("unsupported field type: {record}.{field} is {field_type}")]
    UnsupportedFieldType {
        record: &'static str,
        field: &'static str,
        field_type: FieldType,
    },

    /// The primary key for a new table is empty or names an unknown column.
    #[error("invalid primary key for table {table}: {reason}")]
    InvalidPrimaryKey { table: String, reason: String },

    /// SQLite rejected or failed a statement.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Reading a field from a record failed.
    #[error("record error: {0}")]
    Record(#[from] RecordError),

    /// A fetched column could not be assigned to its field.
    #[error("decode error: {record}.{field}: {source}")]
    Decode {
        record: &'static str,
        field: &'static str,
        #[source]
        source: RecordError,
    },

    /// A field value has no SQLite representation. SQLite binds NaN as NULL,
    /// which would read back as zero.
    #[error("cannot store {record}.{field}: {value} has no SQLite representation")]
    UnrepresentableValue {
        record: &'static str,
        field: &'static str,
        value: String,
    },

    /// A fetched TEXT or BLOB column is not valid UTF-8.
    #[error("decode error: {record}.{field}: {source}")]
    InvalidUtf8 {
        record: &'static str,
        field: &'static str,
        #[source]
        source: std::str::Utf8Error,
    },

    /// A fetched column holds a storage class the field cannot take.
    #[error("decode error: {record}.{field} ({field_type}) cannot be read from a {found} column")]
    ColumnTypeMismatch {
        record: &'static str,
        field: &'static str,
        field_type: FieldType,
        found: rusqlite::types::Type,
    },

    /// The store has been closed.
    #[error("database is not open")]
    NotOpen,

    /// The store configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The store configuration could not be parsed.
    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Reading a configuration file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// Whether this is a constraint violation, such as a primary-key conflict
    /// on insert.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StorageError::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
        )
    }

    /// Whether the statement failed because another connection holds a lock
    /// and the busy timeout expired.
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            StorageError::Sqlite(rusqlite::Error::SqliteFailure(err, _))
                if matches!(err.code, ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
        )
    }
}
