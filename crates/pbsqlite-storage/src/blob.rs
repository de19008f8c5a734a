//! The auxiliary `pbstore` table: opaque string values keyed by identifier.
//!
//! Independent of the typed record tables. A missing identifier reads as the
//! empty string, so "absent" and "stored empty" are indistinguishable.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StorageError;

/// Fixed name of the blob table.
pub const BLOB_TABLE: &str = "pbstore";

const CREATE_BLOB_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS pbstore (id TEXT, value TEXT, PRIMARY KEY (id));";

pub(crate) fn ensure_table(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(CREATE_BLOB_TABLE)?;
    Ok(())
}

/// Stores `value` under `id`, replacing any previous value.
pub(crate) fn save(conn: &Connection, id: &str, value: &str) -> Result<(), StorageError> {
    let mut stmt = conn.prepare_cached("REPLACE INTO pbstore VALUES(?1, ?2);")?;
    stmt.execute(params![id, value])?;
    Ok(())
}

/// Reads the value stored under `id`, or the empty string.
pub(crate) fn get(conn: &Connection, id: &str) -> Result<String, StorageError> {
    let mut stmt = conn.prepare_cached("SELECT value FROM pbstore WHERE id = ?1")?;
    let value: Option<Option<String>> = stmt
        .query_row(params![id], |row| row.get(0))
        .optional()?;
    Ok(value.flatten().unwrap_or_default())
}
