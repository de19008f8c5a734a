//! SQL text generation for record tables.
//!
//! All statements are derived from a [`RecordLayout`], so the column list of
//! `CREATE TABLE`, the value list of `INSERT`/`REPLACE`, and the column order
//! of `SELECT *` are the same list.
//!
//! Table and column names are always emitted as quoted identifiers, so a
//! record or field named after an SQL keyword still maps to a valid table.
//!
//! Tables are created with `CREATE TABLE IF NOT EXISTS`. An existing table
//! with a different shape is left untouched; schema drift is not detected.

use pbsqlite_core::FieldValue;

use crate::codec;
use crate::error::StorageError;
use crate::layout::RecordLayout;

/// How a write statement treats an existing row with the same primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteKind {
    /// Fail on a primary-key conflict.
    Insert,
    /// Delete the conflicting row, then insert.
    Replace,
}

impl WriteKind {
    pub fn keyword(self) -> &'static str {
        match self {
            WriteKind::Insert => "INSERT INTO",
            WriteKind::Replace => "REPLACE INTO",
        }
    }
}

/// Quotes `name` as an SQL identifier, doubling any embedded `"`.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Builds `CREATE TABLE IF NOT EXISTS "<table>" ("<col>" <TYPE>, ..., PRIMARY KEY ("<key>"));`.
///
/// Every primary key column must be one of the layout's columns.
pub fn create_table_query(
    layout: &RecordLayout,
    primary_key: &[&str],
) -> Result<String, StorageError> {
    if primary_key.is_empty() {
        return Err(StorageError::InvalidPrimaryKey {
            table: layout.table().to_string(),
            reason: "no key columns given".to_string(),
        });
    }
    if let Some(unknown) = primary_key
        .iter()
        .find(|key| layout.column_index(key).is_none())
    {
        return Err(StorageError::InvalidPrimaryKey {
            table: layout.table().to_string(),
            reason: format!("{} has no field named '{}'", layout.record_name(), unknown),
        });
    }

    let columns: Vec<String> = layout
        .columns()
        .iter()
        .map(|c| format!("{} {}", quote_ident(c.name), c.column_type))
        .collect();
    let key: Vec<String> = primary_key.iter().map(|k| quote_ident(k)).collect();

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({}, PRIMARY KEY ({}));",
        quote_ident(layout.table()),
        columns.join(", "),
        key.join(", ")
    ))
}

/// Builds `INSERT INTO "<table>" VALUES(?1,?2,...);` (or `REPLACE INTO`) with
/// one positional parameter per column.
pub fn write_query(layout: &RecordLayout, kind: WriteKind) -> String {
    let placeholders: Vec<String> = (1..=layout.len()).map(|i| format!("?{i}")).collect();
    format!(
        "{} {} VALUES({});",
        kind.keyword(),
        quote_ident(layout.table()),
        placeholders.join(",")
    )
}

/// Renders a write statement with `values` inlined as SQL literals.
///
/// Used for logging; statements are executed with bound parameters.
pub fn write_query_literal(layout: &RecordLayout, kind: WriteKind, values: &[FieldValue]) -> String {
    format!(
        "{} {} VALUES({});",
        kind.keyword(),
        quote_ident(layout.table()),
        codec::to_literal_values(values).join(",")
    )
}

/// Builds `SELECT * FROM "<table>" <condition>`. The condition is appended
/// verbatim.
pub fn select_query(table: &str, condition: &str) -> String {
    let table = quote_ident(table);
    let condition = condition.trim();
    if condition.is_empty() {
        format!("SELECT * FROM {table}")
    } else {
        format!("SELECT * FROM {table} {condition}")
    }
}
