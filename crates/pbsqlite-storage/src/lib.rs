//! SQLite mapping layer for pbsqlite records.
//!
//! Derives table schemas, write statements, and row decoding from a
//! [`Record`](pbsqlite_core::Record)'s field list, so typed records can be
//! stored and queried without per-type SQL.
//!
//! # Architecture
//!
//! - [`SqliteStore`] owns the connection. Its typed operations use the
//!   record's type name as the table name.
//! - [`Table`] binds an explicit table name to a store.
//! - Every path goes through one [`RecordLayout`] built from the record's
//!   static descriptor list, so schema column order, write value order, and
//!   read column order cannot diverge.
//! - A fixed `pbstore(id, value)` table holds opaque string blobs outside the
//!   typed mechanism.
//!
//! # Modules
//!
//! - [`error`]: StorageError enum with all failure modes
//! - [`column`]: field type to column type mapping
//! - [`layout`]: RecordLayout, the bound column list of a record table
//! - [`schema`]: DDL and DML text generation
//! - [`codec`]: record encoding to bind values and row decoding
//! - [`config`]: StoreConfig and OpenMode
//! - [`blob`]: the auxiliary key/value table
//! - [`table`]: Table handle
//! - [`sqlite`]: SqliteStore handle

pub mod blob;
pub mod codec;
pub mod column;
pub mod config;
pub mod error;
pub mod layout;
pub mod schema;
pub mod sqlite;
pub mod table;

// Re-export key types for ergonomic use.
pub use column::ColumnType;
pub use config::{OpenMode, StoreConfig};
pub use error::StorageError;
pub use layout::{Column, RecordLayout};
pub use schema::WriteKind;
pub use sqlite::SqliteStore;
pub use table::Table;
