//! [`SqliteStore`]: the store handle.
//!
//! Owns one SQLite connection. Typed operations infer the table name from
//! the record type's declared name and delegate to a [`Table`] bound to it.
//! A writable store always has the `pbstore` blob table.
//!
//! The store is either open or closed. Opening fully succeeds or fails with
//! no handle; after [`SqliteStore::close`] every operation returns
//! [`StorageError::NotOpen`]. One store is one connection and is not shared
//! across threads; use one store per thread or guard it externally.

use std::path::Path;

use pbsqlite_core::Record;
use rusqlite::{params, Connection};

use crate::blob;
use crate::config::{OpenMode, StoreConfig};
use crate::error::StorageError;
use crate::table::Table;

/// SQLite-backed record store.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Option<Connection>,
    config: StoreConfig,
}

impl SqliteStore {
    /// Opens (or creates) a read-write database at `path`.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open(StoreConfig::new(path.as_ref()))
    }

    /// Opens an existing database at `path` for reading only.
    pub fn read_only(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Self::open(StoreConfig::read_only(path.as_ref()))
    }

    /// Opens a private in-memory database (for testing).
    pub fn in_memory() -> Result<Self, StorageError> {
        Self::open(StoreConfig::in_memory())
    }

    /// Opens a store as described by `config`.
    ///
    /// In read-write-create mode the `pbstore` table is created if missing.
    pub fn open(config: StoreConfig) -> Result<Self, StorageError> {
        config.validate()?;
        let conn = open_connection(&config)?;
        configure(&conn, &config)?;
        if config.mode.is_writable() {
            blob::ensure_table(&conn)?;
        }
        tracing::info!(
            path = %config.path.display(),
            mode = ?config.mode,
            "opened record store"
        );
        Ok(SqliteStore {
            conn: Some(conn),
            config,
        })
    }

    pub(crate) fn conn(&self) -> Result<&Connection, StorageError> {
        self.conn.as_ref().ok_or(StorageError::NotOpen)
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn mode(&self) -> OpenMode {
        self.config.mode
    }

    /// Releases the connection. Fails with `NotOpen` if already closed; if
    /// SQLite refuses to close, the store stays open.
    pub fn close(&mut self) -> Result<(), StorageError> {
        let conn = self.conn.take().ok_or(StorageError::NotOpen)?;
        if let Err((conn, err)) = conn.close() {
            self.conn = Some(conn);
            return Err(err.into());
        }
        tracing::info!(path = %self.config.path.display(), "closed record store");
        Ok(())
    }

    /// Binds a table handle to `name`.
    pub fn table(&self, name: impl Into<String>) -> Table<'_> {
        Table::new(self, name)
    }

    // -------------------------------------------------------------------
    // Typed record operations
    // -------------------------------------------------------------------

    /// Creates the table named after `T` if it does not exist.
    pub fn create_table_if_not_exists<T: Record>(&self, primary_key: &[&str]) -> Result<(), StorageError> {
        self.table(T::TYPE_NAME).create_if_not_exists::<T>(primary_key)
    }

    /// Creates a table for `T` under an explicit name if it does not exist.
    pub fn create_table_if_not_exists_named<T: Record>(
        &self,
        table: &str,
        primary_key: &[&str],
    ) -> Result<(), StorageError> {
        self.table(table).create_if_not_exists::<T>(primary_key)
    }

    pub fn insert<T: Record>(&self, record: &T) -> Result<(), StorageError> {
        self.table(T::TYPE_NAME).insert(record)
    }

    pub fn upsert<T: Record>(&self, record: &T) -> Result<(), StorageError> {
        self.table(T::TYPE_NAME).upsert(record)
    }

    /// Selects every row of `T`'s table matching the raw `condition`.
    pub fn select_all<T: Record>(&self, condition: &str) -> Result<Vec<T>, StorageError> {
        self.table(T::TYPE_NAME).select_all(condition)
    }

    // -------------------------------------------------------------------
    // Introspection
    // -------------------------------------------------------------------

    pub fn table_exists<T: Record>(&self) -> Result<bool, StorageError> {
        self.table_exists_named(T::TYPE_NAME)
    }

    pub fn table_exists_named(&self, name: &str) -> Result<bool, StorageError> {
        let exists: bool = self.conn()?.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![name],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Number of tables, not counting SQLite's own `sqlite_sequence`.
    /// Includes the `pbstore` table.
    pub fn table_count(&self) -> Result<usize, StorageError> {
        let count: i64 = self.conn()?.query_row(
            "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name != 'sqlite_sequence'",
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// Names of all tables counted by [`table_count`](Self::table_count), sorted.
    pub fn table_names(&self) -> Result<Vec<String>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name != 'sqlite_sequence' ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(names)
    }

    // -------------------------------------------------------------------
    // Blob store
    // -------------------------------------------------------------------

    /// Stores `value` under `id` in the `pbstore` table, replacing any
    /// previous value.
    pub fn save(&self, id: &str, value: &str) -> Result<(), StorageError> {
        blob::save(self.conn()?, id, value)
    }

    /// Reads the value stored under `id`; the empty string if there is none.
    pub fn get(&self, id: &str) -> Result<String, StorageError> {
        blob::get(self.conn()?, id)
    }
}

fn open_connection(config: &StoreConfig) -> Result<Connection, StorageError> {
    let flags = config.mode.flags();
    let opened = match &config.vfs {
        Some(vfs) => Connection::open_with_flags_and_vfs(&config.path, flags, vfs.as_str()),
        None => Connection::open_with_flags(&config.path, flags),
    };
    opened.map_err(|source| StorageError::Open {
        path: config.path.clone(),
        source,
    })
}

fn configure(conn: &Connection, config: &StoreConfig) -> Result<(), StorageError> {
    conn.busy_timeout(config.busy_timeout())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbsqlite_core::impl_record;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Counter {
        name: String,
        count: i32,
    }

    impl_record!(Counter { name: String, count: i32 });

    #[test]
    fn fresh_writable_store_has_blob_table() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(store.is_open());
        assert_eq!(store.mode(), OpenMode::ReadWriteCreate);
        assert_eq!(store.table_count().unwrap(), 1);
        assert!(store.table_exists_named(blob::BLOB_TABLE).unwrap());
        assert_eq!(store.table_names().unwrap(), vec!["pbstore".to_string()]);
    }

    #[test]
    fn typed_tables_are_named_after_the_record() {
        let store = SqliteStore::in_memory().unwrap();
        assert!(!store.table_exists::<Counter>().unwrap());
        store.create_table_if_not_exists::<Counter>(&["name"]).unwrap();
        assert!(store.table_exists::<Counter>().unwrap());
        assert_eq!(store.table_count().unwrap(), 2);
        assert_eq!(
            store.table_names().unwrap(),
            vec!["Counter".to_string(), "pbstore".to_string()]
        );
    }

    #[test]
    fn create_table_twice_is_a_no_op() {
        let store = SqliteStore::in_memory().unwrap();
        store.create_table_if_not_exists::<Counter>(&["name"]).unwrap();
        store.insert(&Counter { name: "x".into(), count: 1 }).unwrap();
        store.create_table_if_not_exists::<Counter>(&["name"]).unwrap();
        assert_eq!(store.select_all::<Counter>("").unwrap().len(), 1);
        assert_eq!(store.table_count().unwrap(), 2);
    }

    #[test]
    fn explicit_table_name() {
        let store = SqliteStore::in_memory().unwrap();
        store
            .create_table_if_not_exists_named::<Counter>("daily_counts", &["name"])
            .unwrap();
        assert!(store.table_exists_named("daily_counts").unwrap());
        assert!(!store.table_exists::<Counter>().unwrap());
    }

    #[test]
    fn closed_store_rejects_operations() {
        let mut store = SqliteStore::in_memory().unwrap();
        store.close().unwrap();
        assert!(!store.is_open());
        assert!(matches!(store.table_count(), Err(StorageError::NotOpen)));
        assert!(matches!(store.get("a"), Err(StorageError::NotOpen)));
        assert!(matches!(store.save("a", "b"), Err(StorageError::NotOpen)));
        assert!(matches!(
            store.select_all::<Counter>(""),
            Err(StorageError::NotOpen)
        ));
        assert!(matches!(
            store.insert(&Counter::default()),
            Err(StorageError::NotOpen)
        ));
        assert!(matches!(store.close(), Err(StorageError::NotOpen)));
    }

    #[test]
    fn blob_store_roundtrip() {
        let store = SqliteStore::in_memory().unwrap();
        assert_eq!(store.get("a").unwrap(), "");
        store.save("a", "v1").unwrap();
        store.save("a", "v2").unwrap();
        assert_eq!(store.get("a").unwrap(), "v2");
    }
}
