//! [`Table`]: a fixed table name bound to a [`SqliteStore`].
//!
//! Each call runs one statement as its own implicit transaction. Errors from
//! SQLite surface immediately; nothing is retried.

use pbsqlite_core::Record;
use rusqlite::params_from_iter;

use crate::codec;
use crate::error::StorageError;
use crate::layout::RecordLayout;
use crate::schema::{self, WriteKind};
use crate::sqlite::SqliteStore;

/// A table handle. Borrows the store for its lifetime.
#[derive(Debug)]
pub struct Table<'s> {
    store: &'s SqliteStore,
    name: String,
}

impl<'s> Table<'s> {
    pub(crate) fn new(store: &'s SqliteStore, name: impl Into<String>) -> Self {
        Table {
            store,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates this table with `T`'s columns if it does not exist yet.
    pub fn create_if_not_exists<T: Record>(&self, primary_key: &[&str]) -> Result<(), StorageError> {
        let conn = self.store.conn()?;
        let layout = RecordLayout::for_table::<T>(&self.name)?;
        let sql = schema::create_table_query(&layout, primary_key)?;
        tracing::debug!(table = %self.name, %sql, "create table if not exists");
        conn.execute_batch(&sql)?;
        Ok(())
    }

    pub fn exists(&self) -> Result<bool, StorageError> {
        self.store.table_exists_named(&self.name)
    }

    /// Inserts `record`. Fails on a primary-key conflict.
    pub fn insert<T: Record>(&self, record: &T) -> Result<(), StorageError> {
        self.write(record, WriteKind::Insert)
    }

    /// Inserts `record`, replacing any row with the same primary key.
    pub fn upsert<T: Record>(&self, record: &T) -> Result<(), StorageError> {
        self.write(record, WriteKind::Replace)
    }

    fn write<T: Record>(&self, record: &T, kind: WriteKind) -> Result<(), StorageError> {
        let conn = self.store.conn()?;
        let layout = RecordLayout::for_table::<T>(&self.name)?;
        let values = codec::encode(&layout, record)?;
        tracing::trace!(
            sql = %schema::write_query_literal(&layout, kind, &values),
            "write record"
        );

        let mut stmt = conn.prepare_cached(&schema::write_query(&layout, kind))?;
        stmt.execute(params_from_iter(codec::bind_values(&values)))?;
        Ok(())
    }

    /// Runs `SELECT * FROM <table> <condition>` and decodes every row into a
    /// fresh `T`, in result order.
    ///
    /// `condition` is raw SQL appended verbatim (`WHERE ...`, `ORDER BY ...`,
    /// `LIMIT ...`); it is not parameterized or validated.
    pub fn select_all<T: Record>(&self, condition: &str) -> Result<Vec<T>, StorageError> {
        let conn = self.store.conn()?;
        let layout = RecordLayout::for_table::<T>(&self.name)?;
        let sql = schema::select_query(&self.name, condition);

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(codec::decode_row::<T>(&layout, row)?);
        }
        tracing::debug!(table = %self.name, %sql, rows = out.len(), "select");
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbsqlite_core::impl_record;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Tick {
        symbol: String,
        seq: i64,
        price: f64,
    }

    impl_record!(Tick { symbol: String, seq: i64, price: f64 });

    fn tick(symbol: &str, seq: i64, price: f64) -> Tick {
        Tick {
            symbol: symbol.into(),
            seq,
            price,
        }
    }

    #[test]
    fn bound_name_is_used_instead_of_type_name() {
        let store = SqliteStore::in_memory().unwrap();
        let table = store.table("ticks_au");
        table.create_if_not_exists::<Tick>(&["symbol", "seq"]).unwrap();
        table.insert(&tick("AU", 1, 500.5)).unwrap();

        assert!(table.exists().unwrap());
        assert!(!store.table_exists::<Tick>().unwrap());
        assert_eq!(table.select_all::<Tick>("").unwrap(), vec![tick("AU", 1, 500.5)]);
    }

    #[test]
    fn condition_filters_and_orders() {
        let store = SqliteStore::in_memory().unwrap();
        let table = store.table("ticks");
        table.create_if_not_exists::<Tick>(&["symbol", "seq"]).unwrap();
        for (seq, price) in [(3, 1.0), (1, 2.0), (2, 3.0)] {
            table.insert(&tick("AG", seq, price)).unwrap();
        }
        table.insert(&tick("CU", 1, 9.0)).unwrap();

        let rows = table
            .select_all::<Tick>("WHERE symbol = 'AG' ORDER BY seq DESC")
            .unwrap();
        let seqs: Vec<_> = rows.iter().map(|t| t.seq).collect();
        assert_eq!(seqs, vec![3, 2, 1]);
    }

    #[test]
    fn empty_result_is_empty_vec() {
        let store = SqliteStore::in_memory().unwrap();
        let table = store.table("ticks");
        table.create_if_not_exists::<Tick>(&["symbol"]).unwrap();
        assert!(table.select_all::<Tick>("").unwrap().is_empty());
        assert!(table
            .select_all::<Tick>("WHERE seq > 100")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn upsert_replaces_and_insert_conflicts() {
        let store = SqliteStore::in_memory().unwrap();
        let table = store.table("ticks");
        table.create_if_not_exists::<Tick>(&["symbol"]).unwrap();
        table.insert(&tick("AU", 1, 1.0)).unwrap();

        let err = table.insert(&tick("AU", 2, 2.0)).unwrap_err();
        assert!(err.is_constraint_violation());

        table.upsert(&tick("AU", 2, 2.0)).unwrap();
        assert_eq!(table.select_all::<Tick>("").unwrap(), vec![tick("AU", 2, 2.0)]);
    }

    #[test]
    fn string_values_with_quotes_are_stored_verbatim() {
        let store = SqliteStore::in_memory().unwrap();
        let table = store.table("ticks");
        table.create_if_not_exists::<Tick>(&["symbol"]).unwrap();
        let odd = tick("x'); DROP TABLE ticks; --", 1, 0.0);
        table.insert(&odd).unwrap();
        assert_eq!(table.select_all::<Tick>("").unwrap(), vec![odd]);
    }

    #[test]
    fn select_from_missing_table_is_an_error() {
        let store = SqliteStore::in_memory().unwrap();
        let err = store.table("nope").select_all::<Tick>("").unwrap_err();
        assert!(matches!(err, StorageError::Sqlite(_)));
    }
}
