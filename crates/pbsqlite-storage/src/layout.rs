//! The bound column list of a record table.
//!
//! [`RecordLayout`] is built from a record type's static descriptor list and
//! carries the table name plus one [`Column`] per field, in field order.
//! Schema generation, write encoding, and row decoding all consume the same
//! layout, which is what keeps positional columns aligned with fields.

use pbsqlite_core::{FieldType, Record};

use crate::column::ColumnType;
use crate::error::StorageError;

/// One column of a record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub field_type: FieldType,
    pub column_type: ColumnType,
}

/// Table name plus ordered columns for one record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    record: &'static str,
    table: String,
    columns: Vec<Column>,
}

impl RecordLayout {
    /// Layout for `T` stored in the table named after `T`.
    pub fn of<T: Record>() -> Result<Self, StorageError> {
        Self::for_table::<T>(T::TYPE_NAME)
    }

    /// Layout for `T` stored in `table`.
    ///
    /// Fails with [`StorageError::UnsupportedFieldType`] if any field of `T`
    /// is not a storable scalar.
    pub fn for_table<T: Record>(table: &str) -> Result<Self, StorageError> {
        let columns = T::fields()
            .iter()
            .map(|field| {
                ColumnType::for_field(field.field_type)
                    .map(|column_type| Column {
                        name: field.name,
                        field_type: field.field_type,
                        column_type,
                    })
                    .ok_or(StorageError::UnsupportedFieldType {
                        record: T::TYPE_NAME,
                        field: field.name,
                        field_type: field.field_type,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RecordLayout {
            record: T::TYPE_NAME,
            table: table.to_string(),
            columns,
        })
    }

    /// Declared type name of the record this layout was built from.
    pub fn record_name(&self) -> &'static str {
        self.record
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pbsqlite_core::{impl_record, FieldDescriptor, FieldValue, RecordError};

    #[derive(Debug, Default)]
    struct Trade {
        symbol: String,
        qty: u32,
        price: f64,
    }

    impl_record!(Trade { symbol: String, qty: u32, price: f64 });

    /// A record with a nested message field, written by hand since
    /// `impl_record!` only accepts scalars.
    #[derive(Debug, Default)]
    struct Envelope;

    impl Record for Envelope {
        const TYPE_NAME: &'static str = "Envelope";

        fn fields() -> &'static [FieldDescriptor] {
            const FIELDS: &[FieldDescriptor] = &[
                FieldDescriptor::new("id", FieldType::String),
                FieldDescriptor::new("body", FieldType::Message),
            ];
            FIELDS
        }

        fn get_field(&self, index: usize) -> Result<FieldValue, RecordError> {
            Err(RecordError::FieldIndexOutOfRange {
                record: Self::TYPE_NAME,
                index,
                count: 2,
            })
        }

        fn set_field(&mut self, index: usize, _value: FieldValue) -> Result<(), RecordError> {
            Err(RecordError::FieldIndexOutOfRange {
                record: Self::TYPE_NAME,
                index,
                count: 2,
            })
        }
    }

    #[test]
    fn columns_follow_field_order() {
        let layout = RecordLayout::of::<Trade>().unwrap();
        assert_eq!(layout.table(), "Trade");
        assert_eq!(layout.record_name(), "Trade");
        assert_eq!(layout.len(), 3);
        let names: Vec<_> = layout.columns().iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["symbol", "qty", "price"]);
        let types: Vec<_> = layout.columns().iter().map(|c| c.column_type).collect();
        assert_eq!(
            types,
            vec![ColumnType::Text, ColumnType::Integer, ColumnType::Real]
        );
        assert_eq!(layout.column_index("price"), Some(2));
    }

    #[test]
    fn explicit_table_name() {
        let layout = RecordLayout::for_table::<Trade>("trades_2024").unwrap();
        assert_eq!(layout.table(), "trades_2024");
        assert_eq!(layout.record_name(), "Trade");
    }

    #[test]
    fn nested_message_field_is_rejected() {
        let err = RecordLayout::of::<Envelope>().unwrap_err();
        match err {
            StorageError::UnsupportedFieldType {
                record,
                field,
                field_type,
            } => {
                assert_eq!(record, "Envelope");
                assert_eq!(field, "body");
                assert_eq!(field_type, FieldType::Message);
            }
            other => panic!("expected UnsupportedFieldType, got {other:?}"),
        }
    }
}
