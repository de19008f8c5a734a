//! Mapping from record field types to SQLite column types.

use std::fmt;

use pbsqlite_core::FieldType;

/// SQLite storage class of a generated column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Text,
    Integer,
    Real,
}

impl ColumnType {
    /// Column type for a field type, or `None` when the field type is not a
    /// storable scalar.
    pub fn for_field(field_type: FieldType) -> Option<ColumnType> {
        match field_type {
            FieldType::String => Some(ColumnType::Text),
            FieldType::Int32 | FieldType::Int64 | FieldType::UInt32 | FieldType::UInt64 => {
                Some(ColumnType::Integer)
            }
            FieldType::Float | FieldType::Double => Some(ColumnType::Real),
            FieldType::Bool | FieldType::Bytes | FieldType::Enum | FieldType::Message => None,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_mapping() {
        assert_eq!(ColumnType::for_field(FieldType::String), Some(ColumnType::Text));
        assert_eq!(ColumnType::for_field(FieldType::Int32), Some(ColumnType::Integer));
        assert_eq!(ColumnType::for_field(FieldType::Int64), Some(ColumnType::Integer));
        assert_eq!(ColumnType::for_field(FieldType::UInt32), Some(ColumnType::Integer));
        assert_eq!(ColumnType::for_field(FieldType::UInt64), Some(ColumnType::Integer));
        assert_eq!(ColumnType::for_field(FieldType::Float), Some(ColumnType::Real));
        assert_eq!(ColumnType::for_field(FieldType::Double), Some(ColumnType::Real));
    }

    #[test]
    fn sql_spelling() {
        assert_eq!(ColumnType::Text.to_string(), "TEXT");
        assert_eq!(ColumnType::Integer.to_string(), "INTEGER");
        assert_eq!(ColumnType::Real.to_string(), "REAL");
    }

    #[test]
    fn non_scalar_fields_have_no_column() {
        assert_eq!(ColumnType::for_field(FieldType::Message), None);
        assert_eq!(ColumnType::for_field(FieldType::Enum), None);
        assert_eq!(ColumnType::for_field(FieldType::Bool), None);
        assert_eq!(ColumnType::for_field(FieldType::Bytes), None);
    }
}
