//! The [`Record`] trait and the [`impl_record!`](crate::impl_record) macro.
//!
//! A record's descriptor list is a `'static` slice built once per type. Its
//! order is the column order of the record's table, the value order of its
//! write statements, and the column order expected when decoding rows.

use crate::error::RecordError;
use crate::field::{FieldDescriptor, FieldType, FieldValue};

/// A structured value with an ordered, named, typed field list.
///
/// Implementations are usually generated with [`impl_record!`](crate::impl_record).
/// `Default` supplies the fresh instance that decoded rows are written into.
pub trait Record: Default {
    /// Declared type name; the default table name for this record.
    const TYPE_NAME: &'static str;

    /// All fields in declaration order.
    fn fields() -> &'static [FieldDescriptor];

    /// Returns the current value of the field at `index`.
    fn get_field(&self, index: usize) -> Result<FieldValue, RecordError>;

    /// Assigns the field at `index`, converting `value` to the field's type.
    fn set_field(&mut self, index: usize, value: FieldValue) -> Result<(), RecordError>;

    fn field_count() -> usize {
        Self::fields().len()
    }

    fn field_name(index: usize) -> Option<&'static str> {
        Self::fields().get(index).map(|f| f.name)
    }

    fn field_type(index: usize) -> Option<FieldType> {
        Self::fields().get(index).map(|f| f.field_type)
    }

    /// Ordinal position of the field called `name`.
    fn field_index(name: &str) -> Option<usize> {
        Self::fields().iter().position(|f| f.name == name)
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }
}

/// Implements [`Record`] for a struct whose listed fields are all
/// [`ScalarField`](crate::ScalarField) types.
///
/// Fields are listed in declaration order. The type name defaults to the
/// struct's identifier; `as "Name"` overrides it.
///
/// ```
/// use pbsqlite_core::{impl_record, Record};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Counter {
///     name: String,
///     count: i32,
/// }
///
/// impl_record!(Counter { name: String, count: i32 });
///
/// assert_eq!(Counter::TYPE_NAME, "Counter");
/// assert_eq!(Counter::field_name(1), Some("count"));
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ident { $($field:ident : $fty:ty),+ $(,)? }) => {
        $crate::impl_record!(@impl $ty, stringify!($ty), { $($field : $fty),+ });
    };
    ($ty:ident as $name:literal { $($field:ident : $fty:ty),+ $(,)? }) => {
        $crate::impl_record!(@impl $ty, $name, { $($field : $fty),+ });
    };
    (@impl $ty:ident, $name:expr, { $($field:ident : $fty:ty),+ }) => {
        impl $crate::Record for $ty {
            const TYPE_NAME: &'static str = $name;

            fn fields() -> &'static [$crate::FieldDescriptor] {
                const FIELDS: &[$crate::FieldDescriptor] = &[
                    $($crate::FieldDescriptor::new(
                        stringify!($field),
                        <$fty as $crate::ScalarField>::FIELD_TYPE,
                    )),+
                ];
                FIELDS
            }

            #[allow(unused_assignments)]
            fn get_field(
                &self,
                index: usize,
            ) -> ::std::result::Result<$crate::FieldValue, $crate::RecordError> {
                let mut position = 0usize;
                $(
                    if index == position {
                        return Ok($crate::ScalarField::to_value(&self.$field));
                    }
                    position += 1;
                )+
                Err($crate::RecordError::FieldIndexOutOfRange {
                    record: <Self as $crate::Record>::TYPE_NAME,
                    index,
                    count: position,
                })
            }

            #[allow(unused_assignments)]
            fn set_field(
                &mut self,
                index: usize,
                value: $crate::FieldValue,
            ) -> ::std::result::Result<(), $crate::RecordError> {
                let mut position = 0usize;
                $(
                    if index == position {
                        self.$field = <$fty as $crate::ScalarField>::from_value(value)?;
                        return Ok(());
                    }
                    position += 1;
                )+
                Err($crate::RecordError::FieldIndexOutOfRange {
                    record: <Self as $crate::Record>::TYPE_NAME,
                    index,
                    count: position,
                })
            }
        }
    };
}
