//! Record model for pbsqlite.
//!
//! A record is a plain Rust struct whose scalar fields are exposed through a
//! static, ordered list of [`FieldDescriptor`]s plus positional get/set
//! accessors. The storage crate derives table schemas, write statements, and
//! row decoding from that list alone.
//!
//! # Modules
//!
//! - [`error`]: RecordError for positional access and value conversion
//! - [`field`]: FieldType, FieldValue, FieldDescriptor
//! - [`scalar`]: ScalarField conversions between Rust scalars and FieldValue
//! - [`record`]: the Record trait and the `impl_record!` macro

pub mod error;
pub mod field;
pub mod record;
pub mod scalar;

pub use error::RecordError;
pub use field::{FieldDescriptor, FieldType, FieldValue};
pub use record::Record;
pub use scalar::ScalarField;
