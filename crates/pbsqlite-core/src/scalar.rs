//! Conversions between Rust scalar types and [`FieldValue`].
//!
//! Integer conversions are range-checked. `f64 -> f32` narrows, since the
//! store keeps every real number as a double.

use crate::error::RecordError;
use crate::field::{FieldType, FieldValue};

/// A Rust type usable as a record field.
pub trait ScalarField: Sized {
    /// The declared field type for this Rust type.
    const FIELD_TYPE: FieldType;

    fn to_value(&self) -> FieldValue;

    fn from_value(value: FieldValue) -> Result<Self, RecordError>;
}

fn mismatch(expected: FieldType, value: &FieldValue) -> RecordError {
    RecordError::TypeMismatch {
        expected,
        found: value.field_type(),
    }
}

fn out_of_range(expected: FieldType, value: impl ToString) -> RecordError {
    RecordError::ValueOutOfRange {
        expected,
        value: value.to_string(),
    }
}

impl ScalarField for String {
    const FIELD_TYPE: FieldType = FieldType::String;

    fn to_value(&self) -> FieldValue {
        FieldValue::Text(self.clone())
    }

    fn from_value(value: FieldValue) -> Result<Self, RecordError> {
        match value {
            FieldValue::Text(s) => Ok(s),
            other => Err(mismatch(Self::FIELD_TYPE, &other)),
        }
    }
}

// Every integer kind converts to every other integer kind when the value fits.
macro_rules! integer_scalar {
    ($ty:ty, $variant:ident) => {
        impl ScalarField for $ty {
            const FIELD_TYPE: FieldType = FieldType::$variant;

            fn to_value(&self) -> FieldValue {
                FieldValue::$variant(*self)
            }

            fn from_value(value: FieldValue) -> Result<Self, RecordError> {
                let converted = match value {
                    FieldValue::Int32(v) => <$ty>::try_from(v).map_err(|_| v.to_string()),
                    FieldValue::Int64(v) => <$ty>::try_from(v).map_err(|_| v.to_string()),
                    FieldValue::UInt32(v) => <$ty>::try_from(v).map_err(|_| v.to_string()),
                    FieldValue::UInt64(v) => <$ty>::try_from(v).map_err(|_| v.to_string()),
                    other => return Err(mismatch(Self::FIELD_TYPE, &other)),
                };
                converted.map_err(|v| out_of_range(Self::FIELD_TYPE, v))
            }
        }
    };
}

integer_scalar!(i32, Int32);
integer_scalar!(i64, Int64);
integer_scalar!(u32, UInt32);
integer_scalar!(u64, UInt64);

impl ScalarField for f32 {
    const FIELD_TYPE: FieldType = FieldType::Float;

    fn to_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }

    fn from_value(value: FieldValue) -> Result<Self, RecordError> {
        match value {
            FieldValue::Float(v) => Ok(v),
            FieldValue::Double(v) => Ok(v as f32),
            other => Err(mismatch(Self::FIELD_TYPE, &other)),
        }
    }
}

impl ScalarField for f64 {
    const FIELD_TYPE: FieldType = FieldType::Double;

    fn to_value(&self) -> FieldValue {
        FieldValue::Double(*self)
    }

    fn from_value(value: FieldValue) -> Result<Self, RecordError> {
        match value {
            FieldValue::Double(v) => Ok(v),
            FieldValue::Float(v) => Ok(f64::from(v)),
            other => Err(mismatch(Self::FIELD_TYPE, &other)),
        }
    }
}
