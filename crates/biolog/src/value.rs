//! Bound argument values.
//!
//! [`Value`] is the element type of a statement's argument list. It owns its data, compares by
//! value, and binds through `tokio-postgres` by delegating to the wrapped Rust type, so the
//! Postgres column type is still checked at execution time.

use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::error::Error;
use thiserror::Error;
use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};

/// A single bound argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int2(i16),
    Int4(i32),
    Int8(i64),
    Float4(f32),
    Float8(f64),
    Text(String),
    Bytea(Vec<u8>),
    Date(NaiveDate),
    Timestamp(NaiveDateTime),
    Timestamptz(DateTime<Utc>),
    Json(serde_json::Value),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql_checked(ty, out),
            Value::Int2(v) => v.to_sql_checked(ty, out),
            Value::Int4(v) => v.to_sql_checked(ty, out),
            Value::Int8(v) => v.to_sql_checked(ty, out),
            Value::Float4(v) => v.to_sql_checked(ty, out),
            Value::Float8(v) => v.to_sql_checked(ty, out),
            Value::Text(v) => v.to_sql_checked(ty, out),
            Value::Bytea(v) => v.to_sql_checked(ty, out),
            Value::Date(v) => v.to_sql_checked(ty, out),
            Value::Timestamp(v) => v.to_sql_checked(ty, out),
            Value::Timestamptz(v) => v.to_sql_checked(ty, out),
            Value::Json(v) => v.to_sql_checked(ty, out),
        }
    }

    // The wrapped value performs the real type check in `to_sql`.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    to_sql_checked!();
}

/// A Rust value that has no bindable Postgres representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValueError(String);

impl ValueError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Conversion of a record field into a [`Value`].
///
/// Implemented for the scalar types the entities use. Unsigned integers wider than the
/// matching signed Postgres type are converted with a range check.
pub trait ToValue {
    fn to_value(&self) -> Result<Value, ValueError>;
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Result<Value, ValueError> {
        (**self).to_value()
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Result<Value, ValueError> {
        Ok(Value::Text(self.to_owned()))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

macro_rules! impl_value_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }

            impl ToValue for $ty {
                fn to_value(&self) -> Result<Value, ValueError> {
                    Ok(Value::from(self.clone()))
                }
            }
        )*
    };
}

impl_value_conversions! {
    bool => Bool,
    i8 => Int2,
    u8 => Int2,
    i16 => Int2,
    u16 => Int4,
    i32 => Int4,
    u32 => Int8,
    i64 => Int8,
    f32 => Float4,
    f64 => Float8,
    String => Text,
    Vec<u8> => Bytea,
    NaiveDate => Date,
    NaiveDateTime => Timestamp,
    DateTime<Utc> => Timestamptz,
    serde_json::Value => Json,
}

macro_rules! impl_checked_int8 {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Result<Value, ValueError> {
                    i64::try_from(*self).map(Value::Int8).map_err(|_| {
                        ValueError::new(format!("{} does not fit in BIGINT", self))
                    })
                }
            }
        )*
    };
}

impl_checked_int8!(u64, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsigned_values_are_range_checked() {
        assert_eq!(42_u64.to_value().unwrap(), Value::Int8(42));
        assert!(u64::MAX.to_value().is_err());
        assert_eq!(7_usize.to_value().unwrap(), Value::Int8(7));
    }

    #[test]
    fn narrow_integers_widen() {
        assert_eq!(3_u8.to_value().unwrap(), Value::Int2(3));
        assert_eq!(70_000_u32.to_value().unwrap(), Value::Int8(70_000));
        assert_eq!(u16::MAX.to_value().unwrap(), Value::Int4(65_535));
    }

    #[test]
    fn text_from_str_and_string() {
        assert_eq!("Ursus arctos".to_value().unwrap(), Value::Text("Ursus arctos".into()));
        assert_eq!(
            String::from("Lynx lynx").to_value().unwrap(),
            Value::from("Lynx lynx")
        );
    }

    #[test]
    fn null_binds_as_sql_null() {
        let mut buf = BytesMut::new();
        let res = Value::Null.to_sql_checked(&Type::TEXT, &mut buf).unwrap();
        assert!(matches!(res, IsNull::Yes));
        assert!(buf.is_empty());
    }

    #[test]
    fn wrapped_type_is_checked() {
        let mut buf = BytesMut::new();
        assert!(Value::Int4(1).to_sql_checked(&Type::INT4, &mut buf).is_ok());
        let mut buf = BytesMut::new();
        assert!(Value::Int4(1).to_sql_checked(&Type::TEXT, &mut buf).is_err());
    }
}
