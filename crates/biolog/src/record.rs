//! Records and field extraction.
//!
//! A [`Record`] is an entity whose fields may each be present or absent. The trait is usually
//! derived with `#[derive(Record)]`, which enumerates fields at compile time:
//!
//! ```ignore
//! use biolog::Record;
//!
//! #[derive(Record)]
//! #[orm(table = "biolog_user")]
//! struct User {
//!     #[orm(id)]
//!     id: Option<i32>,
//!     public_observations: Option<bool>,
//!     display_name: Option<String>,
//! }
//! ```

use crate::error::{StoreError, StoreResult};
use crate::ident::validate_ident;
use crate::value::{ToValue, Value};

/// A present field: its storage name and the value to bind.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub column: &'static str,
    pub value: Value,
}

impl Field {
    pub fn new(column: &'static str, value: Value) -> Self {
        Self { column, value }
    }

    /// Convert `value` for binding, reporting the column on failure.
    pub fn bind<T: ToValue + ?Sized>(column: &'static str, value: &T) -> StoreResult<Self> {
        let value = value
            .to_value()
            .map_err(|e| StoreError::malformed(column, e))?;
        Ok(Self { column, value })
    }

    /// A present field explicitly set to SQL `NULL`.
    pub fn null(column: &'static str) -> Self {
        Self {
            column,
            value: Value::Null,
        }
    }
}

/// An entity that can enumerate its present fields.
pub trait Record {
    /// Default target table.
    const TABLE: &'static str;

    /// Column holding the identifier.
    const ID_COLUMN: &'static str;

    /// Every writable column, in declaration order.
    const COLUMNS: &'static [&'static str];

    /// Present fields in declaration order. The identifier is never included.
    fn present_fields(&self) -> StoreResult<Vec<Field>>;
}

/// Extract the present, non-identifier fields of `record` in declaration order.
///
/// Column names are validated here so hand-written [`Record`] impls get the same guarantees as
/// derived ones.
pub fn extract_fields<R: Record + ?Sized>(record: &R) -> StoreResult<Vec<Field>> {
    let mut fields = record.present_fields()?;
    fields.retain(|f| f.column != R::ID_COLUMN);
    for field in &fields {
        validate_ident("column", field.column)
            .map_err(|e| StoreError::malformed(field.column, e))?;
    }
    Ok(fields)
}
