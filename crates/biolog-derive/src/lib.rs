//! Derive macros for biolog
//!
//! Provides `#[derive(Record)]` and `#[derive(FromRow)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod attrs;
mod common;
mod from_row;
mod record;
mod sql_ident;

/// Derive `FromRow` trait for a struct.
///
/// # Example
///
/// ```ignore
/// use biolog::FromRow;
///
/// #[derive(FromRow)]
/// struct Observation {
///     id: Option<i32>,
///     quantity: Option<i32>,
///     #[orm(column = "biolog_user")]
///     user: Option<i32>,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(skip)]` - Do not read the field; fill it with `Default::default()`
#[proc_macro_derive(FromRow, attributes(orm))]
pub fn derive_from_row(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    from_row::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derive `Record` for a struct, enumerating its present fields in declaration order.
///
/// # Example
///
/// ```ignore
/// use biolog::Record;
///
/// #[derive(Record)]
/// #[orm(table = "biolog_user")]
/// struct User {
///     #[orm(id)]
///     id: Option<i32>,
///     public_observations: Option<bool>,
///     display_name: Option<String>,
/// }
/// ```
///
/// `Option<T>` fields are skipped when `None`. `Option<Option<T>>` fields are skipped when
/// `None` and bind SQL `NULL` when `Some(None)`. Every other field is always bound.
///
/// # Attributes
///
/// - `#[orm(table = "name")]` - Target table (required)
/// - `#[orm(id_column = "name")]` - Identifier column when no field is marked `id` (default `id`)
/// - `#[orm(id)]` - Mark the identifier field; it is never emitted
/// - `#[orm(column = "name")]` - Map field to a different column name
/// - `#[orm(skip)]` - Never emit the field
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
