//! `#[orm(...)]` attribute parsing shared by `Record` and `FromRow`.

use heck::ToSnakeCase;
use syn::{Data, DeriveInput, Fields, Result};

use crate::sql_ident::{parse_sql_ident, parse_sql_ident_with_span};

#[derive(Default)]
pub(crate) struct StructAttrs {
    pub(crate) table: Option<String>,
    pub(crate) id_column: Option<String>,
}

struct StructAttrList {
    table: Option<String>,
    id_column: Option<String>,
}

impl syn::parse::Parse for StructAttrList {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut table: Option<String> = None;
        let mut id_column: Option<String> = None;

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            let key = ident.to_string();

            let _: syn::Token![=] = input.parse()?;
            let value: syn::LitStr = input.parse()?;

            match key.as_str() {
                "table" => table = Some(parse_sql_ident(&value, "table")?),
                "id_column" => id_column = Some(parse_sql_ident(&value, "id_column")?),
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown struct attribute `{key}`"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(Self { table, id_column })
    }
}

#[derive(Default)]
pub(crate) struct FieldAttrs {
    pub(crate) is_id: bool,
    pub(crate) skip: bool,
    pub(crate) column: Option<String>,
}

impl syn::parse::Parse for FieldAttrs {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attrs = FieldAttrs::default();

        loop {
            if input.is_empty() {
                break;
            }

            let ident: syn::Ident = input.parse()?;
            let key = ident.to_string();

            match key.as_str() {
                "id" => attrs.is_id = true,
                "skip" => attrs.skip = true,
                "column" => {
                    let _: syn::Token![=] = input.parse()?;
                    let value: syn::LitStr = input.parse()?;
                    attrs.column = Some(parse_sql_ident(&value, "column")?);
                }
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown field attribute `{key}`"),
                    ));
                }
            }

            if input.peek(syn::Token![,]) {
                let _: syn::Token![,] = input.parse()?;
            } else {
                break;
            }
        }

        Ok(attrs)
    }
}

pub(crate) fn get_struct_attrs(input: &DeriveInput) -> Result<StructAttrs> {
    let mut merged = StructAttrs::default();

    for attr in &input.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }

        if let syn::Meta::List(meta_list) = &attr.meta {
            let parsed = syn::parse2::<StructAttrList>(meta_list.tokens.clone())?;
            if parsed.table.is_some() {
                merged.table = parsed.table;
            }
            if parsed.id_column.is_some() {
                merged.id_column = parsed.id_column;
            }
        }
    }

    Ok(merged)
}

pub(crate) fn get_field_attrs(field: &syn::Field) -> Result<FieldAttrs> {
    let mut merged = FieldAttrs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("orm") {
            continue;
        }

        if let syn::Meta::List(meta_list) = &attr.meta {
            let parsed = syn::parse2::<FieldAttrs>(meta_list.tokens.clone())?;
            merged.is_id |= parsed.is_id;
            merged.skip |= parsed.skip;
            if parsed.column.is_some() {
                merged.column = parsed.column;
            }
        }
    }

    Ok(merged)
}

pub(crate) fn named_fields<'a>(
    input: &'a DeriveInput,
    derive: &str,
) -> Result<&'a syn::punctuated::Punctuated<syn::Field, syn::Token![,]>> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(&fields.named),
            _ => Err(syn::Error::new_spanned(
                input,
                format!("{derive} can only be derived for structs with named fields"),
            )),
        },
        _ => Err(syn::Error::new_spanned(
            input,
            format!("{derive} can only be derived for structs"),
        )),
    }
}

/// Storage name for a field: the explicit override, else the snake_case field name.
pub(crate) fn column_name(field: &syn::Field, attrs: &FieldAttrs) -> Result<String> {
    if let Some(column) = &attrs.column {
        return Ok(column.clone());
    }
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
    let raw = ident.to_string();
    let name = raw.trim_start_matches("r#").to_snake_case();
    parse_sql_ident_with_span(&name, ident.span(), "derived column name")
}
