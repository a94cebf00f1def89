//! Record derive macro implementation

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::attrs::{column_name, get_field_attrs, get_struct_attrs, named_fields};
use crate::common::syn_types::{Presence, presence_of};

struct EmitField {
    ident: syn::Ident,
    column: String,
    presence: Presence,
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let struct_attrs = get_struct_attrs(&input)?;
    let table = struct_attrs.table.clone().ok_or_else(|| {
        syn::Error::new_spanned(
            &input,
            "Record requires #[orm(table = \"table_name\")] attribute",
        )
    })?;

    let fields = named_fields(&input, "Record")?;

    let mut id_column: Option<String> = None;
    for field in fields.iter() {
        let attrs = get_field_attrs(field)?;
        if !attrs.is_id {
            continue;
        }
        if id_column.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "Record supports a single #[orm(id)] field",
            ));
        }
        id_column = Some(column_name(field, &attrs)?);
    }
    let id_column = id_column
        .or(struct_attrs.id_column)
        .unwrap_or_else(|| "id".to_string());

    let mut emit: Vec<EmitField> = Vec::new();
    let mut seen = HashSet::<String>::new();

    for field in fields.iter() {
        let attrs = get_field_attrs(field)?;
        let column = column_name(field, &attrs)?;

        if !seen.insert(column.clone()) {
            return Err(syn::Error::new_spanned(
                field,
                format!("Record maps more than one field to column '{column}'"),
            ));
        }

        // The identifier never takes part in INSERT columns or UPDATE SET lists.
        if attrs.skip || attrs.is_id || column == id_column {
            continue;
        }

        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };

        emit.push(EmitField {
            ident,
            column,
            presence: presence_of(&field.ty),
        });
    }

    let pushes: Vec<TokenStream> = emit
        .iter()
        .map(|f| {
            let ident = &f.ident;
            let column = &f.column;
            match f.presence {
                Presence::Required => quote! {
                    fields.push(::biolog::Field::bind(#column, &self.#ident)?);
                },
                Presence::Optional => quote! {
                    if let ::core::option::Option::Some(value) = &self.#ident {
                        fields.push(::biolog::Field::bind(#column, value)?);
                    }
                },
                Presence::Nullable => quote! {
                    if let ::core::option::Option::Some(value) = &self.#ident {
                        fields.push(match value {
                            ::core::option::Option::Some(inner) => {
                                ::biolog::Field::bind(#column, inner)?
                            }
                            ::core::option::Option::None => ::biolog::Field::null(#column),
                        });
                    }
                },
            }
        })
        .collect();

    let columns: Vec<&String> = emit.iter().map(|f| &f.column).collect();
    let capacity = emit.len();

    Ok(quote! {
        impl #impl_generics ::biolog::Record for #name #ty_generics #where_clause {
            const TABLE: &'static str = #table;
            const ID_COLUMN: &'static str = #id_column;
            const COLUMNS: &'static [&'static str] = &[#(#columns),*];

            fn present_fields(
                &self,
            ) -> ::biolog::StoreResult<::std::vec::Vec<::biolog::Field>> {
                let mut fields = ::std::vec::Vec::with_capacity(#capacity);
                #(#pushes)*
                ::core::result::Result::Ok(fields)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn render(input: DeriveInput) -> String {
        expand(input).unwrap().to_string()
    }

    #[test]
    fn skips_identifier_and_lists_columns_in_order() {
        let out = render(parse_quote! {
            #[orm(table = "biolog_user")]
            struct User {
                #[orm(id)]
                id: Option<i32>,
                public_observations: Option<bool>,
                display_name: Option<String>,
            }
        });
        assert!(out.contains("\"public_observations\" , \"display_name\""));
        assert!(!out.contains("Field :: bind (\"id\""));
    }

    #[test]
    fn field_named_id_is_identifier_without_attribute() {
        let out = render(parse_quote! {
            #[orm(table = "species")]
            struct Species {
                id: Option<i32>,
                genus: Option<String>,
            }
        });
        assert!(out.contains("const ID_COLUMN : & 'static str = \"id\""));
        assert!(out.contains("& [\"genus\"]"));
    }

    #[test]
    fn requires_table() {
        let input: DeriveInput = parse_quote! {
            struct NoTable {
                name: Option<String>,
            }
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn rejects_duplicate_columns() {
        let input: DeriveInput = parse_quote! {
            #[orm(table = "species")]
            struct Species {
                #[orm(column = "genus")]
                a: Option<String>,
                genus: Option<String>,
            }
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn rejects_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            #[orm(table = "species")]
            struct Species(Option<String>);
        };
        assert!(expand(input).is_err());
    }

    #[test]
    fn nullable_fields_can_bind_null() {
        let out = render(parse_quote! {
            #[orm(table = "external_user")]
            struct ExternalUserPatch {
                picture: Option<Option<String>>,
            }
        });
        assert!(out.contains("Field :: null (\"picture\")"));
    }
}
