//! FromRow derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, Result};

use crate::attrs::{column_name, get_field_attrs, named_fields};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let fields = named_fields(&input, "FromRow")?;

    let mut field_extracts: Vec<TokenStream> = Vec::with_capacity(fields.len());
    for field in fields.iter() {
        let Some(field_name) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        let attrs = get_field_attrs(field)?;

        if attrs.skip {
            field_extracts.push(quote! {
                #field_name: ::core::default::Default::default()
            });
            continue;
        }

        let column = column_name(field, &attrs)?;
        field_extracts.push(quote! {
            #field_name: row.try_get_column(#column)?
        });
    }

    Ok(quote! {
        impl #impl_generics ::biolog::FromRow for #name #ty_generics #where_clause {
            fn from_row(row: &::biolog::tokio_postgres::Row) -> ::biolog::StoreResult<Self> {
                use ::biolog::RowExt;
                ::core::result::Result::Ok(Self {
                    #(#field_extracts),*
                })
            }
        }
    })
}
