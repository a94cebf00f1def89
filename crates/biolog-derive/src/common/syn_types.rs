//! Type helper utilities for syn type analysis.

/// Extract the inner type T from Option<T>, or return None if not an Option type.
///
/// Recognizes `Option<T>`, `std::option::Option<T>`, and `core::option::Option<T>`.
pub fn option_inner(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let seg = type_path.path.segments.last()?;
    if seg.ident != "Option" {
        return None;
    }
    let syn::PathArguments::AngleBracketed(args) = &seg.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    let syn::GenericArgument::Type(inner) = args.args.first()? else {
        return None;
    };
    Some(inner)
}

/// How a field participates in presence detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// `T`: always present.
    Required,
    /// `Option<T>`: present when `Some`.
    Optional,
    /// `Option<Option<T>>`: present when `Some`, `Some(None)` binds NULL.
    Nullable,
}

pub fn presence_of(ty: &syn::Type) -> Presence {
    match option_inner(ty) {
        Some(inner) if option_inner(inner).is_some() => Presence::Nullable,
        Some(_) => Presence::Optional,
        None => Presence::Required,
    }
}
