use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{ext::IdentExt, Data, DeriveInput, Expr, ExprLit, Fields, Lit, Meta};

pub fn expand(input: DeriveInput) -> syn::Result<TokenStream> {
    let DeriveInput {
        attrs,
        ident,
        generics,
        data,
        ..
    } = input;

    match data {
        Data::Struct(s) if matches!(s.fields, Fields::Unit) => {}
        _ => {
            return Err(syn::Error::new_spanned(
                &ident,
                "labels must be unit structs, as in `struct Nothing;`",
            ))
        }
    }
    if !generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            generics,
            "labels cannot be generic",
        ));
    }

    let mut name = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("label")) {
        let Meta::NameValue(nv) = &attr.meta else {
            return Err(syn::Error::new_spanned(
                attr,
                "expected `#[label = \"...\"]`",
            ));
        };
        let Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) = &nv.value
        else {
            return Err(syn::Error::new_spanned(
                &nv.value,
                "label names must be string literals",
            ));
        };
        if name.is_some() {
            return Err(syn::Error::new_spanned(attr, "duplicate label name"));
        }
        if s.value().is_empty() {
            return Err(syn::Error::new_spanned(s, "label names cannot be empty"));
        }
        name = Some(s.value());
    }
    let name = name.unwrap_or_else(|| ident.unraw().to_string().to_case(Case::Snake));

    Ok(quote! {
        impl ::tvariant::Label for #ident {
            const NAME: &'static str = #name;
        }
    })
}
