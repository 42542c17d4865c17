use proc_macro::TokenStream;

mod label;
mod pat;

/// Matches a union value arm by arm. Documented in `tvariant`.
#[proc_macro]
pub fn match_variant(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as pat::VariantMatch);
    pat::expand_match(input).into()
}

/// Implements `tvariant::Label` for a unit struct.
#[proc_macro_derive(Label, attributes(label))]
pub fn derive_label(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    label::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
