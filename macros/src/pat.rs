use const_random::const_random;
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, ToTokens};
use syn::{ext::IdentExt, parse::Parse, spanned::Spanned, visit::Visit, *};

/// Finds out whether a payload pattern always matches.
///
/// Only bindings, wildcards and tuples of them count. Anything else might be
/// a constant or an enum variant, so it is treated as refutable.
struct Irrefutable(bool);

/// Labels are types, so an identifier naming one starts with a capital.
fn is_label_ident(ident: &Ident) -> bool {
    ident.unraw().to_string().starts_with(char::is_uppercase)
}

impl Visit<'_> for Irrefutable {
    fn visit_pat(&mut self, i: &'_ Pat) {
        match i {
            Pat::Ident(pi) if pi.subpat.is_some() || !is_label_ident(&pi.ident) => {
                visit::visit_pat(self, i)
            }
            Pat::Wild(_) | Pat::Rest(_) => {}
            Pat::Tuple(_) | Pat::Paren(_) | Pat::Type(_) => visit::visit_pat(self, i),
            _ => self.0 = false,
        }
    }
}

enum ArmKind {
    Label {
        label: Path,
        payload: Pat,
        irrefutable: bool,
    },
    CatchAll(Pat),
}

pub struct VariantArm {
    kind: ArmKind,
    guard: Option<Box<Expr>>,
    body: Box<Expr>,
}

fn label_arm(label: Path, payload: Pat) -> ArmKind {
    let mut check = Irrefutable(true);
    check.visit_pat(&payload);
    ArmKind::Label {
        label,
        payload,
        irrefutable: check.0,
    }
}

fn wildcard() -> Pat {
    Pat::Wild(PatWild {
        attrs: Vec::new(),
        underscore_token: Default::default(),
    })
}

impl Parse for VariantArm {
    fn parse(input: syn::parse::ParseStream<'_>) -> syn::Result<Self> {
        let Arm {
            attrs,
            pat,
            guard,
            body,
            ..
        } = input.parse()?;

        if let Some(attr) = attrs.first() {
            return Err(syn::Error::new_spanned(
                attr,
                "custom attributes are not supported on match arms",
            ));
        }

        let kind = match pat {
            Pat::TupleStruct(PatTupleStruct {
                qself: None,
                path,
                elems,
                ..
            }) => {
                let mut elems = elems.into_iter();
                match (elems.next(), elems.next()) {
                    (Some(Pat::Rest(_)), None) => label_arm(path, wildcard()),
                    (Some(payload), None) => label_arm(path, payload),
                    _ => {
                        return Err(syn::Error::new_spanned(
                            path,
                            "a label pattern takes exactly one payload pattern",
                        ))
                    }
                }
            }
            Pat::Path(PatPath {
                qself: None, path, ..
            }) => label_arm(path, wildcard()),
            Pat::Ident(pi)
                if pi.subpat.is_none()
                    && pi.by_ref.is_none()
                    && pi.mutability.is_none()
                    && is_label_ident(&pi.ident) =>
            {
                label_arm(Path::from(pi.ident), wildcard())
            }
            pat @ (Pat::Ident(PatIdent { subpat: None, .. }) | Pat::Wild(_)) => {
                if let Some((_, guard)) = &guard {
                    return Err(syn::Error::new_spanned(
                        guard,
                        "guards are not supported on catch-all arms",
                    ));
                }
                ArmKind::CatchAll(pat)
            }
            pat => {
                return Err(syn::Error::new_spanned(
                    &pat,
                    format_args!(
                        "pattern `{}` is not supported; expected `Label`, `Label(payload)` or a catch-all",
                        pat.to_token_stream()
                    ),
                ))
            }
        };

        Ok(VariantArm {
            kind,
            guard: guard.map(|g| g.1),
            body,
        })
    }
}

pub struct VariantMatch {
    expr: Box<Expr>,
    arms: Vec<VariantArm>,
}

impl Parse for VariantMatch {
    fn parse(input: syn::parse::ParseStream<'_>) -> syn::Result<Self> {
        let expr = Box::new(Expr::parse_without_eager_brace(input)?);

        let content;
        syn::braced!(content in input);

        let mut arms = Vec::new();
        while !content.is_empty() {
            arms.push(content.parse()?);
        }

        Ok(VariantMatch { expr, arms })
    }
}

fn check_arms(arms: &[VariantArm]) -> syn::Result<()> {
    let mut handled: Vec<String> = Vec::new();
    for (index, arm) in arms.iter().enumerate() {
        match &arm.kind {
            ArmKind::CatchAll(pat) => {
                if index + 1 < arms.len() {
                    return Err(syn::Error::new(
                        pat.span(),
                        "the catch-all arm must be the last arm",
                    ));
                }
            }
            ArmKind::Label {
                label, irrefutable, ..
            } => {
                let key = label.to_token_stream().to_string();
                if handled.contains(&key) {
                    return Err(syn::Error::new_spanned(
                        label,
                        format_args!("label `{key}` is already handled by an earlier arm"),
                    ));
                }
                if *irrefutable && arm.guard.is_none() {
                    handled.push(key);
                }
            }
        }
    }
    Ok(())
}

pub fn expand_match(data: VariantMatch) -> TokenStream {
    let VariantMatch { expr, mut arms } = data;
    if let Err(err) = check_arms(&arms) {
        return err.to_compile_error();
    }

    let span = Span::mixed_site();
    let base = format_ident!("__variant_match_base{}", const_random!(u32), span = span);
    let value = Ident::new("value", span);
    let label_value = Ident::new("label", span);
    let payload_value = Ident::new("payload", span);
    let ret = Ident::new("ret", span);

    let ok = quote!(::core::result::Result::Ok);
    let err = quote!(::core::result::Result::Err);

    // Arms are expanded back to front, each one wrapping the arms after it.
    let mut rest = match arms.pop() {
        Some(VariantArm {
            kind: ArmKind::CatchAll(pat),
            body,
            ..
        }) => quote! {{
            let #pat = #base;
            #body
        }},
        last => {
            arms.extend(last);
            quote! {{
                let #base: ::tvariant::Sum<()> = #base;
                #base.unreachable()
            }}
        }
    };

    for arm in arms.into_iter().rev() {
        let VariantArm { kind, guard, body } = arm;
        rest = match kind {
            ArmKind::CatchAll(_) => continue,
            ArmKind::Label {
                label,
                payload,
                irrefutable: true,
            } if guard.is_none() => quote! {
                match #base.try_unwrap::<#label, _>() {
                    #ok(#value) => {
                        let #payload = #value.into_payload();
                        #body
                    }
                    #err(#base) => #rest,
                }
            },
            ArmKind::Label { label, payload, .. } => {
                let guard = guard.map(|guard| quote!(if #guard));
                quote! {
                    match match #base.take::<#label, _>() {
                        #ok(#value) => {
                            let (#label_value, #payload_value) = #value.into_parts();
                            match #payload_value {
                                #[allow(unreachable_code)]
                                #payload #guard => #ok({ #body }),
                                #[allow(unreachable_patterns)]
                                #payload_value => #err(::tvariant::Sum::of(#label_value, #payload_value)),
                            }
                        }
                        #err(#base) => #err(#base),
                    } {
                        #ok(#ret) => #ret,
                        #err(#base) => #rest,
                    }
                }
            }
        };
    }

    quote! {{
        let #base = #expr;
        #rest
    }}
}
