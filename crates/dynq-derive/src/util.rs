use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Fields, Generics, Ident, LitStr, Type, WhereClause,
};

///
/// NamedStruct
///

pub struct NamedStruct {
    pub ident: Ident,
    pub generics: Generics,
    pub fields: Vec<NamedField>,
}

///
/// NamedField
///
/// `name` is the runtime field name: the identifier, or the
/// `#[dynq(rename = "..")]` override.
///

pub struct NamedField {
    pub ident: Ident,
    pub name: String,
    pub ty: Type,
}

/// Parse a struct with named fields, dropping `#[dynq(skip)]` fields.
pub fn parse_named_struct(input: TokenStream, label: &str) -> Result<NamedStruct, Error> {
    let input: DeriveInput = syn::parse2(input)?;
    let message = format!("{label} can only be derived for structs with named fields");

    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            other => return Err(Error::new_spanned(other, message)),
        },
        _ => return Err(Error::new_spanned(&input.ident, message)),
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.clone() else {
            return Err(Error::new_spanned(field, message));
        };

        let mut name = ident.to_string();
        let mut skip = false;
        for attr in field.attrs.iter().filter(|attr| attr.path().is_ident("dynq")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    let lit: LitStr = meta.value()?.parse()?;
                    name = lit.value();
                    Ok(())
                } else {
                    Err(meta.error("expected `rename = \"..\"` or `skip`"))
                }
            })?;
        }

        if !skip {
            fields.push(NamedField {
                ident,
                name,
                ty: field.ty.clone(),
            });
        }
    }

    Ok(NamedStruct {
        ident: input.ident,
        generics: input.generics,
        fields,
    })
}

pub fn where_clause_with_bounds(
    where_clause: Option<&WhereClause>,
    bounds: &[TokenStream],
) -> TokenStream {
    if bounds.is_empty() {
        return where_clause
            .as_ref()
            .map_or_else(|| quote!(), |wc| quote!(#wc));
    }

    if let Some(wc) = where_clause {
        let preds = &wc.predicates;
        quote!(where #preds, #(#bounds),*)
    } else {
        quote!(where #(#bounds),*)
    }
}
