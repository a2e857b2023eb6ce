use crate::util::{NamedField, parse_named_struct, where_clause_with_bounds};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::Error;

// derive_record
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = match parse_named_struct(input, "Record") {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };
    if let Err(err) = check_unique_names(&input.fields) {
        return err.to_compile_error();
    }

    let ident = &input.ident;
    let type_name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // field bounds only for generic records; concrete ones may be recursive
    let mut bounds: Vec<TokenStream> = Vec::new();
    if !input.generics.params.is_empty() {
        bounds.extend(input.fields.iter().map(|field| {
            let ty = &field.ty;
            quote!(#ty: ::dynq::traits::FieldValue)
        }));
        bounds.push(quote!(Self: 'static));
    }
    let where_clause = where_clause_with_bounds(where_clause, &bounds);

    let field_models = input.fields.iter().map(|field| {
        let name = &field.name;
        let ty = &field.ty;

        quote! {
            ::dynq::model::FieldModel::new(
                #name,
                <#ty as ::dynq::traits::FieldValue>::kind(),
            )
        }
    });

    let to_values = input.fields.iter().map(|field| {
        let field_ident = &field.ident;
        quote!(::dynq::traits::FieldValue::to_value(&self.#field_ident))
    });

    let value_at_arms = input.fields.iter().enumerate().map(|(slot, field)| {
        let field_ident = &field.ident;
        quote! {
            #slot => ::dynq::traits::FieldValue::value_at(&self.#field_ident, rest),
        }
    });

    quote! {
        impl #impl_generics ::dynq::traits::Record for #ident #ty_generics #where_clause {
            const PATH: &'static str = ::core::concat!(::core::module_path!(), "::", #type_name);

            fn describe() -> ::dynq::model::RecordModel {
                ::dynq::model::RecordModel::from_validated(
                    <Self as ::dynq::traits::Record>::PATH,
                    #type_name,
                    ::std::vec![#(#field_models),*],
                )
            }
        }

        impl #impl_generics ::dynq::traits::FieldValue for #ident #ty_generics #where_clause {
            fn kind() -> ::dynq::model::FieldKind {
                ::dynq::model::FieldKind::Record(<Self as ::dynq::traits::Record>::model_ref())
            }

            fn to_value(&self) -> ::dynq::value::Value {
                ::dynq::value::Value::Record(::std::vec![#(#to_values),*])
            }

            #[allow(unused_variables)]
            fn value_at(&self, path: &[usize]) -> ::core::option::Option<::dynq::value::Value> {
                let ::core::option::Option::Some((slot, rest)) = path.split_first() else {
                    return ::core::option::Option::Some(::dynq::traits::FieldValue::to_value(self));
                };

                match *slot {
                    #(#value_at_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}

// Runtime lookup is case-insensitive, so names that differ only by case
// would be ambiguous.
fn check_unique_names(fields: &[NamedField]) -> Result<(), Error> {
    let mut seen: HashMap<String, &NamedField> = HashMap::with_capacity(fields.len());

    for field in fields {
        if let Some(first) = seen.insert(field.name.to_lowercase(), field) {
            return Err(Error::new_spanned(
                &field.ident,
                format!(
                    "field name `{}` collides with `{}`; record field names must be unique ignoring case",
                    field.name, first.name
                ),
            ));
        }
    }

    Ok(())
}
