use crate::util::{parse_named_struct, where_clause_with_bounds};
use proc_macro2::TokenStream;
use quote::quote;

// derive_filter
pub fn derive_filter(input: TokenStream) -> TokenStream {
    let input = match parse_named_struct(input, "Filter") {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let bounds: Vec<TokenStream> = if input.generics.params.is_empty() {
        Vec::new()
    } else {
        input
            .fields
            .iter()
            .map(|field| {
                let ty = &field.ty;
                quote!(#ty: ::dynq::traits::FilterInput)
            })
            .collect()
    };
    let where_clause = where_clause_with_bounds(where_clause, &bounds);

    let inserts = input.fields.iter().map(|field| {
        let field_ident = &field.ident;
        let name = &field.name;

        quote! {
            node.insert(
                #name,
                ::dynq::traits::FilterInput::to_filter_value(&self.#field_ident),
            );
        }
    });

    quote! {
        impl #impl_generics ::dynq::traits::Filter for #ident #ty_generics #where_clause {
            fn to_filter_node(&self) -> ::dynq::filter::FilterNode {
                #[allow(unused_mut)]
                let mut node = ::dynq::filter::FilterNode::new();
                #(#inserts)*
                node
            }
        }

        impl #impl_generics ::dynq::traits::FilterInput for #ident #ty_generics #where_clause {
            fn to_filter_value(&self) -> ::dynq::filter::FilterValue {
                ::dynq::filter::FilterValue::Node(::dynq::traits::Filter::to_filter_node(self))
            }
        }
    }
}
