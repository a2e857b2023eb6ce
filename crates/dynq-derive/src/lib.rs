//! Derives for dynq record and filter types.
//!
//! Generated code refers to `::dynq`, so these derives are used through the
//! `dynq` facade crate (or `dynq-core`, which aliases itself as `dynq`).

use proc_macro::TokenStream;

mod filter;
mod record;
mod util;

/// Implement `Record` and `FieldValue`: a runtime schema listing every field
/// in declaration order, plus slot-based value access.
///
/// Field attributes: `#[dynq(rename = "Name")]`, `#[dynq(skip)]`.
#[proc_macro_derive(Record, attributes(dynq))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input.into()).into()
}

/// Implement `Filter` and `FilterInput`: each field becomes one filter entry
/// (`None` → no constraint, `Vec` → membership set, nested filter → node).
#[proc_macro_derive(Filter, attributes(dynq))]
pub fn derive_filter(input: TokenStream) -> TokenStream {
    filter::derive_filter(input.into()).into()
}
