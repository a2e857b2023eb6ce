//! Runtime schema definitions.
//!
//! Types in `model` describe the shape of record types at runtime: what
//! fields exist, in what order, and of which kind. Every compiler resolves
//! field names through `RecordModel`, so this is the one place that decides
//! how a name maps to a field.
//!
//! In general:
//! - `#[derive(Record)]` declares *what exists*
//! - `model` is *what the compilers consult*

mod field;
mod record;
mod registry;


pub use field::{FieldKind, FieldModel, ModelRef};
pub use record::{RecordModel, ResolvedField};
pub use registry::{registered_count, schema_of};

pub(crate) use record::casefold;
