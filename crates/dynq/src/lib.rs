//! ## Crate layout
//! - `core`: runtime schemas, filter graphs, compilers, query facade, values,
//!   and observability (`dynq-core`).
//! - `macros`: `#[derive(Record)]` and `#[derive(Filter)]` (`dynq-derive`).
//!
//! The `prelude` module is what application code usually imports: the
//! record/filter traits and derives, the query builder, and the in-memory
//! data source.

pub use dynq_core as core;
pub use dynq_derive as macros;

// export so derive output resolves inside this crate too
extern crate self as dynq;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Module re-exports
//
// Derived code refers to `::dynq::traits`, `::dynq::model`, ...
//

pub use dynq_core::{db, error, filter, model, obs, traits, value};
pub use dynq_derive::{Filter, Record};

pub use dynq_core::{
    db::{Direction, FieldQuery, MemorySource, Query, ShapeQuery},
    error::QueryError,
};

///
/// Prelude
/// using _ brings traits into scope and avoids name conflicts
///

pub mod prelude {
    pub use crate::core::{
        db::{DataSource, Direction, MemorySource, Ordered, ProjectedRow, Query, Unordered},
        error::QueryError,
        filter::{FilterNode, FilterValue},
        traits::{FieldValue as _, Filter as _, FilterInput as _, Record as _},
        value::Value,
    };
    pub use crate::macros::{Filter, Record};
}
