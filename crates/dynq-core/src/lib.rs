//! Core runtime for dynq: record schemas, filter graphs, the predicate, sort
//! and projection compilers, and the query facade that hands composed
//! queries to a data source.
#![warn(unreachable_pub)]

extern crate self as dynq;

// public exports are one module level down
pub mod db;
pub mod error;
pub mod filter;
pub mod model;
pub mod obs;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary: record and filter traits, the
/// query builder and its collaborator seam.
///

pub mod prelude {
    pub use crate::{
        db::{DataSource, Direction, MemorySource, Query},
        error::QueryError,
        filter::FilterNode,
        traits::{FieldValue, Filter, FilterInput, Record},
        value::Value,
    };
}
