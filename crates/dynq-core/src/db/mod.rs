//! Query composition: the three compilers and the facade wiring them
//! together.
//!
//! Leaves first: `predicate` (filter graphs → `Predicate`), `order`
//! (field names → `OrderSpec`), `projection` (field lists → shapes), then
//! `query`, the public builder.

mod direction;

pub mod order;
pub mod predicate;
pub mod projection;
pub mod query;

pub use direction::Direction;
pub use order::{OrderSpec, SortKey};
pub use predicate::{CompareOp, ComparePredicate, FieldPath, Predicate, compile_filter};
pub use projection::{FieldProjection, ProjectedRow, ShapeProjection};
pub use query::{
    DataSource, FieldQuery, MemorySource, OrderState, Ordered, PlanProjection, Query, QueryPlan,
    ShapeQuery, Unordered,
};
