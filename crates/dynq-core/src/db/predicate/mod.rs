//! Predicate Compiler.
//!
//! Turns a `FilterNode` into one composable `Predicate` bound to a record
//! model. The AST is schema-bound (every comparison carries resolved field
//! slots) so evaluation never looks names up again.

mod ast;
mod compile;
mod eval;


pub use ast::{CompareOp, ComparePredicate, FieldPath, Predicate};
pub use compile::compile_filter;
