//! Core data model: values, tables, and compiled predicates.

pub mod evaluator;
mod expression;
mod table;
mod value;

pub use expression::{CompareOp, Expression};
pub use table::Table;
pub use value::{Row, Value};
