//! Query execution over in-memory tables.

mod select;

pub use select::execute;
