//! A small SQL-subset query engine over in-memory tables.
//!
//! Statements of the form `SELECT ... FROM ... [WHERE ...] [ORDER BY ...]
//! [LIMIT ...]` are parsed, their WHERE clause compiled to a predicate
//! expression, and executed against a [`Table`] as a fixed filter, sort,
//! project, limit pipeline. Tables are typically loaded from CSV text via
//! [`csv::parse_csv`].

pub mod csv;
pub mod error;
pub mod execution;
pub mod parsing;
pub mod types;

pub use error::{Error, Result};
pub use types::{Row, Table, Value};

use tracing::debug;

/// Parses and executes a single statement against a table.
pub fn execute_query(table: &Table, statement: &str) -> Result<Table> {
    debug!(statement, "executing query");
    let query = parsing::parse_query(statement)?;
    let predicate = query
        .r#where
        .as_deref()
        .map(parsing::parse_predicate)
        .transpose()?;
    execution::execute(table, &query, predicate.as_ref())
}

/// Executes a batch of semicolon-separated statements. Each statement gets
/// its own result; a failure doesn't stop the rest of the batch. Empty
/// statements are skipped.
pub fn execute_batch<'a>(table: &Table, input: &'a str) -> Vec<(&'a str, Result<Table>)> {
    input
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(|statement| (statement, execute_query(table, statement)))
        .collect()
}
