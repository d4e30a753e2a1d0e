//! Error types for the query engine

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every failure is scoped to the single statement being processed; a bad
/// statement never aborts the rest of a batch, and nothing is retried (all
/// errors are deterministic given the statement text and the table).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The statement does not match the query grammar.
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// The WHERE clause text could not be translated into a predicate.
    #[error("Invalid predicate: {0}")]
    Predicate(String),

    /// A column named in SELECT, WHERE, or ORDER BY is absent from the table.
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// A comparison combined incompatible value kinds at evaluation time.
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// Malformed tabular input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
