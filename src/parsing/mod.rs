//! Parsing: statement clause splitting and predicate translation.
//!
//! A query is parsed in two steps. [`parse_query`] splits the statement into
//! clauses, keeping the WHERE text verbatim. [`parse_predicate`] then turns
//! that text into an [`Expression`](crate::types::Expression) tree.

mod lexer;
mod predicate;
mod query;

pub use lexer::{Keyword, Lexer, Token};
pub use predicate::PredicateParser;
pub use query::{Direction, Query, QueryParser, SelectList};

use crate::error::Result;
use crate::types::Expression;

/// Parses a SELECT statement into a [`Query`].
pub fn parse_query(statement: &str) -> Result<Query> {
    QueryParser::new(statement).parse()
}

/// Parses WHERE clause text into an [`Expression`].
pub fn parse_predicate(input: &str) -> Result<Expression> {
    PredicateParser::new(input).parse()
}
