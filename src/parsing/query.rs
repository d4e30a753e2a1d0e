//! Statement parser: splits a SELECT statement into its clauses.
//!
//! The WHERE clause is captured as raw text and handed to the predicate
//! translator separately, so clause scanning here has to be quote-aware
//! but never interprets the predicate itself.

use crate::error::{Error, Result};

/// Sort direction for ORDER BY. The direction keyword is mandatory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// The SELECT list: either `*` or one or more named columns.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectList {
    All,
    Columns(Vec<String>),
}

/// A parsed SELECT statement. The WHERE clause stays verbatim text.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub select: SelectList,
    pub source: String,
    pub r#where: Option<String>,
    pub order_by: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

/// Parses a statement of the form:
///
/// SELECT columns FROM source [WHERE predicate] [ORDER BY column ASC|DESC]
/// [LIMIT count] [;]
pub struct QueryParser<'a> {
    statement: &'a str,
    rest: &'a str,
}

impl<'a> QueryParser<'a> {
    pub fn new(statement: &'a str) -> QueryParser<'a> {
        QueryParser {
            statement,
            rest: statement,
        }
    }

    /// Parses the statement into a query.
    pub fn parse(mut self) -> Result<Query> {
        self.expect_keyword("SELECT")?;
        let select = self.parse_select_list()?;
        self.expect_keyword("FROM")?;
        let source = self.parse_ident("source name")?;
        let mut r#where = None;
        if self.take_keyword("WHERE") {
            r#where = Some(self.parse_where_clause()?);
        }
        let mut order_by = None;
        if self.take_keyword("ORDER") {
            self.expect_keyword("BY")?;
            order_by = Some(self.parse_order_by_clause()?);
        }
        let mut limit = None;
        if self.take_keyword("LIMIT") {
            limit = Some(self.parse_limit_clause()?);
        }
        self.finish()?;
        Ok(Query {
            select,
            source,
            r#where,
            order_by,
            limit,
        })
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::Syntax(format!("{} in query: {}", message.into(), self.statement.trim()))
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    /// Consumes a keyword, case-insensitively and at a word boundary.
    /// Returns whether it was present.
    fn take_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let Some(prefix) = self.rest.get(..keyword.len()) else {
            return false;
        };
        if !prefix.eq_ignore_ascii_case(keyword) {
            return false;
        }
        // Reject a longer word that merely starts with the keyword.
        if self.rest[keyword.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            return false;
        }
        self.rest = &self.rest[keyword.len()..];
        true
    }

    fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if !self.take_keyword(keyword) {
            return Err(self.error(format!("expected {keyword}")));
        }
        Ok(())
    }

    /// Consumes a single symbol character, returning whether it was present.
    fn take_symbol(&mut self, symbol: char) -> bool {
        self.skip_whitespace();
        if !self.rest.starts_with(symbol) {
            return false;
        }
        self.rest = &self.rest[symbol.len_utf8()..];
        true
    }

    /// Parses an identifier (column or source name).
    fn parse_ident(&mut self, what: &str) -> Result<String> {
        self.skip_whitespace();
        let ident: String = self
            .rest
            .chars()
            .take_while(|&c| c.is_alphanumeric() || c == '_')
            .collect();
        if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.error(format!("expected {what}")));
        }
        self.rest = &self.rest[ident.len()..];
        Ok(ident)
    }

    /// Parses `*` or a comma-separated column list.
    fn parse_select_list(&mut self) -> Result<SelectList> {
        if self.take_symbol('*') {
            return Ok(SelectList::All);
        }
        let mut columns = vec![self.parse_ident("column name")?];
        while self.take_symbol(',') {
            columns.push(self.parse_ident("column name")?);
        }
        Ok(SelectList::Columns(columns))
    }

    /// Captures the WHERE predicate verbatim, up to a trailing ORDER BY,
    /// LIMIT, or `;`. Quoted strings may contain those words, so the scan
    /// must track quoting.
    fn parse_where_clause(&mut self) -> Result<String> {
        self.skip_whitespace();
        let text = self.rest;
        let mut end = text.len();
        let mut quote: Option<char> = None;
        let mut boundary = true;
        for (i, c) in text.char_indices() {
            match quote {
                Some(q) if c == q => quote = None,
                Some(_) => continue,
                None if c == '\'' || c == '"' => quote = Some(c),
                None => {
                    if boundary && Self::clause_starts_at(&text[i..]) {
                        end = i;
                        break;
                    }
                    if c == ';' {
                        end = i;
                        break;
                    }
                }
            }
            boundary = !(c.is_alphanumeric() || c == '_');
        }
        let predicate = text[..end].trim();
        if predicate.is_empty() {
            return Err(self.error("expected predicate after WHERE"));
        }
        self.rest = &text[end..];
        Ok(predicate.to_string())
    }

    /// Does the remaining text begin with an ORDER or LIMIT clause keyword?
    fn clause_starts_at(text: &str) -> bool {
        for keyword in ["ORDER", "LIMIT"] {
            let Some(prefix) = text.get(..keyword.len()) else {
                continue;
            };
            if prefix.eq_ignore_ascii_case(keyword)
                && !text[keyword.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_')
            {
                return true;
            }
        }
        false
    }

    /// Parses the column and mandatory direction after ORDER BY.
    fn parse_order_by_clause(&mut self) -> Result<(String, Direction)> {
        let column = self.parse_ident("column name after ORDER BY")?;
        let direction = if self.take_keyword("ASC") {
            Direction::Asc
        } else if self.take_keyword("DESC") {
            Direction::Desc
        } else {
            return Err(self.error("expected ASC or DESC after ORDER BY column"));
        };
        Ok((column, direction))
    }

    /// Parses the row count after LIMIT. Must be a plain non-negative integer.
    fn parse_limit_clause(&mut self) -> Result<usize> {
        self.skip_whitespace();
        let digits: String = self
            .rest
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        let count = digits
            .parse::<usize>()
            .map_err(|_| self.error("expected row count after LIMIT"))?;
        self.rest = &self.rest[digits.len()..];
        // A trailing word character means the count was not a plain integer.
        if self
            .rest
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            return Err(self.error("expected row count after LIMIT"));
        }
        Ok(count)
    }

    /// Consumes an optional trailing `;` and errors on any leftover input.
    fn finish(&mut self) -> Result<()> {
        self.take_symbol(';');
        self.skip_whitespace();
        if !self.rest.is_empty() {
            return Err(self.error(format!("unexpected input {}", self.rest)));
        }
        Ok(())
    }
}
