//! In-memory tables.

use super::value::Row;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An ordered set of named columns plus an ordered sequence of rows sharing
/// that column set.
///
/// Invariants, enforced by [`Table::new`]: column names are unique and
/// non-empty, and every row holds exactly one value per column. Queries never
/// mutate a table; the executor produces a new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::InvalidInput("table has no columns".into()));
        }
        for (i, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(Error::InvalidInput("empty column name".into()));
            }
            if columns[..i].contains(column) {
                return Err(Error::InvalidInput(format!("duplicate column: {column}")));
            }
        }
        for row in &rows {
            if row.len() != columns.len() {
                return Err(Error::InvalidInput(format!(
                    "row has {} values, expected {}",
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    /// Builds a projection result without the uniqueness check, since a
    /// select list may name the same column twice. The caller guarantees
    /// the row widths match.
    pub(crate) fn projected(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Position of the named column, if present. Column names are
    /// case-sensitive.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }
}
