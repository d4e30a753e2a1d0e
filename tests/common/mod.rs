//! Common test utilities for query integration tests
#![allow(dead_code)]

use tabsql::{Result, Row, Table, Value};

/// Builds a table from typed literal rows.
pub struct TableBuilder {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl TableBuilder {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, values: Vec<Value>) -> Self {
        self.rows.push(values);
        self
    }

    pub fn build(self) -> Table {
        Table::new(self.columns, self.rows).unwrap()
    }
}

/// A small people table used across the test files:
/// (Ann, 30), (Bo, 25), (Cy, 30).
pub fn people() -> Table {
    TableBuilder::new(&["name", "age"])
        .row(vec![Value::Str("Ann".into()), Value::Integer(30)])
        .row(vec![Value::Str("Bo".into()), Value::Integer(25)])
        .row(vec![Value::Str("Cy".into()), Value::Integer(30)])
        .build()
}

/// A table exercising every value kind, including nulls.
pub fn inventory() -> Table {
    TableBuilder::new(&["item", "qty", "price", "tracked"])
        .row(vec![
            Value::Str("bolt".into()),
            Value::Integer(100),
            Value::Float(0.25),
            Value::Bool(true),
        ])
        .row(vec![
            Value::Str("nut".into()),
            Value::Integer(80),
            Value::Float(0.10),
            Value::Bool(false),
        ])
        .row(vec![
            Value::Str("washer".into()),
            Value::Null,
            Value::Float(0.05),
            Value::Bool(true),
        ])
        .row(vec![
            Value::Str("screw".into()),
            Value::Integer(40),
            Value::Null,
            Value::Bool(true),
        ])
        .build()
}

/// Runs a single statement against a table.
pub fn run(table: &Table, statement: &str) -> Result<Table> {
    tabsql::execute_query(table, statement)
}

/// Runs a statement and returns the result's row count.
pub fn count(table: &Table, statement: &str) -> usize {
    run(table, statement).unwrap().rows().len()
}

/// Runs a statement and returns the values of the only selected column.
pub fn column_values(table: &Table, statement: &str) -> Vec<Value> {
    let result = run(table, statement).unwrap();
    assert_eq!(result.columns().len(), 1, "expected a one-column result");
    result.rows().iter().map(|row| row[0].clone()).collect()
}

/// Shorthand string value.
pub fn s(value: &str) -> Value {
    Value::Str(value.into())
}
