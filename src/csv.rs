//! Loads comma-separated text into a table and formats results back out.
//!
//! This is deliberately minimal: no quoting, no embedded commas, one record
//! per line. Column types are inferred from the data.

use crate::error::{Error, Result};
use crate::types::{Row, Table, Value};

/// The inferred type of a column. A column is the narrowest kind that every
/// non-empty cell in it fits.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Kind {
    Integer,
    Float,
    Bool,
    Str,
}

/// Parses CSV text into a table. The first line is the header. Empty cells
/// become nulls and don't affect the column's inferred kind.
pub fn parse_csv(input: &str) -> Result<Table> {
    let mut lines = input.lines().filter(|line| !line.trim().is_empty());
    let Some(header) = lines.next() else {
        return Err(Error::InvalidInput("input has no header line".into()));
    };
    let columns: Vec<String> = header.split(',').map(|name| name.trim().to_string()).collect();
    let mut records = Vec::new();
    for (number, line) in lines.enumerate() {
        let cells: Vec<&str> = line.split(',').map(str::trim).collect();
        if cells.len() != columns.len() {
            return Err(Error::InvalidInput(format!(
                "line {} has {} fields, expected {}",
                number + 2,
                cells.len(),
                columns.len()
            )));
        }
        records.push(cells.iter().map(|cell| cell.to_string()).collect::<Vec<_>>());
    }
    let kinds: Vec<Kind> = (0..columns.len())
        .map(|i| infer_kind(records.iter().map(|record| record[i].as_str())))
        .collect();
    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            record
                .iter()
                .zip(&kinds)
                .map(|(cell, &kind)| convert(cell, kind))
                .collect()
        })
        .collect();
    Table::new(columns, rows)
}

/// Infers the kind of a column from its non-empty cells: each cell is
/// classified on its own, then the classifications merge. Integer and Float
/// merge to Float; any other mix falls back to Str, as does an empty column.
fn infer_kind<'a>(cells: impl Iterator<Item = &'a str>) -> Kind {
    let mut kind = None;
    for cell in cells.filter(|cell| !cell.is_empty()) {
        let next = classify(cell);
        kind = Some(match kind {
            None => next,
            Some(kind) if kind == next => kind,
            Some(Kind::Integer | Kind::Float) if matches!(next, Kind::Integer | Kind::Float) => {
                Kind::Float
            }
            Some(_) => return Kind::Str,
        });
    }
    kind.unwrap_or(Kind::Str)
}

/// Classifies a single non-empty cell.
fn classify(cell: &str) -> Kind {
    if cell.parse::<i64>().is_ok() {
        Kind::Integer
    } else if cell.parse::<f64>().is_ok() {
        Kind::Float
    } else if is_bool(cell) {
        Kind::Bool
    } else {
        Kind::Str
    }
}

fn is_bool(cell: &str) -> bool {
    cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("false")
}

/// Converts one cell to a value of the column's kind. Inference has already
/// proven the parse succeeds, but fall back to Str rather than panic.
fn convert(cell: &str, kind: Kind) -> Value {
    if cell.is_empty() {
        return Value::Null;
    }
    match kind {
        Kind::Integer => cell.parse().map_or_else(|_| Value::Str(cell.into()), Value::Integer),
        Kind::Float => cell.parse().map_or_else(|_| Value::Str(cell.into()), Value::Float),
        Kind::Bool => Value::Bool(cell.eq_ignore_ascii_case("true")),
        Kind::Str => Value::Str(cell.into()),
    }
}

/// Formats a table as CSV text, one line per row plus the header. Nulls
/// render as empty cells.
pub fn format_csv(table: &Table) -> String {
    let mut output = table.columns().join(",");
    output.push('\n');
    for row in table.rows() {
        let line: Vec<String> = row.iter().map(|value| value.to_string()).collect();
        output.push_str(&line.join(","));
        output.push('\n');
    }
    output
}
