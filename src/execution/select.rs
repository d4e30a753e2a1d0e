//! SELECT execution: filter, sort, project, limit, in that order.

use crate::error::{Error, Result};
use crate::parsing::{Direction, Query, SelectList};
use crate::types::{evaluator, Expression, Row, Table};
use std::cmp::Ordering;
use tracing::debug;

/// Executes a query against a table, applying the filter, sort, projection,
/// and limit stages in order. The predicate, if any, is the compiled form of
/// the query's WHERE clause.
pub fn execute(table: &Table, query: &Query, predicate: Option<&Expression>) -> Result<Table> {
    let mut rows = filter(table, predicate)?;
    if let Some((column, direction)) = &query.order_by {
        sort(table, &mut rows, column, *direction)?;
    }
    let (columns, mut rows) = project(table, rows, &query.select)?;
    if let Some(limit) = query.limit {
        rows.truncate(limit);
    }
    debug!(rows = rows.len(), "query produced result");
    Ok(Table::projected(columns, rows))
}

/// Applies the WHERE predicate, keeping rows it evaluates to true for.
/// Every column the predicate mentions is checked against the table before
/// any row is evaluated.
fn filter(table: &Table, predicate: Option<&Expression>) -> Result<Vec<Row>> {
    let Some(predicate) = predicate else {
        return Ok(table.rows().to_vec());
    };
    for column in predicate.columns() {
        if table.column_index(column).is_none() {
            return Err(Error::ColumnNotFound(column.to_string()));
        }
    }
    let mut rows = Vec::new();
    for row in table.rows() {
        if evaluator::evaluate(predicate, table.columns(), row)? {
            rows.push(row.clone());
        }
    }
    debug!(input = table.rows().len(), output = rows.len(), "filtered rows");
    Ok(rows)
}

/// Sorts rows by a single column. The sort is stable, so rows with equal
/// keys keep their prior relative order. Nulls order before every other
/// value, so they sort first ascending and last descending.
fn sort(table: &Table, rows: &mut [Row], column: &str, direction: Direction) -> Result<()> {
    let index = table
        .column_index(column)
        .ok_or_else(|| Error::ColumnNotFound(column.to_string()))?;
    // std's sort can't propagate errors, so check that all values in the
    // column are mutually comparable up front.
    if let Some(first) = rows.iter().map(|row| &row[index]).find(|v| !v.is_null()) {
        for row in rows.iter() {
            let value = &row[index];
            if !value.is_null() {
                evaluator::compare(first, value)?;
            }
        }
    }
    rows.sort_by(|a, b| {
        let ordering = evaluator::compare(&a[index], &b[index]).unwrap_or(Ordering::Equal);
        match direction {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    });
    Ok(())
}

/// Projects rows onto the selected columns. `SELECT *` keeps the table's
/// column order; an explicit list uses the given order and may repeat
/// columns. All unknown columns are reported together.
fn project(
    table: &Table,
    rows: Vec<Row>,
    select: &SelectList,
) -> Result<(Vec<String>, Vec<Row>)> {
    let columns = match select {
        SelectList::All => return Ok((table.columns().to_vec(), rows)),
        SelectList::Columns(columns) => columns,
    };
    let mut indexes = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();
    for column in columns {
        match table.column_index(column) {
            Some(index) => indexes.push(index),
            None => missing.push(column.as_str()),
        }
    }
    if !missing.is_empty() {
        return Err(Error::ColumnNotFound(missing.join(", ")));
    }
    let rows = rows
        .into_iter()
        .map(|row| indexes.iter().map(|&i| row[i].clone()).collect())
        .collect();
    Ok((columns.clone(), rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{parse_predicate, parse_query};
    use crate::types::Value;

    fn people() -> Table {
        Table::new(
            vec!["name".into(), "age".into()],
            vec![
                vec![Value::Str("Ann".into()), Value::Integer(30)],
                vec![Value::Str("Bo".into()), Value::Integer(25)],
                vec![Value::Str("Cy".into()), Value::Integer(30)],
            ],
        )
        .unwrap()
    }

    fn run(table: &Table, statement: &str) -> Result<Table> {
        let query = parse_query(statement)?;
        let predicate = query
            .r#where
            .as_deref()
            .map(parse_predicate)
            .transpose()?;
        execute(table, &query, predicate.as_ref())
    }

    #[test]
    fn test_stage_order() {
        // Limit applies after sorting, so it keeps the two oldest.
        let result = run(&people(), "SELECT name FROM people ORDER BY age DESC LIMIT 2").unwrap();
        assert_eq!(
            result.rows(),
            &[
                vec![Value::Str("Ann".into())],
                vec![Value::Str("Cy".into())],
            ]
        );
    }

    #[test]
    fn test_stable_sort() {
        // Ann and Cy tie on age and keep their original order.
        let result = run(&people(), "SELECT name FROM people ORDER BY age ASC").unwrap();
        assert_eq!(
            result.rows(),
            &[
                vec![Value::Str("Bo".into())],
                vec![Value::Str("Ann".into())],
                vec![Value::Str("Cy".into())],
            ]
        );
    }

    #[test]
    fn test_filter_unknown_column_fails_before_rows() {
        let empty = Table::new(vec!["name".into()], vec![]).unwrap();
        assert_eq!(
            run(&empty, "SELECT * FROM t WHERE age > 1"),
            Err(Error::ColumnNotFound("age".into()))
        );
    }

    #[test]
    fn test_project_reports_all_missing() {
        assert_eq!(
            run(&people(), "SELECT name, x, y FROM people"),
            Err(Error::ColumnNotFound("x, y".into()))
        );
    }

    #[test]
    fn test_project_duplicates_column() {
        let result = run(&people(), "SELECT age, age FROM people LIMIT 1").unwrap();
        assert_eq!(result.columns(), &["age".to_string(), "age".to_string()]);
        assert_eq!(
            result.rows(),
            &[vec![Value::Integer(30), Value::Integer(30)]]
        );
    }

    #[test]
    fn test_sort_mixed_kinds_fails() {
        let table = Table::new(
            vec!["v".into()],
            vec![
                vec![Value::Integer(1)],
                vec![Value::Str("two".into())],
            ],
        )
        .unwrap();
        assert!(matches!(
            run(&table, "SELECT * FROM t ORDER BY v ASC"),
            Err(Error::Evaluation(_))
        ));
    }

    #[test]
    fn test_sort_nulls_first() {
        let table = Table::new(
            vec!["v".into()],
            vec![
                vec![Value::Integer(2)],
                vec![Value::Null],
                vec![Value::Integer(1)],
            ],
        )
        .unwrap();
        let result = run(&table, "SELECT * FROM t ORDER BY v ASC").unwrap();
        assert_eq!(
            result.rows(),
            &[
                vec![Value::Null],
                vec![Value::Integer(1)],
                vec![Value::Integer(2)],
            ]
        );
    }
}
