//! Tests for SELECT list projection.

mod common;

use common::{people, run, s};
use tabsql::{Error, Value};

#[test]
fn test_star_keeps_everything() {
    let table = people();
    let result = run(&table, "SELECT * FROM t").unwrap();
    assert_eq!(result, table);
}

#[test]
fn test_subset_in_requested_order() {
    let result = run(&people(), "SELECT age, name FROM t LIMIT 1").unwrap();
    assert_eq!(result.columns(), &["age".to_string(), "name".to_string()]);
    assert_eq!(result.rows(), &[vec![Value::Integer(30), s("Ann")]]);
}

#[test]
fn test_duplicated_column() {
    let result = run(&people(), "SELECT name, name FROM t LIMIT 1").unwrap();
    assert_eq!(result.columns(), &["name".to_string(), "name".to_string()]);
    assert_eq!(result.rows(), &[vec![s("Ann"), s("Ann")]]);
}

#[test]
fn test_all_missing_columns_reported_together() {
    assert_eq!(
        run(&people(), "SELECT name, x, y FROM t"),
        Err(Error::ColumnNotFound("x, y".into()))
    );
}

#[test]
fn test_projection_happens_after_filter_and_sort() {
    // Filtering and sorting use the full table even when the projected
    // result omits the columns they touch.
    let result = run(&people(), "SELECT name FROM t WHERE age > 20 ORDER BY age ASC").unwrap();
    assert_eq!(
        result.rows(),
        &[vec![s("Bo")], vec![s("Ann")], vec![s("Cy")]]
    );
}

#[test]
fn test_column_names_are_case_sensitive() {
    assert_eq!(
        run(&people(), "SELECT Name FROM t"),
        Err(Error::ColumnNotFound("Name".into()))
    );
}
