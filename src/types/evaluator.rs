//! Value comparison kernels and predicate evaluation.
//!
//! Null semantics are deliberately minimal and two-valued, not SQL's
//! three-valued logic: `Null = Null` is true, `Null = x` is false for any
//! other x, and `!=` is the plain negation of `=`. Ordering operators
//! (`< > <= >=`) are only defined for strings and numerics; applying them to
//! Boolean or Null operands is an evaluation error.

use super::expression::{CompareOp, Expression};
use super::value::Value;
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Tests two values for equality. Integer and Float cross-compare by numeric
/// value; otherwise kinds must match exactly.
pub fn equal(left: &Value, right: &Value) -> Result<bool> {
    match (left, right) {
        (Value::Null, Value::Null) => Ok(true),
        (Value::Null, _) | (_, Value::Null) => Ok(false),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Integer(a), Value::Integer(b)) => Ok(a == b),
        (Value::Float(a), Value::Float(b)) => Ok(a == b),
        (Value::Integer(a), Value::Float(b)) => Ok(*a as f64 == *b),
        (Value::Float(a), Value::Integer(b)) => Ok(*a == *b as f64),
        (Value::Str(a), Value::Str(b)) => Ok(a == b),
        (a, b) => Err(Error::Evaluation(format!("cannot compare {a:?} and {b:?}"))),
    }
}

/// Compares two values for ordering. Total over compatible kinds: Null
/// orders before any other value, booleans order false before true, Integer
/// and Float cross-compare numerically, strings compare lexicographically.
/// Incompatible kinds are an evaluation error. The sort stage relies on this
/// directly; predicate ordering operators go through [`evaluate`], which is
/// stricter about Boolean and Null operands.
pub fn compare(left: &Value, right: &Value) -> Result<Ordering> {
    match (left, right) {
        (Value::Null, Value::Null) => Ok(Ordering::Equal),
        (Value::Null, _) => Ok(Ordering::Less),
        (_, Value::Null) => Ok(Ordering::Greater),
        (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => Ok(compare_floats(*a, *b)),
        (Value::Integer(a), Value::Float(b)) => Ok(compare_floats(*a as f64, *b)),
        (Value::Float(a), Value::Integer(b)) => Ok(compare_floats(*a, *b as f64)),
        (a, b) => Err(Error::Evaluation(format!("cannot compare {a:?} and {b:?}"))),
    }
}

/// NaN never equals anything; order it after regular numbers.
fn compare_floats(a: f64, b: f64) -> Ordering {
    match a.partial_cmp(&b) {
        Some(ordering) => ordering,
        None if a.is_nan() && b.is_nan() => Ordering::Equal,
        None if a.is_nan() => Ordering::Greater,
        None => Ordering::Less,
    }
}

/// Ordering for the `< > <= >=` predicate operators: strings and numerics
/// only.
fn ordering(left: &Value, right: &Value) -> Result<Ordering> {
    if matches!(left, Value::Null | Value::Bool(_)) || matches!(right, Value::Null | Value::Bool(_))
    {
        return Err(Error::Evaluation(format!(
            "ordering is not defined for {left:?} and {right:?}"
        )));
    }
    compare(left, right)
}

/// Evaluates a predicate against one row, given the owning table's column
/// list. AND/OR short-circuit; IN short-circuits on the first match.
///
/// The executor validates every referenced column against the table before
/// evaluation begins, so a missing column here indicates a row that does not
/// belong to the table.
pub fn evaluate(expr: &Expression, columns: &[String], row: &[Value]) -> Result<bool> {
    match expr {
        Expression::Comparison(column, op, literal) => {
            let value = lookup(column, columns, row)?;
            match op {
                CompareOp::Equal => equal(value, literal),
                CompareOp::NotEqual => equal(value, literal).map(|eq| !eq),
                CompareOp::LessThan => ordering(value, literal).map(|o| o == Ordering::Less),
                CompareOp::LessOrEqual => ordering(value, literal).map(|o| o != Ordering::Greater),
                CompareOp::GreaterThan => ordering(value, literal).map(|o| o == Ordering::Greater),
                CompareOp::GreaterOrEqual => ordering(value, literal).map(|o| o != Ordering::Less),
            }
        }
        Expression::InSet(column, set) => {
            let value = lookup(column, columns, row)?;
            for literal in set {
                if equal(value, literal)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Expression::And(lhs, rhs) => {
            Ok(evaluate(lhs, columns, row)? && evaluate(rhs, columns, row)?)
        }
        Expression::Or(lhs, rhs) => Ok(evaluate(lhs, columns, row)? || evaluate(rhs, columns, row)?),
        Expression::Not(inner) => Ok(!evaluate(inner, columns, row)?),
    }
}

fn lookup<'a>(column: &str, columns: &[String], row: &'a [Value]) -> Result<&'a Value> {
    columns
        .iter()
        .position(|c| c == column)
        .and_then(|i| row.get(i))
        .ok_or_else(|| Error::ColumnNotFound(column.into()))
}
