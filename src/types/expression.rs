//! Compiled boolean predicates.

use super::value::Value;
use std::fmt::Display;

/// Comparison operators recognized in predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Equal,          // =
    NotEqual,       // != or <>
    LessThan,       // <
    LessOrEqual,    // <=
    GreaterThan,    // >
    GreaterOrEqual, // >=
}

impl Display for CompareOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
        })
    }
}

/// A boolean predicate over one row, compiled from WHERE clause text.
/// Evaluated during the filter stage of query execution.
///
/// Leaves name a column, resolved against the table at execution time, and
/// carry a literal value parsed from the clause text. Since this is a
/// recursive data structure, child expressions are boxed.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// column <op> literal.
    Comparison(String, CompareOp, Value),
    /// column IN (literals): true iff the column value equals any literal.
    /// An empty list matches no row.
    InSet(String, Vec<Value>),
    /// a AND b: logical AND, short-circuiting.
    And(Box<Expression>, Box<Expression>),
    /// a OR b: logical OR, short-circuiting.
    Or(Box<Expression>, Box<Expression>),
    /// NOT a: logical NOT.
    Not(Box<Expression>),
}

impl Expression {
    /// Every column name the predicate references, deduplicated, in
    /// left-to-right order of first appearance.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = Vec::new();
        self.collect_columns(&mut columns);
        columns
    }

    fn collect_columns<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Comparison(column, _, _) | Self::InSet(column, _) => {
                if !out.contains(&column.as_str()) {
                    out.push(column.as_str());
                }
            }
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                lhs.collect_columns(out);
                rhs.collect_columns(out);
            }
            Self::Not(inner) => inner.collect_columns(out),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Comparison(column, op, value) => write!(f, "({column} {op} {value:?})"),
            Self::InSet(column, set) => {
                write!(f, "{column} IN (")?;
                for (i, value) in set.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{value:?}")?;
                }
                write!(f, ")")
            }
            Self::And(lhs, rhs) => write!(f, "({lhs} AND {rhs})"),
            Self::Or(lhs, rhs) => write!(f, "({lhs} OR {rhs})"),
            Self::Not(inner) => write!(f, "(NOT {inner})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_deduplicates_in_order() {
        let expr = Expression::And(
            Box::new(Expression::Comparison(
                "b".into(),
                CompareOp::Equal,
                Value::Integer(1),
            )),
            Box::new(Expression::Or(
                Box::new(Expression::InSet("a".into(), vec![Value::Integer(2)])),
                Box::new(Expression::Not(Box::new(Expression::Comparison(
                    "b".into(),
                    CompareOp::LessThan,
                    Value::Integer(3),
                )))),
            )),
        );
        assert_eq!(expr.columns(), vec!["b", "a"]);
    }

    #[test]
    fn test_columns_borrow_outlives_traversal() {
        // The returned names borrow from the expression itself and stay
        // usable after collection.
        let expr = Expression::Not(Box::new(Expression::InSet(
            "city".into(),
            vec![Value::Str("Oslo".into())],
        )));
        let columns = expr.columns();
        assert_eq!(columns, vec!["city"]);
    }
}
