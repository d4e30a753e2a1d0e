//! Predicate translator: turns WHERE clause text into an expression tree.

use super::lexer::{Keyword, Lexer, Token};
use crate::error::{Error, Result};
use crate::types::{CompareOp, Expression, Value};
use std::iter::Peekable;

/// Parses predicate text into an [`Expression`].
///
/// Operator precedence, loosest first: OR, AND, NOT, comparisons.
/// Parentheses group subexpressions.
pub struct PredicateParser<'a> {
    lexer: Peekable<Lexer<'a>>,
}

impl<'a> PredicateParser<'a> {
    pub fn new(input: &'a str) -> PredicateParser<'a> {
        PredicateParser {
            lexer: Lexer::new(input).peekable(),
        }
    }

    /// Parses the full input as a single predicate expression.
    pub fn parse(mut self) -> Result<Expression> {
        let expression = self.parse_expression()?;
        if let Some(token) = self.lexer.next().transpose()? {
            return Err(Error::Predicate(format!("unexpected token {token}")));
        }
        Ok(expression)
    }

    /// Fetches the next token, erroring if there is none.
    fn next(&mut self) -> Result<Token> {
        self.lexer
            .next()
            .transpose()?
            .ok_or_else(|| Error::Predicate("unexpected end of predicate".into()))
    }

    /// Consumes the next token if it satisfies the predicate.
    fn next_if(&mut self, predicate: impl Fn(&Token) -> bool) -> Option<Token> {
        match self.lexer.peek() {
            Some(Ok(token)) if predicate(token) => {}
            _ => return None,
        }
        self.lexer.next().transpose().ok().flatten()
    }

    /// Consumes the next token if it is the given token.
    fn next_is(&mut self, token: Token) -> bool {
        self.next_if(|t| t == &token).is_some()
    }

    /// Consumes the next token, erroring if it isn't the expected one.
    fn expect(&mut self, expect: Token) -> Result<()> {
        let token = self.next()?;
        if token != expect {
            return Err(Error::Predicate(format!(
                "expected {expect}, found {token}"
            )));
        }
        Ok(())
    }

    /// Parses an OR chain.
    fn parse_expression(&mut self) -> Result<Expression> {
        let mut lhs = self.parse_and()?;
        while self.next_is(Keyword::Or.into()) {
            let rhs = self.parse_and()?;
            lhs = Expression::Or(lhs.into(), rhs.into());
        }
        Ok(lhs)
    }

    /// Parses an AND chain.
    fn parse_and(&mut self) -> Result<Expression> {
        let mut lhs = self.parse_not()?;
        while self.next_is(Keyword::And.into()) {
            let rhs = self.parse_not()?;
            lhs = Expression::And(lhs.into(), rhs.into());
        }
        Ok(lhs)
    }

    /// Parses any NOT prefixes. NOT binds tighter than AND.
    fn parse_not(&mut self) -> Result<Expression> {
        if self.next_is(Keyword::Not.into()) {
            return Ok(Expression::Not(self.parse_not()?.into()));
        }
        self.parse_atom()
    }

    /// Parses a parenthesized group or a single column comparison.
    fn parse_atom(&mut self) -> Result<Expression> {
        if self.next_is(Token::OpenParen) {
            let expression = self.parse_expression()?;
            self.expect(Token::CloseParen)?;
            return Ok(expression);
        }
        let column = match self.next()? {
            Token::Ident(column) => column,
            token => return Err(Error::Predicate(format!("expected column, found {token}"))),
        };
        // Column membership: IN (...) and NOT IN (...).
        if self.next_is(Keyword::In.into()) {
            return Ok(Expression::InSet(column, self.parse_literal_list()?));
        }
        if self.next_is(Keyword::Not.into()) {
            self.expect(Keyword::In.into())?;
            let inset = Expression::InSet(column, self.parse_literal_list()?);
            return Ok(Expression::Not(inset.into()));
        }
        let op = match self.next()? {
            Token::Equal => CompareOp::Equal,
            Token::NotEqual => CompareOp::NotEqual,
            Token::LessThan => CompareOp::LessThan,
            Token::LessOrEqual => CompareOp::LessOrEqual,
            Token::GreaterThan => CompareOp::GreaterThan,
            Token::GreaterOrEqual => CompareOp::GreaterOrEqual,
            token => {
                return Err(Error::Predicate(format!(
                    "expected comparison operator, found {token}"
                )))
            }
        };
        Ok(Expression::Comparison(column, op, self.parse_literal()?))
    }

    /// Parses a parenthesized, comma-separated literal list. An empty list
    /// is allowed and matches no value.
    fn parse_literal_list(&mut self) -> Result<Vec<Value>> {
        self.expect(Token::OpenParen)?;
        let mut values = Vec::new();
        if self.next_is(Token::CloseParen) {
            return Ok(values);
        }
        loop {
            values.push(self.parse_literal()?);
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        self.expect(Token::CloseParen)?;
        Ok(values)
    }

    /// Parses a literal value, with an optional leading minus on numbers.
    fn parse_literal(&mut self) -> Result<Value> {
        let negative = self.next_is(Token::Minus);
        let value = match self.next()? {
            Token::Number(n) if n.contains(['.', 'e', 'E']) => {
                let f: f64 = n
                    .parse()
                    .map_err(|_| Error::Predicate(format!("invalid number {n}")))?;
                Value::Float(if negative { -f } else { f })
            }
            Token::Number(n) => {
                let i: i64 = n
                    .parse()
                    .map_err(|_| Error::Predicate(format!("invalid number {n}")))?;
                Value::Integer(if negative { -i } else { i })
            }
            Token::String(s) if !negative => Value::Str(s),
            Token::Keyword(Keyword::True) if !negative => Value::Bool(true),
            Token::Keyword(Keyword::False) if !negative => Value::Bool(false),
            Token::Keyword(Keyword::Null) if !negative => Value::Null,
            token => return Err(Error::Predicate(format!("expected value, found {token}"))),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<Expression> {
        PredicateParser::new(input).parse()
    }

    #[test]
    fn test_comparison() {
        assert_eq!(
            parse("age >= 21").unwrap(),
            Expression::Comparison("age".into(), CompareOp::GreaterOrEqual, Value::Integer(21))
        );
        assert_eq!(
            parse("name = 'Ann'").unwrap(),
            Expression::Comparison("name".into(), CompareOp::Equal, Value::Str("Ann".into()))
        );
        assert_eq!(
            parse("score != -1.5").unwrap(),
            Expression::Comparison("score".into(), CompareOp::NotEqual, Value::Float(-1.5))
        );
    }

    #[test]
    fn test_precedence() {
        // a = 1 OR b = 2 AND c = 3 parses as a = 1 OR (b = 2 AND c = 3).
        let expression = parse("a = 1 OR b = 2 AND c = 3").unwrap();
        let or = |l: Expression, r: Expression| Expression::Or(l.into(), r.into());
        let and = |l: Expression, r: Expression| Expression::And(l.into(), r.into());
        let eq = |c: &str, i: i64| {
            Expression::Comparison(c.into(), CompareOp::Equal, Value::Integer(i))
        };
        assert_eq!(expression, or(eq("a", 1), and(eq("b", 2), eq("c", 3))));

        // Parentheses override precedence.
        let expression = parse("(a = 1 OR b = 2) AND c = 3").unwrap();
        assert_eq!(expression, and(or(eq("a", 1), eq("b", 2)), eq("c", 3)));
    }

    #[test]
    fn test_not() {
        assert_eq!(
            parse("NOT active = TRUE").unwrap(),
            Expression::Not(
                Expression::Comparison("active".into(), CompareOp::Equal, Value::Bool(true))
                    .into()
            )
        );
    }

    #[test]
    fn test_in() {
        assert_eq!(
            parse("city IN ('Oslo', 'Bergen')").unwrap(),
            Expression::InSet(
                "city".into(),
                vec![Value::Str("Oslo".into()), Value::Str("Bergen".into())]
            )
        );
        assert_eq!(
            parse("city NOT IN ('Oslo')").unwrap(),
            Expression::Not(
                Expression::InSet("city".into(), vec![Value::Str("Oslo".into())]).into()
            )
        );
        // An empty list is legal and simply matches nothing.
        assert_eq!(
            parse("city IN ()").unwrap(),
            Expression::InSet("city".into(), vec![])
        );
    }

    #[test]
    fn test_null_literal() {
        assert_eq!(
            parse("nickname = NULL").unwrap(),
            Expression::Comparison("nickname".into(), CompareOp::Equal, Value::Null)
        );
    }

    #[test]
    fn test_errors() {
        assert!(matches!(parse(""), Err(Error::Predicate(_))));
        assert!(matches!(parse("age >"), Err(Error::Predicate(_))));
        assert!(matches!(parse("age > 21 extra"), Err(Error::Predicate(_))));
        assert!(matches!(parse("= 21"), Err(Error::Predicate(_))));
        assert!(matches!(parse("name = 'Ann"), Err(Error::Predicate(_))));
        assert!(matches!(parse("age = -'x'"), Err(Error::Predicate(_))));
        assert!(matches!(parse("(a = 1"), Err(Error::Predicate(_))));
    }
}
