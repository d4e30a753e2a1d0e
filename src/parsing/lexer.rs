//! Tokenizer for WHERE clause text.

use crate::error::{Error, Result};
use std::fmt::Display;
use std::iter::Peekable;
use std::str::Chars;

/// Predicate keywords. Matched case-insensitively; `TRUE`, `FALSE`, and
/// `NULL` lex as keywords and become literals in the translator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keyword {
    And,
    False,
    In,
    Not,
    Null,
    Or,
    True,
}

impl Keyword {
    /// Looks up the keyword for an identifier-like string, if any.
    fn from_str(ident: &str) -> Option<Self> {
        Some(match ident.to_uppercase().as_str() {
            "AND" => Self::And,
            "FALSE" => Self::False,
            "IN" => Self::In,
            "NOT" => Self::Not,
            "NULL" => Self::Null,
            "OR" => Self::Or,
            "TRUE" => Self::True,
            _ => return None,
        })
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::And => "AND",
            Self::False => "FALSE",
            Self::In => "IN",
            Self::Not => "NOT",
            Self::Null => "NULL",
            Self::Or => "OR",
            Self::True => "TRUE",
        })
    }
}

/// A lexer token.
#[derive(Clone, Debug, PartialEq)]
pub enum Token {
    /// A column identifier. Case-sensitive, unlike keywords.
    Ident(String),
    /// A number, kept as text until the translator decides Integer vs Float.
    Number(String),
    /// A quoted string literal, quotes stripped, no escape processing.
    String(String),
    Keyword(Keyword),
    Equal,          // =
    NotEqual,       // != or <>
    LessThan,       // <
    LessOrEqual,    // <=
    GreaterThan,    // >
    GreaterOrEqual, // >=
    Minus,          // -
    OpenParen,      // (
    CloseParen,     // )
    Comma,          // ,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ident(ident) => ident,
            Self::Number(number) => number,
            Self::String(string) => return write!(f, "'{string}'"),
            Self::Keyword(keyword) => return keyword.fmt(f),
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterOrEqual => ">=",
            Self::Minus => "-",
            Self::OpenParen => "(",
            Self::CloseParen => ")",
            Self::Comma => ",",
        })
    }
}

impl From<Keyword> for Token {
    fn from(keyword: Keyword) -> Self {
        Token::Keyword(keyword)
    }
}

/// Tokenizes predicate text, emitting tokens as an iterator and erroring on
/// unterminated string literals and unexpected characters.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Result<Token>> {
        match self.scan() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => self
                .chars
                .peek()
                .map(|c| Err(Error::Predicate(format!("unexpected character {c}")))),
            Err(err) => Some(Err(err)),
        }
    }
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Lexer<'a> {
        Lexer {
            chars: input.chars().peekable(),
        }
    }

    /// Returns the next character if it satisfies the predicate.
    fn next_if(&mut self, predicate: impl Fn(char) -> bool) -> Option<char> {
        self.chars.peek().filter(|&&c| predicate(c))?;
        self.chars.next()
    }

    /// Scans the next token, if any.
    fn scan(&mut self) -> Result<Option<Token>> {
        while self.next_if(|c| c.is_whitespace()).is_some() {}
        match self.chars.peek() {
            Some(&c) if c == '\'' || c == '"' => self.scan_string(),
            Some(c) if c.is_ascii_digit() => Ok(self.scan_number()),
            Some(&c) if c.is_alphabetic() || c == '_' => Ok(self.scan_ident()),
            Some(_) => self.scan_symbol(),
            None => Ok(None),
        }
    }

    /// Scans a quoted string literal. Single or double quotes; the literal
    /// runs to the matching quote, with no escape processing.
    fn scan_string(&mut self) -> Result<Option<Token>> {
        let Some(quote) = self.next_if(|c| c == '\'' || c == '"') else {
            return Ok(None);
        };
        let mut string = String::new();
        loop {
            match self.chars.next() {
                Some(c) if c == quote => break,
                Some(c) => string.push(c),
                None => return Err(Error::Predicate("unterminated string literal".into())),
            }
        }
        Ok(Some(Token::String(string)))
    }

    /// Scans a number: digits with an optional fraction and exponent.
    fn scan_number(&mut self) -> Option<Token> {
        let mut number = String::new();
        while let Some(c) = self.next_if(|c| c.is_ascii_digit()) {
            number.push(c);
        }
        if number.is_empty() {
            return None;
        }
        if let Some(sep) = self.next_if(|c| c == '.') {
            number.push(sep);
            while let Some(c) = self.next_if(|c| c.is_ascii_digit()) {
                number.push(c);
            }
        }
        if let Some(exp) = self.next_if(|c| c == 'e' || c == 'E') {
            number.push(exp);
            if let Some(sign) = self.next_if(|c| c == '+' || c == '-') {
                number.push(sign);
            }
            while let Some(c) = self.next_if(|c| c.is_ascii_digit()) {
                number.push(c);
            }
        }
        Some(Token::Number(number))
    }

    /// Scans an identifier or keyword.
    fn scan_ident(&mut self) -> Option<Token> {
        let mut name = String::new();
        while let Some(c) = self.next_if(|c| c.is_alphanumeric() || c == '_') {
            name.push(c);
        }
        if name.is_empty() {
            return None;
        }
        Some(Keyword::from_str(&name).map_or(Token::Ident(name), Token::Keyword))
    }

    /// Scans an operator or punctuation symbol.
    fn scan_symbol(&mut self) -> Result<Option<Token>> {
        let Some(c) = self.next_if(|c| "(),-=<>!".contains(c)) else {
            return Ok(None);
        };
        let token = match c {
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            ',' => Token::Comma,
            '-' => Token::Minus,
            '=' => Token::Equal,
            '<' if self.next_if(|c| c == '=').is_some() => Token::LessOrEqual,
            '<' if self.next_if(|c| c == '>').is_some() => Token::NotEqual,
            '<' => Token::LessThan,
            '>' if self.next_if(|c| c == '=').is_some() => Token::GreaterOrEqual,
            '>' => Token::GreaterThan,
            '!' if self.next_if(|c| c == '=').is_some() => Token::NotEqual,
            _ => return Err(Error::Predicate(format!("unexpected character {c}"))),
        };
        Ok(Some(token))
    }
}
