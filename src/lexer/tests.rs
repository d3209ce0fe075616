//! Unit tests for the lexer module.
//!
//! - Keywords and identifiers
//! - Numeric literals (integers, hex, floats, exponents)
//! - String literals with escape sequences
//! - Operators, including the two-character ones
//! - Brace-balanced splitting

use super::{
    lexer::tokenize,
    parts::{parts, without_eof},
    tokens::{tokens_text, TokenKind},
};
use crate::errors::errors::Diagnostics;

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source.to_string(), Some("test.jn".to_string()))
        .unwrap()
        .iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("nil true false return"),
        vec![
            TokenKind::Nil,
            TokenKind::True,
            TokenKind::False,
            TokenKind::Return,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo _bar baz_123 nilable".to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "_bar");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].value, "nilable");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0xFF 1e10 2.5E-3".to_string(), None).unwrap();

    let values: Vec<&str> = tokens[..5].iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["42", "3.14", "0xFF", "1e10", "2.5E-3"]);
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Number));
}

#[test]
fn test_tokenize_string_escapes() {
    let tokens = tokenize(r#""a\tb\n" "say \"hi\"" "\x41""#.to_string(), None).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "a\tb\n");
    assert_eq!(tokens[1].value, "say \"hi\"");
    assert_eq!(tokens[2].value, "A");
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("<< >> <= >= < > == != && || & | ^ % ! ="),
        vec![
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::Amper,
            TokenKind::Pipe,
            TokenKind::Caret,
            TokenKind::Percent,
            TokenKind::Not,
            TokenKind::Assignment,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_skips_comments() {
    assert_eq!(
        kinds("1 // trailing words\n+ 2"),
        vec![TokenKind::Number, TokenKind::Plus, TokenKind::Number, TokenKind::EOF]
    );
}

#[test]
fn test_token_positions() {
    let tokens = tokenize("a  +  bc".to_string(), None).unwrap();

    assert_eq!(tokens[0].span.start.0, 0);
    assert_eq!(tokens[1].span.start.0, 3);
    assert_eq!(tokens[2].span.start.0, 6);
    assert_eq!(tokens[2].span.end.0, 8);
}

#[test]
fn test_tokenize_unrecognised() {
    let error = tokenize("a $ b".to_string(), None).unwrap_err();
    assert_eq!(error.key(), "unrecognised_token");
    assert_eq!(error.get_position().0, 2);
}

#[test]
fn test_parts_respects_nesting() {
    let tokens = tokenize("f(a, b), [1, 2], {x: 1}".to_string(), None).unwrap();
    let mut diagnostics = Diagnostics::new();

    let split = parts(&tokens, TokenKind::Comma, true, &mut diagnostics);

    assert_eq!(split.len(), 3);
    assert_eq!(tokens_text(split[0]), "f(a,b)");
    assert_eq!(tokens_text(split[1]), "[1,2]");
    assert_eq!(tokens_text(split[2]), "{x:1}");
    assert!(diagnostics.is_empty());
}

#[test]
fn test_parts_reports_empty_part() {
    let tokens = tokenize("1,,2".to_string(), None).unwrap();
    let mut diagnostics = Diagnostics::new();

    let split = parts(&tokens, TokenKind::Comma, true, &mut diagnostics);

    assert_eq!(split.len(), 3);
    assert!(split[1].is_empty());
    assert_eq!(diagnostics.count("missing_expr"), 1);
    assert_eq!(diagnostics.errors()[0].get_position().0, 2);
}

#[test]
fn test_parts_trailing_separator() {
    let tokens = tokenize("1,".to_string(), None).unwrap();
    let mut diagnostics = Diagnostics::new();

    assert_eq!(parts(&tokens, TokenKind::Comma, true, &mut diagnostics).len(), 1);
    assert_eq!(parts(&tokens, TokenKind::Comma, false, &mut diagnostics).len(), 2);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_without_eof() {
    let tokens = tokenize("a".to_string(), None).unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(without_eof(&tokens).len(), 1);
    assert_eq!(without_eof(without_eof(&tokens)).len(), 1);
}
