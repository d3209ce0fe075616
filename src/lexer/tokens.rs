use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Position, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("nil", TokenKind::Nil);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("return", TokenKind::Return);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    Semicolon,
    Colon,
    Comma,

    ShiftLeft,
    ShiftRight,
    Amper,
    Pipe,
    Caret,
    Tilde,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Nil,
    True,
    False,
    Return,
}

impl TokenKind {
    pub fn is_open_brace(&self) -> bool {
        matches!(
            self,
            TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenCurly
        )
    }

    pub fn is_close_brace(&self) -> bool {
        matches!(
            self,
            TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseCurly
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl Token {
    /// A token that did not come from source, e.g. an operator built by hand.
    pub fn synthetic(kind: TokenKind, value: &str) -> Token {
        Token {
            kind,
            value: value.to_string(),
            span: Span::null(),
        }
    }

    pub fn position(&self) -> Position {
        self.span.start.clone()
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}

/// Concatenates token spellings back into expression text.
pub fn tokens_text(tokens: &[Token]) -> String {
    let mut text = String::new();
    for token in tokens {
        if token.kind == TokenKind::EOF {
            break;
        }
        if token.kind == TokenKind::String {
            text.push('"');
            text.push_str(&token.value);
            text.push('"');
        } else {
            text.push_str(&token.value);
        }
    }
    text
}
