use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

macro_rules! pattern {
    ($regex:literal, $handler:expr) => {
        RegexPattern {
            regex: Regex::new(concat!("^", $regex)).unwrap(),
            handler: $handler,
        }
    };
}

lazy_static! {
    // Longer spellings come first so `<<` wins over `<`.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        pattern!("[a-zA-Z_][a-zA-Z0-9_]*", symbol_handler),
        pattern!("0[xX][0-9a-fA-F]+", number_handler),
        pattern!("[0-9]+(\\.[0-9]+)?([eE][-+]?[0-9]+)?", number_handler),
        pattern!("\\s+", skip_handler),
        pattern!("\"(\\\\.|[^\"\\\\])*\"", string_handler),
        pattern!("//.*", skip_handler),
        pattern!("\\[", MK_DEFAULT_HANDLER!(TokenKind::OpenBracket, "[")),
        pattern!("\\]", MK_DEFAULT_HANDLER!(TokenKind::CloseBracket, "]")),
        pattern!("\\{", MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{")),
        pattern!("\\}", MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}")),
        pattern!("\\(", MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(")),
        pattern!("\\)", MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")")),
        pattern!("==", MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")),
        pattern!("!=", MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")),
        pattern!("!", MK_DEFAULT_HANDLER!(TokenKind::Not, "!")),
        pattern!("=", MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")),
        pattern!("<<", MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<")),
        pattern!(">>", MK_DEFAULT_HANDLER!(TokenKind::ShiftRight, ">>")),
        pattern!("<=", MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")),
        pattern!("<", MK_DEFAULT_HANDLER!(TokenKind::Less, "<")),
        pattern!(">=", MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")),
        pattern!(">", MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")),
        pattern!("\\|\\|", MK_DEFAULT_HANDLER!(TokenKind::Or, "||")),
        pattern!("&&", MK_DEFAULT_HANDLER!(TokenKind::And, "&&")),
        pattern!("\\|", MK_DEFAULT_HANDLER!(TokenKind::Pipe, "|")),
        pattern!("&", MK_DEFAULT_HANDLER!(TokenKind::Amper, "&")),
        pattern!("\\^", MK_DEFAULT_HANDLER!(TokenKind::Caret, "^")),
        pattern!("~", MK_DEFAULT_HANDLER!(TokenKind::Tilde, "~")),
        pattern!("\\.", MK_DEFAULT_HANDLER!(TokenKind::Dot, ".")),
        pattern!(";", MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";")),
        pattern!(":", MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")),
        pattern!(",", MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")),
        pattern!("\\+", MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")),
        pattern!("-", MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")),
        pattern!("/", MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")),
        pattern!("\\*", MK_DEFAULT_HANDLER!(TokenKind::Star, "*")),
        pattern!("%", MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")),
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.remainder().chars().next().unwrap_or('\0')
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn span(&self, start: usize, end: usize) -> Span {
        Span {
            start: Position(start as u32, Rc::clone(&self.file)),
            end: Position(end as u32, Rc::clone(&self.file)),
        }
    }
}

fn matched_len(lexer: &Lexer, regex: &Regex) -> usize {
    regex.find(lexer.remainder()).map(|m| m.end()).unwrap_or(0)
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = matched_len(lexer, regex);
    let matched = lexer.remainder()[..len].to_string();
    let span = lexer.span(lexer.pos, lexer.pos + len);

    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
    lexer.advance_n(len);
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = matched_len(lexer, regex);
    lexer.advance_n(len);
}

fn string_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = matched_len(lexer, regex);
    let raw = lexer.remainder()[1..len - 1].to_string();
    let span = lexer.span(lexer.pos, lexer.pos + len);

    let mut result = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.peek() {
            Some('n') => {
                result.push('\n');
                chars.next();
            }
            Some('t') => {
                result.push('\t');
                chars.next();
            }
            Some('r') => {
                result.push('\r');
                chars.next();
            }
            Some('\\') => {
                result.push('\\');
                chars.next();
            }
            Some('"') => {
                result.push('"');
                chars.next();
            }
            Some('0') => {
                result.push('\0');
                chars.next();
            }
            Some('x') => {
                chars.next();
                let mut hex = String::new();
                while hex.len() < 2 {
                    match chars.peek() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            hex.push(*c);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => result.push_str("\\x"),
                }
            }
            _ => result.push(ch), // Keep the backslash
        }
    }

    lexer.push(MK_TOKEN!(TokenKind::String, result, span));
    lexer.advance_n(len);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = matched_len(lexer, regex);
    let value = lexer.remainder()[..len].to_string();
    let span = lexer.span(lexer.pos, lexer.pos + len);

    let kind = RESERVED_LOOKUP
        .get(value.as_str())
        .copied()
        .unwrap_or(TokenKind::Identifier);
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(len);
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken {
                        token: lex.at().to_string(),
                    },
                    Position(lex.pos as u32, Rc::clone(&lex.file)),
                ))
            }
        }
    }

    let eof = lex.span(lex.pos, lex.pos);
    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), eof));
    Ok(lex.tokens)
}
