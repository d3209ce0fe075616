//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed-spelling tokens

/// Creates a Token instance.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a lexer handler for a token whose spelling never varies.
///
/// The handler pushes a token of `$kind` and advances the lexer by the
/// length of `$value`.
///
/// ```ignore
/// RegexPattern {
///     regex: Regex::new("<<").unwrap(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::ShiftLeft, "<<"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let start = lexer.pos;
            lexer.push(MK_TOKEN!(
                $kind,
                String::from($value),
                Span {
                    start: Position(start as u32, Rc::clone(&lexer.file)),
                    end: Position((start + $value.len()) as u32, Rc::clone(&lexer.file))
                }
            ));
            lexer.advance_n($value.len());
        }
    };
}
