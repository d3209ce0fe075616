use crate::errors::errors::{Diagnostics, ErrorImpl};

use super::tokens::{Token, TokenKind};

/// Strips the trailing EOF token the lexer appends, if present.
pub fn without_eof(tokens: &[Token]) -> &[Token] {
    match tokens.last() {
        Some(token) if token.kind == TokenKind::EOF => &tokens[..tokens.len() - 1],
        _ => tokens,
    }
}

/// Splits `tokens` on `separator` wherever the brace depth is zero.
///
/// With `expr_must`, an empty part between two separators is reported as
/// `missing_expr` at the separator, and a trailing separator yields no
/// extra part. Without it, a trailing separator yields a trailing empty part.
pub fn parts<'a>(
    tokens: &'a [Token],
    separator: TokenKind,
    expr_must: bool,
    diagnostics: &mut Diagnostics,
) -> Vec<&'a [Token]> {
    let tokens = without_eof(tokens);
    if tokens.is_empty() {
        return vec![];
    }

    let mut parts = vec![];
    let mut brace_count = 0i32;
    let mut last = 0;

    for (i, token) in tokens.iter().enumerate() {
        if token.kind.is_open_brace() {
            brace_count += 1;
            continue;
        } else if token.kind.is_close_brace() {
            brace_count -= 1;
        }
        if brace_count > 0 || token.kind != separator {
            continue;
        }
        if expr_must && i == last {
            diagnostics.push(ErrorImpl::MissingExpr, token.position());
        }
        parts.push(&tokens[last..i]);
        last = i + 1;
    }

    if last < tokens.len() {
        parts.push(&tokens[last..]);
    } else if !expr_must {
        parts.push(&tokens[tokens.len()..]);
    }
    parts
}
