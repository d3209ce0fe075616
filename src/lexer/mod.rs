//! Lexical analysis for expression spans.
//!
//! The semantic core consumes flat token spans. This module provides:
//!
//! - Tokenization of source text using regex patterns
//! - Recognition of literals, identifiers, keywords and operators
//! - Token position tracking for diagnostics
//! - Brace-balanced splitting of token spans on a separator

pub mod lexer;
pub mod parts;
pub mod tokens;

#[cfg(test)]
mod tests;
