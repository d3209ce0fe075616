//! Diagnostics produced by the semantic core.
//!
//! Every problem the core detects is a keyed, positioned record. The
//! keys are stable identifiers consumed by an external message catalog;
//! nothing in here renders user-facing text.
//!
//! - `ErrorImpl` - the closed set of diagnostic kinds
//! - `Error` - a kind paired with the token position that caused it
//! - `Diagnostics` - the caller-owned sink validators push into

pub mod errors;

#[cfg(test)]
mod tests;
