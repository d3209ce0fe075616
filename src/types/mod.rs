//! Type descriptors and the relations between them.
//!
//! This module defines:
//!
//! - Fixed-width numeric kinds and their widening rank
//! - `TypeDescriptor`, the owned representation of one type occurrence
//! - Declarations that struct, trait, enum and function types refer to
//! - Classification predicates and the compatibility relation
//! - Generic instantiation and restoration of the generic template
//!
//! Pointer depth is a counter on the descriptor, never a nested descriptor.

pub mod compat;
pub mod decls;
pub mod generics;
pub mod numeric;
pub mod types;

#[cfg(test)]
mod tests;
