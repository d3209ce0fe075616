//! Type resolution and validation of expressions and statements.
//!
//! This module assigns types to expressions and checks them against
//! declared types:
//!
//! - `TypedValue`, the resolved type of an expression plus its constant
//! - Binary operator resolution with constant folding
//! - Evaluation of flat token spans
//! - Assignment checks, including numeric range checks of constants
//! - Return statement checks against the function's declared results
//!
//! Problems are pushed into a caller-owned `Diagnostics` sink and replaced
//! by placeholder values, so one bad expression never stops the checking
//! of its siblings.

pub mod assign;
pub mod eval;
pub mod ret;
pub mod solver;
pub mod value;
