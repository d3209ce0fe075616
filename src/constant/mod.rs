//! Compile-time constant values.
//!
//! A closed variant over booleans, strings and 64-bit signed, unsigned
//! and floating numbers, plus the bit-size helpers used to pick the
//! narrowest numeric kind for a known value.

pub mod constant;
