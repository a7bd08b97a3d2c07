// ============================================================================
// Numeric Module
// Arbitrary-precision arithmetic backing the series computation
// ============================================================================
//
// This module provides:
// - BigFloat: binary float with an explicit, per-value working precision
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - Exact integers come from num-bigint; floats are rounded wrappers over them
// - All arithmetic returns Result (no panics)
// - Precision is a parameter, never process-wide state

mod big_float;
mod errors;

pub use big_float::BigFloat;
pub use errors::{NumericError, NumericResult};
