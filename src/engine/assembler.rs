// ============================================================================
// Final Assembler
// Turns the series sum into pi
// ============================================================================

use crate::error::PiResult;
use crate::numeric::BigFloat;

/// Integer factor of the closed-form constant `426880 · √10005`.
pub const CONSTANT_FACTOR: u64 = 426_880;

/// Radicand of the closed-form constant `426880 · √10005`.
pub const CONSTANT_RADICAND: u64 = 10_005;

/// `426880 · √10005` at `precision` bits.
pub fn chudnovsky_constant(precision: u64) -> PiResult<BigFloat> {
    let root = BigFloat::from_u64(CONSTANT_RADICAND, precision)?.checked_sqrt()?;
    let factor = BigFloat::from_u64(CONSTANT_FACTOR, precision)?;
    Ok(factor.checked_mul(&root)?)
}

/// `π ≈ 426880 · √10005 / sum`, at the sum's precision.
///
/// # Errors
/// A zero sum surfaces as a backend `DivisionByZero`.
pub fn assemble(grand_sum: &BigFloat) -> PiResult<BigFloat> {
    let constant = chudnovsky_constant(grand_sum.precision())?;
    Ok(constant.checked_div(grand_sum)?)
}
