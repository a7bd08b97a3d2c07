// ============================================================================
// Direct Reference Series
// Single-threaded evaluation from full factorials, for cross-checking
// ============================================================================
//
// Every term is rebuilt from scratch as
//
//   (6k)! · (13591409 + 545140134·k) / ((3k)! · (k!)³ · (-640320³)^k)
//
// with one rounding per term. It shares no code with the recurrence
// generators, which makes it an independent check of the parallel pipeline,
// at the cost of O(k) big multiplications per term.

use super::assembler::assemble;
use super::generators::{ALTERNATING_RATIO, LINEAR_BASE, LINEAR_STEP};
use crate::domain::DigitBudget;
use crate::error::PiResult;
use crate::numeric::BigFloat;
use num_bigint::BigInt;
use num_traits::One;

fn factorial(n: u64) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, factor| acc * factor)
}

/// π to `digits` decimal digits by direct term evaluation.
pub fn direct_series_pi(digits: u64) -> PiResult<BigFloat> {
    let budget = DigitBudget::new(digits)?;
    let precision = budget.working_precision_bits();

    let mut sum = BigFloat::zero(precision);
    for k in 0..budget.iterations() as u64 {
        let numerator = factorial(6 * k) * (LINEAR_BASE + LINEAR_STEP * k);
        let denominator = factorial(3 * k)
            * num_traits::pow(factorial(k), 3)
            * num_traits::pow(BigInt::from(ALTERNATING_RATIO), k as usize);

        let term = BigFloat::from_bigint(numerator, precision)?
            .checked_div(&BigFloat::from_bigint(denominator, precision)?)?;
        sum = sum.checked_add(&term)?;
    }

    tracing::debug!(digits, terms = budget.iterations(), "reference series summed");
    assemble(&sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PiError;

    #[test]
    fn test_reference_digits() {
        let pi = direct_series_pi(30).unwrap();
        assert_eq!(
            pi.to_decimal_string(29),
            "3.14159265358979323846264338327"
        );
    }

    #[test]
    fn test_reference_rejects_zero_digits() {
        assert_eq!(direct_series_pi(0), Err(PiError::InvalidDigitCount));
    }
}
