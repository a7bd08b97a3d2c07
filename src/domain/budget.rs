// ============================================================================
// Digit Budget
// Derives series length and working precision from the requested digit count
// ============================================================================

use crate::error::{PiError, PiResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Correct decimal digits contributed by each Chudnovsky term (≈14.18).
pub const DIGITS_PER_TERM: u64 = 14;

/// Extra bits carried beyond what the requested digits strictly need, so
/// rounding in the last places stays below the last requested digit.
pub const GUARD_BITS: u64 = 64;

/// log2(10) rounded up, as a fixed-point ratio.
const LOG2_10_NUMERATOR: u128 = 3_321_928_095;
const LOG2_10_DENOMINATOR: u128 = 1_000_000_000;

/// Precision model for one computation run.
///
/// Built once, before any arithmetic object exists, and handed by value to
/// every component. All floats of a run share `working_precision_bits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DigitBudget {
    digits: u64,
    iterations: usize,
    working_precision_bits: u64,
}

impl DigitBudget {
    /// Derive the budget for `digits` decimal digits.
    ///
    /// # Errors
    /// Returns `InvalidDigitCount` if `digits` is zero or the series would
    /// not be addressable on this platform.
    pub fn new(digits: u64) -> PiResult<Self> {
        if digits == 0 {
            return Err(PiError::InvalidDigitCount);
        }

        let iterations = usize::try_from(Self::iterations_for(digits))
            .map_err(|_| PiError::InvalidDigitCount)?;

        Ok(Self {
            digits,
            iterations,
            working_precision_bits: Self::precision_bits_for(digits),
        })
    }

    /// `digits / 14 + 1`; the `+ 1` guarantees at least one term.
    #[inline]
    pub const fn iterations_for(digits: u64) -> u64 {
        digits / DIGITS_PER_TERM + 1
    }

    /// `⌈digits · log2 10⌉ + GUARD_BITS`, saturating.
    pub fn precision_bits_for(digits: u64) -> u64 {
        let scaled = u128::from(digits) * LOG2_10_NUMERATOR;
        let bits = scaled.div_ceil(LOG2_10_DENOMINATOR) + u128::from(GUARD_BITS);
        u64::try_from(bits).unwrap_or(u64::MAX)
    }

    /// Requested decimal digits.
    #[inline]
    pub fn digits(&self) -> u64 {
        self.digits
    }

    /// Number of series terms.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Bit precision shared by every float in the run.
    #[inline]
    pub fn working_precision_bits(&self) -> u64 {
        self.working_precision_bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{quickcheck, TestResult};

    #[test]
    fn test_zero_digits_rejected() {
        assert_eq!(DigitBudget::new(0), Err(PiError::InvalidDigitCount));
    }

    #[test]
    fn test_known_budgets() {
        let one = DigitBudget::new(1).unwrap();
        assert_eq!(one.iterations(), 1);

        let fourteen = DigitBudget::new(14).unwrap();
        assert_eq!(fourteen.iterations(), 2);

        let thousand = DigitBudget::new(1000).unwrap();
        assert_eq!(thousand.iterations(), 72);
        // ⌈1000 · 3.321928095⌉ + 64
        assert_eq!(thousand.working_precision_bits(), 3322 + GUARD_BITS);
    }

    quickcheck! {
        fn prop_iterations_formula(digits: u64) -> TestResult {
            if digits == 0 {
                return TestResult::discard();
            }
            let budget = DigitBudget::new(digits).unwrap();
            TestResult::from_bool(
                budget.iterations() as u64 == digits / 14 + 1 && budget.iterations() >= 1,
            )
        }

        fn prop_precision_covers_digits(digits: u32) -> TestResult {
            if digits == 0 {
                return TestResult::discard();
            }
            let budget = DigitBudget::new(u64::from(digits)).unwrap();
            let bits = budget.working_precision_bits();
            // bits · log10(2) must reach the requested digits
            TestResult::from_bool(
                bits >= u64::from(digits)
                    && u128::from(bits) * 30_103 >= u128::from(digits) * 100_000,
            )
        }
    }
}
