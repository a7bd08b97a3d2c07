// ============================================================================
// Pi Approximation
// The single value a computation run hands back to its caller
// ============================================================================

use super::budget::DigitBudget;
use crate::numeric::BigFloat;
use std::fmt;

/// Result of a computation run: π at the run's working precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PiApproximation {
    value: BigFloat,
    budget: DigitBudget,
    worker_count: usize,
}

impl PiApproximation {
    pub fn new(value: BigFloat, budget: DigitBudget, worker_count: usize) -> Self {
        Self {
            value,
            budget,
            worker_count,
        }
    }

    /// The high-precision value.
    #[inline]
    pub fn value(&self) -> &BigFloat {
        &self.value
    }

    /// Take the value out.
    pub fn into_value(self) -> BigFloat {
        self.value
    }

    /// Budget the value was computed under.
    #[inline]
    pub fn budget(&self) -> &DigitBudget {
        &self.budget
    }

    /// Precision bound of the value, in bits.
    #[inline]
    pub fn precision_bits(&self) -> u64 {
        self.budget.working_precision_bits()
    }

    /// Reduction workers used.
    #[inline]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// The requested digits, leading `3` included, truncated.
    ///
    /// `digits = 14` yields `"3.1415926535897"`.
    pub fn to_digit_string(&self) -> String {
        let frac_digits = usize::try_from(self.budget.digits() - 1).unwrap_or(usize::MAX);
        self.value.to_decimal_string(frac_digits)
    }
}

impl fmt::Display for PiApproximation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_digit_string())
    }
}
