// ============================================================================
// Term Sequences
// Exact integer and floating images of the five Chudnovsky term components
// ============================================================================

use crate::numeric::BigFloat;
use num_bigint::BigInt;
use std::fmt;

/// Role of a sequence within the Chudnovsky term
/// `(A/C) · (B/D) / E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TermRole {
    /// A: `(6i)!`
    Factorial6k,
    /// B: `13591409 + 545140134·i`
    LinearCoefficient,
    /// C: `(3i)!`
    Factorial3k,
    /// D: `(i!)^3`
    FactorialCubed,
    /// E: `(-640320^3)^i`
    AlternatingPower,
}

impl TermRole {
    /// All roles in A–E order.
    pub const ALL: [TermRole; 5] = [
        TermRole::Factorial6k,
        TermRole::LinearCoefficient,
        TermRole::Factorial3k,
        TermRole::FactorialCubed,
        TermRole::AlternatingPower,
    ];

    /// Single-letter label used in logs (A–E).
    pub const fn label(self) -> char {
        match self {
            TermRole::Factorial6k => 'A',
            TermRole::LinearCoefficient => 'B',
            TermRole::Factorial3k => 'C',
            TermRole::FactorialCubed => 'D',
            TermRole::AlternatingPower => 'E',
        }
    }
}

impl fmt::Display for TermRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TermRole::Factorial6k => "Factorial6k",
            TermRole::LinearCoefficient => "LinearCoefficient",
            TermRole::Factorial3k => "Factorial3k",
            TermRole::FactorialCubed => "FactorialCubed",
            TermRole::AlternatingPower => "AlternatingPower",
        };
        write!(f, "{} ({})", name, self.label())
    }
}

/// Exact integers for one role, indexed by series term.
///
/// Owned by its generator until handed to the combiner, which consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermSequence {
    role: TermRole,
    terms: Vec<BigInt>,
}

impl TermSequence {
    pub fn new(role: TermRole, terms: Vec<BigInt>) -> Self {
        Self { role, terms }
    }

    #[inline]
    pub fn role(&self) -> TermRole {
        self.role
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn terms(&self) -> &[BigInt] {
        &self.terms
    }

    /// Give up ownership of the integers.
    pub fn into_terms(self) -> Vec<BigInt> {
        self.terms
    }
}

/// Floating image of a [`TermSequence`] at the run's working precision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatSequence {
    role: TermRole,
    precision: u64,
    terms: Vec<BigFloat>,
}

impl FloatSequence {
    pub fn new(role: TermRole, precision: u64, terms: Vec<BigFloat>) -> Self {
        Self {
            role,
            precision,
            terms,
        }
    }

    #[inline]
    pub fn role(&self) -> TermRole {
        self.role
    }

    /// Working precision of every element, in bits.
    #[inline]
    pub fn precision(&self) -> u64 {
        self.precision
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    #[inline]
    pub fn terms(&self) -> &[BigFloat] {
        &self.terms
    }

    /// Mutable access for in-place scratch use by the reducer.
    #[inline]
    pub fn terms_mut(&mut self) -> &mut [BigFloat] {
        &mut self.terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        let labels: String = TermRole::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(labels, "ABCDE");
        assert_eq!(
            TermRole::FactorialCubed.to_string(),
            "FactorialCubed (D)"
        );
    }

    #[test]
    fn test_term_sequence_ownership() {
        let seq = TermSequence::new(
            TermRole::Factorial3k,
            vec![BigInt::from(1), BigInt::from(6)],
        );
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.role(), TermRole::Factorial3k);
        assert_eq!(seq.into_terms()[1], BigInt::from(6));
    }
}
