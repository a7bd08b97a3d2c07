// ============================================================================
// Term Generators
// Integer recurrences for the five Chudnovsky term components
// ============================================================================
//
// Each sequence is built from its predecessor with O(1) big-integer
// operations per step instead of recomputing factorial-like products:
//
//   A[i] = A[i-1] · (6i-5)(6i-4)(6i-3)(6i-2)(6i-1)(6i)      = (6i)!
//   B[i] = B[i-1] + 545140134                                = 13591409 + 545140134·i
//   C[i] = C[i-1] · (3i-2)(3i-1)(3i)                         = (3i)!
//   D[i] = k³ with k = i!                                    = (i!)³
//   E[i] = E[i-1] · (-262537412640768000)                    = (-640320³)^i

use crate::concurrency::AbortSignal;
use crate::domain::{TermRole, TermSequence};
use crate::error::PiResult;
use crate::interfaces::TermGenerator;
use num_bigint::BigInt;
use num_traits::One;

/// Constant term of the linear coefficient B.
pub const LINEAR_BASE: u64 = 13_591_409;

/// Per-term increment of the linear coefficient B.
pub const LINEAR_STEP: u64 = 545_140_134;

/// Ratio of consecutive E terms, `-640320³`.
pub const ALTERNATING_RATIO: i64 = -262_537_412_640_768_000;

/// Build `iterations` terms from `first`, deriving each term from its index
/// and predecessor.
fn unfold<F>(
    role: TermRole,
    iterations: usize,
    signal: &AbortSignal,
    first: BigInt,
    mut step: F,
) -> PiResult<TermSequence>
where
    F: FnMut(u64, &BigInt) -> BigInt,
{
    let mut terms = Vec::with_capacity(iterations);
    if iterations == 0 {
        return Ok(TermSequence::new(role, terms));
    }

    terms.push(first);
    for i in 1..iterations {
        signal.check()?;
        let next = step(i as u64, &terms[i - 1]);
        terms.push(next);
    }

    Ok(TermSequence::new(role, terms))
}

/// Multiply `previous` by every integer in `(top - span, top]`.
#[inline]
fn falling_product(previous: &BigInt, top: u64, span: u64) -> BigInt {
    let mut next = previous.clone();
    for factor in (top - span + 1)..=top {
        next *= factor;
    }
    next
}

// ============================================================================
// A: (6i)!
// ============================================================================

/// Generator A: `(6i)!`
#[derive(Debug, Default, Clone, Copy)]
pub struct Factorial6kGenerator;

impl TermGenerator for Factorial6kGenerator {
    fn role(&self) -> TermRole {
        TermRole::Factorial6k
    }

    fn generate(&self, iterations: usize, signal: &AbortSignal) -> PiResult<TermSequence> {
        unfold(self.role(), iterations, signal, BigInt::one(), |i, prev| {
            falling_product(prev, 6 * i, 6)
        })
    }
}

// ============================================================================
// B: 13591409 + 545140134·i
// ============================================================================

/// Generator B: `13591409 + 545140134·i`, by repeated addition
#[derive(Debug, Default, Clone, Copy)]
pub struct LinearCoefficientGenerator;

impl TermGenerator for LinearCoefficientGenerator {
    fn role(&self) -> TermRole {
        TermRole::LinearCoefficient
    }

    fn generate(&self, iterations: usize, signal: &AbortSignal) -> PiResult<TermSequence> {
        unfold(
            self.role(),
            iterations,
            signal,
            BigInt::from(LINEAR_BASE),
            |_, prev| {
                let mut next = prev.clone();
                next += LINEAR_STEP;
                next
            },
        )
    }
}

// ============================================================================
// C: (3i)!
// ============================================================================

/// Generator C: `(3i)!`
#[derive(Debug, Default, Clone, Copy)]
pub struct Factorial3kGenerator;

impl TermGenerator for Factorial3kGenerator {
    fn role(&self) -> TermRole {
        TermRole::Factorial3k
    }

    fn generate(&self, iterations: usize, signal: &AbortSignal) -> PiResult<TermSequence> {
        unfold(self.role(), iterations, signal, BigInt::one(), |i, prev| {
            falling_product(prev, 3 * i, 3)
        })
    }
}

// ============================================================================
// D: (i!)³
// ============================================================================

/// Generator D: `(i!)³`, cubing a running factorial
#[derive(Debug, Default, Clone, Copy)]
pub struct FactorialCubedGenerator;

impl TermGenerator for FactorialCubedGenerator {
    fn role(&self) -> TermRole {
        TermRole::FactorialCubed
    }

    fn generate(&self, iterations: usize, signal: &AbortSignal) -> PiResult<TermSequence> {
        let mut k = BigInt::one();
        unfold(self.role(), iterations, signal, BigInt::one(), |i, _| {
            if i >= 2 {
                k *= i;
            }
            &k * &k * &k
        })
    }
}

// ============================================================================
// E: (-640320³)^i
// ============================================================================

/// Generator E: `(-640320³)^i`; the sign alternates by construction
#[derive(Debug, Default, Clone, Copy)]
pub struct AlternatingPowerGenerator;

impl TermGenerator for AlternatingPowerGenerator {
    fn role(&self) -> TermRole {
        TermRole::AlternatingPower
    }

    fn generate(&self, iterations: usize, signal: &AbortSignal) -> PiResult<TermSequence> {
        unfold(self.role(), iterations, signal, BigInt::one(), |_, prev| {
            let mut next = prev.clone();
            next *= ALTERNATING_RATIO;
            next
        })
    }
}

/// The five generators in A–E order.
pub fn standard_generators() -> Vec<Box<dyn TermGenerator>> {
    vec![
        Box::new(Factorial6kGenerator),
        Box::new(LinearCoefficientGenerator),
        Box::new(Factorial3kGenerator),
        Box::new(FactorialCubedGenerator),
        Box::new(AlternatingPowerGenerator),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PiError;

    fn run(generator: &dyn TermGenerator, iterations: usize) -> Vec<BigInt> {
        generator
            .generate(iterations, &AbortSignal::new())
            .unwrap()
            .into_terms()
    }

    fn ints(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|&v| BigInt::from(v)).collect()
    }

    fn factorial(n: u64) -> BigInt {
        (1..=n).fold(BigInt::one(), |acc, f| acc * f)
    }

    #[test]
    fn test_two_term_values() {
        assert_eq!(run(&Factorial6kGenerator, 2), ints(&[1, 720]));
        assert_eq!(
            run(&LinearCoefficientGenerator, 2),
            ints(&[13_591_409, 558_731_543])
        );
        assert_eq!(run(&Factorial3kGenerator, 2), ints(&[1, 6]));
        assert_eq!(run(&FactorialCubedGenerator, 2), ints(&[1, 1]));
        assert_eq!(
            run(&AlternatingPowerGenerator, 2),
            ints(&[1, -262_537_412_640_768_000])
        );
    }

    #[test]
    fn test_recurrences_match_closed_forms() {
        let n = 12;
        let a = run(&Factorial6kGenerator, n);
        let b = run(&LinearCoefficientGenerator, n);
        let c = run(&Factorial3kGenerator, n);
        let d = run(&FactorialCubedGenerator, n);
        let e = run(&AlternatingPowerGenerator, n);

        for i in 0..n as u64 {
            let idx = i as usize;
            assert_eq!(a[idx], factorial(6 * i));
            assert_eq!(b[idx], BigInt::from(LINEAR_BASE + LINEAR_STEP * i));
            assert_eq!(c[idx], factorial(3 * i));
            assert_eq!(d[idx], num_traits::pow(factorial(i), 3));
            assert_eq!(
                e[idx],
                num_traits::pow(BigInt::from(ALTERNATING_RATIO), idx)
            );
        }
    }

    #[test]
    fn test_single_iteration() {
        for generator in standard_generators() {
            let seq = generator.generate(1, &AbortSignal::new()).unwrap();
            assert_eq!(seq.len(), 1);
            assert_eq!(seq.role(), generator.role());
        }
    }

    #[test]
    fn test_alternating_sign() {
        let e = run(&AlternatingPowerGenerator, 5);
        for (i, term) in e.iter().enumerate() {
            let negative = term < &BigInt::from(0);
            assert_eq!(negative, i % 2 == 1);
        }
    }

    #[test]
    fn test_generation_stops_on_abort() {
        let signal = AbortSignal::new();
        signal.raise();
        assert_eq!(
            Factorial6kGenerator.generate(10, &signal),
            Err(PiError::Aborted)
        );
    }

    #[test]
    fn test_standard_order() {
        let roles: Vec<TermRole> = standard_generators().iter().map(|g| g.role()).collect();
        assert_eq!(roles, TermRole::ALL.to_vec());
    }
}
