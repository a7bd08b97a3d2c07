// ============================================================================
// Term Combiner
// Converts exact term sequences into the shared floating representation
// ============================================================================

use crate::concurrency::AbortSignal;
use crate::domain::{FloatSequence, TermSequence};
use crate::error::PiResult;
use crate::numeric::BigFloat;

/// Convert every term of `sequence` to a [`BigFloat`] at `precision` bits.
///
/// Integers that fit the precision convert exactly; larger ones round to
/// nearest. The sequence is consumed and each integer is dropped as soon as
/// it has been converted.
pub fn combine(
    sequence: TermSequence,
    precision: u64,
    signal: &AbortSignal,
) -> PiResult<FloatSequence> {
    let role = sequence.role();
    let terms = sequence
        .into_terms()
        .into_iter()
        .map(|term| {
            signal.check()?;
            Ok(BigFloat::from_bigint(term, precision)?)
        })
        .collect::<PiResult<Vec<_>>>()?;

    Ok(FloatSequence::new(role, precision, terms))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TermRole;
    use crate::error::PiError;
    use crate::numeric::NumericError;
    use num_bigint::BigInt;

    #[test]
    fn test_exact_conversion() {
        let seq = TermSequence::new(
            TermRole::AlternatingPower,
            vec![BigInt::from(1), BigInt::from(-262_537_412_640_768_000i64)],
        );
        let floats = combine(seq, 128, &AbortSignal::new()).unwrap();

        assert_eq!(floats.role(), TermRole::AlternatingPower);
        assert_eq!(floats.precision(), 128);
        assert_eq!(floats.len(), 2);
        assert_eq!(floats.terms()[1].to_decimal_string(0), "-262537412640768000");
    }

    #[test]
    fn test_rounding_when_too_wide() {
        // 2^70 + 1 needs 71 bits; at 64 bits it rounds to 2^70.
        let wide = (BigInt::from(1) << 70u32) + 1;
        let seq = TermSequence::new(TermRole::Factorial6k, vec![wide]);
        let floats = combine(seq, 64, &AbortSignal::new()).unwrap();

        let expected = BigFloat::from_bigint(BigInt::from(1) << 70u32, 64).unwrap();
        assert_eq!(floats.terms()[0], expected);
    }

    #[test]
    fn test_zero_precision_is_backend_error() {
        let seq = TermSequence::new(TermRole::Factorial3k, vec![BigInt::from(1)]);
        assert_eq!(
            combine(seq, 0, &AbortSignal::new()),
            Err(PiError::Backend(NumericError::InvalidPrecision))
        );
    }
}
