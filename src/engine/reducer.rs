// ============================================================================
// Parallel Reducer
// Partitioned summation of the Chudnovsky series
// ============================================================================
//
// Sum = Σ (A[i]/C[i]) · (B[i]/D[i]) / E[i]
//
// The index range is cut into contiguous partitions, one per worker. A
// worker owns the A and B elements of its partition exclusively (they are
// overwritten as scratch) and only reads C, D and E. Partial sums are then
// added in partition order so the result is reproducible.

use crate::concurrency::{partition_bounds, split_partitions_mut, AbortSignal, Task, WorkerPool};
use crate::domain::{FloatSequence, TermRole};
use crate::error::{PiError, PiResult};
use crate::interfaces::{PipelineEvent, PipelineObserver};
use crate::numeric::BigFloat;
use std::ops::Range;

/// The five float sequences of one run, checked to agree on length and
/// precision.
#[derive(Debug, Clone)]
pub struct SeriesTerms {
    factorial_6k: FloatSequence,
    linear: FloatSequence,
    factorial_3k: FloatSequence,
    cubed: FloatSequence,
    power: FloatSequence,
}

impl SeriesTerms {
    /// Assemble from sequences in any order.
    ///
    /// # Errors
    /// Returns `MalformedSeries` if a role is missing or repeated, or the
    /// sequences disagree on length or precision.
    pub fn from_sequences(sequences: Vec<FloatSequence>) -> PiResult<Self> {
        let mut slots: [Option<FloatSequence>; 5] = Default::default();

        for sequence in sequences {
            let slot = &mut slots[sequence.role() as usize];
            if slot.is_some() {
                return Err(PiError::MalformedSeries);
            }
            *slot = Some(sequence);
        }

        let [Some(factorial_6k), Some(linear), Some(factorial_3k), Some(cubed), Some(power)] =
            slots
        else {
            return Err(PiError::MalformedSeries);
        };

        let terms = Self {
            factorial_6k,
            linear,
            factorial_3k,
            cubed,
            power,
        };

        let len = terms.len();
        let precision = terms.precision();
        let consistent = terms
            .sequences()
            .iter()
            .all(|s| s.len() == len && s.precision() == precision);
        if !consistent {
            return Err(PiError::MalformedSeries);
        }

        Ok(terms)
    }

    fn sequences(&self) -> [&FloatSequence; 5] {
        [
            &self.factorial_6k,
            &self.linear,
            &self.factorial_3k,
            &self.cubed,
            &self.power,
        ]
    }

    /// Number of series terms.
    #[inline]
    pub fn len(&self) -> usize {
        self.factorial_6k.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared working precision.
    #[inline]
    pub fn precision(&self) -> u64 {
        self.factorial_6k.precision()
    }

    /// Sequence for `role`.
    #[cfg(test)]
    pub(crate) fn get(&self, role: TermRole) -> &FloatSequence {
        self.sequences()[role as usize]
    }
}

/// One worker's exclusive view of the series.
struct Partition<'a> {
    index: usize,
    indices: Range<usize>,
    factorial_6k: &'a mut [BigFloat],
    linear: &'a mut [BigFloat],
    factorial_3k: &'a [BigFloat],
    cubed: &'a [BigFloat],
    power: &'a [BigFloat],
}

impl Partition<'_> {
    /// Fold the partition into a partial sum.
    ///
    /// The term is evaluated as A/C, B/D, product, /E in that order; the
    /// order fixes how rounding accumulates in the last bits.
    fn fold(self, precision: u64, signal: &AbortSignal) -> PiResult<BigFloat> {
        let mut partial = BigFloat::zero(precision);

        let scratch = self.factorial_6k.iter_mut().zip(self.linear.iter_mut());
        let divisors = self
            .factorial_3k
            .iter()
            .zip(self.cubed.iter())
            .zip(self.power.iter());

        for ((a, b), ((c, d), e)) in scratch.zip(divisors) {
            signal.check()?;
            *a = a.checked_div(c)?;
            *b = b.checked_div(d)?;
            *a = a.checked_mul(b)?;
            *a = a.checked_div(e)?;
            partial = partial.checked_add(a)?;
        }

        Ok(partial)
    }
}

/// Sum the series over `worker_count` partitions on `pool`.
///
/// Consumes the sequences. A worker count of zero is treated as one, and
/// one above the number of terms is cut down to it.
pub fn reduce(
    mut terms: SeriesTerms,
    worker_count: usize,
    pool: &WorkerPool,
    observer: &dyn PipelineObserver,
) -> PiResult<BigFloat> {
    let precision = terms.precision();
    let partitions = worker_count.min(terms.len()).max(1);
    if partitions < worker_count {
        tracing::debug!(
            requested = worker_count,
            partitions,
            "more workers than terms, partition count capped"
        );
    }
    let bounds = partition_bounds(terms.len(), partitions);

    let factorial_6k = split_partitions_mut(terms.factorial_6k.terms_mut(), &bounds);
    let linear = split_partitions_mut(terms.linear.terms_mut(), &bounds);
    let factorial_3k = terms.factorial_3k.terms();
    let cubed = terms.cubed.terms();
    let power = terms.power.terms();

    let tasks: Vec<Task<'_, BigFloat>> = factorial_6k
        .into_iter()
        .zip(linear)
        .zip(bounds.iter().cloned())
        .enumerate()
        .map(|(index, ((a, b), indices))| {
            let partition = Partition {
                index,
                factorial_6k: a,
                linear: b,
                factorial_3k: &factorial_3k[indices.clone()],
                cubed: &cubed[indices.clone()],
                power: &power[indices.clone()],
                indices,
            };

            Box::new(move |signal: &AbortSignal| -> PiResult<BigFloat> {
                let index = partition.index;
                let indices = partition.indices.clone();
                let partial = partition.fold(precision, signal)?;

                tracing::debug!(partition = index, ?indices, "partition reduced");
                observer.on_event(PipelineEvent::PartitionReduced {
                    partition: index,
                    indices,
                });
                Ok(partial)
            }) as Task<'_, BigFloat>
        })
        .collect();

    let partials = pool.run_all("reduction", tasks)?;

    let grand_sum = partials
        .iter()
        .try_fold(BigFloat::zero(precision), |sum, partial| sum.checked_add(partial))?;

    Ok(grand_sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::combiner::combine;
    use crate::engine::generators::standard_generators;
    use crate::interfaces::NoOpObserver;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct PartitionCounter(AtomicUsize);

    impl PipelineObserver for PartitionCounter {
        fn on_event(&self, event: PipelineEvent) {
            if matches!(event, PipelineEvent::PartitionReduced { .. }) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    fn series(iterations: usize, precision: u64) -> SeriesTerms {
        let signal = AbortSignal::new();
        let sequences = standard_generators()
            .iter()
            .map(|g| {
                let integers = g.generate(iterations, &signal).unwrap();
                combine(integers, precision, &signal).unwrap()
            })
            .collect();
        SeriesTerms::from_sequences(sequences).unwrap()
    }

    /// Straight single-threaded sum with the same per-term order.
    fn sequential_sum(terms: &SeriesTerms) -> BigFloat {
        let mut sum = BigFloat::zero(terms.precision());
        for i in 0..terms.len() {
            let term = |role: TermRole| &terms.get(role).terms()[i];
            let t1 = term(TermRole::Factorial6k)
                .checked_div(term(TermRole::Factorial3k))
                .unwrap();
            let t2 = term(TermRole::LinearCoefficient)
                .checked_div(term(TermRole::FactorialCubed))
                .unwrap();
            let t4 = t1
                .checked_mul(&t2)
                .unwrap()
                .checked_div(term(TermRole::AlternatingPower))
                .unwrap();
            sum = sum.checked_add(&t4).unwrap();
        }
        sum
    }

    fn top_bit(x: &BigFloat) -> i64 {
        x.exponent() + x.mantissa().bits() as i64
    }

    #[test]
    fn test_single_partition_matches_sequential() {
        let terms = series(8, 512);
        let expected = sequential_sum(&terms);

        let sum = reduce(terms, 1, &WorkerPool::default(), &NoOpObserver).unwrap();
        assert_eq!(sum, expected);
    }

    #[test]
    fn test_partitioning_within_rounding_tolerance() {
        let precision = 512;
        let reference = reduce(series(20, precision), 1, &WorkerPool::default(), &NoOpObserver)
            .unwrap();

        for workers in [2, 3, 4, 7, 32] {
            let sum = reduce(
                series(20, precision),
                workers,
                &WorkerPool::default(),
                &NoOpObserver,
            )
            .unwrap();
            let diff = sum.checked_sub(&reference).unwrap();
            // Only the partial-sum association differs: a few ulps at most.
            assert!(
                diff.is_zero() || top_bit(&diff) < top_bit(&reference) - precision as i64 + 8,
                "workers={workers} diverged: {diff:?}"
            );
        }
    }

    #[test]
    fn test_first_term_value() {
        // One term: A/C · B/D / E = 13591409
        let sum = reduce(series(1, 64), 4, &WorkerPool::default(), &NoOpObserver).unwrap();
        assert_eq!(sum.to_decimal_string(0), "13591409");
    }

    #[test]
    fn test_worker_surplus_capped_to_terms() {
        let observer = PartitionCounter::default();
        let sum = reduce(series(3, 256), 100_000, &WorkerPool::default(), &observer).unwrap();
        let expected = reduce(series(3, 256), 3, &WorkerPool::default(), &NoOpObserver).unwrap();

        assert_eq!(sum, expected);
        assert_eq!(observer.0.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_malformed_series_rejected() {
        let mut sequences: Vec<FloatSequence> =
            series(3, 64).sequences().into_iter().cloned().collect();
        sequences.pop();
        assert_eq!(
            SeriesTerms::from_sequences(sequences).unwrap_err(),
            PiError::MalformedSeries
        );
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut sequences: Vec<FloatSequence> =
            series(3, 64).sequences().into_iter().cloned().collect();
        sequences[4] = FloatSequence::new(TermRole::AlternatingPower, 64, Vec::new());
        assert_eq!(
            SeriesTerms::from_sequences(sequences).unwrap_err(),
            PiError::MalformedSeries
        );
    }
}
