// ============================================================================
// Index Partitioning
// Contiguous, disjoint split of the series index range across workers
// ============================================================================

use std::ops::Range;

/// Lower bound of partition `k` out of `partitions` over `len` indices.
#[inline]
fn boundary(k: usize, len: usize, partitions: usize) -> usize {
    // u128 keeps k·len from overflowing; the quotient is ≤ len.
    ((k as u128 * len as u128) / partitions as u128) as usize
}

/// Split `[0, len)` into `partitions` contiguous ranges.
///
/// Partition `k` covers `[k·len/partitions, (k+1)·len/partitions)` and the
/// last one always ends at `len`, so every index lands in exactly one range.
/// Ranges may be empty when `partitions > len`. A partition count of zero is
/// treated as one.
pub fn partition_bounds(len: usize, partitions: usize) -> Vec<Range<usize>> {
    let partitions = partitions.max(1);

    (0..partitions)
        .map(|k| {
            let start = boundary(k, len, partitions);
            let end = if k + 1 == partitions {
                len
            } else {
                boundary(k + 1, len, partitions)
            };
            start..end
        })
        .collect()
}

/// Carve `slice` into one mutable sub-slice per range.
///
/// `bounds` must be the contiguous output of [`partition_bounds`] for
/// `slice.len()`; the borrow checker then guarantees the pieces are disjoint.
pub fn split_partitions_mut<'a, T>(
    mut slice: &'a mut [T],
    bounds: &[Range<usize>],
) -> Vec<&'a mut [T]> {
    let mut pieces = Vec::with_capacity(bounds.len());

    for range in bounds {
        let (head, tail) = std::mem::take(&mut slice).split_at_mut(range.len());
        pieces.push(head);
        slice = tail;
    }

    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_even_split() {
        assert_eq!(partition_bounds(8, 4), vec![0..2, 2..4, 4..6, 6..8]);
    }

    #[test]
    fn test_remainder_absorbed() {
        let bounds = partition_bounds(10, 4);
        assert_eq!(bounds, vec![0..2, 2..5, 5..7, 7..10]);
        assert_eq!(bounds.last().unwrap().end, 10);
    }

    #[test]
    fn test_more_partitions_than_indices() {
        let bounds = partition_bounds(2, 4);
        assert_eq!(bounds.len(), 4);
        let covered: usize = bounds.iter().map(|r| r.len()).sum();
        assert_eq!(covered, 2);
    }

    #[test]
    fn test_zero_partitions_degenerate() {
        assert_eq!(partition_bounds(5, 0), vec![0..5]);
    }

    #[test]
    fn test_split_mut_is_disjoint() {
        let mut values: Vec<usize> = vec![0; 7];
        let bounds = partition_bounds(values.len(), 3);
        for (k, piece) in split_partitions_mut(&mut values, &bounds)
            .into_iter()
            .enumerate()
        {
            for v in piece.iter_mut() {
                *v = k;
            }
        }
        assert_eq!(values, vec![0, 0, 1, 1, 2, 2, 2]);
    }

    proptest! {
        #[test]
        fn prop_partitions_cover_range_exactly(len in 0usize..5000, workers in 1usize..64) {
            let bounds = partition_bounds(len, workers);
            prop_assert_eq!(bounds.len(), workers);

            // Contiguous from 0 to len: no gaps, no overlap.
            let mut expected_start = 0;
            for range in &bounds {
                prop_assert_eq!(range.start, expected_start);
                prop_assert!(range.start <= range.end);
                expected_start = range.end;
            }
            prop_assert_eq!(expected_start, len);

            let mut seen = vec![0u8; len];
            for range in &bounds {
                for i in range.clone() {
                    seen[i] += 1;
                }
            }
            prop_assert!(seen.iter().all(|&count| count == 1));
        }
    }
}
