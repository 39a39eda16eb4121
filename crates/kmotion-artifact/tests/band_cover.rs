use kmotion_artifact::spectral::band_boundaries;
use proptest::prelude::*;

proptest! {
    /// For monotonic in-range times the bands partition `[0, len)`:
    /// pairwise disjoint and jointly exhaustive.
    #[test]
    fn test_bands_partition_the_axis(
        mut times in proptest::collection::vec(0.001f64..0.999, 1..8),
        len in 1usize..64
    ) {
        times.sort_by(|a, b| a.partial_cmp(b).unwrap());

        let boundaries = band_boundaries(&times, len);
        prop_assert_eq!(boundaries.len(), times.len() + 1);
        prop_assert_eq!(*boundaries.last().unwrap(), len);

        let mut coverage = vec![0usize; len];
        let mut start = 0usize;
        for &end in &boundaries {
            prop_assert!(end >= start, "boundaries must be monotonic for sorted times");
            for cell in &mut coverage[start..end] {
                *cell += 1;
            }
            start = end;
        }

        for (position, &count) in coverage.iter().enumerate() {
            prop_assert_eq!(count, 1, "axis position {} covered {} times", position, count);
        }
    }

    /// Unsorted times never panic; boundaries stay inside `[0, len]`.
    #[test]
    fn test_unsorted_times_stay_bounded(
        times in proptest::collection::vec(-0.5f64..1.5, 1..8),
        len in 1usize..64
    ) {
        let boundaries = band_boundaries(&times, len);
        for &boundary in &boundaries {
            prop_assert!(boundary <= len);
        }
    }
}
