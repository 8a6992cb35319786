//! Property tests for the metric calculation.

use abcsize::AbcCounts;
use proptest::prelude::*;

proptest! {
    /// The score is the integer square root of the component sum:
    /// size² ≤ A² + B² + C² < (size + 1)².
    #[test]
    fn size_is_the_floored_root_of_the_component_sum(
        a in 0u32..=2000,
        b in 0u32..=2000,
        c in 0u32..=2000,
    ) {
        let counts = AbcCounts::new(a, b, c);
        let size = u64::from(counts.size());
        let sum = [a, b, c]
            .iter()
            .map(|&x| u64::from(x) * u64::from(x))
            .sum::<u64>();
        prop_assert!(size * size <= sum);
        prop_assert!(sum < (size + 1) * (size + 1));
    }

    /// Adding events to any axis never shrinks the score.
    #[test]
    fn size_is_monotonic_per_axis(
        a in 0u32..=2000,
        b in 0u32..=2000,
        c in 0u32..=2000,
    ) {
        let base = AbcCounts::new(a, b, c).size();
        prop_assert!(AbcCounts::new(a + 1, b, c).size() >= base);
        prop_assert!(AbcCounts::new(a, b + 1, c).size() >= base);
        prop_assert!(AbcCounts::new(a, b, c + 1).size() >= base);
    }
}
