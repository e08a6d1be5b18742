use std::collections::BTreeSet;

use proptest::prelude::*;
use vahti_core::{SEGMENTS_PER_DAY, SegmentKey, coalesce};

fn arb_gap_set() -> impl Strategy<Value = Vec<SegmentKey>> {
    // An arbitrary subset of the day's 96 segments, in chronological order.
    proptest::collection::btree_set(0usize..SEGMENTS_PER_DAY, 0..=SEGMENTS_PER_DAY).prop_map(
        |indices| {
            indices
                .into_iter()
                .filter_map(SegmentKey::from_index)
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn ranges_reconstruct_the_gap_set_exactly(gaps in arb_gap_set()) {
        let ranges = coalesce(&gaps);

        let mut covered: BTreeSet<usize> = BTreeSet::new();
        for r in &ranges {
            for i in r.start().index()..=r.last().index() {
                // Ranges never overlap, so every index is fresh.
                prop_assert!(covered.insert(i));
            }
        }

        let expected: BTreeSet<usize> = gaps.iter().map(|k| k.index()).collect();
        prop_assert_eq!(covered, expected);
    }

    #[test]
    fn ranges_are_ordered_and_separated(gaps in arb_gap_set()) {
        let ranges = coalesce(&gaps);

        for w in ranges.windows(2) {
            // Strictly later, with at least one present segment between runs.
            prop_assert!(w[1].start().index() > w[0].last().index() + 1);
        }
    }

    #[test]
    fn range_bounds_are_themselves_gaps_with_present_neighbours(gaps in arb_gap_set()) {
        let missing: BTreeSet<usize> = gaps.iter().map(|k| k.index()).collect();

        for r in coalesce(&gaps) {
            let start = r.start().index();
            let last = r.last().index();
            prop_assert!(missing.contains(&start));
            prop_assert!(missing.contains(&last));
            // Maximality: the segments flanking a run are present (or the day edge).
            if start > 0 {
                prop_assert!(!missing.contains(&(start - 1)));
            }
            if last + 1 < SEGMENTS_PER_DAY {
                prop_assert!(!missing.contains(&(last + 1)));
            }
        }
    }

    #[test]
    fn rendering_is_padded_and_exclusive(gaps in arb_gap_set()) {
        for r in coalesce(&gaps) {
            let text = r.to_string();
            // "HH:MM - HH:MM"
            prop_assert_eq!(text.len(), 13);
            let (start, end) = text.split_once(" - ").unwrap();
            prop_assert!(start < end, "start {} must precede end {}", start, end);
        }
    }
}
