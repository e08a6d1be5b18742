use core::fmt;

use crate::segment::SegmentKey;

/// A maximal run of missing segments, reported as a half-open time range.
///
/// `start` is the first missing segment of the run and `last` the final one;
/// the rendered end bound is exclusive (`last`'s start + 15 minutes), which
/// is also the start of the first present segment after the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapRange {
    start: SegmentKey,
    last: SegmentKey,
}

impl GapRange {
    /// First missing segment of the run.
    #[must_use]
    pub const fn start(&self) -> SegmentKey {
        self.start
    }

    /// Last missing segment of the run (inclusive).
    #[must_use]
    pub const fn last(&self) -> SegmentKey {
        self.last
    }

    /// Duration of the run in minutes.
    #[must_use]
    pub const fn minutes(&self) -> u16 {
        self.last.end_minute() - self.start.start_minute()
    }
}

impl fmt::Display for GapRange {
    /// Renders as `HH:MM - HH:MM` with an exclusive end bound.
    ///
    /// The day-end boundary renders as `24:00` rather than wrapping to
    /// `00:00`, so a gap covering the whole day reads `00:00 - 24:00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start.start_minute();
        let end = self.last.end_minute();
        write!(
            f,
            "{:02}:{:02} - {:02}:{:02}",
            start / 60,
            start % 60,
            end / 60,
            end % 60
        )
    }
}

/// Merge a chronologically ordered list of missing segments into the minimal
/// set of contiguous ranges.
///
/// Adjacent keys (per [`SegmentKey::follows`], which handles the `-4` → next
/// hour `-1` rollover) extend the current run; any break in contiguity
/// closes it. A single isolated missing segment yields a 15-minute range.
///
/// ```
/// use vahti_core::{SegmentKey, coalesce};
///
/// let k = |h, s| SegmentKey::new(h, s).unwrap();
///
/// // 08-2 08-3 08-4 09-1 plus an isolated 11-3
/// let gaps = [k(8, 2), k(8, 3), k(8, 4), k(9, 1), k(11, 3)];
/// let ranges: Vec<String> = coalesce(&gaps).iter().map(ToString::to_string).collect();
/// assert_eq!(ranges, ["08:15 - 09:15", "11:30 - 11:45"]);
/// ```
#[must_use]
pub fn coalesce(gaps: &[SegmentKey]) -> Vec<GapRange> {
    let mut ranges = Vec::new();
    let Some((&first, rest)) = gaps.split_first() else {
        return ranges;
    };

    let mut start = first;
    let mut prev = first;
    for &cur in rest {
        if !cur.follows(prev) {
            ranges.push(GapRange { start, last: prev });
            start = cur;
        }
        prev = cur;
    }
    // The final run is always open at this point.
    ranges.push(GapRange { start, last: prev });
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(hour: u8, segment: u8) -> SegmentKey {
        SegmentKey::new(hour, segment).unwrap()
    }

    fn rendered(gaps: &[SegmentKey]) -> Vec<String> {
        coalesce(gaps).iter().map(ToString::to_string).collect()
    }

    #[test]
    fn empty_input_yields_no_ranges() {
        assert!(coalesce(&[]).is_empty());
    }

    #[test]
    fn isolated_segment_renders_a_quarter_hour() {
        assert_eq!(rendered(&[k(8, 2)]), ["08:15 - 08:30"]);
    }

    #[test]
    fn adjacent_segments_merge() {
        assert_eq!(rendered(&[k(8, 2), k(8, 3)]), ["08:15 - 08:45"]);
    }

    #[test]
    fn hour_rollover_stays_in_one_range() {
        assert_eq!(rendered(&[k(8, 4), k(9, 1)]), ["08:45 - 09:15"]);
    }

    #[test]
    fn disjoint_runs_stay_separate_and_ordered() {
        assert_eq!(
            rendered(&[k(2, 3), k(2, 4), k(3, 2), k(3, 3)]),
            ["02:30 - 03:00", "03:15 - 03:45"]
        );
    }

    #[test]
    fn same_hour_non_adjacent_segments_split() {
        assert_eq!(
            rendered(&[k(8, 1), k(8, 3)]),
            ["08:00 - 08:15", "08:30 - 08:45"]
        );
    }

    #[test]
    fn full_day_coalesces_to_one_wrapping_range() {
        let all: Vec<SegmentKey> = (0..crate::SEGMENTS_PER_DAY)
            .filter_map(SegmentKey::from_index)
            .collect();
        assert_eq!(rendered(&all), ["00:00 - 24:00"]);
    }

    #[test]
    fn trailing_isolated_segment_closes_final_run() {
        assert_eq!(
            rendered(&[k(0, 1), k(0, 2), k(23, 4)]),
            ["00:00 - 00:30", "23:45 - 24:00"]
        );
    }

    #[test]
    fn minutes_reports_run_length() {
        let ranges = coalesce(&[k(8, 4), k(9, 1)]);
        assert_eq!(ranges[0].minutes(), 30);
    }
}
