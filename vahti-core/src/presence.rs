use chrono::NaiveDate;

use crate::segment::{SEGMENTS_PER_DAY, SegmentKey};
use crate::{VahtiError, blobname};

/// The set of quarter-hour segments observed in storage for one target day.
///
/// Built fresh per monitor run with all 96 segments unobserved, populated by
/// [`mark`](Self::mark)ing observed object names, and discarded at the end
/// of the run. Never merged across days.
#[derive(Debug, Clone)]
pub struct PresenceSet {
    day: NaiveDate,
    observed: [bool; SEGMENTS_PER_DAY],
}

impl PresenceSet {
    /// Create an empty presence set for `day`: every segment unobserved.
    #[must_use]
    pub const fn new(day: NaiveDate) -> Self {
        Self {
            day,
            observed: [false; SEGMENTS_PER_DAY],
        }
    }

    /// The target day this set tracks.
    #[must_use]
    pub const fn day(&self) -> NaiveDate {
        self.day
    }

    /// Record an observed object name.
    ///
    /// Parses the name and, when its encoded day equals the target day,
    /// flags that segment as observed. Marking the same name twice is a
    /// no-op. Names from neighbouring days are ignored: a file straddling
    /// midnight shows up in the adjacent day's tag query, and counting it
    /// here would hide a real gap.
    ///
    /// Returns `true` when the name belonged to the target day.
    ///
    /// # Errors
    /// Returns [`VahtiError::BlobName`] for names that do not parse; the
    /// caller skips those and continues.
    pub fn mark(&mut self, name: &str) -> Result<bool, VahtiError> {
        let parsed = blobname::parse(name)?;
        if parsed.oday != self.day {
            return Ok(false);
        }
        self.observe(parsed.key);
        Ok(true)
    }

    /// Flag a segment as observed directly, bypassing name parsing.
    pub const fn observe(&mut self, key: SegmentKey) {
        self.observed[key.index()] = true;
    }

    /// Whether the given segment has been observed.
    #[must_use]
    pub const fn is_observed(&self, key: SegmentKey) -> bool {
        self.observed[key.index()]
    }

    /// Whether every segment of the day has been observed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.observed.iter().all(|&seen| seen)
    }

    /// All unobserved segments in chronological order.
    ///
    /// An empty result means full coverage and is the success path; it must
    /// not trigger an alert.
    #[must_use]
    pub fn gaps(&self) -> Vec<SegmentKey> {
        self.observed
            .iter()
            .enumerate()
            .filter(|&(_, &seen)| !seen)
            .filter_map(|(i, _)| SegmentKey::from_index(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn starts_with_all_96_gaps_in_order() {
        let set = PresenceSet::new(day());
        let gaps = set.gaps();
        assert_eq!(gaps.len(), SEGMENTS_PER_DAY);
        assert!(gaps.windows(2).all(|w| w[1].follows(w[0])));
    }

    #[test]
    fn marking_removes_exactly_that_segment() {
        let mut set = PresenceSet::new(day());
        assert!(set.mark("2024-05-01T08-2_vp.csv.zst").unwrap());
        assert!(set.is_observed(SegmentKey::new(8, 2).unwrap()));
        assert_eq!(set.gaps().len(), SEGMENTS_PER_DAY - 1);
    }

    #[test]
    fn marking_is_idempotent() {
        let mut set = PresenceSet::new(day());
        set.mark("2024-05-01T08-2_vp.csv.zst").unwrap();
        let before = set.gaps();
        set.mark("2024-05-01T08-2_vp.csv.zst").unwrap();
        assert_eq!(set.gaps(), before);
    }

    #[test]
    fn foreign_day_names_are_ignored() {
        let mut set = PresenceSet::new(day());
        // A file straddling midnight carries the next day's name.
        assert!(!set.mark("2024-05-02T00-1_vp.csv.zst").unwrap());
        assert_eq!(set.gaps().len(), SEGMENTS_PER_DAY);
    }

    #[test]
    fn unparseable_names_error_without_mutating() {
        let mut set = PresenceSet::new(day());
        assert!(set.mark("garbage").is_err());
        assert_eq!(set.gaps().len(), SEGMENTS_PER_DAY);
    }

    #[test]
    fn fully_marked_day_has_no_gaps() {
        let mut set = PresenceSet::new(day());
        for i in 0..SEGMENTS_PER_DAY {
            set.observe(SegmentKey::from_index(i).unwrap());
        }
        assert!(set.is_complete());
        assert!(set.gaps().is_empty());
    }
}
