/// Number of quarter-hour segments in one hour.
pub const SEGMENTS_PER_HOUR: u8 = 4;

/// Number of quarter-hour segments in one calendar day (24 × 4).
pub const SEGMENTS_PER_DAY: usize = 96;

/// One quarter-hour slot of a calendar day.
///
/// The sink splits each hour of data into four numbered files, so a day is
/// covered by exactly [`SEGMENTS_PER_DAY`] keys. Segment numbering restarts
/// every hour (`1` = minute 0, `2` = 15, `3` = 30, `4` = 45), which is why
/// adjacency is defined by [`SegmentKey::follows`] rather than by arithmetic
/// on the segment number.
///
/// The derived `Ord` (hour first, then segment) is the chronological order
/// the coalescer in [`crate::ranges`] depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentKey {
    hour: u8,
    segment: u8,
}

impl SegmentKey {
    /// Build a key from an hour (0–23) and a segment number (1–4).
    ///
    /// Returns `None` when either component is out of range.
    #[must_use]
    pub const fn new(hour: u8, segment: u8) -> Option<Self> {
        if hour < 24 && segment >= 1 && segment <= SEGMENTS_PER_HOUR {
            Some(Self { hour, segment })
        } else {
            None
        }
    }

    /// Hour of day, 0–23.
    #[must_use]
    pub const fn hour(self) -> u8 {
        self.hour
    }

    /// Segment number within the hour, 1–4.
    #[must_use]
    pub const fn segment(self) -> u8 {
        self.segment
    }

    /// Chronological index within the day, 0–95.
    #[must_use]
    pub const fn index(self) -> usize {
        self.hour as usize * SEGMENTS_PER_HOUR as usize + (self.segment as usize - 1)
    }

    /// Inverse of [`index`](Self::index); `None` for indices ≥ 96.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= SEGMENTS_PER_DAY {
            return None;
        }
        let per_hour = SEGMENTS_PER_HOUR as usize;
        Self::new((index / per_hour) as u8, (index % per_hour) as u8 + 1)
    }

    /// Whether `self` is the immediate chronological successor of `prev`.
    ///
    /// True within an hour when the segment number increments by one, and
    /// across an hour boundary when `prev` is the `-4` segment and `self`
    /// is the `-1` segment of the next hour.
    #[must_use]
    pub const fn follows(self, prev: Self) -> bool {
        (self.hour == prev.hour && self.segment == prev.segment + 1)
            || (prev.segment == SEGMENTS_PER_HOUR
                && self.segment == 1
                && self.hour == prev.hour + 1)
    }

    /// Minute of day at which this segment starts (0, 15, …, 1425).
    #[must_use]
    pub const fn start_minute(self) -> u16 {
        self.hour as u16 * 60 + (self.segment as u16 - 1) * 15
    }

    /// Exclusive minute of day at which this segment ends.
    ///
    /// The last segment of the day ends at 1440, rendered as `24:00` by the
    /// range formatter instead of wrapping to the next day's `00:00`.
    #[must_use]
    pub const fn end_minute(self) -> u16 {
        self.start_minute() + 15
    }
}

impl core::fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}-{}", self.hour, self.segment)
    }
}
