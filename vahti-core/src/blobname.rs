use chrono::NaiveDate;

use crate::{SegmentKey, VahtiError};

/// The day/hour/segment coordinates parsed from a sink object name.
///
/// Names follow `<yyyy-MM-dd>T<HH>-<S>…csv.zst`; everything after the
/// leading `HH-S` block is opaque and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedBlobName {
    /// Operating day encoded in the name.
    pub oday: NaiveDate,
    /// Quarter-hour slot encoded in the name.
    pub key: SegmentKey,
}

impl ParsedBlobName {
    /// The `(day, hour)` pair, ignoring the segment number.
    ///
    /// The freshness check deduplicates observed blobs by this key, since
    /// same-hour files share a modification cadence.
    #[must_use]
    pub const fn hour_key(&self) -> (NaiveDate, u8) {
        (self.oday, self.key.hour())
    }
}

/// Parse a sink object name into its `(day, hour, segment)` coordinates.
///
/// The date is everything before the first `T`; the four characters after it
/// must read `HH-S` with a two-digit hour and a one-digit segment number.
///
/// ```
/// use vahti_core::blobname;
///
/// let parsed = blobname::parse("2024-05-01T08-2_vp.csv.zst").unwrap();
/// assert_eq!(parsed.oday.to_string(), "2024-05-01");
/// assert_eq!(parsed.key.hour(), 8);
/// assert_eq!(parsed.key.segment(), 2);
/// ```
///
/// # Errors
/// Returns [`VahtiError::BlobName`] when the name has no `T`, the block
/// after it is shorter than four characters or malformed, or any component
/// is out of range. Callers skip such names; they never abort a run.
pub fn parse(name: &str) -> Result<ParsedBlobName, VahtiError> {
    let (date_part, rest) = name
        .split_once('T')
        .ok_or_else(|| VahtiError::blob_name(name))?;

    let oday = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| VahtiError::blob_name(name))?;

    // The hour/segment block is `HH-S` at a fixed offset after the `T`.
    let block = rest.get(..4).ok_or_else(|| VahtiError::blob_name(name))?;
    let (hour_part, seg_part) = block
        .split_once('-')
        .filter(|(h, s)| h.len() == 2 && s.len() == 1)
        .ok_or_else(|| VahtiError::blob_name(name))?;

    let hour: u8 = hour_part
        .parse()
        .map_err(|_| VahtiError::blob_name(name))?;
    let segment: u8 = seg_part
        .parse()
        .map_err(|_| VahtiError::blob_name(name))?;

    let key = SegmentKey::new(hour, segment).ok_or_else(|| VahtiError::blob_name(name))?;

    Ok(ParsedBlobName { oday, key })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_documented_format() {
        let parsed = parse("2024-05-01T08-2_something.csv.zst").unwrap();
        assert_eq!(
            parsed.oday,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert_eq!(parsed.key, SegmentKey::new(8, 2).unwrap());
    }

    #[test]
    fn parses_name_with_nothing_after_block() {
        let parsed = parse("2024-05-01T23-4").unwrap();
        assert_eq!(parsed.key, SegmentKey::new(23, 4).unwrap());
    }

    #[test]
    fn rejects_name_without_separator() {
        assert!(matches!(
            parse("2024-05-01_08-2.csv.zst"),
            Err(VahtiError::BlobName { .. })
        ));
    }

    #[test]
    fn rejects_truncated_block() {
        assert!(parse("2024-05-01T08").is_err());
        assert!(parse("2024-05-01T").is_err());
    }

    #[test]
    fn rejects_non_numeric_components() {
        assert!(parse("2024-05-01Txx-2.csv.zst").is_err());
        assert!(parse("2024-05-01T08-x.csv.zst").is_err());
        assert!(parse("2024-05-01T08_2.csv.zst").is_err());
    }

    #[test]
    fn rejects_out_of_range_hour_and_segment() {
        assert!(parse("2024-05-01T24-1.csv.zst").is_err());
        assert!(parse("2024-05-01T08-0.csv.zst").is_err());
        assert!(parse("2024-05-01T08-5.csv.zst").is_err());
    }

    #[test]
    fn rejects_bad_date() {
        assert!(parse("2024-13-01T08-2.csv.zst").is_err());
        assert!(parse("not-a-dateT08-2.csv.zst").is_err());
    }
}
