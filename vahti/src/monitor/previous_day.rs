use chrono::NaiveDate;
use tracing::{debug, error, info};

use vahti_core::{GapReport, OdayFilter, PresenceSet, VahtiError, coalesce};

use super::FIX_ASAP;
use crate::Vahti;

impl Vahti {
    /// Check the previous day's coverage: one storage object per
    /// quarter-hour segment is expected.
    ///
    /// Lists all objects tagged with yesterday's operating day, marks the
    /// observed segments (skipping names that do not parse and names from
    /// neighbouring days), and coalesces the unobserved remainder into
    /// minimal time ranges. An empty report is the success path.
    ///
    /// # Errors
    /// Returns [`VahtiError::Collaborator`] when the listing call fails.
    pub async fn previous_day_gaps(&self, today: NaiveDate) -> Result<GapReport, VahtiError> {
        let day = today
            .pred_opt()
            .ok_or_else(|| VahtiError::data("no previous day exists for the given date"))?;
        info!(%day, "running previous day monitor");

        let blobs = self.lister()?.list_blobs(OdayFilter::On(day)).await?;
        let mut presence = PresenceSet::new(day);
        for blob in &blobs {
            match presence.mark(&blob.name) {
                Ok(_) => {}
                Err(e) => debug!(error = %e, "skipping blob"),
            }
        }

        let ranges = coalesce(&presence.gaps());
        Ok(GapReport { day, ranges })
    }

    /// Scheduled entry point: run the check, alert on gaps, degrade any
    /// failure into a generic alert.
    pub async fn run_previous_day(&self, today: NaiveDate) {
        match self.previous_day_gaps(today).await {
            Ok(report) => {
                if let Some(message) = gap_alert(&report) {
                    self.send_alert(&message).await;
                } else {
                    info!(day = %report.day, "previous day fully covered");
                }
            }
            Err(e) => {
                error!(error = %e, "previous day monitor failed");
                self.send_alert(
                    "Something bad happened. There seems to be an issue with monitoring \
                     HFP-data. Investigate and fix the problem.",
                )
                .await;
            }
        }
    }
}

/// The gap alert text, or `None` for a fully covered day.
fn gap_alert(report: &GapReport) -> Option<String> {
    if report.is_complete() {
        return None;
    }
    let ranges = report
        .ranges
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    Some(format!(
        "Found gap(s) in HFP data ({}): [{ranges}]. {FIX_ASAP}",
        report.day
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vahti_core::{SegmentKey, coalesce};

    #[test]
    fn complete_report_produces_no_alert() {
        let report = GapReport {
            day: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            ranges: vec![],
        };
        assert_eq!(gap_alert(&report), None);
    }

    #[test]
    fn ranges_are_listed_in_order_inside_brackets() {
        let k = |h, s| SegmentKey::new(h, s).unwrap();
        let report = GapReport {
            day: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            ranges: coalesce(&[k(2, 3), k(2, 4), k(17, 1)]),
        };
        assert_eq!(
            gap_alert(&report).unwrap(),
            "Found gap(s) in HFP data (2024-05-01): [02:30 - 03:00 17:00 - 17:15]. \
             Investigate and fix the problem as soon as possible."
        );
    }
}
