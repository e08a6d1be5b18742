use std::collections::HashSet;

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use tracing::{debug, error, info};

use vahti_core::{FreshnessReport, OdayFilter, VahtiError, blobname};

use super::FIX_ASAP;
use crate::Vahti;

impl Vahti {
    /// Check that the sink is still producing output today.
    ///
    /// Two signals, from one listing spanning yesterday onward:
    /// 1. at least one blob name encodes an hour within
    ///    `name_within_hours` of `now`;
    /// 2. at least one observed blob was modified within
    ///    `modified_within_hours` of `now`.
    ///
    /// Property lookups are deduplicated by the parsed `(day, hour)` pair
    /// (same-hour files share a modification cadence) and fetched one at a
    /// time, stopping at the first fresh one.
    ///
    /// # Errors
    /// Returns [`VahtiError::Collaborator`] when listing or a property
    /// lookup fails.
    pub async fn current_day_freshness(
        &self,
        now: DateTime<Utc>,
    ) -> Result<FreshnessReport, VahtiError> {
        let yesterday = (now - Duration::days(1)).date_naive();
        info!(%now, "running current day monitor");

        let blobs = self.lister()?.list_blobs(OdayFilter::Since(yesterday)).await?;

        let expected_hours: HashSet<(NaiveDate, u8)> = (0..self.cfg.name_within_hours)
            .map(|i| {
                let at = now - Duration::hours(i);
                (at.date_naive(), at.hour() as u8)
            })
            .collect();

        let mut recent_name: Option<String> = None;
        let mut unique_names: Vec<String> = Vec::new();
        let mut seen_hours: HashSet<(NaiveDate, u8)> = HashSet::new();
        for blob in blobs {
            let parsed = match blobname::parse(&blob.name) {
                Ok(parsed) => parsed,
                Err(e) => {
                    debug!(error = %e, "skipping blob");
                    continue;
                }
            };
            if recent_name.is_none() && expected_hours.contains(&parsed.hour_key()) {
                recent_name = Some(blob.name.clone());
            }
            if seen_hours.insert(parsed.hour_key()) {
                unique_names.push(blob.name);
            }
        }

        let freshness_floor = now - Duration::hours(self.cfg.modified_within_hours);
        let mut modified_ok = false;
        for name in &unique_names {
            let modified_at = self.properties()?.last_modified(name).await?;
            if modified_at > freshness_floor {
                modified_ok = true;
                break;
            }
        }

        Ok(if !modified_ok {
            FreshnessReport::NoRecentModification
        } else if let Some(blob_name) = recent_name {
            FreshnessReport::Fresh { blob_name }
        } else {
            FreshnessReport::NoRecentName
        })
    }

    /// Scheduled entry point: run the check, alert on staleness, degrade
    /// any failure into a generic alert.
    pub async fn run_current_day(&self, now: DateTime<Utc>) {
        match self.current_day_freshness(now).await {
            Ok(FreshnessReport::Fresh { blob_name }) => {
                info!(%blob_name, "monitoring OK, found a recent blob");
            }
            Ok(FreshnessReport::NoRecentModification) => {
                self.send_alert(&format!(
                    "Critical alert: HFP sink might be down. Did not find any blob with \
                     lastModified within {} hours. {FIX_ASAP}",
                    self.cfg.modified_within_hours
                ))
                .await;
            }
            Ok(FreshnessReport::NoRecentName) => {
                self.send_alert(&format!(
                    "Did not find any blob with name within {} hours. {FIX_ASAP}",
                    self.cfg.name_within_hours
                ))
                .await;
            }
            Err(e) => {
                error!(error = %e, "current day monitor failed");
                self.send_alert(
                    "Something bad happened. There seems to be an issue with monitoring \
                     HFP-data. Investigate and fix the problem.",
                )
                .await;
            }
        }
    }
}
