//! Shared configuration and report types consumed by the `vahti` facade.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::NaiveDate;

use crate::ranges::GapRange;

/// One listed storage object: its name and the tags it matched on.
///
/// The monitors only consume `name`; tags are carried for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobStub {
    /// Full object name, e.g. `2024-05-01T08-2_vp.csv.zst`.
    pub name: String,
    /// Tag key/value pairs returned by the listing query.
    pub tags: BTreeMap<String, String>,
}

impl BlobStub {
    /// Convenience constructor for a stub with no tags.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeMap::new(),
        }
    }
}

/// Operating-day predicate handed to the listing collaborator.
///
/// Expresses the container-scope tag comparison (`min_oday`) the storage
/// side evaluates; the lister translates it into its own query syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdayFilter {
    /// Objects whose operating day equals the given day.
    On(NaiveDate),
    /// Objects whose operating day is the given day or later.
    Since(NaiveDate),
}

/// Thresholds driving the monitors. Explicit values passed into the facade;
/// no environment lookups below the process entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// A current-day blob name must encode an hour within this many hours of now.
    pub name_within_hours: i64,
    /// At least one current-day blob must have been modified within this many hours.
    pub modified_within_hours: i64,
    /// Backlog sizes above this many million messages raise an informational alert.
    pub backlog_alert_millions: f64,
    /// Minimum acceptable available disk space, in percent.
    pub required_available_disk_percent: f64,
    /// Pause between consecutive disk gauge probes.
    pub disk_probe_pause: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            name_within_hours: 12,
            modified_within_hours: 4,
            backlog_alert_millions: 50.0,
            required_available_disk_percent: 20.0,
            disk_probe_pause: Duration::from_millis(2500),
        }
    }
}

/// Outcome of the previous-day gap check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapReport {
    /// The day that was inspected.
    pub day: NaiveDate,
    /// Missing coverage, coalesced into minimal contiguous ranges.
    pub ranges: Vec<GapRange>,
}

impl GapReport {
    /// Whether the day was fully covered (the success path, no alert).
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Outcome of the current-day freshness check, ordered by severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreshnessReport {
    /// A recently named and recently modified blob exists.
    Fresh {
        /// Name of the blob that satisfied the recency checks.
        blob_name: String,
    },
    /// Something was modified recently, but no blob name encodes a recent hour.
    NoRecentName,
    /// No observed blob was modified within the threshold. Critical.
    NoRecentModification,
}

/// Backlog reading from the message broker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacklogReport {
    /// Label of the probed subscription.
    pub label: String,
    /// Unconsumed messages currently queued.
    pub messages: u64,
}

impl BacklogReport {
    /// Backlog size in millions of messages.
    #[must_use]
    pub fn millions(&self) -> f64 {
        self.messages as f64 / 1_000_000.0
    }
}

/// Disk usage reading from one probed host.
#[derive(Debug, Clone, PartialEq)]
pub struct DiskReport {
    /// Label of the probed host.
    pub label: String,
    /// Used disk space, in percent.
    pub used_percent: f64,
}

impl DiskReport {
    /// Available disk space, in percent.
    #[must_use]
    pub fn available_percent(&self) -> f64 {
        100.0 - self.used_percent
    }
}
