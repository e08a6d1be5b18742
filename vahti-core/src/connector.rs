use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::VahtiError;
use crate::types::{BlobStub, OdayFilter};

/// Focused role trait for collaborators that list sink objects by tag query.
///
/// The returned sequence is consumed in order; pagination, authentication,
/// and retry are the implementation's concern.
#[async_trait]
pub trait BlobLister: Send + Sync {
    /// List every object whose operating-day tags satisfy `filter`.
    ///
    /// # Errors
    /// Returns [`VahtiError::Collaborator`] when the listing call fails or
    /// times out.
    async fn list_blobs(&self, filter: OdayFilter) -> Result<Vec<BlobStub>, VahtiError>;
}

/// Focused role trait for per-object property lookups.
///
/// Used only by the current-day freshness check; gap detection works on
/// names alone.
#[async_trait]
pub trait BlobProperties: Send + Sync {
    /// Fetch the last-modified timestamp of one object.
    ///
    /// # Errors
    /// Returns [`VahtiError::Collaborator`] when the lookup fails.
    async fn last_modified(&self, name: &str) -> Result<DateTime<Utc>, VahtiError>;
}

/// Focused role trait for alert delivery.
///
/// Accepts free text; formatting, mention syntax, and transport are the
/// sink's concern. The monitors only produce the message body.
#[async_trait]
pub trait AlertSink: Send + Sync {
    /// Deliver one alert message.
    ///
    /// # Errors
    /// Returns [`VahtiError::Collaborator`] on delivery failure. The caller
    /// logs and moves on; a failed alert is not retried within the run.
    async fn alert(&self, message: &str) -> Result<(), VahtiError>;
}

/// Focused role trait for message-broker backlog readings.
#[async_trait]
pub trait BacklogProbe: Send + Sync {
    /// Human-readable label of the probed subscription.
    fn label(&self) -> &str;

    /// Current count of unconsumed messages.
    ///
    /// # Errors
    /// Returns [`VahtiError::Collaborator`] on transport failure and
    /// [`VahtiError::Data`] when the response lacks the backlog field.
    async fn backlog_messages(&self) -> Result<u64, VahtiError>;
}

/// Focused role trait for disk-usage readings from one host.
#[async_trait]
pub trait DiskGauge: Send + Sync {
    /// Human-readable label of the probed host.
    fn label(&self) -> &str;

    /// Used disk space at the monitored path, in percent.
    ///
    /// # Errors
    /// Returns [`VahtiError::Collaborator`] on transport failure and
    /// [`VahtiError::Data`] for non-numeric payloads.
    async fn used_percent(&self) -> Result<f64, VahtiError>;
}
