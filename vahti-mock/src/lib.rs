//! Deterministic collaborators for vahti tests and examples.
//!
//! Every role trait from `vahti_core::connector` has an in-memory
//! implementation here: a fixture-backed storage, a message-collecting
//! alert sink, and fixed-reading probes. Each collaborator has a forced
//! failure mode so the degraded paths of the monitors can be exercised
//! without a network.
#![warn(missing_docs)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use vahti_core::connector::{AlertSink, BacklogProbe, BlobLister, BlobProperties, DiskGauge};
use vahti_core::{BlobStub, OdayFilter, VahtiError, blobname};

/// Fixture-backed implementation of [`BlobLister`] and [`BlobProperties`].
///
/// Each fixture blob carries a `min_oday` tag used to answer listing
/// queries, mirroring the tag predicate the production storage evaluates.
/// By default the tag is the day encoded in the name; override it to
/// simulate files that straddle midnight and surface in the neighbouring
/// day's query.
pub struct MockStorage {
    blobs: Vec<(String, NaiveDate)>,
    last_modified: HashMap<String, DateTime<Utc>>,
    fail_listing: bool,
    fail_properties: bool,
}

impl MockStorage {
    /// Start building a storage fixture.
    #[must_use]
    pub fn builder() -> MockStorageBuilder {
        MockStorageBuilder::default()
    }
}

/// Builder for [`MockStorage`].
#[derive(Default)]
pub struct MockStorageBuilder {
    blobs: Vec<(String, NaiveDate)>,
    last_modified: HashMap<String, DateTime<Utc>>,
    fail_listing: bool,
    fail_properties: bool,
}

impl MockStorageBuilder {
    /// Add a fixture blob whose `min_oday` tag is the day encoded in its name.
    ///
    /// # Panics
    /// Panics when the name does not parse; fixtures with deliberately
    /// malformed names should use [`blob_with_oday`](Self::blob_with_oday).
    #[must_use]
    pub fn blob(self, name: &str) -> Self {
        let oday = blobname::parse(name)
            .map(|p| p.oday)
            .expect("fixture blob name must parse; use blob_with_oday otherwise");
        self.blob_with_oday(name, oday)
    }

    /// Add a fixture blob with an explicit `min_oday` tag.
    #[must_use]
    pub fn blob_with_oday(mut self, name: &str, oday: NaiveDate) -> Self {
        self.blobs.push((name.to_string(), oday));
        self
    }

    /// Record the last-modified timestamp returned for `name`.
    #[must_use]
    pub fn last_modified(mut self, name: &str, at: DateTime<Utc>) -> Self {
        self.last_modified.insert(name.to_string(), at);
        self
    }

    /// Make every listing call fail with a collaborator error.
    #[must_use]
    pub const fn fail_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Make every property lookup fail with a collaborator error.
    #[must_use]
    pub const fn fail_properties(mut self) -> Self {
        self.fail_properties = true;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> MockStorage {
        MockStorage {
            blobs: self.blobs,
            last_modified: self.last_modified,
            fail_listing: self.fail_listing,
            fail_properties: self.fail_properties,
        }
    }
}

#[async_trait]
impl BlobLister for MockStorage {
    async fn list_blobs(&self, filter: OdayFilter) -> Result<Vec<BlobStub>, VahtiError> {
        if self.fail_listing {
            return Err(VahtiError::collaborator("mock-storage", "forced listing failure"));
        }
        let matches = |oday: NaiveDate| match filter {
            OdayFilter::On(day) => oday == day,
            OdayFilter::Since(day) => oday >= day,
        };
        Ok(self
            .blobs
            .iter()
            .filter(|(_, oday)| matches(*oday))
            .map(|(name, oday)| BlobStub {
                name: name.clone(),
                tags: BTreeMap::from([("min_oday".to_string(), oday.to_string())]),
            })
            .collect())
    }
}

#[async_trait]
impl BlobProperties for MockStorage {
    async fn last_modified(&self, name: &str) -> Result<DateTime<Utc>, VahtiError> {
        if self.fail_properties {
            return Err(VahtiError::collaborator(
                "mock-storage",
                "forced property failure",
            ));
        }
        self.last_modified.get(name).copied().ok_or_else(|| {
            VahtiError::collaborator("mock-storage", format!("no such blob: {name}"))
        })
    }
}

/// [`AlertSink`] that collects delivered messages for assertions.
#[derive(Default)]
pub struct MockSink {
    messages: Mutex<Vec<String>>,
    fail: bool,
}

impl MockSink {
    /// A sink that accepts and records every message.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose deliveries always fail.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(vec![]),
            fail: true,
        }
    }

    /// Messages delivered so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("sink lock poisoned").clone()
    }
}

#[async_trait]
impl AlertSink for MockSink {
    async fn alert(&self, message: &str) -> Result<(), VahtiError> {
        if self.fail {
            return Err(VahtiError::collaborator("mock-sink", "forced delivery failure"));
        }
        self.messages
            .lock()
            .expect("sink lock poisoned")
            .push(message.to_string());
        Ok(())
    }
}

/// [`BacklogProbe`] returning a fixed reading.
pub struct MockBacklog {
    label: String,
    reading: Result<u64, String>,
}

impl MockBacklog {
    /// A probe that always reports `messages` queued.
    #[must_use]
    pub fn steady(label: &str, messages: u64) -> Self {
        Self {
            label: label.to_string(),
            reading: Ok(messages),
        }
    }

    /// A probe whose reads always fail.
    #[must_use]
    pub fn failing(label: &str) -> Self {
        Self {
            label: label.to_string(),
            reading: Err("forced probe failure".to_string()),
        }
    }
}

#[async_trait]
impl BacklogProbe for MockBacklog {
    fn label(&self) -> &str {
        &self.label
    }

    async fn backlog_messages(&self) -> Result<u64, VahtiError> {
        self.reading
            .clone()
            .map_err(|msg| VahtiError::collaborator(self.label.clone(), msg))
    }
}

/// [`DiskGauge`] returning a fixed reading.
pub struct MockDisk {
    label: String,
    reading: Result<f64, String>,
}

impl MockDisk {
    /// A gauge that always reports `used_percent` used.
    #[must_use]
    pub fn steady(label: &str, used_percent: f64) -> Self {
        Self {
            label: label.to_string(),
            reading: Ok(used_percent),
        }
    }

    /// A gauge whose reads always fail.
    #[must_use]
    pub fn failing(label: &str) -> Self {
        Self {
            label: label.to_string(),
            reading: Err("forced gauge failure".to_string()),
        }
    }
}

#[async_trait]
impl DiskGauge for MockDisk {
    fn label(&self) -> &str {
        &self.label
    }

    async fn used_percent(&self) -> Result<f64, VahtiError> {
        self.reading
            .clone()
            .map_err(|msg| VahtiError::collaborator(self.label.clone(), msg))
    }
}
