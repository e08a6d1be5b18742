use std::sync::Arc;

use tracing::warn;

use vahti_core::connector::{AlertSink, BacklogProbe, BlobLister, BlobProperties, DiskGauge};
use vahti_core::{MonitorConfig, VahtiError};

/// The assembled monitor set: collaborators plus thresholds.
///
/// Construct via [`Vahti::builder`]. Monitors are methods on this type; see
/// the `run_*` wrappers for the alert-degrading entry points the scheduler
/// calls.
pub struct Vahti {
    pub(crate) lister: Option<Arc<dyn BlobLister>>,
    pub(crate) properties: Option<Arc<dyn BlobProperties>>,
    pub(crate) sink: Arc<dyn AlertSink>,
    pub(crate) backlog_probe: Option<Arc<dyn BacklogProbe>>,
    pub(crate) disk_gauges: Vec<Arc<dyn DiskGauge>>,
    pub(crate) cfg: MonitorConfig,
}

impl std::fmt::Debug for Vahti {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vahti")
            .field("lister", &self.lister.is_some())
            .field("properties", &self.properties.is_some())
            .field("backlog_probe", &self.backlog_probe.is_some())
            .field("disk_gauges", &self.disk_gauges.len())
            .field("cfg", &self.cfg)
            .finish()
    }
}

impl Vahti {
    /// Start building a monitor set.
    #[must_use]
    pub fn builder() -> VahtiBuilder {
        VahtiBuilder::new()
    }

    /// The listing collaborator, or `MissingConfig` for a storage-less set.
    pub(crate) fn lister(&self) -> Result<&dyn BlobLister, VahtiError> {
        self.lister
            .as_deref()
            .ok_or(VahtiError::missing_config("blob lister"))
    }

    /// The property collaborator, or `MissingConfig` for a storage-less set.
    pub(crate) fn properties(&self) -> Result<&dyn BlobProperties, VahtiError> {
        self.properties
            .as_deref()
            .ok_or(VahtiError::missing_config("blob properties"))
    }

    /// Deliver one alert, logging instead of failing when delivery breaks.
    ///
    /// A failed alert is not retried within the run.
    pub(crate) async fn send_alert(&self, message: &str) {
        if let Err(e) = self.sink.alert(message).await {
            warn!(error = %e, "failed to deliver alert");
        }
    }
}

/// Builder for [`Vahti`].
pub struct VahtiBuilder {
    lister: Option<Arc<dyn BlobLister>>,
    properties: Option<Arc<dyn BlobProperties>>,
    sink: Option<Arc<dyn AlertSink>>,
    backlog_probe: Option<Arc<dyn BacklogProbe>>,
    disk_gauges: Vec<Arc<dyn DiskGauge>>,
    cfg: MonitorConfig,
}

impl Default for VahtiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VahtiBuilder {
    /// Create a builder with default thresholds and no collaborators.
    #[must_use]
    pub fn new() -> Self {
        Self {
            lister: None,
            properties: None,
            sink: None,
            backlog_probe: None,
            disk_gauges: vec![],
            cfg: MonitorConfig::default(),
        }
    }

    /// Register a storage collaborator serving both listing and property
    /// lookups (the usual case; one client speaks to one container).
    /// Optional; the blob monitors fail with `MissingConfig` when absent.
    #[must_use]
    pub fn with_storage<S>(mut self, storage: Arc<S>) -> Self
    where
        S: BlobLister + BlobProperties + 'static,
    {
        self.lister = Some(storage.clone());
        self.properties = Some(storage);
        self
    }

    /// Register the listing collaborator alone.
    #[must_use]
    pub fn with_lister(mut self, lister: Arc<dyn BlobLister>) -> Self {
        self.lister = Some(lister);
        self
    }

    /// Register the property-lookup collaborator alone.
    #[must_use]
    pub fn with_properties(mut self, properties: Arc<dyn BlobProperties>) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Register the alert sink. Required.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn AlertSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Register the broker backlog probe. Optional; the backlog monitor
    /// fails with `MissingConfig` when absent.
    #[must_use]
    pub fn with_backlog_probe(mut self, probe: Arc<dyn BacklogProbe>) -> Self {
        self.backlog_probe = Some(probe);
        self
    }

    /// Register one disk gauge; call repeatedly for several hosts. Probed
    /// in registration order.
    #[must_use]
    pub fn with_disk_gauge(mut self, gauge: Arc<dyn DiskGauge>) -> Self {
        self.disk_gauges.push(gauge);
        self
    }

    /// Override the default thresholds.
    #[must_use]
    pub fn config(mut self, cfg: MonitorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Finish building.
    ///
    /// # Errors
    /// Returns [`VahtiError::MissingConfig`] when the alert sink is
    /// unregistered: every monitor degrades through it, so a set without
    /// one cannot report anything.
    pub fn build(self) -> Result<Vahti, VahtiError> {
        Ok(Vahti {
            lister: self.lister,
            properties: self.properties,
            sink: self.sink.ok_or(VahtiError::missing_config("alert sink"))?,
            backlog_probe: self.backlog_probe,
            disk_gauges: self.disk_gauges,
            cfg: self.cfg,
        })
    }
}
