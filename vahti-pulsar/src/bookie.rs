use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use vahti_core::{DiskGauge, VahtiError};

/// Configuration for one bookie disk-space gauge.
///
/// Each bookie VM runs a small script that answers a plain-text used-disk
/// percentage (e.g. `82%`) on a dedicated port.
#[derive(Debug, Clone)]
pub struct BookieDiskGaugeConfig {
    /// Endpoint answering the percentage, e.g. `http://10.0.0.2:9500`.
    pub base_url: String,
    /// Label identifying the bookie in alerts, e.g. its IP.
    pub label: String,
}

/// [`DiskGauge`] reading a bookie's plain-text used-disk endpoint.
pub struct BookieDiskGauge {
    config: BookieDiskGaugeConfig,
    client: Client,
}

impl BookieDiskGauge {
    /// Build a gauge from its configuration.
    ///
    /// # Errors
    /// Returns [`VahtiError::MissingConfig`] when the base URL is empty and
    /// [`VahtiError::Collaborator`] when the HTTP client cannot be built.
    pub fn new(config: BookieDiskGaugeConfig) -> Result<Self, VahtiError> {
        if config.base_url.is_empty() {
            return Err(VahtiError::missing_config("bookie disk gauge base url"));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(crate::REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| VahtiError::collaborator(config.label.clone(), e.to_string()))?;
        Ok(Self { config, client })
    }
}

/// Parse a `NN%` (or bare `NN`) payload into a percentage.
fn parse_percent(body: &str) -> Result<f64, VahtiError> {
    let trimmed = body.trim().trim_end_matches('%');
    let value: f64 = trimmed
        .parse()
        .map_err(|_| VahtiError::data(format!("non-numeric disk-usage payload: {body:?}")))?;
    if !(0.0..=100.0).contains(&value) {
        return Err(VahtiError::data(format!(
            "disk-usage percentage out of range: {value}"
        )));
    }
    Ok(value)
}

#[async_trait]
impl DiskGauge for BookieDiskGauge {
    fn label(&self) -> &str {
        &self.config.label
    }

    async fn used_percent(&self) -> Result<f64, VahtiError> {
        debug!(target: "vahti::pulsar", bookie = %self.config.label, "probing disk usage");

        let response = self
            .client
            .get(&self.config.base_url)
            .send()
            .await
            .map_err(|e| VahtiError::collaborator(self.config.label.clone(), e.to_string()))?
            .error_for_status()
            .map_err(|e| VahtiError::collaborator(self.config.label.clone(), e.to_string()))?;

        let body = response
            .text()
            .await
            .map_err(|e| VahtiError::collaborator(self.config.label.clone(), e.to_string()))?;
        if body.trim().is_empty() {
            return Err(VahtiError::data(format!(
                "bookie {} returned an empty disk-usage payload",
                self.config.label
            )));
        }
        parse_percent(&body)
    }
}
