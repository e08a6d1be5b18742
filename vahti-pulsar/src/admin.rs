use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use vahti_core::{BacklogProbe, VahtiError};

/// Configuration for the admin-API backlog probe.
#[derive(Debug, Clone)]
pub struct PulsarAdminConfig {
    /// Admin endpoint base, e.g. `http://10.0.0.1:8080`.
    pub base_url: String,
    /// Topic tenant, e.g. `transitdata`.
    pub tenant: String,
    /// Topic namespace, e.g. `hfp`.
    pub namespace: String,
    /// Topic name, e.g. `v2`.
    pub topic: String,
    /// Subscription whose backlog is monitored, e.g. `transitlog_hfp_csv_sink`.
    pub subscription: String,
}

/// [`BacklogProbe`] backed by the Pulsar admin `stats` endpoint.
///
/// Queries `/admin/v2/persistent/<tenant>/<namespace>/<topic>/stats` and
/// reads `subscriptions.<subscription>.msgBacklog`.
#[derive(Debug)]
pub struct PulsarAdmin {
    config: PulsarAdminConfig,
    client: Client,
}

/// The slice of the topic-stats document the probe consumes.
#[derive(Debug, Deserialize)]
struct TopicStats {
    #[serde(default)]
    subscriptions: HashMap<String, SubscriptionStats>,
}

#[derive(Debug, Deserialize)]
struct SubscriptionStats {
    #[serde(rename = "msgBacklog")]
    msg_backlog: Option<u64>,
}

impl PulsarAdmin {
    /// Build a probe from its configuration.
    ///
    /// # Errors
    /// Returns [`VahtiError::MissingConfig`] when the base URL is empty and
    /// [`VahtiError::Collaborator`] when the HTTP client cannot be built.
    pub fn new(config: PulsarAdminConfig) -> Result<Self, VahtiError> {
        if config.base_url.is_empty() {
            return Err(VahtiError::missing_config("pulsar admin base url"));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(crate::REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| VahtiError::collaborator("pulsar-admin", e.to_string()))?;
        Ok(Self { config, client })
    }

    fn stats_url(&self) -> String {
        let c = &self.config;
        format!(
            "{}/admin/v2/persistent/{}/{}/{}/stats",
            c.base_url.trim_end_matches('/'),
            c.tenant,
            c.namespace,
            c.topic
        )
    }
}

#[async_trait]
impl BacklogProbe for PulsarAdmin {
    fn label(&self) -> &str {
        &self.config.subscription
    }

    async fn backlog_messages(&self) -> Result<u64, VahtiError> {
        let url = self.stats_url();
        debug!(target: "vahti::pulsar", %url, "fetching topic stats");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| VahtiError::collaborator("pulsar-admin", e.to_string()))?
            .error_for_status()
            .map_err(|e| VahtiError::collaborator("pulsar-admin", e.to_string()))?;

        let stats: TopicStats = response
            .json()
            .await
            .map_err(|e| VahtiError::collaborator("pulsar-admin", e.to_string()))?;

        let subscription = stats
            .subscriptions
            .get(&self.config.subscription)
            .ok_or_else(|| {
                VahtiError::data(format!(
                    "no subscription `{}` in topic stats; has the tenant/namespace/topic changed?",
                    self.config.subscription
                ))
            })?;

        subscription.msg_backlog.ok_or_else(|| {
            VahtiError::data(format!(
                "subscription `{}` has no msgBacklog field",
                self.config.subscription
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_url_joins_topic_coordinates() {
        let probe = PulsarAdmin::new(PulsarAdminConfig {
            base_url: "http://10.0.0.1:8080/".to_string(),
            tenant: "transitdata".to_string(),
            namespace: "hfp".to_string(),
            topic: "v2".to_string(),
            subscription: "sink".to_string(),
        })
        .unwrap();
        assert_eq!(
            probe.stats_url(),
            "http://10.0.0.1:8080/admin/v2/persistent/transitdata/hfp/v2/stats"
        );
    }

    #[test]
    fn empty_base_url_is_missing_config() {
        let err = PulsarAdmin::new(PulsarAdminConfig {
            base_url: String::new(),
            tenant: "t".to_string(),
            namespace: "n".to_string(),
            topic: "v2".to_string(),
            subscription: "s".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, VahtiError::MissingConfig { .. }));
    }
}
