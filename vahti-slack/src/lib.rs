//! Slack incoming-webhook implementation of the vahti [`AlertSink`] seam.
//!
//! Messages are prefixed with user mentions (`<@id>`) and the target
//! environment tag before being POSTed as `mrkdwn` to the configured
//! webhook URL. Delivery is best effort: a failed POST surfaces as a
//! collaborator error and is not retried.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::info;

use vahti_core::{AlertSink, VahtiError};

/// Configuration for the Slack webhook sink.
#[derive(Debug, Clone)]
pub struct SlackConfig {
    /// Incoming-webhook URL the alerts are POSTed to.
    pub webhook_url: String,
    /// Slack user ids to mention at the start of every alert.
    pub mention_user_ids: Vec<String>,
    /// Environment tag rendered as `[tag]` after the mentions.
    pub environment: String,
}

/// [`AlertSink`] delivering to a Slack incoming webhook.
#[derive(Debug)]
pub struct SlackSink {
    config: SlackConfig,
    client: Client,
}

#[derive(Serialize)]
struct WebhookBody<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    text: &'a str,
}

impl SlackSink {
    /// Build a sink from its configuration.
    ///
    /// # Errors
    /// Returns [`VahtiError::MissingConfig`] when the webhook URL is empty
    /// and [`VahtiError::Collaborator`] when the HTTP client cannot be built.
    pub fn new(config: SlackConfig) -> Result<Self, VahtiError> {
        if config.webhook_url.is_empty() {
            return Err(VahtiError::missing_config("slack webhook url"));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| VahtiError::collaborator("slack", e.to_string()))?;
        Ok(Self { config, client })
    }

    /// The full message text as delivered: mentions, environment tag, body.
    #[must_use]
    pub fn compose(&self, message: &str) -> String {
        let mut full = String::new();
        if !self.config.mention_user_ids.is_empty() {
            full.push_str("Hey");
            for id in &self.config.mention_user_ids {
                full.push_str(&format!(" <@{id}>"));
            }
            full.push_str(", ");
        }
        full.push_str(&format!("[{}] {message}", self.config.environment));
        full
    }
}

#[async_trait]
impl AlertSink for SlackSink {
    async fn alert(&self, message: &str) -> Result<(), VahtiError> {
        let text = self.compose(message);
        info!(target: "vahti::slack", %text, "sending a message to slack");

        let body = WebhookBody {
            kind: "mrkdwn",
            text: &text,
        };
        let response = self
            .client
            .post(&self.config.webhook_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| VahtiError::collaborator("slack", e.to_string()))?;

        response
            .error_for_status()
            .map_err(|e| VahtiError::collaborator("slack", e.to_string()))?;
        Ok(())
    }
}
