use tracing::{error, info};

use vahti_core::{BacklogReport, VahtiError};

use crate::Vahti;

impl Vahti {
    /// Read the broker backlog for the monitored subscription.
    ///
    /// # Errors
    /// Returns [`VahtiError::MissingConfig`] when no probe is registered,
    /// and the probe's own `Collaborator`/`Data` errors otherwise.
    pub async fn backlog(&self) -> Result<BacklogReport, VahtiError> {
        let probe = self
            .backlog_probe
            .as_ref()
            .ok_or(VahtiError::missing_config("backlog probe"))?;
        info!(subscription = probe.label(), "running backlog monitor");

        let messages = probe.backlog_messages().await?;
        Ok(BacklogReport {
            label: probe.label().to_string(),
            messages,
        })
    }

    /// Scheduled entry point: read the backlog, alert above the threshold,
    /// degrade any failure into a generic alert.
    pub async fn run_backlog(&self) {
        match self.backlog().await {
            Ok(report) => {
                let millions = report.millions();
                if millions > self.cfg.backlog_alert_millions {
                    self.send_alert(&format!(
                        "HFP-sink Pulsar backlog has ~{millions:.1} million messages. This is \
                         just for your info, it's good to keep an eye on this situation. Note: \
                         a long backlog can delay the time when blobs are loaded, and once the \
                         backlog storage overflows, HFP-data starts to disappear."
                    ))
                    .await;
                }
                info!(messages = report.messages, "backlog monitoring complete");
            }
            Err(e) => {
                error!(error = %e, "backlog monitor failed");
                self.send_alert(
                    "Something bad happened. There seems to be an issue with pulsar backlog \
                     message count. Investigate and fix the problem.",
                )
                .await;
            }
        }
    }
}
