use tracing::{error, info};

use vahti_core::{DiskReport, VahtiError};

use crate::Vahti;

impl Vahti {
    /// Read disk usage from every registered gauge, in order.
    ///
    /// Probes run strictly one at a time with a short pause between hosts
    /// so the gauges (small shell scripts on the bookie VMs) are never hit
    /// in a burst. The first failing probe aborts the run.
    ///
    /// # Errors
    /// Propagates the failing gauge's `Collaborator`/`Data` error.
    pub async fn disk_space(&self) -> Result<Vec<DiskReport>, VahtiError> {
        info!(gauges = self.disk_gauges.len(), "running disk space monitor");

        let mut reports = Vec::with_capacity(self.disk_gauges.len());
        for (i, gauge) in self.disk_gauges.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.cfg.disk_probe_pause).await;
            }
            let used_percent = gauge.used_percent().await?;
            reports.push(DiskReport {
                label: gauge.label().to_string(),
                used_percent,
            });
        }
        Ok(reports)
    }

    /// Scheduled entry point: probe every host, alert per host below the
    /// available-space threshold, degrade any failure into a generic alert.
    pub async fn run_disk_space(&self) {
        match self.disk_space().await {
            Ok(reports) => {
                for report in reports {
                    let available = report.available_percent();
                    if available < self.cfg.required_available_disk_percent {
                        self.send_alert(&format!(
                            "Pulsar bookie ({}) available disk space was: {available}%, \
                             required available percentage is: {}%. Investigate this and fix \
                             as soon as possible.",
                            report.label, self.cfg.required_available_disk_percent
                        ))
                        .await;
                    }
                    info!(
                        bookie = report.label,
                        available_percent = available,
                        "disk space monitoring complete"
                    );
                }
            }
            Err(e) => {
                error!(error = %e, "disk space monitor failed");
                self.send_alert(
                    "Something bad happened. There seems to be an issue with available disk \
                     space monitor. Investigate and fix the problem.",
                )
                .await;
            }
        }
    }
}
