//! Cron-driven execution of the monitors.

use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use cron::Schedule;
use tokio::time::Duration;
use tracing::{error, info};

use vahti::Vahti;
use vahti_core::VahtiError;

/// Which monitor a schedule drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Monitor {
    /// Previous-day gap detection.
    PreviousDay,
    /// Current-day freshness.
    CurrentDay,
    /// Broker backlog.
    Backlog,
    /// Bookie disk space.
    DiskSpace,
}

impl Monitor {
    fn name(self) -> &'static str {
        match self {
            Self::PreviousDay => "previous-day",
            Self::CurrentDay => "current-day",
            Self::Backlog => "backlog",
            Self::DiskSpace => "disk-space",
        }
    }

    async fn run(self, vahti: &Vahti) {
        match self {
            Self::PreviousDay => vahti.run_previous_day(Utc::now().date_naive()).await,
            Self::CurrentDay => vahti.run_current_day(Utc::now()).await,
            Self::Backlog => vahti.run_backlog().await,
            Self::DiskSpace => vahti.run_disk_space().await,
        }
    }
}

/// Spawn a task that runs `monitor` on the given cron expression forever.
///
/// Runs execute to completion before the next fire time is computed, so a
/// slow run skips intermediate fires instead of overlapping itself.
///
/// # Errors
/// Returns [`VahtiError::Data`] for an unparseable cron expression, before
/// anything is spawned.
pub fn spawn_monitor(
    vahti: Arc<Vahti>,
    monitor: Monitor,
    expression: &str,
) -> Result<tokio::task::JoinHandle<()>, VahtiError> {
    let schedule = Schedule::from_str(expression).map_err(|e| {
        VahtiError::data(format!(
            "invalid cron `{expression}` for {} monitor: {e}",
            monitor.name()
        ))
    })?;
    info!(monitor = monitor.name(), cron = expression, "scheduled monitor");

    Ok(tokio::spawn(async move {
        loop {
            let Some(next) = schedule.upcoming(Utc).next() else {
                error!(monitor = monitor.name(), "schedule has no upcoming fire time");
                return;
            };
            let until = (next - Utc::now())
                .to_std()
                .unwrap_or(Duration::from_secs(0));
            info!(monitor = monitor.name(), next = %next, "next monitoring run");
            tokio::time::sleep(until).await;
            monitor.run(&vahti).await;
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vahti_core::connector::AlertSink;

    struct NullSink;

    #[async_trait::async_trait]
    impl AlertSink for NullSink {
        async fn alert(&self, _message: &str) -> Result<(), VahtiError> {
            Ok(())
        }
    }

    fn vahti() -> Arc<Vahti> {
        Arc::new(
            Vahti::builder()
                .with_sink(Arc::new(NullSink))
                .build()
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn invalid_cron_expression_is_rejected_before_spawn() {
        let err = spawn_monitor(vahti(), Monitor::Backlog, "not a cron").unwrap_err();
        assert!(matches!(err, VahtiError::Data(_)));
    }

    #[tokio::test]
    async fn valid_cron_expression_spawns() {
        let handle = spawn_monitor(vahti(), Monitor::Backlog, "0 0 3 * * * *").unwrap();
        handle.abort();
    }
}
