//! vahtid, the monitor daemon.
//!
//! Loads configuration once at startup, wires the Slack sink and Pulsar
//! probes to a [`Vahti`] monitor set, and drives each configured monitor on
//! its cron schedule until the process is stopped.
//!
//! Blob-storage collaborators are deliberately not wired here: the storage
//! client is deployment specific and plugs in through the
//! `vahti_core::connector` traits. Scheduling a blob monitor without one
//! degrades every run into the generic "investigate" alert.

mod schedule;
mod settings;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vahti::Vahti;
use vahti_core::VahtiError;
use vahti_pulsar::{BookieDiskGauge, BookieDiskGaugeConfig, PulsarAdmin, PulsarAdminConfig};
use vahti_slack::{SlackConfig, SlackSink};

use crate::schedule::{Monitor, spawn_monitor};
use crate::settings::VahtiSettings;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(e) = run().await {
        error!(error = %e, "vahtid failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), VahtiError> {
    let settings = VahtiSettings::from_env()?;
    info!(environment = %settings.environment, "starting vahtid");

    let sink = SlackSink::new(SlackConfig {
        webhook_url: settings.slack_webhook_url.clone(),
        mention_user_ids: settings.slack_mention_user_ids.clone(),
        environment: settings.environment.clone(),
    })?;

    let mut builder = Vahti::builder().with_sink(Arc::new(sink));

    if let Some(base_url) = &settings.pulsar_admin_url {
        builder = builder.with_backlog_probe(Arc::new(PulsarAdmin::new(PulsarAdminConfig {
            base_url: base_url.clone(),
            tenant: settings.pulsar_tenant.clone(),
            namespace: settings.pulsar_namespace.clone(),
            topic: settings.pulsar_topic.clone(),
            subscription: settings.pulsar_subscription.clone(),
        })?));
    }
    for (label, url) in &settings.bookie_disk_urls {
        builder = builder.with_disk_gauge(Arc::new(BookieDiskGauge::new(BookieDiskGaugeConfig {
            base_url: url.clone(),
            label: label.clone(),
        })?));
    }

    let vahti = Arc::new(builder.build()?);

    let schedules = [
        (Monitor::PreviousDay, settings.crons.previous_day.as_deref()),
        (Monitor::CurrentDay, settings.crons.current_day.as_deref()),
        (Monitor::Backlog, settings.crons.backlog.as_deref()),
        (Monitor::DiskSpace, settings.crons.disk_space.as_deref()),
    ];

    let mut handles = vec![];
    for (monitor, cron) in schedules {
        if let Some(expression) = cron {
            handles.push(spawn_monitor(vahti.clone(), monitor, expression)?);
        }
    }
    if handles.is_empty() {
        return Err(VahtiError::missing_config("at least one monitor cron"));
    }

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| VahtiError::collaborator("signal handler", e.to_string()))?;
    info!("shutting down");
    for handle in handles {
        handle.abort();
    }
    Ok(())
}
