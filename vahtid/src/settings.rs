//! Process configuration, resolved once at startup.
//!
//! Every value comes from an environment variable, with a Docker-secrets
//! override: when `/run/secrets/<NAME>` exists (possibly with a numeric
//! version suffix, highest version wins), the file's trimmed content takes
//! precedence over the variable. Nothing below `main` reads the
//! environment; the resolved settings are turned into explicit collaborator
//! configs and passed down by value.

use std::fs;
use std::path::Path;

use vahti_core::VahtiError;

const SECRETS_PATH: &str = "/run/secrets/";

/// Cron expressions driving the monitors. Each is optional: an unset
/// expression leaves that monitor unscheduled.
#[derive(Debug, Clone, Default)]
pub struct MonitorCrons {
    /// Schedule of the previous-day gap monitor.
    pub previous_day: Option<String>,
    /// Schedule of the current-day freshness monitor.
    pub current_day: Option<String>,
    /// Schedule of the backlog monitor.
    pub backlog: Option<String>,
    /// Schedule of the disk-space monitor.
    pub disk_space: Option<String>,
}

/// Everything the daemon needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct VahtiSettings {
    /// Environment tag rendered into every alert, e.g. `PROD`.
    pub environment: String,
    /// Slack incoming-webhook URL.
    pub slack_webhook_url: String,
    /// Slack user ids mentioned in alerts (comma separated in the env).
    pub slack_mention_user_ids: Vec<String>,
    /// Pulsar admin endpoint, e.g. `http://10.0.0.1:8080`.
    pub pulsar_admin_url: Option<String>,
    /// Topic coordinates of the monitored sink topic.
    pub pulsar_tenant: String,
    /// See [`pulsar_tenant`](Self::pulsar_tenant).
    pub pulsar_namespace: String,
    /// See [`pulsar_tenant`](Self::pulsar_tenant).
    pub pulsar_topic: String,
    /// Subscription whose backlog is monitored.
    pub pulsar_subscription: String,
    /// Bookie disk-usage endpoints as `(label, url)` pairs.
    pub bookie_disk_urls: Vec<(String, String)>,
    /// Monitor schedules.
    pub crons: MonitorCrons,
}

impl VahtiSettings {
    /// Resolve settings from the environment and the default secrets path.
    ///
    /// # Errors
    /// Returns [`VahtiError::MissingConfig`] for absent required values.
    pub fn from_env() -> Result<Self, VahtiError> {
        Self::from_env_with_secrets(Path::new(SECRETS_PATH))
    }

    fn from_env_with_secrets(secrets_dir: &Path) -> Result<Self, VahtiError> {
        let lookup = |name: &str| resolve(secrets_dir, name);

        let environment = lookup("HFP_MONITOR_TARGET_ENVIRONMENT")
            .ok_or(VahtiError::missing_config("HFP_MONITOR_TARGET_ENVIRONMENT"))?;
        let slack_webhook_url = lookup("HFP_MONITOR_SLACK_WEBHOOK_URL")
            .ok_or(VahtiError::missing_config("HFP_MONITOR_SLACK_WEBHOOK_URL"))?;
        let slack_mention_user_ids = lookup("HFP_MONITOR_SLACK_USER_IDS")
            .map(|ids| split_csv(&ids))
            .unwrap_or_default();

        let pulsar_admin_url = match (
            lookup("HFP_MONITOR_PULSAR_PROXY_IP"),
            lookup("HFP_MONITOR_PULSAR_ADMIN_PORT"),
        ) {
            (Some(ip), Some(port)) => Some(format!("http://{ip}:{port}")),
            _ => None,
        };
        let pulsar_tenant =
            lookup("HFP_MONITOR_PULSAR_TENANT").unwrap_or_else(|| "transitdata".to_string());
        let pulsar_namespace =
            lookup("HFP_MONITOR_PULSAR_NAMESPACE").unwrap_or_else(|| "hfp".to_string());
        let pulsar_topic = lookup("HFP_MONITOR_PULSAR_TOPIC").unwrap_or_else(|| "v2".to_string());
        let pulsar_subscription = lookup("HFP_MONITOR_PULSAR_SUBSCRIPTION")
            .unwrap_or_else(|| "transitlog_hfp_csv_sink".to_string());

        let bookie_disk_urls = match (
            lookup("HFP_MONITOR_PULSAR_BOOKIE_IPS"),
            lookup("HFP_MONITOR_PULSAR_BOOKIE_DISK_SPACE_PORT"),
        ) {
            (Some(ips), Some(port)) => split_csv(&ips)
                .into_iter()
                .map(|ip| (ip.clone(), format!("http://{ip}:{port}/")))
                .collect(),
            _ => vec![],
        };

        Ok(Self {
            environment,
            slack_webhook_url,
            slack_mention_user_ids,
            pulsar_admin_url,
            pulsar_tenant,
            pulsar_namespace,
            pulsar_topic,
            pulsar_subscription,
            bookie_disk_urls,
            crons: MonitorCrons {
                previous_day: lookup("HFP_PREVIOUS_DAY_MONITOR_CRON"),
                current_day: lookup("HFP_CURRENT_DAY_MONITOR_CRON"),
                backlog: lookup("PULSAR_BACKLOG_MONITOR_CRON"),
                disk_space: lookup("AVAILABLE_DISK_SPACE_MONITOR_CRON"),
            },
        })
    }
}

/// Resolve one value: secret file first, environment variable second.
/// Empty values count as absent.
fn resolve(secrets_dir: &Path, name: &str) -> Option<String> {
    if let Some(secret) = read_secret(secrets_dir, name) {
        return Some(secret);
    }
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read the newest version of a secret file, if any.
fn read_secret(secrets_dir: &Path, name: &str) -> Option<String> {
    let entries = fs::read_dir(secrets_dir).ok()?;
    let candidates: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|file| file.starts_with(name))
        .collect();
    let newest = newest_secret(&candidates)?;
    let content = fs::read_to_string(secrets_dir.join(newest)).ok()?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Pick the candidate with the highest numeric version suffix; files with
/// no trailing digit count as version 0.
fn newest_secret(candidates: &[String]) -> Option<&String> {
    candidates.iter().max_by_key(|file| {
        file.chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .unwrap_or(0)
    })
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(ToString::to_string)
        .collect()
}
