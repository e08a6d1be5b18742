//! Vahti watches an HFP (high-frequency positioning) blob sink and its
//! surrounding pipeline for signs of stalled or degraded ingestion.
//!
//! Overview
//! - The previous-day monitor checks that every quarter-hour of yesterday
//!   produced a storage object, and reports the missing coverage as minimal
//!   human-readable time ranges.
//! - The current-day monitor checks that something recent exists: a blob
//!   named for a recent hour and a blob modified within a threshold.
//! - The backlog and disk-space monitors poll broker telemetry and raise
//!   informational alerts when fixed thresholds are crossed.
//!
//! All I/O goes through the `vahti_core::connector` role traits, so every
//! monitor runs unchanged against production collaborators or the
//! deterministic ones in `vahti-mock`. Each monitor has a `run_*` wrapper
//! that converts any collaborator failure into a single best-effort
//! "investigate" alert; the next scheduled invocation is the retry
//! mechanism.
//!
//! Building a monitor set and running the daily check:
//! ```rust,ignore
//! use std::sync::Arc;
//! use vahti::Vahti;
//!
//! let vahti = Vahti::builder()
//!     .with_storage(Arc::new(storage))
//!     .with_sink(Arc::new(slack))
//!     .with_backlog_probe(Arc::new(admin))
//!     .with_disk_gauge(Arc::new(bookie1))
//!     .build()?;
//!
//! vahti.run_previous_day(chrono::Utc::now().date_naive()).await;
//! ```
#![warn(missing_docs)]

mod core;
mod monitor;

pub use crate::core::{Vahti, VahtiBuilder};
pub use vahti_core::{
    BacklogReport, DiskReport, FreshnessReport, GapRange, GapReport, MonitorConfig, VahtiError,
};
