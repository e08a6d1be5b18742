//! Pulsar collaborators for vahti: the admin-API backlog probe and the
//! bookie disk-space gauge.
//!
//! Both are thin `reqwest` clients with explicit base-URL configuration and
//! typed response handling: a response that arrives but lacks the expected
//! subscription or numeric payload is a data error, distinct from transport
//! failure, instead of silently propagating a missing field.
#![warn(missing_docs)]

/// Topic-stats backlog probe against the Pulsar admin API.
pub mod admin;
/// Plain-text disk-usage gauge exposed by each bookie host.
pub mod bookie;

pub use admin::{PulsarAdmin, PulsarAdminConfig};
pub use bookie::{BookieDiskGauge, BookieDiskGaugeConfig};

const REQUEST_TIMEOUT_SECS: u64 = 10;
