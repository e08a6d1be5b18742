//! vahti-core
//!
//! Core types, traits, and algorithms shared across the vahti ecosystem.
//!
//! - `segment`: the quarter-hour [`SegmentKey`] primitive and its adjacency rules.
//! - `blobname`: parsing of sink object names (`<date>T<HH>-<S>…`).
//! - `presence`: the per-day [`PresenceSet`] of observed segments.
//! - `ranges`: coalescing of missing segments into minimal reported ranges.
//! - `connector`: the collaborator role traits every monitor is wired against.
//!
//! This crate performs no I/O. Collaborators (blob storage, alert delivery,
//! Pulsar probes) live behind the `connector` traits; concrete implementations
//! are provided by the sibling crates and exercised by the `vahti` facade.
#![warn(missing_docs)]

/// Parsing of sink object names into day/hour/segment coordinates.
pub mod blobname;
/// Collaborator role traits implemented by storage, alerting, and probe crates.
pub mod connector;
mod error;
/// Per-day bookkeeping of which segments were observed in storage.
pub mod presence;
/// Coalescing of missing segments into minimal human-readable ranges.
pub mod ranges;
/// The quarter-hour segment primitive.
pub mod segment;
pub mod types;

pub use blobname::ParsedBlobName;
pub use connector::{AlertSink, BacklogProbe, BlobLister, BlobProperties, DiskGauge};
pub use error::VahtiError;
pub use presence::PresenceSet;
pub use ranges::{GapRange, coalesce};
pub use segment::{SEGMENTS_PER_DAY, SEGMENTS_PER_HOUR, SegmentKey};
pub use types::*;
