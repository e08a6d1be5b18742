use thiserror::Error;

/// Unified error type for the vahti workspace.
///
/// Covers unparseable sink object names, missing configuration, collaborator
/// transport failures, and malformed collaborator payloads. Threshold
/// breaches (gaps, stale data, low disk) are report states, never errors.
#[derive(Debug, Error)]
pub enum VahtiError {
    /// A storage object name does not match the `<date>T<HH>-<S>…` format.
    ///
    /// Callers skip the offending name and continue the run.
    #[error("unparseable blob name: {name}")]
    BlobName {
        /// The offending object name, verbatim.
        name: String,
    },

    /// A required configuration value is absent. Fails the run before any I/O.
    #[error("required configuration `{name}` is missing")]
    MissingConfig {
        /// Name of the missing value (env var or builder field).
        name: &'static str,
    },

    /// A collaborator call (listing, property fetch, HTTP probe, alert
    /// delivery) failed or timed out.
    #[error("{collaborator} failed: {msg}")]
    Collaborator {
        /// Collaborator label that failed (e.g. "blob listing", "pulsar-admin").
        collaborator: String,
        /// Human-readable failure message.
        msg: String,
    },

    /// A collaborator responded, but the payload is missing required fields
    /// or carries non-numeric values where numbers are expected.
    #[error("data issue: {0}")]
    Data(String),
}

impl VahtiError {
    /// Helper: build a `BlobName` error for the given object name.
    pub fn blob_name(name: impl Into<String>) -> Self {
        Self::BlobName { name: name.into() }
    }

    /// Helper: build a `MissingConfig` error for a configuration key.
    #[must_use]
    pub const fn missing_config(name: &'static str) -> Self {
        Self::MissingConfig { name }
    }

    /// Helper: build a `Collaborator` error with the collaborator label and message.
    pub fn collaborator(collaborator: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Collaborator {
            collaborator: collaborator.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Data` error for a malformed payload.
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }
}
