//! Typed error enum for the source crate.

use thiserror::Error;

/// Cycle-scoped failure to obtain a snapshot.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("snapshot fetch timed out")]
    Timeout,
    #[error("HTTP status {code}: {body}")]
    Status { code: u16, body: String },
    #[error("cannot decode {format} snapshot: {reason}")]
    Decode { format: &'static str, reason: String },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { Self::Timeout } else { Self::Request(err) }
    }
}

impl SourceError {
    /// Whether the failure is on the remote side (or the network) rather than in the payload.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Timeout | Self::Status { .. })
    }
}
