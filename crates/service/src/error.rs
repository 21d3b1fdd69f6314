//! Typed error enum for the service layer.

use catalog_feed_source::SourceError;
use thiserror::Error;

/// Service-layer error covering cycle-level fetch failures and scheduling.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Snapshot could not be obtained; the cycle was aborted.
    #[error("fetch: {0}")]
    Fetch(#[from] SourceError),

    /// Cron expression rejected at startup.
    #[error("invalid schedule '{expr}': {reason}")]
    Schedule { expr: String, reason: String },

    /// The job scheduler itself failed to start or stop.
    #[error("scheduler: {0}")]
    Scheduler(String),
}

impl ServiceError {
    /// Whether this is a startup configuration problem rather than a runtime failure.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Schedule { .. })
    }
}
