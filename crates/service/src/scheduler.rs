//! Cron-driven ingestion.
//!
//! Each firing calls [`IngestionService::ingestion_cycle`], whose single-flight
//! guard turns an overlapping firing into a logged skip. A failed cycle is
//! logged and the next firing runs as usual.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::ServiceError;
use crate::ingestion::{CycleOutcome, IngestionService};

/// Running cron scheduler with one ingestion job.
pub struct IngestionScheduler {
    scheduler: JobScheduler,
}

impl std::fmt::Debug for IngestionScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestionScheduler").finish_non_exhaustive()
    }
}

/// Check a cron expression (seconds field first) without scheduling anything.
pub fn validate_schedule(expr: &str) -> Result<(), ServiceError> {
    Job::new_async(expr, |_uuid, _lock| Box::pin(async {}))
        .map(drop)
        .map_err(|e| ServiceError::Schedule { expr: expr.to_owned(), reason: e.to_string() })
}

impl IngestionScheduler {
    /// Register the ingestion job on `expr` and start ticking.
    pub async fn start(service: Arc<IngestionService>, expr: &str) -> Result<Self, ServiceError> {
        let job = Job::new_async(expr, move |_uuid, _lock| {
            let service = Arc::clone(&service);
            Box::pin(async move { run_scheduled_cycle(&service).await })
        })
        .map_err(|e| ServiceError::Schedule { expr: expr.to_owned(), reason: e.to_string() })?;

        let scheduler =
            JobScheduler::new().await.map_err(|e| ServiceError::Scheduler(e.to_string()))?;
        scheduler.add(job).await.map_err(|e| ServiceError::Scheduler(e.to_string()))?;
        scheduler.start().await.map_err(|e| ServiceError::Scheduler(e.to_string()))?;

        tracing::info!(schedule = expr, "Ingestion scheduler started");
        Ok(Self { scheduler })
    }

    /// Stop firing. A cycle already in flight is not interrupted.
    pub async fn shutdown(mut self) -> Result<(), ServiceError> {
        self.scheduler.shutdown().await.map_err(|e| ServiceError::Scheduler(e.to_string()))?;
        tracing::info!("Ingestion scheduler stopped");
        Ok(())
    }
}

async fn run_scheduled_cycle(service: &IngestionService) {
    match service.ingestion_cycle().await {
        Ok(CycleOutcome::Completed(report)) => {
            tracing::debug!(%report, "Scheduled ingestion cycle completed");
        },
        Ok(CycleOutcome::Skipped) => {},
        Err(e) => tracing::warn!(error = %e, "Scheduled ingestion cycle failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_schedule() {
        assert!(validate_schedule("0 */30 * * * *").is_ok());
        let err = validate_schedule("every half hour").unwrap_err();
        assert!(err.is_config());
    }
}
