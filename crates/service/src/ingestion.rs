//! One ingestion cycle: fetch once, normalize each entry, upsert each record.
//!
//! The unit of atomicity is a single record's upsert. A cycle that dies halfway
//! leaves every record it already committed in place.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use catalog_feed_core::{GameId, ParseError};
use catalog_feed_source::{CatalogSource, SourceError};
use catalog_feed_storage::{Store, UpsertOutcome};

use crate::ServiceError;
use crate::normalizer::normalize;

/// An entry the normalizer rejected, by its position in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub index: usize,
    pub error: ParseError,
}

/// A normalized record whose write was rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreFailure {
    pub id: GameId,
    pub reason: String,
}

/// Per-entry outcomes of one completed cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Entries in the snapshot.
    pub fetched: usize,
    pub created: usize,
    pub updated: usize,
    pub parse_failures: Vec<EntryFailure>,
    pub store_failures: Vec<StoreFailure>,
}

impl CycleReport {
    /// Records written in this cycle.
    #[must_use]
    pub const fn committed(&self) -> usize {
        self.created + self.updated
    }

    /// Entries that were fetched but not written.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.parse_failures.len() + self.store_failures.len()
    }
}

impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fetched {}, committed {} ({} new, {} updated), skipped {}",
            self.fetched,
            self.committed(),
            self.created,
            self.updated,
            self.skipped()
        )
    }
}

/// Result of asking for a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed(CycleReport),
    /// Another cycle was still running; this firing did nothing.
    Skipped,
}

/// Runs ingestion cycles, at most one at a time.
pub struct IngestionService {
    source: Arc<dyn CatalogSource>,
    store: Store,
    fetch_timeout: Duration,
    /// Set while a cycle is running
    running: AtomicBool,
}

impl fmt::Debug for IngestionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionService")
            .field("store", &self.store)
            .field("fetch_timeout", &self.fetch_timeout)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

/// Clears the running flag when the cycle ends, however it ends.
struct SingleFlight<'a>(&'a AtomicBool);

impl<'a> SingleFlight<'a> {
    fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).ok()?;
        Some(Self(flag))
    }
}

impl Drop for SingleFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl IngestionService {
    #[must_use]
    pub fn new(source: Arc<dyn CatalogSource>, store: Store, fetch_timeout: Duration) -> Self {
        Self { source, store, fetch_timeout, running: AtomicBool::new(false) }
    }

    /// Whether a cycle is in progress right now.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run one cycle unless one is already running.
    ///
    /// Returns `Err` only for cycle-level failures (the snapshot could not be
    /// fetched in time). Entry-level failures are collected in the report.
    pub async fn ingestion_cycle(&self) -> Result<CycleOutcome, ServiceError> {
        let Some(_guard) = SingleFlight::try_acquire(&self.running) else {
            tracing::warn!("Previous ingestion cycle still running, skipping this firing");
            return Ok(CycleOutcome::Skipped);
        };

        let started = Instant::now();
        tracing::info!("Ingestion cycle started");

        let entries = match tokio::time::timeout(self.fetch_timeout, self.source.fetch()).await {
            Ok(Ok(entries)) => entries,
            Ok(Err(e)) => {
                tracing::error!(error = %e, transport = e.is_transport(), "Snapshot fetch failed, cycle aborted");
                return Err(e.into());
            },
            Err(_) => {
                tracing::error!(
                    timeout_secs = self.fetch_timeout.as_secs_f64(),
                    "Snapshot fetch timed out, cycle aborted"
                );
                return Err(SourceError::Timeout.into());
            },
        };

        let mut report = CycleReport { fetched: entries.len(), ..CycleReport::default() };

        for (index, entry) in entries.iter().enumerate() {
            let record = match normalize(entry) {
                Ok(record) => record,
                Err(error) => {
                    tracing::warn!(index, title = %entry.display_title, error = %error, "Skipping malformed entry");
                    report.parse_failures.push(EntryFailure { index, error });
                    continue;
                },
            };

            let id = record.id;
            let store = self.store.clone();
            match tokio::task::spawn_blocking(move || store.upsert_game(&record)).await {
                Ok(Ok(UpsertOutcome::Created)) => report.created += 1,
                Ok(Ok(UpsertOutcome::Updated)) => report.updated += 1,
                Ok(Err(e)) => {
                    tracing::warn!(id, error = %e, busy = e.is_busy(), "Failed to store record");
                    report.store_failures.push(StoreFailure { id, reason: e.to_string() });
                },
                Err(e) => {
                    tracing::warn!(id, error = %e, "Store task failed");
                    report.store_failures.push(StoreFailure { id, reason: e.to_string() });
                },
            }
        }

        tracing::info!(
            fetched = report.fetched,
            created = report.created,
            updated = report.updated,
            parse_failures = report.parse_failures.len(),
            store_failures = report.store_failures.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Ingestion cycle finished"
        );
        Ok(CycleOutcome::Completed(report))
    }
}
