//! Service layer for catalog-feed
//!
//! Write path: [`IngestionScheduler`] fires [`IngestionService::ingestion_cycle`],
//! which fetches a snapshot, runs every entry through [`normalize`] and upserts
//! the survivors one record at a time. Read path: [`FeedProjector`] joins an
//! allow-list against the store.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

mod error;
mod ingestion;
mod normalizer;
mod projector;
mod scheduler;

#[cfg(test)]
mod ingestion_tests;

pub use error::ServiceError;
pub use ingestion::{CycleOutcome, CycleReport, EntryFailure, IngestionService, StoreFailure};
pub use normalizer::{extract_id, normalize, split_display_title};
pub use projector::FeedProjector;
pub use scheduler::{IngestionScheduler, validate_schedule};
