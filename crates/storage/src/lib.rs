//! Storage layer for catalog-feed
//!
//! SQLite-backed store of catalog games and their facets (creator, covers,
//! previews, tag and prefix memberships). One pooled connection per caller;
//! WAL mode lets feed readers run alongside the ingestion writer.

mod error;
mod migrations;
mod store;
#[cfg(test)]
mod tests;

pub use error::StoreError;
pub use store::{Store, UpsertOutcome};
