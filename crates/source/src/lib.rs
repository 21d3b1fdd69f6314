//! Source adapter for catalog-feed
//!
//! Fetches one snapshot of the external catalog and decodes it into
//! [`RawEntry`](catalog_feed_core::RawEntry) values, leaving validation to the
//! normalizer.

mod client;
mod decode;
mod error;


use async_trait::async_trait;
use catalog_feed_core::RawEntry;

pub use client::CatalogClient;
pub use decode::{SourceFormat, decode_snapshot};
pub use error::SourceError;

/// Anything that can produce a snapshot of raw catalog entries.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one snapshot.
    ///
    /// # Errors
    /// Returns [`SourceError`] on network failure, timeout, non-success status
    /// or an undecodable body.
    async fn fetch(&self) -> Result<Vec<RawEntry>, SourceError>;
}
