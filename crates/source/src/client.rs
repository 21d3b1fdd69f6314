use std::time::Duration;

use async_trait::async_trait;
use catalog_feed_core::RawEntry;

use crate::CatalogSource;
use crate::decode::{SourceFormat, decode_snapshot};
use crate::error::SourceError;

/// Longest error body kept in [`SourceError::Status`].
const MAX_ERROR_BODY_LEN: usize = 200;

/// HTTP client for the catalog's snapshot endpoint.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    url: String,
    format: SourceFormat,
    max_entries: usize,
}

impl CatalogClient {
    /// Creates a client for `url`; every request is bounded by `timeout`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(
        url: impl Into<String>,
        format: SourceFormat,
        timeout: Duration,
        max_entries: usize,
    ) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("catalog-feed/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SourceError::ClientInit(e.to_string()))?;
        Ok(Self { client, url: url.into(), format, max_entries })
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch(&self) -> Result<Vec<RawEntry>, SourceError> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(SourceError::Status {
                code: status.as_u16(),
                body: truncate(&body, MAX_ERROR_BODY_LEN).to_owned(),
            });
        }

        let body = response.bytes().await?;
        let mut entries = decode_snapshot(&body, self.format)?;

        if entries.len() > self.max_entries {
            tracing::warn!(
                received = entries.len(),
                max_entries = self.max_entries,
                "Snapshot exceeds entry bound, truncating"
            );
            entries.truncate(self.max_entries);
        }
        tracing::debug!(entries = entries.len(), url = %self.url, "Fetched snapshot");
        Ok(entries)
    }
}

/// Truncates a string to the given maximum length at a char boundary.
fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        return s;
    }
    let mut end = max_len;
    while end > 0 && !s.is_char_boundary(end) {
        end = end.saturating_sub(1);
    }
    s.get(..end).unwrap_or("")
}
