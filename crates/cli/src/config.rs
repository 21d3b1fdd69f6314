//! Command-line and environment configuration shared by the subcommands.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use catalog_feed_core::constants::{
    DEFAULT_CHANNEL_DESCRIPTION, DEFAULT_CHANNEL_LINK, DEFAULT_CHANNEL_TITLE,
    DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_ENTRIES, DEFAULT_PERMALINK_BASE, DEFAULT_SOURCE_URL,
};
use catalog_feed_http::ChannelInfo;
use catalog_feed_service::{FeedProjector, IngestionService};
use catalog_feed_source::{CatalogClient, SourceFormat};
use catalog_feed_storage::Store;
use clap::Args;

#[derive(Args, Debug, Clone)]
pub(crate) struct StoreArgs {
    /// SQLite database path [default: <data dir>/catalog-feed/catalog.db]
    #[arg(long = "db", env = "CATALOG_FEED_DB", global = true)]
    pub db_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct SourceArgs {
    /// Catalog snapshot URL
    #[arg(long, env = "CATALOG_FEED_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,
    /// Snapshot format: auto, rss or json
    #[arg(long, env = "CATALOG_FEED_SOURCE_FORMAT", default_value = "auto")]
    pub source_format: SourceFormat,
    #[arg(long, env = "CATALOG_FEED_FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    pub fetch_timeout_secs: u64,
    /// Entries past this many in one snapshot are dropped
    #[arg(long, env = "CATALOG_FEED_MAX_ENTRIES", default_value_t = DEFAULT_MAX_ENTRIES)]
    pub max_entries: usize,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct FeedArgs {
    /// File with one game id per line, in feed order
    #[arg(long, env = "CATALOG_FEED_ID_FILE")]
    pub allow_list: PathBuf,
    #[arg(long, env = "CATALOG_FEED_PERMALINK_BASE", default_value = DEFAULT_PERMALINK_BASE)]
    pub permalink_base: String,
    #[arg(long, env = "CATALOG_FEED_CHANNEL_TITLE", default_value = DEFAULT_CHANNEL_TITLE)]
    pub channel_title: String,
    #[arg(long, env = "CATALOG_FEED_CHANNEL_LINK", default_value = DEFAULT_CHANNEL_LINK)]
    pub channel_link: String,
    #[arg(long, env = "CATALOG_FEED_CHANNEL_DESCRIPTION", default_value = DEFAULT_CHANNEL_DESCRIPTION)]
    pub channel_description: String,
}

impl StoreArgs {
    pub(crate) fn db_path(&self) -> PathBuf {
        self.db_path.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("catalog-feed")
                .join("catalog.db")
        })
    }

    /// Create the parent directory if needed and open the store.
    pub(crate) fn open(&self) -> Result<Store> {
        let db_path = self.db_path();
        ensure_db_dir(&db_path)?;
        Store::new(&db_path).with_context(|| format!("opening store at {}", db_path.display()))
    }
}

impl SourceArgs {
    pub(crate) fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub(crate) fn ingestion_service(&self, store: Store) -> Result<IngestionService> {
        let client = CatalogClient::new(
            self.source_url.clone(),
            self.source_format,
            self.fetch_timeout(),
            self.max_entries,
        )?;
        Ok(IngestionService::new(Arc::new(client), store, self.fetch_timeout()))
    }
}

impl FeedArgs {
    pub(crate) fn projector(&self, store: Store) -> FeedProjector {
        FeedProjector::new(store, self.permalink_base.clone())
    }

    pub(crate) fn channel(&self) -> ChannelInfo {
        ChannelInfo {
            title: self.channel_title.clone(),
            link: self.channel_link.clone(),
            description: self.channel_description.clone(),
        }
    }
}

fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating database directory {}", parent.display()))?;
    }
    Ok(())
}
