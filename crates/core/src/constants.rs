//! Shared constants for catalog-feed.
//!
//! Defaults that more than one crate (or the CLI) needs to agree on.

/// Snapshot endpoint of the catalog (RSS listing of the latest game updates).
pub const DEFAULT_SOURCE_URL: &str =
    "https://f95zone.to/sam/latest_alpha/latest_data.php?cmd=rss&cat=games";

/// Base URL that feed item permalinks are built on (`<base>/<id>`).
pub const DEFAULT_PERMALINK_BASE: &str = "https://f95zone.to/threads";

/// Default cron expression (seconds field first): every 30 minutes.
pub const DEFAULT_SCHEDULE: &str = "0 */30 * * * *";

/// Upper bound on the time a single snapshot fetch may take.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 60;

/// Upper bound on entries accepted from one snapshot.
pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// SQLite connection pool size when `CATALOG_FEED_DB_POOL_SIZE` is unset.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;

/// Feed channel title.
pub const DEFAULT_CHANNEL_TITLE: &str = "F95zone Latest Updates";

/// Feed channel link.
pub const DEFAULT_CHANNEL_LINK: &str = "https://f95zone.com/latest";

/// Feed channel description.
pub const DEFAULT_CHANNEL_DESCRIPTION: &str = "F95zone Adult Games - Latest Updates RSS Feed";
