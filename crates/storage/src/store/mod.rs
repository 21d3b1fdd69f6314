//! `SQLite` store implementation.
//!
//! All methods are synchronous; async callers go through `spawn_blocking`.
//! Each write method is one transaction, so a reader on another pooled
//! connection sees a record either entirely before or entirely after it.

mod creators;
mod facets;
mod games;

use std::path::Path;
use std::time::Duration;

use catalog_feed_core::constants::DEFAULT_DB_POOL_SIZE;
use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::error::StoreError;
use crate::migrations;

pub use games::UpsertOutcome;

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Handle to the catalog database, cheap to clone and share across tasks.
#[derive(Clone, Debug)]
pub struct Store {
    pub(crate) pool: Pool<SqliteConnectionManager>,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn, StoreError> {
    pool.get().map_err(StoreError::from)
}

/// Render a timestamp the way it is stored (RFC 3339, full precision).
pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339()
}

/// Parse a stored timestamp column.
pub(crate) fn parse_timestamp(column: &str, raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw).map(|d| d.with_timezone(&Utc)).map_err(|e| {
        StoreError::DataCorruption { context: format!("{column} = '{raw}'"), source: Box::new(e) }
    })
}

/// Per-connection settings: WAL so readers never wait on the writer, and a
/// busy timeout for writer-vs-writer contention.
fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(Duration::from_secs(30))?;
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA foreign_keys = ON;",
    )?;
    Ok(())
}

const POOL_SIZE_VAR: &str = "CATALOG_FEED_DB_POOL_SIZE";

fn db_pool_size() -> u32 {
    parse_pool_size(std::env::var(POOL_SIZE_VAR).ok().as_deref())
}

/// Pool size from the raw variable value. Unset falls back silently; zero or
/// garbage falls back with a warning.
fn parse_pool_size(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_DB_POOL_SIZE;
    };
    match raw.trim().parse::<u32>() {
        Ok(size) if size > 0 => size,
        _ => {
            tracing::warn!(
                var = POOL_SIZE_VAR,
                value = raw,
                default = DEFAULT_DB_POOL_SIZE,
                "invalid pool size, using default"
            );
            DEFAULT_DB_POOL_SIZE
        },
    }
}

impl Store {
    /// Open (creating if needed) the database at `db_path` and run migrations.
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or a migration fails.
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        Self::with_pool_size(db_path, db_pool_size())
    }

    /// Like [`Store::new`] with an explicit pool size.
    ///
    /// # Errors
    /// Returns error if the pool cannot be built or a migration fails.
    pub fn with_pool_size(db_path: &Path, pool_size: u32) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(pool_size).build(manager)?;

        // Run migrations on first connection
        let conn = get_conn(&pool)?;
        migrations::run_migrations(&conn).map_err(StoreError::Migration)?;
        drop(conn);

        tracing::info!(pool_size, path = %db_path.display(), "Store initialized with connection pool");

        Ok(Self { pool })
    }

    /// Number of stored games.
    ///
    /// # Errors
    /// Returns error if the query fails.
    pub fn game_count(&self) -> Result<u64, StoreError> {
        let conn = get_conn(&self.pool)?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |row| row.get(0))?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
