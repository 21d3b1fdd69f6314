//! Append-only facets: cover and preview urls, tag and prefix memberships.
//!
//! Every insert ignores an existing (game, value) pair, so re-appending is a no-op.

use catalog_feed_core::GameId;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};

use super::{Store, format_timestamp, get_conn};
use crate::error::StoreError;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Asset {
    Cover,
    Preview,
}

impl Asset {
    const fn insert_sql(self) -> &'static str {
        match self {
            Self::Cover => {
                "INSERT INTO covers (game_id, url, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(game_id, url) DO NOTHING"
            },
            Self::Preview => {
                "INSERT INTO previews (game_id, url, created_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(game_id, url) DO NOTHING"
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Taxonomy {
    Tag,
    Prefix,
}

impl Taxonomy {
    const fn insert_sql(self) -> &'static str {
        match self {
            Self::Tag => {
                "INSERT INTO game_tags (game_id, tag_id) VALUES (?1, ?2)
                 ON CONFLICT(game_id, tag_id) DO NOTHING"
            },
            Self::Prefix => {
                "INSERT INTO game_prefixes (game_id, prefix_id) VALUES (?1, ?2)
                 ON CONFLICT(game_id, prefix_id) DO NOTHING"
            },
        }
    }
}

/// Returns `true` if the url was new for this game.
pub(crate) fn append_asset_in(
    conn: &Connection,
    asset: Asset,
    game_id: GameId,
    url: &str,
    now: DateTime<Utc>,
) -> Result<bool, StoreError> {
    let inserted = conn.execute(asset.insert_sql(), params![game_id, url, format_timestamp(now)])?;
    Ok(inserted > 0)
}

/// Returns how many of `ids` were new memberships.
pub(crate) fn append_memberships_in<'a>(
    conn: &Connection,
    taxonomy: Taxonomy,
    game_id: GameId,
    ids: impl IntoIterator<Item = &'a i64>,
) -> Result<usize, StoreError> {
    let mut stmt = conn.prepare_cached(taxonomy.insert_sql())?;
    let mut inserted = 0;
    for id in ids {
        inserted += stmt.execute(params![game_id, id])?;
    }
    Ok(inserted)
}

impl Store {
    /// Append a cover url for `game_id` unless that game already has it.
    ///
    /// # Errors
    /// Returns [`StoreError::Constraint`] if `game_id` is not stored, or a
    /// database error.
    pub fn append_cover_if_absent(&self, game_id: GameId, url: &str) -> Result<bool, StoreError> {
        let conn = get_conn(&self.pool)?;
        append_asset_in(&conn, Asset::Cover, game_id, url, Utc::now())
    }

    /// Append a preview url for `game_id` unless that game already has it.
    ///
    /// # Errors
    /// Returns [`StoreError::Constraint`] if `game_id` is not stored, or a
    /// database error.
    pub fn append_preview_if_absent(&self, game_id: GameId, url: &str) -> Result<bool, StoreError> {
        let conn = get_conn(&self.pool)?;
        append_asset_in(&conn, Asset::Preview, game_id, url, Utc::now())
    }

    /// Add tag memberships in one transaction; existing pairs are kept as is.
    ///
    /// # Errors
    /// Returns error if any insert fails; nothing is written in that case.
    pub fn append_tag_memberships(&self, game_id: GameId, ids: &[i64]) -> Result<usize, StoreError> {
        self.append_memberships(Taxonomy::Tag, game_id, ids)
    }

    /// Add prefix memberships in one transaction; existing pairs are kept as is.
    ///
    /// # Errors
    /// Returns error if any insert fails; nothing is written in that case.
    pub fn append_prefix_memberships(
        &self,
        game_id: GameId,
        ids: &[i64],
    ) -> Result<usize, StoreError> {
        self.append_memberships(Taxonomy::Prefix, game_id, ids)
    }

    fn append_memberships(
        &self,
        taxonomy: Taxonomy,
        game_id: GameId,
        ids: &[i64],
    ) -> Result<usize, StoreError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;
        let inserted = append_memberships_in(&tx, taxonomy, game_id, ids)?;
        tx.commit()?;
        Ok(inserted)
    }
}
