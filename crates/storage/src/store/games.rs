use catalog_feed_core::{CanonicalRecord, GameId, GameView};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, TransactionBehavior, params};

use super::creators::upsert_creator_in;
use super::facets::{Asset, Taxonomy, append_asset_in, append_memberships_in};
use super::{Store, format_timestamp, get_conn, parse_timestamp};
use crate::error::StoreError;

/// Whether an upsert created the game row or overwrote an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Game row joined with its creator, timestamps still raw.
struct GameRow {
    title: String,
    version: String,
    creator: String,
    created_at: String,
    updated_at: String,
}

impl Store {
    /// Write one canonical record, stamping it with the current time.
    ///
    /// # Errors
    /// Returns error if any part of the write fails; nothing is committed then.
    pub fn upsert_game(&self, record: &CanonicalRecord) -> Result<UpsertOutcome, StoreError> {
        self.upsert_game_at(record, Utc::now())
    }

    /// Write one canonical record as a single transaction.
    ///
    /// Title, version and creator are overwritten; `updated_at` is set to `now`
    /// even when nothing else changed; `created_at` is set only on insert.
    /// Covers, previews and taxonomy memberships are appended, never removed.
    ///
    /// # Errors
    /// Returns error if any part of the write fails; nothing is committed then.
    pub fn upsert_game_at(
        &self,
        record: &CanonicalRecord,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut conn = get_conn(&self.pool)?;
        // IMMEDIATE takes the write lock up front instead of upgrading mid-transaction.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let existed = tx
            .query_row("SELECT 1 FROM games WHERE id = ?1", params![record.id], |_| Ok(()))
            .optional()?
            .is_some();

        let creator_id = upsert_creator_in(&tx, &record.creator)?;
        let ts = format_timestamp(now);
        tx.execute(
            "INSERT INTO games (id, title, version, creator_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)
             ON CONFLICT(id) DO UPDATE SET
                 title = excluded.title,
                 version = excluded.version,
                 creator_id = excluded.creator_id,
                 updated_at = excluded.updated_at",
            params![record.id, record.title, record.version, creator_id, ts],
        )?;

        if let Some(cover) = &record.cover {
            append_asset_in(&tx, Asset::Cover, record.id, cover, now)?;
        }
        for preview in &record.previews {
            append_asset_in(&tx, Asset::Preview, record.id, preview, now)?;
        }
        append_memberships_in(&tx, Taxonomy::Tag, record.id, &record.tags)?;
        append_memberships_in(&tx, Taxonomy::Prefix, record.id, &record.prefixes)?;

        tx.commit()?;

        Ok(if existed { UpsertOutcome::Updated } else { UpsertOutcome::Created })
    }

    /// Current state of one game with its facets, or `None` if it is not stored.
    ///
    /// Row and facets are read inside one transaction, i.e. one snapshot.
    ///
    /// # Errors
    /// Returns error if a query fails or a stored timestamp is unreadable.
    pub fn get_game_by_id(&self, id: GameId) -> Result<Option<GameView>, StoreError> {
        let mut conn = get_conn(&self.pool)?;
        let tx = conn.transaction()?;

        let row = tx
            .query_row(
                "SELECT g.title, g.version, c.name, g.created_at, g.updated_at
                 FROM games g JOIN creators c ON c.id = g.creator_id
                 WHERE g.id = ?1",
                params![id],
                |row| {
                    Ok(GameRow {
                        title: row.get(0)?,
                        version: row.get(1)?,
                        creator: row.get(2)?,
                        created_at: row.get(3)?,
                        updated_at: row.get(4)?,
                    })
                },
            )
            .optional()?;
        let Some(row) = row else {
            return Ok(None);
        };

        let cover: Option<String> = tx
            .query_row(
                "SELECT url FROM covers WHERE game_id = ?1 ORDER BY id DESC LIMIT 1",
                params![id],
                |r| r.get(0),
            )
            .optional()?;

        let previews = {
            let mut stmt =
                tx.prepare_cached("SELECT url FROM previews WHERE game_id = ?1 ORDER BY id")?;
            stmt.query_map(params![id], |r| r.get(0))?.collect::<Result<Vec<String>, _>>()?
        };
        let tags = {
            let mut stmt = tx.prepare_cached(
                "SELECT tag_id FROM game_tags WHERE game_id = ?1 ORDER BY tag_id",
            )?;
            stmt.query_map(params![id], |r| r.get(0))?.collect::<Result<Vec<i64>, _>>()?
        };
        let prefixes = {
            let mut stmt = tx.prepare_cached(
                "SELECT prefix_id FROM game_prefixes WHERE game_id = ?1 ORDER BY prefix_id",
            )?;
            stmt.query_map(params![id], |r| r.get(0))?.collect::<Result<Vec<i64>, _>>()?
        };

        tx.commit()?;

        Ok(Some(GameView {
            id,
            title: row.title,
            version: row.version,
            creator: row.creator,
            cover,
            previews,
            tags,
            prefixes,
            created_at: parse_timestamp("games.created_at", &row.created_at)?,
            updated_at: parse_timestamp("games.updated_at", &row.updated_at)?,
        }))
    }
}
