use rusqlite::{Connection, params};

use super::{Store, get_conn};
use crate::error::StoreError;

/// Get-or-create a creator on an existing connection or transaction.
///
/// `ON CONFLICT DO NOTHING` makes two racing first inserts of the same name
/// resolve to one row; both callers then read back the same id.
pub(crate) fn upsert_creator_in(conn: &Connection, name: &str) -> Result<i64, StoreError> {
    conn.execute("INSERT INTO creators (name) VALUES (?1) ON CONFLICT(name) DO NOTHING", params![
        name
    ])?;
    let id = conn.query_row("SELECT id FROM creators WHERE name = ?1", params![name], |row| {
        row.get(0)
    })?;
    Ok(id)
}

impl Store {
    /// Get-or-create a creator by its unique name and return its id.
    ///
    /// # Errors
    /// Returns error if the insert or lookup fails.
    pub fn upsert_creator(&self, name: &str) -> Result<i64, StoreError> {
        let conn = get_conn(&self.pool)?;
        upsert_creator_in(&conn, name)
    }
}
