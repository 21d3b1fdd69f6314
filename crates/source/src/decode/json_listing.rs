//! JSON listing: `{"msg": {"data": [ {thread_id, title, version, creator, ...} ]}}`.
//!
//! A bare top-level array of entries is accepted too.

use catalog_feed_core::{GameId, RawEntry};
use serde::Deserialize;
use serde_json::Value;

use crate::error::SourceError;

#[derive(Deserialize)]
struct ListingEntry {
    thread_id: Option<GameId>,
    #[serde(default)]
    title: String,
    version: Option<String>,
    creator: Option<String>,
    cover: Option<String>,
    #[serde(default)]
    screens: Vec<String>,
    #[serde(default)]
    tags: Vec<i64>,
    #[serde(default)]
    prefixes: Vec<i64>,
}

impl From<ListingEntry> for RawEntry {
    fn from(entry: ListingEntry) -> Self {
        Self {
            id: entry.thread_id,
            permalink: None,
            display_title: entry.title,
            version: entry.version,
            creators: entry.creator.into_iter().filter(|c| !c.trim().is_empty()).collect(),
            cover: entry.cover.filter(|c| !c.is_empty()),
            previews: entry.screens,
            tags: entry.tags,
            prefixes: entry.prefixes,
            decode_error: None,
        }
    }
}

/// Decode the envelope, then each entry on its own.
///
/// An entry with a wrong-typed field becomes an undecodable [`RawEntry`] so the
/// rest of the listing still goes through.
pub(super) fn decode(body: &[u8]) -> Result<Vec<RawEntry>, SourceError> {
    let document: Value = serde_json::from_slice(body).map_err(|e| decode_error(e.to_string()))?;
    let items = match document {
        Value::Array(items) => items,
        Value::Object(mut root) => match root.remove("msg") {
            Some(Value::Object(mut msg)) => match msg.remove("data") {
                Some(Value::Array(items)) => items,
                None | Some(Value::Null) => Vec::new(),
                Some(_) => return Err(decode_error("'msg.data' is not an array".to_owned())),
            },
            _ => return Err(decode_error("missing 'msg' object".to_owned())),
        },
        _ => return Err(decode_error("expected an object or an array".to_owned())),
    };

    Ok(items.into_iter().enumerate().map(|(index, item)| entry_from_value(index, item)).collect())
}

fn entry_from_value(index: usize, item: Value) -> RawEntry {
    let id = item.get("thread_id").and_then(Value::as_i64);
    match serde_json::from_value::<ListingEntry>(item) {
        Ok(entry) => RawEntry::from(entry),
        Err(e) => {
            tracing::debug!(index, ?id, error = %e, "Listing entry has an unexpected shape");
            RawEntry::undecodable(id, e.to_string())
        },
    }
}

fn decode_error(reason: String) -> SourceError {
    SourceError::Decode { format: "json", reason }
}
