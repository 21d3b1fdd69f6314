//! Catalog entries at each stage: raw snapshot entry, canonical record, stored view.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

/// External numeric identifier assigned by the catalog. Never reused.
pub type GameId = i64;

/// One entry of a source snapshot, before any validation.
///
/// Source adapters fill in whatever their wire format carries; the normalizer
/// decides whether it is enough to build a [`CanonicalRecord`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    /// Explicit id field, when the format has one.
    pub id: Option<GameId>,
    /// Permalink whose trailing path segment carries the id.
    pub permalink: Option<String>,
    /// Display title, `"<title> [<version>]"` unless `version` is set.
    pub display_title: String,
    /// Explicit version field, when the format has one.
    pub version: Option<String>,
    /// Attribution list in source order.
    pub creators: Vec<String>,
    pub cover: Option<String>,
    pub previews: Vec<String>,
    pub tags: Vec<i64>,
    pub prefixes: Vec<i64>,
    /// Set when the adapter could not read this entry at all. The normalizer
    /// rejects such entries with [`ParseError::Undecodable`](crate::ParseError::Undecodable).
    pub decode_error: Option<String>,
}

impl RawEntry {
    /// Placeholder for an entry whose wire shape could not be read.
    pub fn undecodable(id: Option<GameId>, reason: impl Into<String>) -> Self {
        Self { id, decode_error: Some(reason.into()), ..Self::default() }
    }
}

/// A validated entry, ready to be upserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRecord {
    pub id: GameId,
    pub title: String,
    pub version: String,
    pub creator: String,
    pub cover: Option<String>,
    pub previews: Vec<String>,
    pub tags: BTreeSet<i64>,
    pub prefixes: BTreeSet<i64>,
}

impl CanonicalRecord {
    /// Record with no facets.
    pub fn new(
        id: GameId,
        title: impl Into<String>,
        version: impl Into<String>,
        creator: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            version: version.into(),
            creator: creator.into(),
            cover: None,
            previews: Vec::new(),
            tags: BTreeSet::new(),
            prefixes: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn cover(mut self, url: impl Into<String>) -> Self {
        self.cover = Some(url.into());
        self
    }

    #[must_use]
    pub fn previews(mut self, urls: Vec<String>) -> Self {
        self.previews = urls;
        self
    }

    #[must_use]
    pub fn tags(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.tags = ids.into_iter().collect();
        self
    }

    #[must_use]
    pub fn prefixes(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.prefixes = ids.into_iter().collect();
        self
    }
}

/// A game as currently stored, joined with its facets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameView {
    pub id: GameId,
    pub title: String,
    pub version: String,
    pub creator: String,
    /// Most recently appended cover, if any was ever stored.
    pub cover: Option<String>,
    pub previews: Vec<String>,
    pub tags: Vec<i64>,
    pub prefixes: Vec<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl GameView {
    /// `"<title> [<version>]"`, the inverse of the normalizer's title split.
    pub fn display_title(&self) -> String {
        format!("{} [{}]", self.title, self.version)
    }
}
