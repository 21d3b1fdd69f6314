//! Raw snapshot entry to canonical record.
//!
//! Every failure is scoped to the one entry being normalized; the caller
//! reports it and carries on with the rest of the snapshot.
//!
//! Creator policy: only the first attribution is kept. Catalog entries list
//! the developer first and co-credits after it; the schema holds exactly one
//! creator per game, so the rest are dropped here (and logged at debug).

use std::sync::LazyLock;

use catalog_feed_core::{CanonicalRecord, GameId, ParseError, RawEntry};
use regex::Regex;

/// `"[LABEL] [LABEL] <title> [<version>]"`, labels optional.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static DISPLAY_TITLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\s*\[[^\]]*\])*\s*(?P<title>.*?)\s*\[(?P<version>[^\[\]]+)\]\s*$").unwrap()
});

/// Leading `[LABEL]` groups, stripped when the version comes from its own field.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static LEADING_LABELS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s*\[[^\]]*\])+\s*").unwrap());

/// Normalize one raw entry.
pub fn normalize(entry: &RawEntry) -> Result<CanonicalRecord, ParseError> {
    if let Some(reason) = &entry.decode_error {
        return Err(ParseError::Undecodable(reason.clone()));
    }

    let id = match (entry.id, entry.permalink.as_deref()) {
        (Some(id), _) => id,
        (None, Some(permalink)) => extract_id(permalink)?,
        (None, None) => return Err(ParseError::MissingId),
    };

    let (title, version) = match entry.version.as_deref().map(str::trim) {
        Some(version) if !version.is_empty() => {
            let title = LEADING_LABELS_REGEX.replace(&entry.display_title, "").trim().to_owned();
            if title.is_empty() {
                return Err(ParseError::EmptyTitle);
            }
            (title, version.to_owned())
        },
        _ => split_display_title(&entry.display_title)?,
    };

    let creator = match entry.creators.split_first() {
        Some((first, rest)) if !first.trim().is_empty() => {
            if !rest.is_empty() {
                tracing::debug!(id, discarded = ?rest, "Keeping first creator only");
            }
            first.trim().to_owned()
        },
        _ => return Err(ParseError::MissingCreator),
    };

    let mut previews: Vec<String> = Vec::with_capacity(entry.previews.len());
    for url in entry.previews.iter().map(|u| u.trim()).filter(|u| !u.is_empty()) {
        if !previews.iter().any(|seen| seen == url) {
            previews.push(url.to_owned());
        }
    }

    let mut record = CanonicalRecord::new(id, title, version, creator)
        .previews(previews)
        .tags(entry.tags.iter().copied())
        .prefixes(entry.prefixes.iter().copied());
    if let Some(cover) = entry.cover.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        record = record.cover(cover);
    }
    Ok(record)
}

/// Numeric id from the trailing path segment of a permalink.
///
/// Accepts a bare number (`/threads/123`) or a slug suffix (`/threads/foo.123/`).
/// Query strings, fragments and trailing slashes are ignored.
pub fn extract_id(permalink: &str) -> Result<GameId, ParseError> {
    let invalid = || ParseError::InvalidPermalink(permalink.to_owned());

    let path = permalink.split(['?', '#']).next().unwrap_or_default();
    let segment = path.trim().trim_end_matches('/').rsplit('/').next().unwrap_or_default();
    let digits = match segment.rsplit_once('.') {
        Some((_, suffix)) => suffix,
        None => segment,
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    digits.parse().map_err(|_| invalid())
}

/// Split `"<title> [<version>]"` into its parts, skipping leading labels.
pub fn split_display_title(display_title: &str) -> Result<(String, String), ParseError> {
    let caps = DISPLAY_TITLE_REGEX
        .captures(display_title)
        .ok_or_else(|| ParseError::TitleShape(display_title.to_owned()))?;

    let title = caps.name("title").map_or("", |m| m.as_str()).trim();
    let version = caps.name("version").map_or("", |m| m.as_str()).trim();
    if version.is_empty() {
        return Err(ParseError::TitleShape(display_title.to_owned()));
    }
    if title.is_empty() {
        return Err(ParseError::EmptyTitle);
    }
    Ok((title.to_owned(), version.to_owned()))
}
