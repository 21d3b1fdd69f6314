//! Snapshot body decoders.
//!
//! The catalog publishes the same listing as an RSS channel and as a JSON
//! document; both decode to the same [`RawEntry`] shape.

mod json_listing;
mod rss_channel;

use std::fmt;
use std::str::FromStr;

use catalog_feed_core::RawEntry;

use crate::error::SourceError;

/// Wire format of a snapshot body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceFormat {
    /// Pick by the first non-whitespace byte: `<` is RSS, `{` or `[` is JSON.
    #[default]
    Auto,
    Rss,
    Json,
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "rss" | "xml" => Ok(Self::Rss),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown snapshot format '{other}' (expected auto, rss or json)")),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Rss => "rss",
            Self::Json => "json",
        })
    }
}

/// Decode a snapshot body.
///
/// # Errors
/// Returns [`SourceError::Decode`] if the body is not valid in the chosen (or
/// sniffed) format.
pub fn decode_snapshot(body: &[u8], format: SourceFormat) -> Result<Vec<RawEntry>, SourceError> {
    match format {
        SourceFormat::Rss => rss_channel::decode(body),
        SourceFormat::Json => json_listing::decode(body),
        SourceFormat::Auto => match body.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'<') => rss_channel::decode(body),
            Some(b'{' | b'[') => json_listing::decode(body),
            Some(_) => {
                Err(SourceError::Decode { format: "auto", reason: "unrecognized body".to_owned() })
            },
            None => Err(SourceError::Decode { format: "auto", reason: "empty body".to_owned() }),
        },
    }
}
