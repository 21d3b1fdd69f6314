use chrono::{DateTime, Local};

/// One rendered entry of the published feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// `"<title> [<version>]"`
    pub title: String,
    /// `<permalink base>/<id>`
    pub link: String,
    /// Embedded cover `<img>` tag, or empty when no cover is stored.
    pub description: String,
    /// The game's `updated_at`, in local time.
    pub pub_date: DateTime<Local>,
}
