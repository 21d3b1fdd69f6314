//! Allow-list plus store snapshot to ordered feed items.

use catalog_feed_core::{FeedItem, GameId, GameView};
use catalog_feed_storage::{Store, StoreError};
use chrono::Local;

/// Read-only projection of stored games into feed items.
#[derive(Debug, Clone)]
pub struct FeedProjector {
    store: Store,
    permalink_base: String,
}

impl FeedProjector {
    #[must_use]
    pub fn new(store: Store, permalink_base: impl Into<String>) -> Self {
        let permalink_base = permalink_base.into().trim_end_matches('/').to_owned();
        Self { store, permalink_base }
    }

    /// One item per allowed id that is stored, in allow-list order.
    ///
    /// Ids with no stored game are left out; repeated ids repeat their item.
    /// Blocking: call from `spawn_blocking` in async contexts.
    pub fn build_feed(&self, allowed_ids: &[GameId]) -> Result<Vec<FeedItem>, StoreError> {
        let mut items = Vec::with_capacity(allowed_ids.len());
        for &id in allowed_ids {
            match self.store.get_game_by_id(id)? {
                Some(view) => items.push(self.render(&view)),
                None => tracing::debug!(id, "Allowed id not in store, omitting"),
            }
        }
        Ok(items)
    }

    #[must_use]
    pub fn permalink(&self, id: GameId) -> String {
        format!("{}/{}", self.permalink_base, id)
    }

    fn render(&self, view: &GameView) -> FeedItem {
        FeedItem {
            title: view.display_title(),
            link: self.permalink(view.id),
            description: view.cover.as_deref().map_or_else(String::new, |url| cover_tag(url, &view.title)),
            pub_date: view.updated_at.with_timezone(&Local),
        }
    }
}

fn cover_tag(url: &str, alt: &str) -> String {
    format!(r#"<img src="{}" alt="{}" />"#, escape_attr(url), escape_attr(alt))
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
