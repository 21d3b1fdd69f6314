//! RSS 2.0 channel as served by the catalog's "latest updates" endpoint.
//!
//! Item mapping: the permalink is the `<link>` (or the `<guid>` when the link
//! is missing), creators come from `dc:creator` with `<author>` as fallback,
//! the cover is the enclosure or else the first `<img>` of the description,
//! and the remaining description images are previews. Categories whose
//! `domain` is `tags` or `prefixes` carry taxonomy ids.

use std::sync::LazyLock;

use catalog_feed_core::RawEntry;
use regex::Regex;
use rss::{Channel, Item};

use crate::error::SourceError;

#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static IMG_SRC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*["']([^"']+)["']"#).unwrap());

pub(super) fn decode(body: &[u8]) -> Result<Vec<RawEntry>, SourceError> {
    let channel = Channel::read_from(body)
        .map_err(|e| SourceError::Decode { format: "rss", reason: e.to_string() })?;
    Ok(channel.items().iter().map(entry_from_item).collect())
}

fn entry_from_item(item: &Item) -> RawEntry {
    let permalink = item.link().or_else(|| item.guid().map(|g| g.value())).map(str::to_owned);

    let mut creators: Vec<String> = item
        .dublin_core_ext()
        .map(|dc| dc.creators().to_vec())
        .unwrap_or_default();
    if creators.is_empty() {
        creators.extend(item.author().map(str::to_owned));
    }

    let mut images: Vec<String> = item
        .description()
        .map(|html| {
            IMG_SRC_REGEX.captures_iter(html).map(|c| c[1].to_owned()).collect()
        })
        .unwrap_or_default();
    let cover = match item.enclosure() {
        Some(enclosure) => Some(enclosure.url().to_owned()),
        None if !images.is_empty() => Some(images.remove(0)),
        None => None,
    };
    images.retain(|url| cover.as_deref() != Some(url.as_str()));

    RawEntry {
        id: None,
        permalink,
        display_title: item.title().unwrap_or_default().to_owned(),
        version: None,
        creators,
        cover,
        previews: images,
        tags: category_ids(item, "tags"),
        prefixes: category_ids(item, "prefixes"),
        decode_error: None,
    }
}

fn category_ids(item: &Item, domain: &str) -> Vec<i64> {
    item.categories()
        .iter()
        .filter(|c| c.domain() == Some(domain))
        .filter_map(|c| c.name().trim().parse().ok())
        .collect()
}
