//! RSS 2.0 serialization of feed items.

use anyhow::Context as _;
use catalog_feed_core::FeedItem;
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};

use crate::ChannelInfo;

/// Render one channel with `items` in the given order.
///
/// # Errors
/// Returns error if the XML writer fails.
pub fn render_channel(channel: &ChannelInfo, items: &[FeedItem]) -> anyhow::Result<String> {
    let items: Vec<Item> = items.iter().map(render_item).collect();
    let channel = ChannelBuilder::default()
        .title(channel.title.clone())
        .link(channel.link.clone())
        .description(channel.description.clone())
        .items(items)
        .build();

    let buf = channel.write_to(Vec::new()).context("writing RSS channel")?;
    String::from_utf8(buf).context("RSS output is not UTF-8")
}

fn render_item(item: &FeedItem) -> Item {
    ItemBuilder::default()
        .title(item.title.clone())
        .link(item.link.clone())
        .guid(GuidBuilder::default().value(item.link.clone()).permalink(true).build())
        .description(item.description.clone())
        .pub_date(item.pub_date.to_rfc2822())
        .build()
}
