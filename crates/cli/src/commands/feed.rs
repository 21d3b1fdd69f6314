use anyhow::Result;
use catalog_feed_core::read_allow_list;
use catalog_feed_http::render_channel;

use crate::config::{FeedArgs, StoreArgs};

pub(crate) async fn run(store: &StoreArgs, feed: &FeedArgs) -> Result<()> {
    let store = store.open()?;
    let ids = read_allow_list(&feed.allow_list)?;
    let projector = feed.projector(store);

    let items = tokio::task::spawn_blocking(move || projector.build_feed(&ids)).await??;
    println!("{}", render_channel(&feed.channel(), &items)?);
    Ok(())
}
