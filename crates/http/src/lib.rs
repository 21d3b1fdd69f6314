//! HTTP server for catalog-feed.
//!
//! `GET /feed` renders the allow-listed games as an RSS channel; `GET /health`
//! answers `ok`.

#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]

pub mod api_error;
mod blocking;
mod handlers;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use axum::{Router, routing::get};
use catalog_feed_core::constants::{
    DEFAULT_CHANNEL_DESCRIPTION, DEFAULT_CHANNEL_LINK, DEFAULT_CHANNEL_TITLE,
};
use catalog_feed_service::FeedProjector;
use tower_http::trace::TraceLayer;

pub use render::render_channel;

/// Channel-level metadata of the published feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub title: String,
    pub link: String,
    pub description: String,
}

impl Default for ChannelInfo {
    fn default() -> Self {
        Self {
            title: DEFAULT_CHANNEL_TITLE.to_owned(),
            link: DEFAULT_CHANNEL_LINK.to_owned(),
            description: DEFAULT_CHANNEL_DESCRIPTION.to_owned(),
        }
    }
}

/// Shared application state for all HTTP handlers.
#[derive(Debug)]
pub struct AppState {
    /// Read-only projection over the store
    pub projector: FeedProjector,
    /// Allow-list file, re-read on every request so edits apply without a restart
    pub allow_list: PathBuf,
    pub channel: ChannelInfo,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/feed", get(handlers::feed::get_feed))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
