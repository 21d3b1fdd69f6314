use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use catalog_feed_core::read_allow_list;

use crate::AppState;
use crate::api_error::ApiError;
use crate::blocking::blocking_result;
use crate::render::render_channel;

pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// `GET /feed`: allow-list, then projection, then RSS.
pub async fn get_feed(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let ids = {
        let path = state.allow_list.clone();
        blocking_result(move || read_allow_list(&path)).await?
    };

    let items = {
        let projector = state.projector.clone();
        blocking_result(move || projector.build_feed(&ids)).await?
    };

    let body = render_channel(&state.channel, &items)?;
    tracing::debug!(items = items.len(), "Feed rendered");
    Ok(([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], body))
}
