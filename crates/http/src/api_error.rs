//! Typed API error for HTTP handlers.
//!
//! Every failure becomes a 500 with a fixed plain-text body. The real error
//! (file paths, SQLite messages) is logged server-side only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_feed_core::AllowListError;
use catalog_feed_storage::StoreError;

/// Body sent for every internal failure.
pub const INTERNAL_ERROR_BODY: &str = "internal server error";

#[derive(Debug)]
pub enum ApiError {
    /// 500 Internal Server Error. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY).into_response()
            },
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<AllowListError> for ApiError {
    fn from(err: AllowListError) -> Self {
        Self::Internal(err.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.into())
    }
}
