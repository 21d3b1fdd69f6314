//! Running blocking store and file work from async handlers.

use tokio::task::spawn_blocking;

use crate::api_error::ApiError;

/// Runs a blocking closure on the blocking pool.
///
/// A panicked task and an `Err` from the closure both become [`ApiError::Internal`].
pub async fn blocking_result<T, E, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    spawn_blocking(f).await.map_err(|e| ApiError::Internal(e.into()))?.map_err(Into::into)
}
