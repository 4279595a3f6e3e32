use crate::errors::ApiError;
use axum::http::Uri;

pub async fn not_found(uri: Uri) -> ApiError {
    tracing::debug!("No route for '{}'", uri.path());
    ApiError::RouteNotFound
}
