use super::disk;
use crate::errors::ApiError;
use crate::handlers::models::AppState;
use axum::{
    extract::{Path as AxumPath, State},
    response::Response,
};
use qrshare_utils::validate_file_name;

pub async fn serve_file(
    State(state): State<AppState>,
    AxumPath(filename): AxumPath<String>,
) -> Result<Response, ApiError> {
    tracing::debug!("serve_file: requested '{}'", filename);

    // Anything that could escape the upload directory is reported as missing
    if let Err(e) = validate_file_name(&filename) {
        tracing::warn!("serve_file: rejected '{}': {}", filename, e);
        return Err(ApiError::NotFound);
    }

    let full_path = state.upload_dir.join(&filename);
    disk::serve_from_disk(full_path, state.streaming_threshold_bytes).await
}
