use crate::errors::ApiError;
use crate::handlers::models::AppState;
use crate::models::UploadResponse;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    response::Json,
};

/// Multipart field carrying the document
pub const FILE_FIELD: &str = "pdf";

pub async fn upload_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    tracing::info!("New upload request received");

    let max = state.uploads.policy().max_upload_bytes;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| multipart_error(e, max))? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(|e| multipart_error(e, max))?;
        upload = Some((filename, data));
        break;
    }

    let Some((filename, data)) = upload else {
        tracing::warn!("No '{}' field found in request", FILE_FIELD);
        return Err(ApiError::InvalidRequest("No PDF uploaded".to_string()));
    };

    let response = state.uploads.process(&filename, data).await?;
    Ok(Json(response))
}

fn multipart_error(err: MultipartError, max: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        tracing::warn!("Upload rejected: request body exceeds limit");
        return ApiError::PayloadTooLarge { max };
    }

    tracing::warn!("Malformed multipart request: {}", err.body_text());
    ApiError::InvalidRequest(format!("Malformed upload: {}", err.body_text()))
}
