use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("File too large (maximum {max} bytes)")]
    PayloadTooLarge { max: usize },

    #[error("{0}")]
    StorageFailure(String),

    #[error("{0}")]
    EncodingFailure(String),

    #[error("File not found")]
    NotFound,

    #[error("Not found")]
    RouteNotFound,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            ApiError::PayloadTooLarge { .. } => (StatusCode::BAD_REQUEST, "PAYLOAD_TOO_LARGE"),
            ApiError::StorageFailure(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_FAILURE"),
            ApiError::EncodingFailure(_) => (StatusCode::INTERNAL_SERVER_ERROR, "ENCODING_FAILURE"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::RouteNotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let error_response = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(error_response)).into_response()
    }
}
