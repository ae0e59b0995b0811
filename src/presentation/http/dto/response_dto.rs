use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::application::errors::RagError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: String, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code,
                message,
                details,
            }),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

pub fn status_for(error: &RagError) -> StatusCode {
    match error {
        RagError::UnsupportedFormat(_)
        | RagError::FileTooLarge { .. }
        | RagError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        RagError::DocumentNotFound(_) | RagError::NoDocumentsIndexed => StatusCode::NOT_FOUND,
        RagError::ExtractionFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        RagError::EmbeddingFailed(_)
        | RagError::StoreWriteFailed(_)
        | RagError::StoreReadFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        RagError::InferenceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Renders a pipeline error as an envelope with the matching status.
pub fn error_response<T>(error: RagError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = status_for(&error);
    if status.is_server_error() {
        tracing::error!("{}", error);
    }
    (
        status,
        Json(ApiResponse::error(
            error.code().to_string(),
            error.to_string(),
            None,
        )),
    )
}

pub fn bad_request<T>(code: &str, message: String) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::error(code.to_string(), message, None)),
    )
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfoDto {
    pub name: String,
    pub version: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponseDto {
    /// `healthy`, or `degraded` when the embedding service is down.
    pub status: String,
    pub version: String,
    pub embedding_service: String,
    pub documents: i64,
    pub chunks: u64,
}
