use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

use crate::application::services::RagService;
use crate::presentation::http::dto::{
    ApiResponse, HealthResponseDto, ServiceInfoDto, error_response,
};

pub struct HealthHandler {
    rag_service: Arc<RagService>,
}

impl HealthHandler {
    pub fn new(rag_service: Arc<RagService>) -> Self {
        Self { rag_service }
    }

    pub async fn root(State(handler): State<Arc<HealthHandler>>) -> impl IntoResponse {
        let info = ServiceInfoDto {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model: handler.rag_service.model_name().to_string(),
        };

        (StatusCode::OK, Json(ApiResponse::success(info)))
    }

    pub async fn health(
        State(handler): State<Arc<HealthHandler>>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let stats = match handler.rag_service.stats().await {
            Ok(stats) => stats,
            Err(e) => return Ok(error_response(e)),
        };
        let embedding_up = handler.rag_service.embedding_service_healthy().await;

        let health_response = HealthResponseDto {
            status: if embedding_up { "healthy" } else { "degraded" }.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            embedding_service: if embedding_up { "up" } else { "down" }.to_string(),
            documents: stats.documents,
            chunks: stats.chunks,
        };
        Ok((StatusCode::OK, Json(ApiResponse::success(health_response))))
    }
}
