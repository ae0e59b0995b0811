use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::{
    QueryDocumentsUseCase, query_documents::QueryDocumentsRequest,
};
use crate::presentation::http::dto::{
    ApiResponse, QueryRequestDto, QueryResponseDto, bad_request, error_response,
};

pub struct QueryHandler {
    query_use_case: Arc<QueryDocumentsUseCase>,
}

impl QueryHandler {
    pub fn new(query_use_case: Arc<QueryDocumentsUseCase>) -> Self {
        Self { query_use_case }
    }

    pub async fn query(
        State(handler): State<Arc<QueryHandler>>,
        payload: Result<Json<QueryRequestDto>, JsonRejection>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let Json(body) = match payload {
            Ok(body) => body,
            Err(rejection) => return Ok(bad_request("INVALID_REQUEST", rejection.body_text())),
        };

        let request = QueryDocumentsRequest {
            question: body.question,
            top_k: body.top_k,
        };

        match handler.query_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(QueryResponseDto::from(response))),
            )),
            Err(e) => Ok(error_response(e)),
        }
    }
}
