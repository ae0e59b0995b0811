use std::sync::Arc;

use crate::application::errors::{RagError, RagResult};
use crate::application::services::RagService;
use crate::domain::entities::Document;

pub const MAX_PAGE_SIZE: i64 = 1000;

#[derive(Debug, Clone)]
pub struct ListDocumentsRequest {
    pub skip: i64,
    pub limit: i64,
}

#[derive(Debug, Clone)]
pub struct ListDocumentsResponse {
    pub documents: Vec<Document>,
    pub total_count: i64,
    pub skip: i64,
    pub limit: i64,
}

pub struct ListDocumentsUseCase {
    rag_service: Arc<RagService>,
}

impl ListDocumentsUseCase {
    pub fn new(rag_service: Arc<RagService>) -> Self {
        Self { rag_service }
    }

    pub async fn execute(&self, request: ListDocumentsRequest) -> RagResult<ListDocumentsResponse> {
        if request.skip < 0 {
            return Err(RagError::InvalidRequest("Skip cannot be negative".to_string()));
        }

        if request.limit <= 0 || request.limit > MAX_PAGE_SIZE {
            return Err(RagError::InvalidRequest(format!(
                "Limit must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        let (documents, total_count) = self
            .rag_service
            .list_documents(request.skip, request.limit)
            .await?;

        Ok(ListDocumentsResponse {
            documents,
            total_count,
            skip: request.skip,
            limit: request.limit,
        })
    }
}
