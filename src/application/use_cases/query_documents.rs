use std::sync::Arc;
use std::time::Instant;

use crate::application::errors::RagResult;
use crate::application::services::RagService;
use crate::domain::entities::RagAnswer;

#[derive(Debug, Clone)]
pub struct QueryDocumentsRequest {
    pub question: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct QueryDocumentsResponse {
    pub answer: RagAnswer,
    pub query_time_ms: u64,
}

pub struct QueryDocumentsUseCase {
    rag_service: Arc<RagService>,
}

impl QueryDocumentsUseCase {
    pub fn new(rag_service: Arc<RagService>) -> Self {
        Self { rag_service }
    }

    pub async fn execute(&self, request: QueryDocumentsRequest) -> RagResult<QueryDocumentsResponse> {
        let start_time = Instant::now();

        let answer = self
            .rag_service
            .query(&request.question, request.top_k)
            .await?;

        Ok(QueryDocumentsResponse {
            answer,
            query_time_ms: start_time.elapsed().as_millis() as u64,
        })
    }
}
