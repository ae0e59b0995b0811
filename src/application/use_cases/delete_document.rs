use std::sync::Arc;
use uuid::Uuid;

use crate::application::errors::RagResult;
use crate::application::services::RagService;
use crate::application::services::rag_service::DeleteOutcome;

pub struct DeleteDocumentUseCase {
    rag_service: Arc<RagService>,
}

impl DeleteDocumentUseCase {
    pub fn new(rag_service: Arc<RagService>) -> Self {
        Self { rag_service }
    }

    pub async fn execute(&self, document_id: Uuid) -> RagResult<DeleteOutcome> {
        self.rag_service.delete(document_id).await
    }
}
