use std::sync::Arc;
use uuid::Uuid;

use crate::application::errors::RagResult;
use crate::application::services::RagService;
use crate::domain::entities::{ContentChunk, Document};

pub struct GetDocumentUseCase {
    rag_service: Arc<RagService>,
}

impl GetDocumentUseCase {
    pub fn new(rag_service: Arc<RagService>) -> Self {
        Self { rag_service }
    }

    pub async fn execute(&self, document_id: Uuid) -> RagResult<Document> {
        self.rag_service.get_document(document_id).await
    }

    pub async fn chunks(&self, document_id: Uuid) -> RagResult<(Document, Vec<ContentChunk>)> {
        self.rag_service.document_chunks(document_id).await
    }
}
