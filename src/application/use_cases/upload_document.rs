use std::sync::Arc;

use crate::application::errors::{RagError, RagResult};
use crate::application::services::{DocumentUpload, RagService};
use crate::config::ChunkingConfig;
use crate::domain::entities::Document;
use crate::domain::value_objects::ChunkMode;

#[derive(Debug, Clone)]
pub struct UploadDocumentRequest {
    pub file_name: String,
    pub data: Vec<u8>,
    /// `chunked` (default) or `full`.
    pub chunk_mode: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UploadDocumentResponse {
    pub document: Document,
    pub chunks_count: usize,
    pub processing_time_ms: u64,
}

pub struct UploadDocumentUseCase {
    rag_service: Arc<RagService>,
    chunking: ChunkingConfig,
}

impl UploadDocumentUseCase {
    pub fn new(rag_service: Arc<RagService>, chunking: ChunkingConfig) -> Self {
        Self {
            rag_service,
            chunking,
        }
    }

    pub async fn execute(&self, request: UploadDocumentRequest) -> RagResult<UploadDocumentResponse> {
        let file_name = request.file_name.trim();
        if file_name.is_empty() {
            return Err(RagError::InvalidRequest("File name is required".to_string()));
        }

        let chunk_mode = ChunkMode::from_flag(
            request.chunk_mode.as_deref(),
            self.chunking.size,
            self.chunking.overlap,
        )
        .map_err(RagError::InvalidRequest)?;

        let outcome = self
            .rag_service
            .ingest(DocumentUpload {
                file_name: file_name.to_string(),
                data: request.data,
                chunk_mode,
            })
            .await?;

        Ok(UploadDocumentResponse {
            document: outcome.document,
            chunks_count: outcome.chunks_count,
            processing_time_ms: outcome.processing_time_ms,
        })
    }
}
