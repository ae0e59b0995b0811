use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::services::rag_service::DeleteOutcome;
use crate::application::use_cases::upload_document::UploadDocumentResponse;
use crate::domain::entities::{ContentChunk, Document};

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub content_hash: String,
    pub chunk_mode: String,
    pub chunks_count: i32,
    pub created_at: String,
}

impl From<Document> for DocumentResponseDto {
    fn from(document: Document) -> Self {
        Self {
            id: document.id(),
            file_name: document.file_name().to_string(),
            file_type: document.file_type().to_string(),
            file_size: document.file_size(),
            content_hash: document.content_hash().to_string(),
            chunk_mode: document.chunk_mode().to_string(),
            chunks_count: document.chunks_count(),
            created_at: document.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PaginationDto {
    #[serde(default = "default_skip")]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_skip() -> i64 {
    0
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationMetaDto {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentListResponseDto {
    pub documents: Vec<DocumentResponseDto>,
    pub meta: PaginationMetaDto,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponseDto {
    pub document_id: Uuid,
    pub filename: String,
    pub file_type: String,
    pub chunks_count: usize,
    pub processing_time_ms: u64,
    pub success: bool,
    pub message: String,
}

impl From<UploadDocumentResponse> for UploadResponseDto {
    fn from(response: UploadDocumentResponse) -> Self {
        let document = response.document;
        Self {
            document_id: document.id(),
            filename: document.file_name().to_string(),
            file_type: document.file_type().to_string(),
            chunks_count: response.chunks_count,
            processing_time_ms: response.processing_time_ms,
            success: true,
            message: format!(
                "Document processed into {} chunk(s)",
                response.chunks_count
            ),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChunkResponseDto {
    pub chunk_id: String,
    pub chunk_index: i32,
    pub chunk_start: i32,
    pub content: String,
    pub metadata: serde_json::Value,
}

impl From<ContentChunk> for ChunkResponseDto {
    fn from(chunk: ContentChunk) -> Self {
        Self {
            chunk_id: chunk.id().to_string(),
            chunk_index: chunk.chunk_index(),
            chunk_start: chunk.chunk_start(),
            content: chunk.chunk_text().to_string(),
            metadata: chunk.metadata().clone().into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentChunksResponseDto {
    pub document: DocumentResponseDto,
    pub chunks: Vec<ChunkResponseDto>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponseDto {
    pub document_id: Uuid,
    pub filename: String,
    pub chunks_removed: u64,
    pub message: String,
}

impl From<DeleteOutcome> for DeleteResponseDto {
    fn from(outcome: DeleteOutcome) -> Self {
        Self {
            document_id: outcome.document_id,
            message: format!(
                "Deleted '{}' and {} chunk(s)",
                outcome.file_name, outcome.chunks_removed
            ),
            filename: outcome.file_name,
            chunks_removed: outcome.chunks_removed,
        }
    }
}
