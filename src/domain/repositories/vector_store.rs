use async_trait::async_trait;
use pgvector::Vector;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::entities::{ContentChunk, Embedding, ScoredChunk};

#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("Vector store error ({backend}): {message}")]
    Backend { backend: String, message: String },
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Embedding does not belong to chunk {0}")]
    OrphanEmbedding(String),
}

impl VectorStoreError {
    pub fn backend(backend: &str, message: impl std::fmt::Display) -> Self {
        VectorStoreError::Backend {
            backend: backend.to_string(),
            message: message.to_string(),
        }
    }
}

/// A chunk and its vector, written and deleted together.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorRecord {
    pub chunk: ContentChunk,
    pub embedding: Embedding,
}

impl VectorRecord {
    pub fn new(chunk: ContentChunk, embedding: Embedding) -> Result<Self, VectorStoreError> {
        if !embedding.belongs_to_chunk(chunk.id()) {
            return Err(VectorStoreError::OrphanEmbedding(chunk.id().to_string()));
        }
        Ok(Self { chunk, embedding })
    }
}

/// Nearest-neighbour storage for chunk vectors. Records are keyed by chunk
/// id; writing an existing id replaces it.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Writes all records or, on error, as few as the backend allows.
    async fn add(&self, records: &[VectorRecord]) -> Result<(), VectorStoreError>;

    /// The `top_k` most similar chunks, by descending cosine similarity.
    async fn search(
        &self,
        query_vector: &Vector,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, VectorStoreError>;

    /// Chunks of one document in index order.
    async fn chunks_for_document(
        &self,
        document_id: Uuid,
    ) -> Result<Vec<ContentChunk>, VectorStoreError>;

    /// Removes every record of the document and returns how many went.
    async fn delete_by_document(&self, document_id: Uuid) -> Result<u64, VectorStoreError>;

    async fn count(&self) -> Result<u64, VectorStoreError>;

    fn backend_name(&self) -> &'static str;
}
