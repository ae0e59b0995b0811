use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ChunkMode, ContentHash, DocumentType};

/// An uploaded document. Immutable once stored; removed only by an explicit
/// delete, which also removes every chunk it owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    file_name: String,
    file_type: DocumentType,
    file_size: i64,
    content_hash: ContentHash,
    chunk_mode: String,
    chunks_count: i32,
    file_path: String,
    created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(
        id: Uuid,
        file_name: String,
        file_type: DocumentType,
        file_size: i64,
        content_hash: ContentHash,
        chunk_mode: ChunkMode,
        chunks_count: i32,
        file_path: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            file_name,
            file_type,
            file_size,
            content_hash,
            chunk_mode: chunk_mode.name().to_string(),
            chunks_count,
            file_path,
            created_at,
        }
    }

    /// Rebuilds a document from its persisted columns.
    pub fn restore(
        id: Uuid,
        file_name: String,
        file_type: DocumentType,
        file_size: i64,
        content_hash: ContentHash,
        chunk_mode: String,
        chunks_count: i32,
        file_path: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            file_name,
            file_type,
            file_size,
            content_hash,
            chunk_mode,
            chunks_count,
            file_path,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_type(&self) -> DocumentType {
        self.file_type
    }

    pub fn file_size(&self) -> i64 {
        self.file_size
    }

    pub fn content_hash(&self) -> &ContentHash {
        &self.content_hash
    }

    pub fn chunk_mode(&self) -> &str {
        &self.chunk_mode
    }

    pub fn chunks_count(&self) -> i32 {
        self.chunks_count
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
