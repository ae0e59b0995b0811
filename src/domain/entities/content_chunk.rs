use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::ChunkMetadata;

/// A contiguous slice of a document's normalized text; the unit of retrieval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentChunk {
    id: String,
    document_id: Uuid,
    chunk_text: String,
    chunk_index: i32,
    chunk_start: i32,
    metadata: ChunkMetadata,
    created_at: DateTime<Utc>,
}

impl ContentChunk {
    pub fn new(
        document_id: Uuid,
        chunk_text: String,
        chunk_index: i32,
        chunk_start: i32,
        metadata: ChunkMetadata,
    ) -> Self {
        Self {
            id: Self::id_for(document_id, chunk_index),
            document_id,
            chunk_text,
            chunk_index,
            chunk_start,
            metadata,
            created_at: Utc::now(),
        }
    }

    pub fn restore(
        id: String,
        document_id: Uuid,
        chunk_text: String,
        chunk_index: i32,
        chunk_start: i32,
        metadata: ChunkMetadata,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            document_id,
            chunk_text,
            chunk_index,
            chunk_start,
            metadata,
            created_at,
        }
    }

    /// Chunk ids are derived from the owning document so a re-write of the
    /// same chunk replaces rather than duplicates it.
    pub fn id_for(document_id: Uuid, chunk_index: i32) -> String {
        format!("{}_chunk_{}", document_id, chunk_index)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn document_id(&self) -> Uuid {
        self.document_id
    }

    pub fn chunk_text(&self) -> &str {
        &self.chunk_text
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn chunk_start(&self) -> i32 {
        self.chunk_start
    }

    pub fn metadata(&self) -> &ChunkMetadata {
        &self.metadata
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn character_count(&self) -> usize {
        self.chunk_text.chars().count()
    }

    pub fn belongs_to(&self, document_id: Uuid) -> bool {
        self.document_id == document_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_id_is_derived_from_document() {
        let document_id = Uuid::new_v4();
        let chunk = ContentChunk::new(
            document_id,
            "héllo".to_string(),
            3,
            1350,
            ChunkMetadata::new(),
        );

        assert_eq!(chunk.id(), format!("{}_chunk_3", document_id));
        assert!(chunk.belongs_to(document_id));
        assert!(!chunk.belongs_to(Uuid::new_v4()));
        assert_eq!(chunk.character_count(), 5);
    }
}
