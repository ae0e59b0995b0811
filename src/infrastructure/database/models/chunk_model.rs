use chrono::{DateTime, Utc};
use diesel::prelude::*;
use pgvector::Vector;
use uuid::Uuid;

use crate::domain::entities::ContentChunk;
use crate::domain::repositories::VectorRecord;
use crate::domain::value_objects::ChunkMetadata;
use crate::infrastructure::database::schema::document_chunks;

/// A stored chunk without its vector, which reads never need.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentChunkModel {
    pub id: String,
    pub document_id: Uuid,
    pub chunk_index: i32,
    pub chunk_start: i32,
    pub chunk_text: String,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = document_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewDocumentChunkModel {
    pub id: String,
    pub document_id: Uuid,
    pub chunk_index: i32,
    pub chunk_start: i32,
    pub chunk_text: String,
    pub metadata: serde_json::Value,
    pub model_name: String,
    pub embedding: Vector,
    pub generated_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&VectorRecord> for NewDocumentChunkModel {
    fn from(record: &VectorRecord) -> Self {
        Self {
            id: record.chunk.id().to_string(),
            document_id: record.chunk.document_id(),
            chunk_index: record.chunk.chunk_index(),
            chunk_start: record.chunk.chunk_start(),
            chunk_text: record.chunk.chunk_text().to_string(),
            metadata: record.chunk.metadata().clone().into(),
            model_name: record.embedding.model_name().to_string(),
            embedding: record.embedding.embedding().clone(),
            generated_at: record.embedding.generated_at(),
            created_at: record.chunk.created_at(),
        }
    }
}

impl TryFrom<DocumentChunkModel> for ContentChunk {
    type Error = String;

    fn try_from(model: DocumentChunkModel) -> Result<Self, Self::Error> {
        let metadata = ChunkMetadata::try_from(model.metadata)?;

        Ok(ContentChunk::restore(
            model.id,
            model.document_id,
            model.chunk_text,
            model.chunk_index,
            model.chunk_start,
            metadata,
            model.created_at,
        ))
    }
}
