use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Document as DomainDocument;
use crate::domain::value_objects::{ContentHash, DocumentType};
use crate::infrastructure::database::schema::documents;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, Identifiable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DocumentModel {
    pub id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub content_hash: String,
    pub chunk_mode: String,
    pub chunks_count: i32,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
}

impl From<&DomainDocument> for DocumentModel {
    fn from(document: &DomainDocument) -> Self {
        Self {
            id: document.id(),
            file_name: document.file_name().to_string(),
            file_type: document.file_type().as_str().to_string(),
            file_size: document.file_size(),
            content_hash: document.content_hash().as_str().to_string(),
            chunk_mode: document.chunk_mode().to_string(),
            chunks_count: document.chunks_count(),
            file_path: document.file_path().to_string(),
            created_at: document.created_at(),
        }
    }
}

impl TryFrom<DocumentModel> for DomainDocument {
    type Error = String;

    fn try_from(model: DocumentModel) -> Result<Self, Self::Error> {
        let file_type = DocumentType::parse(&model.file_type)
            .ok_or_else(|| format!("unknown file type '{}'", model.file_type))?;
        let content_hash = ContentHash::parse(&model.content_hash)?;

        Ok(DomainDocument::restore(
            model.id,
            model.file_name,
            file_type,
            model.file_size,
            content_hash,
            model.chunk_mode,
            model.chunks_count,
            model.file_path,
            model.created_at,
        ))
    }
}
