use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::{
    DocumentRepository, document_repository::DocumentRepositoryError,
};
use crate::infrastructure::database::models::DocumentModel;
use crate::infrastructure::database::schema::documents::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresDocumentRepository {
    pool: DbPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_domain(model: DocumentModel) -> Result<Document, DocumentRepositoryError> {
    Document::try_from(model).map_err(DocumentRepositoryError::ValidationError)
}

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        diesel::insert_into(documents)
            .values(&DocumentModel::from(document))
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, document_id: Uuid) -> Result<Option<Document>, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let result = documents
            .find(document_id)
            .select(DocumentModel::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        result.map(to_domain).transpose()
    }

    async fn find_all(
        &self,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Document>, DocumentRepositoryError> {
        if skip < 0 || limit < 0 {
            return Err(DocumentRepositoryError::ValidationError(
                "skip and limit must not be negative".to_string(),
            ));
        }

        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let models = documents
            .select(DocumentModel::as_select())
            .order((created_at.desc(), id.asc()))
            .offset(skip)
            .limit(limit)
            .load(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        models.into_iter().map(to_domain).collect()
    }

    async fn delete(&self, document_id: Uuid) -> Result<bool, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        let deleted_count = diesel::delete(documents.find(document_id))
            .execute(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        Ok(deleted_count > 0)
    }

    async fn count(&self) -> Result<i64, DocumentRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))?;

        documents
            .count()
            .get_result(&mut conn)
            .map_err(|e| DocumentRepositoryError::DatabaseError(e.to_string()))
    }
}
