use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::Document;
use crate::domain::repositories::{
    DocumentRepository, document_repository::DocumentRepositoryError,
};

/// Document records kept in process memory, for the `memory` storage backend
/// and for tests.
#[derive(Debug, Default)]
pub struct InMemoryDocumentRepository {
    documents: RwLock<HashMap<Uuid, Document>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DocumentRepositoryError> {
        self.documents
            .write()
            .await
            .insert(document.id(), document.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Document>, DocumentRepositoryError> {
        Ok(self.documents.read().await.get(&id).cloned())
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

        let documents = self.documents.read().await;
        let mut all: Vec<Document> = documents.values().cloned().collect();
        all.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });

        Ok(all
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DocumentRepositoryError> {
        Ok(self.documents.write().await.remove(&id).is_some())
    }

    async fn count(&self) -> Result<i64, DocumentRepositoryError> {
        Ok(self.documents.read().await.len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ChunkMode, ContentHash, DocumentType};
    use chrono::{Duration, Utc};

    fn document(name: &str, age_minutes: i64) -> Document {
        let id = Uuid::new_v4();
        Document::new(
            id,
            name.to_string(),
            DocumentType::Txt,
            3,
            ContentHash::of(b"abc"),
            ChunkMode::Full,
            1,
            format!("/tmp/{}.txt", id),
            Utc::now() - Duration::minutes(age_minutes),
        )
    }

    #[tokio::test]
    async fn test_find_all_is_newest_first_and_paged() {
        let repo = InMemoryDocumentRepository::new();
        for (name, age) in [("old.txt", 30), ("new.txt", 1), ("mid.txt", 10)] {
            repo.save(&document(name, age)).await.unwrap();
        }

        let names: Vec<String> = repo
            .find_all(0, 10)
            .await
            .unwrap()
            .iter()
            .map(|d| d.file_name().to_string())
            .collect();
        assert_eq!(names, vec!["new.txt", "mid.txt", "old.txt"]);

        let page = repo.find_all(1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].file_name(), "mid.txt");
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_delete_reports_whether_anything_was_removed() {
        let repo = InMemoryDocumentRepository::new();
        let doc = document("a.txt", 0);
        repo.save(&doc).await.unwrap();

        assert!(repo.delete(doc.id()).await.unwrap());
        assert!(!repo.delete(doc.id()).await.unwrap());
        assert!(repo.find_by_id(doc.id()).await.unwrap().is_none());
    }
}
