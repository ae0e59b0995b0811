//! Process-local vector store.
//!
//! Records live in a `HashMap` keyed by chunk id behind a
//! `tokio::sync::RwLock`; search is a linear cosine-similarity scan. Nothing
//! survives a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use pgvector::Vector;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{ContentChunk, ScoredChunk, embedding::cosine_similarity};
use crate::domain::repositories::{VectorRecord, VectorStore, vector_store::VectorStoreError};

const BACKEND: &str = "memory";

#[derive(Debug)]
pub struct InMemoryVectorStore {
    dimension: usize,
    records: RwLock<HashMap<String, VectorRecord>>,
}

impl InMemoryVectorStore {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            records: RwLock::new(HashMap::new()),
        }
    }

    fn check_dimension(&self, actual: usize) -> Result<(), VectorStoreError> {
        if actual != self.dimension {
            return Err(VectorStoreError::DimensionMismatch {
                expected: self.dimension,
                actual,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn add(&self, records: &[VectorRecord]) -> Result<(), VectorStoreError> {
        // Validate the whole batch before taking the lock so a bad record
        // leaves the store untouched.
        for record in records {
            self.check_dimension(record.embedding.dimension())?;
        }

        let mut store = self.records.write().await;
        for record in records {
            store.insert(record.chunk.id().to_string(), record.clone());
        }
        Ok(())
    }

    async fn search(
        &self,
        query_vector: &Vector,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, VectorStoreError> {
        let query = query_vector.as_slice();
        self.check_dimension(query.len())?;

        let store = self.records.read().await;
        let mut scored: Vec<ScoredChunk> = store
            .values()
            .map(|record| ScoredChunk {
                chunk: record.chunk.clone(),
                score: cosine_similarity(record.embedding.embedding().as_slice(), query),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.chunk.id().cmp(b.chunk.id()))
        });
        scored.truncate(top_k);
        Ok(scored)
    }

    async fn chunks_for_document(
        &self,
        document_id: Uuid,
    ) -> Result<Vec<ContentChunk>, VectorStoreError> {
        let store = self.records.read().await;
        let mut chunks: Vec<ContentChunk> = store
            .values()
            .filter(|record| record.chunk.belongs_to(document_id))
            .map(|record| record.chunk.clone())
            .collect();
        chunks.sort_by_key(|chunk| chunk.chunk_index());
        Ok(chunks)
    }

    async fn delete_by_document(&self, document_id: Uuid) -> Result<u64, VectorStoreError> {
        let mut store = self.records.write().await;
        let before = store.len();
        store.retain(|_, record| !record.chunk.belongs_to(document_id));
        Ok((before - store.len()) as u64)
    }

    async fn count(&self) -> Result<u64, VectorStoreError> {
        Ok(self.records.read().await.len() as u64)
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Embedding;
    use crate::domain::value_objects::ChunkMetadata;

    fn record(document_id: Uuid, index: i32, vector: Vec<f32>) -> VectorRecord {
        let chunk = ContentChunk::new(
            document_id,
            format!("chunk {}", index),
            index,
            index * 10,
            ChunkMetadata::new(),
        );
        let embedding = Embedding::new(chunk.id().to_string(), "test".to_string(), Vector::from(vector));
        VectorRecord::new(chunk, embedding).unwrap()
    }

    #[tokio::test]
    async fn test_search_orders_by_similarity() {
        let store = InMemoryVectorStore::new(2);
        let doc = Uuid::new_v4();
        store
            .add(&[
                record(doc, 0, vec![1.0, 0.0]),
                record(doc, 1, vec![0.0, 1.0]),
                record(doc, 2, vec![0.7, 0.7]),
            ])
            .await
            .unwrap();

        let results = store.search(&Vector::from(vec![1.0, 0.1]), 2).await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.chunk_index(), 0);
        assert_eq!(results[1].chunk.chunk_index(), 2);
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_rejects_wrong_dimension_without_partial_write() {
        let store = InMemoryVectorStore::new(2);
        let doc = Uuid::new_v4();

        let err = store
            .add(&[record(doc, 0, vec![1.0, 0.0]), record(doc, 1, vec![1.0, 0.0, 0.0])])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            VectorStoreError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_by_document_only_touches_that_document() {
        let store = InMemoryVectorStore::new(2);
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        store
            .add(&[
                record(first, 0, vec![1.0, 0.0]),
                record(first, 1, vec![0.0, 1.0]),
                record(second, 0, vec![1.0, 1.0]),
            ])
            .await
            .unwrap();

        assert_eq!(store.delete_by_document(first).await.unwrap(), 2);
        assert_eq!(store.delete_by_document(first).await.unwrap(), 0);
        assert_eq!(store.count().await.unwrap(), 1);
        assert!(store.chunks_for_document(first).await.unwrap().is_empty());
        assert_eq!(store.chunks_for_document(second).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_rewriting_a_chunk_replaces_it() {
        let store = InMemoryVectorStore::new(2);
        let doc = Uuid::new_v4();
        store.add(&[record(doc, 0, vec![1.0, 0.0])]).await.unwrap();
        store.add(&[record(doc, 0, vec![0.0, 1.0])]).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 1);
    }
}
