use chrono::Utc;
use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::errors::{RagError, RagResult};
use crate::application::ports::{
    EmbeddingProvider, FileStorage, InferenceClient,
    embedding_provider::{BatchEmbeddingRequest, EmbeddingRequest},
};
use crate::application::services::DocumentProcessorService;
use crate::application::services::document_processor::ProcessedDocument;
use crate::application::services::prompt_builder::{EMPTY_ANSWER_FALLBACK, build_prompt};
use crate::config::AppConfig;
use crate::domain::entities::{ContentChunk, Document, Embedding, RagAnswer, RagQuery};
use crate::domain::repositories::{DocumentRepository, VectorRecord, VectorStore};
use crate::domain::value_objects::{ChunkMetadata, ChunkMode, ContentHash};

/// Embedding batches allowed in flight at once during ingestion.
const EMBEDDING_CONCURRENCY: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct RagSettings {
    pub embedding_batch_size: usize,
    pub default_top_k: usize,
    pub max_top_k: usize,
}

impl From<&AppConfig> for RagSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            embedding_batch_size: config.embedding.batch_size,
            default_top_k: config.retrieval.default_top_k,
            max_top_k: config.retrieval.max_top_k,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub data: Vec<u8>,
    pub chunk_mode: ChunkMode,
}

#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub document: Document,
    pub chunks_count: usize,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub document_id: Uuid,
    pub file_name: String,
    pub chunks_removed: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub documents: i64,
    pub chunks: u64,
}

/// Ingests documents into the vector store and answers questions against
/// them.
pub struct RagService {
    document_processor: Arc<DocumentProcessorService>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn VectorStore>,
    document_repository: Arc<dyn DocumentRepository>,
    file_storage: Arc<dyn FileStorage>,
    inference_client: Arc<dyn InferenceClient>,
    settings: RagSettings,
}

impl RagService {
    pub fn new(
        document_processor: Arc<DocumentProcessorService>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn VectorStore>,
        document_repository: Arc<dyn DocumentRepository>,
        file_storage: Arc<dyn FileStorage>,
        inference_client: Arc<dyn InferenceClient>,
        settings: RagSettings,
    ) -> Self {
        Self {
            document_processor,
            embedding_provider,
            vector_store,
            document_repository,
            file_storage,
            inference_client,
            settings: RagSettings {
                embedding_batch_size: settings.embedding_batch_size.max(1),
                ..settings
            },
        }
    }

    pub fn model_name(&self) -> &str {
        self.inference_client.model_name()
    }

    /// Extracts, chunks, embeds and stores one upload.
    ///
    /// Every embedding is computed before the first write. If a write fails,
    /// the document's vectors and stored file are removed again on a
    /// best-effort basis.
    pub async fn ingest(&self, upload: DocumentUpload) -> RagResult<IngestOutcome> {
        let started = Instant::now();

        let processed = self
            .document_processor
            .process(&upload.file_name, &upload.data, upload.chunk_mode)
            .await?;

        let document_id = Uuid::new_v4();
        let stored = self
            .file_storage
            .store_file(document_id, processed.document_type.extension(), &upload.data)
            .await
            .map_err(|e| RagError::StoreWriteFailed(e.to_string()))?;

        let result = self
            .index_document(document_id, &upload, &processed, &stored.path)
            .await;

        match result {
            Ok(document) => {
                let processing_time_ms = started.elapsed().as_millis() as u64;
                info!(
                    "Ingested '{}' as {} ({} chunks, {} ms)",
                    document.file_name(),
                    document_id,
                    processed.chunks.len(),
                    processing_time_ms
                );
                Ok(IngestOutcome {
                    chunks_count: processed.chunks.len(),
                    document,
                    processing_time_ms,
                })
            }
            Err(e) => {
                warn!("Ingestion of '{}' failed: {}", upload.file_name, e);
                self.roll_back(document_id, &stored.path).await;
                Err(e)
            }
        }
    }

    async fn index_document(
        &self,
        document_id: Uuid,
        upload: &DocumentUpload,
        processed: &ProcessedDocument,
        file_path: &str,
    ) -> RagResult<Document> {
        let created_at = Utc::now();

        let chunks: Vec<ContentChunk> = processed
            .chunks
            .iter()
            .map(|pending| {
                ContentChunk::new(
                    document_id,
                    pending.text.clone(),
                    pending.index as i32,
                    pending.start as i32,
                    ChunkMetadata::for_chunk(
                        document_id,
                        &upload.file_name,
                        processed.document_type,
                        pending.index,
                        pending.start,
                        created_at,
                    ),
                )
            })
            .collect();

        let embeddings = self.embed_chunks(&chunks).await?;

        let records = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(chunk, embedding)| VectorRecord::new(chunk, embedding))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RagError::StoreWriteFailed(e.to_string()))?;

        self.vector_store
            .add(&records)
            .await
            .map_err(|e| RagError::StoreWriteFailed(e.to_string()))?;

        let document = Document::new(
            document_id,
            upload.file_name.clone(),
            processed.document_type,
            upload.data.len() as i64,
            ContentHash::of(&upload.data),
            upload.chunk_mode,
            records.len() as i32,
            file_path.to_string(),
            created_at,
        );

        self.document_repository
            .save(&document)
            .await
            .map_err(|e| RagError::StoreWriteFailed(e.to_string()))?;

        Ok(document)
    }

    async fn embed_chunks(&self, chunks: &[ContentChunk]) -> RagResult<Vec<Embedding>> {
        let model_name = self.embedding_provider.model_name().to_string();
        let expected_dimension = self.embedding_provider.embedding_dimension();
        let batch_size = self.settings.embedding_batch_size;

        // Must be collected before `stream::iter`: a lazy borrowing `map`
        // here makes the upload handler future non-`Send`.
        let requests: Vec<_> = chunks
            .chunks(batch_size)
            .map(|batch| {
                self.embedding_provider
                    .generate_embeddings(BatchEmbeddingRequest {
                        texts: batch.iter().map(|c| c.chunk_text().to_string()).collect(),
                        model_name: Some(model_name.clone()),
                    })
            })
            .collect();

        // `buffered` keeps responses in request order.
        let responses: Vec<_> = stream::iter(requests)
            .buffered(EMBEDDING_CONCURRENCY)
            .try_collect()
            .await
            .map_err(|e| RagError::EmbeddingFailed(e.to_string()))?;

        let mut embeddings = Vec::with_capacity(chunks.len());
        for (batch, response) in chunks.chunks(batch_size).zip(responses) {
            if response.embeddings.len() != batch.len() {
                return Err(RagError::EmbeddingFailed(format!(
                    "provider returned {} vectors for {} texts",
                    response.embeddings.len(),
                    batch.len()
                )));
            }

            for (chunk, vector) in batch.iter().zip(response.embeddings) {
                let dimension = vector.as_slice().len();
                if dimension != expected_dimension {
                    return Err(RagError::EmbeddingFailed(format!(
                        "expected {}-dimensional vectors, got {}",
                        expected_dimension, dimension
                    )));
                }
                embeddings.push(Embedding::new(
                    chunk.id().to_string(),
                    response.model_name.clone(),
                    vector,
                ));
            }
        }

        Ok(embeddings)
    }

    async fn roll_back(&self, document_id: Uuid, file_path: &str) {
        match self.vector_store.delete_by_document(document_id).await {
            Ok(0) => {}
            Ok(removed) => warn!(
                "Rolled back {} chunk(s) of failed document {}",
                removed, document_id
            ),
            Err(e) => error!(
                "Could not roll back chunks of document {}: {}",
                document_id, e
            ),
        }

        if let Err(e) = self.file_storage.delete_file(file_path).await {
            error!("Could not remove stored file {}: {}", file_path, e);
        }
    }

    /// Retrieves the `top_k` closest chunks and asks the model to answer
    /// from them. Inference failures are returned as-is, never retried.
    pub async fn query(&self, question: &str, top_k: Option<usize>) -> RagResult<RagAnswer> {
        let query = RagQuery::new(
            question,
            top_k.unwrap_or(self.settings.default_top_k),
            self.settings.max_top_k,
        )
        .map_err(RagError::InvalidRequest)?;

        let indexed = self
            .vector_store
            .count()
            .await
            .map_err(|e| RagError::StoreReadFailed(e.to_string()))?;
        if indexed == 0 {
            return Err(RagError::NoDocumentsIndexed);
        }

        let question_embedding = self
            .embedding_provider
            .generate_embedding(EmbeddingRequest {
                text: query.question().to_string(),
                model_name: None,
            })
            .await
            .map_err(|e| RagError::EmbeddingFailed(e.to_string()))?;

        let expected_dimension = self.embedding_provider.embedding_dimension();
        let dimension = question_embedding.embedding.as_slice().len();
        if dimension != expected_dimension {
            return Err(RagError::EmbeddingFailed(format!(
                "expected {}-dimensional query vector, got {}",
                expected_dimension, dimension
            )));
        }

        let chunks = self
            .vector_store
            .search(&question_embedding.embedding, query.top_k())
            .await
            .map_err(|e| RagError::StoreReadFailed(e.to_string()))?;

        let prompt = build_prompt(query.question(), &chunks);
        let generation = self
            .inference_client
            .generate(&prompt)
            .await
            .map_err(|e| RagError::InferenceUnavailable(e.to_string()))?;

        let answer = match generation.text.trim() {
            "" => EMPTY_ANSWER_FALLBACK.to_string(),
            text => text.to_string(),
        };

        info!(
            "Answered question with {} retrieved chunk(s) using {}",
            chunks.len(),
            self.inference_client.model_name()
        );

        Ok(RagAnswer {
            answer,
            chunks,
            question: query.question().to_string(),
            model: self.inference_client.model_name().to_string(),
            answered_at: Utc::now(),
        })
    }

    /// Removes a document with all of its chunks and vectors.
    pub async fn delete(&self, document_id: Uuid) -> RagResult<DeleteOutcome> {
        let document = self.get_document(document_id).await?;

        let chunks_removed = self
            .vector_store
            .delete_by_document(document_id)
            .await
            .map_err(|e| RagError::StoreWriteFailed(e.to_string()))?;

        match self.file_storage.delete_file(document.file_path()).await {
            Ok(true) => {}
            Ok(false) => warn!("Stored file {} was already gone", document.file_path()),
            Err(e) => warn!("Could not remove stored file {}: {}", document.file_path(), e),
        }

        self.document_repository
            .delete(document_id)
            .await
            .map_err(|e| RagError::StoreWriteFailed(e.to_string()))?;

        info!(
            "Deleted document {} ({} chunks)",
            document_id, chunks_removed
        );

        Ok(DeleteOutcome {
            document_id,
            file_name: document.file_name().to_string(),
            chunks_removed,
        })
    }

    pub async fn get_document(&self, document_id: Uuid) -> RagResult<Document> {
        self.document_repository
            .find_by_id(document_id)
            .await
            .map_err(|e| RagError::StoreReadFailed(e.to_string()))?
            .ok_or(RagError::DocumentNotFound(document_id))
    }

    pub async fn list_documents(&self, skip: i64, limit: i64) -> RagResult<(Vec<Document>, i64)> {
        let documents = self
            .document_repository
            .find_all(skip, limit)
            .await
            .map_err(|e| RagError::StoreReadFailed(e.to_string()))?;
        let total = self
            .document_repository
            .count()
            .await
            .map_err(|e| RagError::StoreReadFailed(e.to_string()))?;
        Ok((documents, total))
    }

    pub async fn document_chunks(
        &self,
        document_id: Uuid,
    ) -> RagResult<(Document, Vec<ContentChunk>)> {
        let document = self.get_document(document_id).await?;
        let chunks = self
            .vector_store
            .chunks_for_document(document_id)
            .await
            .map_err(|e| RagError::StoreReadFailed(e.to_string()))?;
        Ok((document, chunks))
    }

    pub async fn stats(&self) -> RagResult<IndexStats> {
        let documents = self
            .document_repository
            .count()
            .await
            .map_err(|e| RagError::StoreReadFailed(e.to_string()))?;
        let chunks = self
            .vector_store
            .count()
            .await
            .map_err(|e| RagError::StoreReadFailed(e.to_string()))?;
        Ok(IndexStats { documents, chunks })
    }

    /// `false` when the embedding service is unreachable or serves vectors
    /// of the wrong size.
    pub async fn embedding_service_healthy(&self) -> bool {
        match self.embedding_provider.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!("Embedding service health check failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::InferenceClient;
    use crate::domain::repositories::document_repository::DocumentRepositoryError;
    use crate::infrastructure::external_services::document_extractors::CompositeDocumentExtractor;
    use crate::infrastructure::file_system::LocalFileStorage;
    use crate::infrastructure::memory::{InMemoryDocumentRepository, InMemoryVectorStore};
    use crate::test_support::{
        BrokenEmbeddingProvider, HashingEmbeddingProvider, ScriptedInferenceClient,
        UnreachableInferenceClient,
    };
    use async_trait::async_trait;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    const DIMENSION: usize = 32;

    struct Harness {
        service: RagService,
        vector_store: Arc<InMemoryVectorStore>,
        storage_dir: TempDir,
    }

    struct RejectingDocumentRepository;

    #[async_trait]
    impl DocumentRepository for RejectingDocumentRepository {
        async fn save(&self, _document: &Document) -> Result<(), DocumentRepositoryError> {
            Err(DocumentRepositoryError::DatabaseError("disk full".to_string()))
        }
        async fn find_by_id(&self, _id: Uuid) -> Result<Option<Document>, DocumentRepositoryError> {
            Ok(None)
        }
        async fn find_all(
            &self,
            _skip: i64,
            _limit: i64,
        ) -> Result<Vec<Document>, DocumentRepositoryError> {
            Ok(Vec::new())
        }
        async fn delete(&self, _id: Uuid) -> Result<bool, DocumentRepositoryError> {
            Ok(false)
        }
        async fn count(&self) -> Result<i64, DocumentRepositoryError> {
            Ok(0)
        }
    }

    fn harness_with(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        document_repository: Arc<dyn DocumentRepository>,
        inference_client: Arc<dyn InferenceClient>,
    ) -> Harness {
        let storage_dir = TempDir::new().unwrap();
        let vector_store = Arc::new(InMemoryVectorStore::new(DIMENSION));
        let service = RagService::new(
            Arc::new(DocumentProcessorService::new(
                Arc::new(CompositeDocumentExtractor::new()),
                1024 * 1024,
            )),
            embedding_provider,
            vector_store.clone(),
            document_repository,
            Arc::new(LocalFileStorage::new(storage_dir.path().to_path_buf())),
            inference_client,
            RagSettings {
                embedding_batch_size: 2,
                default_top_k: 3,
                max_top_k: 10,
            },
        );
        Harness {
            service,
            vector_store,
            storage_dir,
        }
    }

    fn harness(inference_client: Arc<dyn InferenceClient>) -> Harness {
        harness_with(
            Arc::new(HashingEmbeddingProvider::new(DIMENSION)),
            Arc::new(InMemoryDocumentRepository::new()),
            inference_client,
        )
    }

    fn upload(name: &str, text: &str, chunk_mode: ChunkMode) -> DocumentUpload {
        DocumentUpload {
            file_name: name.to_string(),
            data: text.as_bytes().to_vec(),
            chunk_mode,
        }
    }

    fn stored_files(dir: &TempDir) -> usize {
        std::fs::read_dir(dir.path()).unwrap().count()
    }

    fn long_text() -> String {
        let words = ["alpha", "bravo", "charlie", "delta", "echo", "foxtrot"];
        let mut text = String::new();
        let mut i = 0;
        while text.chars().count() < 1200 {
            text.push_str(words[i % words.len()]);
            text.push(' ');
            i += 1;
        }
        text.chars().take(1200).collect()
    }

    #[tokio::test]
    async fn test_ingest_full_mode_stores_one_chunk() {
        let h = harness(Arc::new(ScriptedInferenceClient::new("ok")));

        let outcome = h
            .service
            .ingest(upload("hello.txt", "hello world", ChunkMode::Full))
            .await
            .unwrap();

        assert_eq!(outcome.chunks_count, 1);
        assert_eq!(outcome.document.chunks_count(), 1);
        assert_eq!(outcome.document.chunk_mode(), "full");
        assert_eq!(h.vector_store.count().await.unwrap(), 1);
        assert_eq!(stored_files(&h.storage_dir), 1);

        let (document, chunks) = h
            .service
            .document_chunks(outcome.document.id())
            .await
            .unwrap();
        assert_eq!(document.file_name(), "hello.txt");
        assert_eq!(chunks[0].chunk_text(), "hello world");
        assert_eq!(chunks[0].metadata().file_name(), Some("hello.txt"));
    }

    #[tokio::test]
    async fn test_ingest_chunked_embeds_in_ordered_batches() {
        let provider = Arc::new(HashingEmbeddingProvider::new(DIMENSION));
        let h = harness_with(
            provider.clone(),
            Arc::new(InMemoryDocumentRepository::new()),
            Arc::new(ScriptedInferenceClient::new("ok")),
        );

        let outcome = h
            .service
            .ingest(upload("long.txt", &long_text(), ChunkMode::chunked(500, 50).unwrap()))
            .await
            .unwrap();

        assert_eq!(outcome.chunks_count, 3);
        // Three chunks with a batch size of two.
        assert_eq!(provider.batch_calls.load(Ordering::SeqCst), 2);

        let chunks = h
            .service
            .document_chunks(outcome.document.id())
            .await
            .unwrap()
            .1;
        let starts: Vec<i32> = chunks.iter().map(|c| c.chunk_start()).collect();
        assert_eq!(starts, vec![0, 450, 900]);
        let first_tail: String = chunks[0].chunk_text().chars().skip(450).collect();
        let second_head: String = chunks[1].chunk_text().chars().take(50).collect();
        assert_eq!(first_tail, second_head);
    }

    #[tokio::test]
    async fn test_ingest_rejects_unsupported_files_before_storing() {
        let h = harness(Arc::new(ScriptedInferenceClient::new("ok")));

        let err = h
            .service
            .ingest(upload("notes.docx", "hello", ChunkMode::Full))
            .await
            .unwrap_err();

        assert!(matches!(err, RagError::UnsupportedFormat(_)));
        assert_eq!(stored_files(&h.storage_dir), 0);
    }

    #[tokio::test]
    async fn test_embedding_failure_leaves_nothing_behind() {
        for wrong_dimension in [false, true] {
            let h = harness_with(
                Arc::new(BrokenEmbeddingProvider { wrong_dimension }),
                Arc::new(InMemoryDocumentRepository::new()),
                Arc::new(ScriptedInferenceClient::new("ok")),
            );

            let err = h
                .service
                .ingest(upload("a.txt", "some text", ChunkMode::Full))
                .await
                .unwrap_err();

            assert!(matches!(err, RagError::EmbeddingFailed(_)));
            assert_eq!(h.vector_store.count().await.unwrap(), 0);
            assert_eq!(stored_files(&h.storage_dir), 0);
        }
    }

    #[tokio::test]
    async fn test_failed_document_write_rolls_back_vectors_and_file() {
        let h = harness_with(
            Arc::new(HashingEmbeddingProvider::new(DIMENSION)),
            Arc::new(RejectingDocumentRepository),
            Arc::new(ScriptedInferenceClient::new("ok")),
        );

        let err = h
            .service
            .ingest(upload("a.txt", "some text", ChunkMode::Full))
            .await
            .unwrap_err();

        assert!(matches!(err, RagError::StoreWriteFailed(_)));
        assert_eq!(h.vector_store.count().await.unwrap(), 0);
        assert_eq!(stored_files(&h.storage_dir), 0);
    }

    #[tokio::test]
    async fn test_query_on_empty_store() {
        let inference = Arc::new(ScriptedInferenceClient::new("ok"));
        let h = harness(inference.clone());

        let err = h.service.query("anything?", None).await.unwrap_err();

        assert!(matches!(err, RagError::NoDocumentsIndexed));
        assert_eq!(inference.calls(), 0);
    }

    #[tokio::test]
    async fn test_query_validates_input() {
        let h = harness(Arc::new(ScriptedInferenceClient::new("ok")));
        h.service
            .ingest(upload("a.txt", "some text", ChunkMode::Full))
            .await
            .unwrap();

        for (question, top_k) in [("   ", None), ("why?", Some(0)), ("why?", Some(11))] {
            assert!(matches!(
                h.service.query(question, top_k).await,
                Err(RagError::InvalidRequest(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_query_retrieves_and_prompts() {
        let inference = Arc::new(ScriptedInferenceClient::new("  Foxtrot follows echo.  "));
        let h = harness(inference.clone());
        let outcome = h
            .service
            .ingest(upload("long.txt", &long_text(), ChunkMode::chunked(500, 50).unwrap()))
            .await
            .unwrap();

        let answer = h
            .service
            .query("What follows echo?", Some(3))
            .await
            .unwrap();

        assert_eq!(answer.answer, "Foxtrot follows echo.");
        assert_eq!(answer.model, "scripted");
        assert!(!answer.chunks.is_empty() && answer.chunks.len() <= 3);
        assert!(answer
            .chunks
            .iter()
            .all(|c| c.chunk.belongs_to(outcome.document.id())));
        assert!(answer.chunks.windows(2).all(|w| w[0].score >= w[1].score));

        let prompt = inference.last_prompt().unwrap();
        assert!(prompt.contains("[Document fragment 1]"));
        assert!(prompt.contains("What follows echo?"));
    }

    #[tokio::test]
    async fn test_empty_model_answer_is_replaced() {
        let h = harness(Arc::new(ScriptedInferenceClient::new("   ")));
        h.service
            .ingest(upload("a.txt", "some text", ChunkMode::Full))
            .await
            .unwrap();

        let answer = h.service.query("what?", None).await.unwrap();
        assert_eq!(answer.answer, EMPTY_ANSWER_FALLBACK);
    }

    #[tokio::test]
    async fn test_inference_failure_is_not_retried() {
        let inference = Arc::new(UnreachableInferenceClient::default());
        let h = harness(inference.clone());
        h.service
            .ingest(upload("a.txt", "some text", ChunkMode::Full))
            .await
            .unwrap();

        let err = h.service.query("what?", None).await.unwrap_err();

        assert!(matches!(err, RagError::InferenceUnavailable(_)));
        assert_eq!(inference.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_its_chunks() {
        let h = harness(Arc::new(ScriptedInferenceClient::new("ok")));
        let kept = h
            .service
            .ingest(upload("a.txt", "kept document", ChunkMode::Full))
            .await
            .unwrap();
        let removed = h
            .service
            .ingest(upload("long.txt", &long_text(), ChunkMode::chunked(500, 50).unwrap()))
            .await
            .unwrap();
        let before = h.vector_store.count().await.unwrap();

        let outcome = h.service.delete(removed.document.id()).await.unwrap();

        assert_eq!(outcome.chunks_removed, 3);
        assert_eq!(h.vector_store.count().await.unwrap(), before - 3);
        assert_eq!(stored_files(&h.storage_dir), 1);
        assert!(h.service.get_document(kept.document.id()).await.is_ok());
        assert!(matches!(
            h.service.delete(removed.document.id()).await,
            Err(RagError::DocumentNotFound(_))
        ));

        let stats = h.service.stats().await.unwrap();
        assert_eq!(stats, IndexStats { documents: 1, chunks: 1 });
    }

    #[tokio::test]
    async fn test_list_documents_reports_total() {
        let h = harness(Arc::new(ScriptedInferenceClient::new("ok")));
        for name in ["a.txt", "b.txt", "c.txt"] {
            h.service
                .ingest(upload(name, "text", ChunkMode::Full))
                .await
                .unwrap();
        }

        let (page, total) = h.service.list_documents(0, 2).await.unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(total, 3);
    }
}
