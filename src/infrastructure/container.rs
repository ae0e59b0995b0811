use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    application::{
        ports::{DocumentExtractor, EmbeddingProvider, FileStorage, InferenceClient},
        services::{DocumentProcessorService, RagService, RagSettings},
        use_cases::{
            DeleteDocumentUseCase, GetDocumentUseCase, ListDocumentsUseCase,
            QueryDocumentsUseCase, UploadDocumentUseCase,
        },
    },
    config::{AppConfig, StorageBackend},
    domain::repositories::{DocumentRepository, VectorStore},
    infrastructure::{
        database::{
            create_connection_pool,
            repositories::{PgVectorStore, PostgresDocumentRepository},
            run_migrations,
        },
        external_services::{
            OllamaEmbeddingClient, OllamaInferenceClient,
            document_extractors::CompositeDocumentExtractor,
        },
        file_system::LocalFileStorage,
        memory::{InMemoryDocumentRepository, InMemoryVectorStore},
    },
    presentation::http::{
        HttpServer,
        handlers::{DocumentHandler, HealthHandler, QueryHandler},
    },
};

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("DATABASE_URL is required for the postgres storage backend")]
    MissingDatabaseUrl,
    #[error("Database setup failed: {0}")]
    Database(String),
    #[error("Client setup failed: {0}")]
    Client(String),
}

pub struct AppContainer {
    pub config: AppConfig,

    // Storage
    pub vector_store: Arc<dyn VectorStore>,
    pub document_repository: Arc<dyn DocumentRepository>,
    pub file_storage: Arc<dyn FileStorage>,

    // External Services
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub inference_client: Arc<dyn InferenceClient>,
    pub document_extractor: Arc<dyn DocumentExtractor>,

    // Application Services
    pub document_processor: Arc<DocumentProcessorService>,
    pub rag_service: Arc<RagService>,

    // Use Cases
    pub upload_document_use_case: Arc<UploadDocumentUseCase>,
    pub query_documents_use_case: Arc<QueryDocumentsUseCase>,
    pub list_documents_use_case: Arc<ListDocumentsUseCase>,
    pub get_document_use_case: Arc<GetDocumentUseCase>,
    pub delete_document_use_case: Arc<DeleteDocumentUseCase>,

    // HTTP Handlers
    pub document_handler: Arc<DocumentHandler>,
    pub query_handler: Arc<QueryHandler>,
    pub health_handler: Arc<HealthHandler>,
}

impl AppContainer {
    /// Wires the production adapters selected by `STORAGE_BACKEND`.
    pub fn new(config: AppConfig) -> Result<Self, ContainerError> {
        let (vector_store, document_repository) = Self::create_storage(&config)?;

        let embedding_provider: Arc<dyn EmbeddingProvider> = Arc::new(
            OllamaEmbeddingClient::new(&config.embedding)
                .map_err(|e| ContainerError::Client(e.to_string()))?,
        );
        let inference_client: Arc<dyn InferenceClient> = Arc::new(
            OllamaInferenceClient::new(&config.inference)
                .map_err(|e| ContainerError::Client(e.to_string()))?,
        );

        info!(
            "Using {} vector store, embeddings from {} ({}), answers from {}",
            vector_store.backend_name(),
            config.embedding.service_url,
            config.embedding.model,
            config.inference.model
        );

        Ok(Self::from_parts(
            config,
            vector_store,
            document_repository,
            embedding_provider,
            inference_client,
        ))
    }

    fn create_storage(
        config: &AppConfig,
    ) -> Result<(Arc<dyn VectorStore>, Arc<dyn DocumentRepository>), ContainerError> {
        match config.storage.backend {
            StorageBackend::Postgres => {
                let database_url = config
                    .storage
                    .database_url
                    .as_deref()
                    .ok_or(ContainerError::MissingDatabaseUrl)?;
                let db_pool = create_connection_pool(database_url)
                    .map_err(|e| ContainerError::Database(e.to_string()))?;
                run_migrations(&db_pool).map_err(|e| ContainerError::Database(e.to_string()))?;

                let vector_store: Arc<dyn VectorStore> =
                    Arc::new(PgVectorStore::new(db_pool.clone(), config.embedding.dimension));
                let document_repository: Arc<dyn DocumentRepository> =
                    Arc::new(PostgresDocumentRepository::new(db_pool));
                Ok((vector_store, document_repository))
            }
            StorageBackend::Memory => {
                let vector_store: Arc<dyn VectorStore> =
                    Arc::new(InMemoryVectorStore::new(config.embedding.dimension));
                let document_repository: Arc<dyn DocumentRepository> =
                    Arc::new(InMemoryDocumentRepository::new());
                Ok((vector_store, document_repository))
            }
        }
    }

    /// Wires everything above the storage and model adapters.
    pub fn from_parts(
        config: AppConfig,
        vector_store: Arc<dyn VectorStore>,
        document_repository: Arc<dyn DocumentRepository>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        inference_client: Arc<dyn InferenceClient>,
    ) -> Self {
        let file_storage: Arc<dyn FileStorage> =
            Arc::new(LocalFileStorage::new(config.storage.upload_dir.clone()));

        // Create document extractor
        let document_extractor: Arc<dyn DocumentExtractor> =
            Arc::new(CompositeDocumentExtractor::new());

        // Create application services
        let document_processor = Arc::new(DocumentProcessorService::new(
            document_extractor.clone(),
            config.server.max_upload_bytes,
        ));

        let rag_service = Arc::new(RagService::new(
            document_processor.clone(),
            embedding_provider.clone(),
            vector_store.clone(),
            document_repository.clone(),
            file_storage.clone(),
            inference_client.clone(),
            RagSettings::from(&config),
        ));

        // Create use cases
        let upload_document_use_case = Arc::new(UploadDocumentUseCase::new(
            rag_service.clone(),
            config.chunking,
        ));
        let query_documents_use_case = Arc::new(QueryDocumentsUseCase::new(rag_service.clone()));
        let list_documents_use_case = Arc::new(ListDocumentsUseCase::new(rag_service.clone()));
        let get_document_use_case = Arc::new(GetDocumentUseCase::new(rag_service.clone()));
        let delete_document_use_case = Arc::new(DeleteDocumentUseCase::new(rag_service.clone()));

        // Create handlers
        let document_handler = Arc::new(DocumentHandler::new(
            upload_document_use_case.clone(),
            list_documents_use_case.clone(),
            get_document_use_case.clone(),
            delete_document_use_case.clone(),
            config.server.max_upload_bytes,
        ));
        let query_handler = Arc::new(QueryHandler::new(query_documents_use_case.clone()));
        let health_handler = Arc::new(HealthHandler::new(rag_service.clone()));

        Self {
            config,
            vector_store,
            document_repository,
            file_storage,
            embedding_provider,
            inference_client,
            document_extractor,
            document_processor,
            rag_service,
            upload_document_use_case,
            query_documents_use_case,
            list_documents_use_case,
            get_document_use_case,
            delete_document_use_case,
            document_handler,
            query_handler,
            health_handler,
        }
    }

    pub fn create_http_server(&self) -> HttpServer {
        HttpServer::new(
            self.document_handler.clone(),
            self.query_handler.clone(),
            self.health_handler.clone(),
            self.config.server.clone(),
        )
    }
}
