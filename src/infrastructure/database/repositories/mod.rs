pub mod pgvector_store;
pub mod postgres_document_repository;

pub use pgvector_store::PgVectorStore;
pub use postgres_document_repository::PostgresDocumentRepository;
