pub mod in_memory_document_repository;
pub mod in_memory_vector_store;

pub use in_memory_document_repository::InMemoryDocumentRepository;
pub use in_memory_vector_store::InMemoryVectorStore;
