pub mod document_repository;
pub mod vector_store;

pub use document_repository::DocumentRepository;
pub use vector_store::{VectorRecord, VectorStore};
