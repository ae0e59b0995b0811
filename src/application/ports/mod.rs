pub mod document_extractor;
pub mod embedding_provider;
pub mod file_storage;
pub mod inference_client;

pub use document_extractor::DocumentExtractor;
pub use embedding_provider::EmbeddingProvider;
pub use file_storage::FileStorage;
pub use inference_client::InferenceClient;
