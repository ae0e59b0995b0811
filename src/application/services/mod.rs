pub mod document_processor;
pub mod prompt_builder;
pub mod rag_service;
pub mod text_chunker;

pub use document_processor::DocumentProcessorService;
pub use rag_service::{DocumentUpload, RagService, RagSettings};
