pub mod content_chunk;
pub mod document;
pub mod embedding;
pub mod rag_query;

pub use content_chunk::ContentChunk;
pub use document::Document;
pub use embedding::Embedding;
pub use rag_query::{RagAnswer, RagQuery, ScoredChunk};
