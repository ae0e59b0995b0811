pub mod chunk_metadata;
pub mod chunk_mode;
pub mod content_hash;
pub mod document_type;

pub use chunk_metadata::ChunkMetadata;
pub use chunk_mode::ChunkMode;
pub use content_hash::ContentHash;
pub use document_type::DocumentType;
