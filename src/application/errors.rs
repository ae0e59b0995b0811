use thiserror::Error;
use uuid::Uuid;

/// Every failure the ingest/query/delete pipeline reports to its caller.
/// Nothing here is retried automatically.
#[derive(Debug, Error)]
pub enum RagError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Text extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("Store write failed: {0}")]
    StoreWriteFailed(String),

    #[error("Store read failed: {0}")]
    StoreReadFailed(String),

    #[error("No documents have been indexed yet")]
    NoDocumentsIndexed,

    #[error("Inference service unavailable: {0}")]
    InferenceUnavailable(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(Uuid),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl RagError {
    /// Stable machine-readable code used in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            RagError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            RagError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            RagError::ExtractionFailed(_) => "EXTRACTION_FAILED",
            RagError::EmbeddingFailed(_) => "EMBEDDING_FAILED",
            RagError::StoreWriteFailed(_) => "STORE_WRITE_FAILED",
            RagError::StoreReadFailed(_) => "STORE_READ_FAILED",
            RagError::NoDocumentsIndexed => "NO_DOCUMENTS_INDEXED",
            RagError::InferenceUnavailable(_) => "INFERENCE_UNAVAILABLE",
            RagError::DocumentNotFound(_) => "DOCUMENT_NOT_FOUND",
            RagError::InvalidRequest(_) => "INVALID_REQUEST",
        }
    }
}

pub type RagResult<T> = Result<T, RagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_codes() {
        let err = RagError::FileTooLarge {
            size: 11,
            limit: 10,
        };
        assert_eq!(err.to_string(), "File too large: 11 bytes exceeds the 10 byte limit");
        assert_eq!(err.code(), "FILE_TOO_LARGE");
        assert_eq!(RagError::NoDocumentsIndexed.code(), "NO_DOCUMENTS_INDEXED");
    }
}
