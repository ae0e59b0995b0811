use async_trait::async_trait;
use thiserror::Error;

use crate::domain::value_objects::DocumentType;

#[derive(Debug, Error)]
pub enum DocumentExtractionError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Corrupted file: {0}")]
    CorruptedFile(String),
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),
}

#[derive(Debug, Clone, Default)]
pub struct ExtractedContent {
    pub text: String,
    pub page_count: Option<usize>,
    /// Per-page failures that were skipped rather than aborting extraction.
    pub skipped_pages: Vec<String>,
}

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract_text(
        &self,
        data: &[u8],
        document_type: DocumentType,
    ) -> Result<ExtractedContent, DocumentExtractionError>;

    fn can_extract(&self, document_type: DocumentType) -> bool;
}
