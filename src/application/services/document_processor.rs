use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::errors::{RagError, RagResult};
use crate::application::ports::{
    DocumentExtractor, document_extractor::DocumentExtractionError,
};
use crate::application::services::text_chunker::{chunk_text, normalize_whitespace};
use crate::domain::value_objects::{ChunkMode, DocumentType};

/// Text pulled out of an upload, already whitespace-normalized, plus the
/// chunks it was cut into.
#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub document_type: DocumentType,
    pub text: String,
    pub chunks: Vec<PendingChunk>,
    pub page_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChunk {
    pub index: usize,
    pub start: usize,
    pub text: String,
}

pub struct DocumentProcessorService {
    document_extractor: Arc<dyn DocumentExtractor>,
    max_file_size: usize,
}

impl DocumentProcessorService {
    pub fn new(document_extractor: Arc<dyn DocumentExtractor>, max_file_size: usize) -> Self {
        Self {
            document_extractor,
            max_file_size,
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Checks type and size before anything is read or stored.
    pub fn validate(&self, file_name: &str, size: usize) -> RagResult<DocumentType> {
        let document_type = DocumentType::from_file_name(file_name).ok_or_else(|| {
            RagError::UnsupportedFormat(format!(
                "'{}' is not a supported file type, only pdf and txt are accepted",
                file_name
            ))
        })?;

        if size > self.max_file_size {
            return Err(RagError::FileTooLarge {
                size,
                limit: self.max_file_size,
            });
        }

        if size == 0 {
            return Err(RagError::InvalidRequest("File is empty".to_string()));
        }

        Ok(document_type)
    }

    pub async fn extract_text(
        &self,
        data: &[u8],
        document_type: DocumentType,
    ) -> RagResult<(String, Option<usize>)> {
        if data.len() > self.max_file_size {
            return Err(RagError::FileTooLarge {
                size: data.len(),
                limit: self.max_file_size,
            });
        }

        if !self.document_extractor.can_extract(document_type) {
            return Err(RagError::UnsupportedFormat(document_type.to_string()));
        }

        let extracted = self
            .document_extractor
            .extract_text(data, document_type)
            .await
            .map_err(|e| match e {
                DocumentExtractionError::UnsupportedFormat(msg) => RagError::UnsupportedFormat(msg),
                other => RagError::ExtractionFailed(other.to_string()),
            })?;

        if !extracted.skipped_pages.is_empty() {
            warn!(
                "Skipped {} unreadable page(s): {}",
                extracted.skipped_pages.len(),
                extracted.skipped_pages.join("; ")
            );
        }

        let text = normalize_whitespace(&extracted.text);
        if text.is_empty() {
            return Err(RagError::ExtractionFailed(
                "No text could be extracted from the document".to_string(),
            ));
        }

        Ok((text, extracted.page_count))
    }

    pub async fn process(
        &self,
        file_name: &str,
        data: &[u8],
        chunk_mode: ChunkMode,
    ) -> RagResult<ProcessedDocument> {
        let document_type = self.validate(file_name, data.len())?;
        let (text, page_count) = self.extract_text(data, document_type).await?;

        let chunks: Vec<PendingChunk> = chunk_text(&text, chunk_mode)
            .map(|chunk| PendingChunk {
                index: chunk.index,
                start: chunk.start,
                text: chunk.text.to_string(),
            })
            .collect();

        debug!(
            "Split '{}' ({} chars) into {} {} chunk(s)",
            file_name,
            text.chars().count(),
            chunks.len(),
            chunk_mode
        );

        Ok(ProcessedDocument {
            document_type,
            text,
            chunks,
            page_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::external_services::document_extractors::CompositeDocumentExtractor;

    fn processor(limit: usize) -> DocumentProcessorService {
        DocumentProcessorService::new(Arc::new(CompositeDocumentExtractor::new()), limit)
    }

    #[test]
    fn test_validate_rejects_unsupported_and_oversized() {
        let processor = processor(10);

        assert!(matches!(
            processor.validate("slides.docx", 5),
            Err(RagError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            processor.validate("notes.txt", 11),
            Err(RagError::FileTooLarge { size: 11, limit: 10 })
        ));
        assert!(matches!(
            processor.validate("notes.txt", 0),
            Err(RagError::InvalidRequest(_))
        ));
        assert_eq!(processor.validate("notes.TXT", 10).unwrap(), DocumentType::Txt);
    }

    #[tokio::test]
    async fn test_process_full_mode_is_single_chunk() {
        let processed = processor(1024)
            .process("hello.txt", b"hello world", ChunkMode::Full)
            .await
            .unwrap();

        assert_eq!(processed.document_type, DocumentType::Txt);
        assert_eq!(processed.chunks.len(), 1);
        assert_eq!(processed.chunks[0].text, "hello world");
    }

    #[tokio::test]
    async fn test_process_normalizes_before_chunking() {
        let processed = processor(1024)
            .process(
                "spaced.txt",
                b"alpha\n\n\nbeta\t\tgamma   ",
                ChunkMode::chunked(10, 2).unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(processed.text, "alpha beta gamma");
        let texts: Vec<_> = processed.chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha beta", "ta gamma"]);
        assert_eq!(processed.chunks[1].start, 8);
    }

    #[tokio::test]
    async fn test_whitespace_only_text_fails_extraction() {
        let result = processor(1024)
            .process("blank.txt", b" \n\t ", ChunkMode::Full)
            .await;
        assert!(matches!(result, Err(RagError::ExtractionFailed(_))));
    }

    #[tokio::test]
    async fn test_garbage_pdf_fails_extraction() {
        let result = processor(1024)
            .process("broken.pdf", b"definitely not a pdf", ChunkMode::Full)
            .await;
        assert!(matches!(result, Err(RagError::ExtractionFailed(_))));
    }
}
