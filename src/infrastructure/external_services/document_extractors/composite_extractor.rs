use async_trait::async_trait;
use std::sync::Arc;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};
use crate::domain::value_objects::DocumentType;
use super::{PdfExtractor, TextExtractor};

/// Dispatches to the extractor registered for each document type.
pub struct CompositeDocumentExtractor {
    pdf_extractor: Arc<PdfExtractor>,
    text_extractor: Arc<TextExtractor>,
}

impl CompositeDocumentExtractor {
    pub fn new() -> Self {
        Self {
            pdf_extractor: Arc::new(PdfExtractor::new()),
            text_extractor: Arc::new(TextExtractor::new()),
        }
    }

    fn get_extractor_for_type(
        &self,
        document_type: DocumentType,
    ) -> Option<Arc<dyn DocumentExtractor>> {
        if self.pdf_extractor.can_extract(document_type) {
            Some(self.pdf_extractor.clone())
        } else if self.text_extractor.can_extract(document_type) {
            Some(self.text_extractor.clone())
        } else {
            None
        }
    }
}

impl Default for CompositeDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for CompositeDocumentExtractor {
    async fn extract_text(
        &self,
        data: &[u8],
        document_type: DocumentType,
    ) -> Result<ExtractedContent, DocumentExtractionError> {
        let extractor = self.get_extractor_for_type(document_type).ok_or_else(|| {
            DocumentExtractionError::UnsupportedFormat(document_type.to_string())
        })?;

        extractor.extract_text(data, document_type).await
    }

    fn can_extract(&self, document_type: DocumentType) -> bool {
        self.get_extractor_for_type(document_type).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_routes_by_document_type() {
        let extractor = CompositeDocumentExtractor::new();

        let text = extractor
            .extract_text(b"plain words", DocumentType::Txt)
            .await
            .unwrap();
        assert_eq!(text.text, "plain words");

        assert!(extractor
            .extract_text(b"plain words", DocumentType::Pdf)
            .await
            .is_err());
        assert!(extractor.can_extract(DocumentType::Pdf));
    }
}
