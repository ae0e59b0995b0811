use async_trait::async_trait;
use lopdf::Document;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use tracing::debug;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};
use crate::domain::value_objects::DocumentType;

pub struct PdfExtractor {
    password: String,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            password: String::new(),
        }
    }

    /// Pages are extracted in parallel; a page that fails is recorded and
    /// skipped. Only when every page fails is the document rejected.
    fn extract_pages(doc: &Document) -> Result<ExtractedContent, DocumentExtractionError> {
        let pages = doc.get_pages();
        if pages.is_empty() {
            return Err(DocumentExtractionError::ExtractionFailed(
                "PDF contains no pages".to_string(),
            ));
        }
        let page_count = pages.len();

        let mut extracted_pages: Vec<Result<(u32, String), String>> = pages
            .into_par_iter()
            .map(|(page_num, _): (u32, (u32, u16))| {
                doc.extract_text(&[page_num])
                    .map(|text| (page_num, text))
                    .map_err(|e| format!("page {}: {}", page_num, e))
            })
            .collect();
        extracted_pages.sort_by_key(|result| match result {
            Ok((page_num, _)) => *page_num,
            Err(_) => u32::MAX,
        });

        let mut page_texts = Vec::with_capacity(page_count);
        let mut skipped_pages = Vec::new();
        for page_result in extracted_pages {
            match page_result {
                Ok((_, text)) => page_texts.push(text),
                Err(e) => skipped_pages.push(e),
            }
        }

        if page_texts.is_empty() {
            return Err(DocumentExtractionError::ExtractionFailed(format!(
                "none of the {} page(s) could be read",
                page_count
            )));
        }

        debug!(
            "Extracted {} of {} PDF page(s)",
            page_texts.len(),
            page_count
        );

        Ok(ExtractedContent {
            text: page_texts.join("\n\n"),
            page_count: Some(page_count),
            skipped_pages,
        })
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_text(
        &self,
        data: &[u8],
        document_type: DocumentType,
    ) -> Result<ExtractedContent, DocumentExtractionError> {
        if !self.can_extract(document_type) {
            return Err(DocumentExtractionError::UnsupportedFormat(
                document_type.to_string(),
            ));
        }

        let data = data.to_vec();
        let password = self.password.clone();

        // lopdf parsing is CPU-bound; keep it off the async workers.
        tokio::task::spawn_blocking(move || {
            let mut doc = Document::load_mem(&data)
                .map_err(|e| DocumentExtractionError::CorruptedFile(e.to_string()))?;

            if doc.is_encrypted() {
                doc.decrypt(&password).map_err(|_e| {
                    DocumentExtractionError::ExtractionFailed(
                        "Failed to decrypt PDF - a password is required".to_string(),
                    )
                })?;
            }

            Self::extract_pages(&doc)
        })
        .await
        .map_err(|e| DocumentExtractionError::ExtractionFailed(e.to_string()))?
    }

    fn can_extract(&self, document_type: DocumentType) -> bool {
        document_type == DocumentType::Pdf
    }
}
