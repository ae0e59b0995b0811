use async_trait::async_trait;
use encoding_rs::GBK;
use tracing::warn;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};
use crate::domain::value_objects::DocumentType;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Plain-text uploads. UTF-8 first, then GBK; bytes valid in neither are
/// decoded lossily as UTF-8.
#[derive(Debug, Default)]
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(data: &[u8]) -> String {
        let data = data.strip_prefix(UTF8_BOM).unwrap_or(data);
        let utf8_error = match std::str::from_utf8(data) {
            Ok(text) => return text.to_string(),
            Err(e) => e,
        };

        let (text, had_errors) = GBK.decode_without_bom_handling(data);
        if !had_errors {
            return text.into_owned();
        }

        warn!(
            "Text upload is neither UTF-8 (invalid at byte {}) nor GBK, decoding lossily",
            utf8_error.valid_up_to()
        );
        String::from_utf8_lossy(data).into_owned()
    }
}

#[async_trait]
impl DocumentExtractor for TextExtractor {
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

        Ok(ExtractedContent {
            text: Self::decode(data),
            page_count: None,
            skipped_pages: Vec::new(),
        })
    }

    fn can_extract(&self, document_type: DocumentType) -> bool {
        document_type == DocumentType::Txt
    }
}
