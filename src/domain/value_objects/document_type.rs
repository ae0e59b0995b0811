use serde::{Deserialize, Serialize};
use std::path::Path;

/// File formats the document processor knows how to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Pdf,
    Txt,
}

impl DocumentType {
    /// Detects the type from a filename extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let extension = Path::new(file_name).extension()?.to_str()?;
        Self::parse(extension)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentType::Pdf),
            "txt" => Some(DocumentType::Txt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "pdf",
            DocumentType::Txt => "txt",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentType::Pdf => "application/pdf",
            DocumentType::Txt => "text/plain",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_from_extension() {
        assert_eq!(DocumentType::from_file_name("report.pdf"), Some(DocumentType::Pdf));
        assert_eq!(DocumentType::from_file_name("NOTES.TXT"), Some(DocumentType::Txt));
        assert_eq!(DocumentType::from_file_name("archive.tar.pdf"), Some(DocumentType::Pdf));
    }

    #[test]
    fn test_rejects_unknown_extensions() {
        assert_eq!(DocumentType::from_file_name("slides.pptx"), None);
        assert_eq!(DocumentType::from_file_name("README"), None);
        assert_eq!(DocumentType::from_file_name(".pdf"), None);
    }

    #[test]
    fn test_serializes_lowercase() {
        let json = serde_json::to_string(&DocumentType::Pdf).unwrap();
        assert_eq!(json, "\"pdf\"");
    }
}
