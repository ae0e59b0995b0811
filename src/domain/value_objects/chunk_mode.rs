use serde::{Deserialize, Serialize};

/// How extracted text is cut into retrievable chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ChunkMode {
    /// Fixed windows of `size` characters, each sharing `overlap` characters
    /// with the previous one.
    Chunked { size: usize, overlap: usize },
    /// The whole document as a single chunk.
    Full,
}

impl ChunkMode {
    pub fn chunked(size: usize, overlap: usize) -> Result<Self, String> {
        if size == 0 {
            return Err("Chunk size must be greater than zero".to_string());
        }
        if overlap >= size {
            return Err(format!(
                "Chunk overlap ({}) must be smaller than chunk size ({})",
                overlap, size
            ));
        }
        Ok(ChunkMode::Chunked { size, overlap })
    }

    /// Resolves a request flag (`chunked` or `full`) against the configured
    /// window. A missing flag means `chunked`.
    pub fn from_flag(flag: Option<&str>, size: usize, overlap: usize) -> Result<Self, String> {
        match flag.map(|f| f.trim().to_ascii_lowercase()).as_deref() {
            None | Some("") | Some("chunked") => Self::chunked(size, overlap),
            Some("full") => Ok(ChunkMode::Full),
            Some(other) => Err(format!(
                "Unknown chunk mode '{}', expected 'chunked' or 'full'",
                other
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChunkMode::Chunked { .. } => "chunked",
            ChunkMode::Full => "full",
        }
    }
}

impl std::fmt::Display for ChunkMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
