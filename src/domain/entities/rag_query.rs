use chrono::{DateTime, Utc};

use super::ContentChunk;

/// A question asked against the indexed documents. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RagQuery {
    question: String,
    top_k: usize,
}

impl RagQuery {
    pub fn new(question: impl Into<String>, top_k: usize, max_top_k: usize) -> Result<Self, String> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err("Question cannot be empty".to_string());
        }
        if top_k == 0 || top_k > max_top_k {
            return Err(format!("top_k must be between 1 and {}", max_top_k));
        }
        Ok(Self { question, top_k })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }
}

/// One retrieved chunk and its cosine similarity to the question.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: ContentChunk,
    pub score: f32,
}

/// The generated answer together with the context it was grounded on.
#[derive(Debug, Clone)]
pub struct RagAnswer {
    pub answer: String,
    pub chunks: Vec<ScoredChunk>,
    pub question: String,
    pub model: String,
    pub answered_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_validation() {
        assert!(RagQuery::new("What is RAG?", 3, 10).is_ok());
        assert!(RagQuery::new("   ", 3, 10).is_err());
        assert!(RagQuery::new("q", 0, 10).is_err());
        assert!(RagQuery::new("q", 11, 10).is_err());
        assert_eq!(RagQuery::new("q", 10, 10).unwrap().top_k(), 10);
    }
}
