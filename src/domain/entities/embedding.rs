use chrono::{DateTime, Utc};
use pgvector::Vector;
use serde::{Deserialize, Serialize};

/// The vector computed for one chunk by the embedding provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    content_chunk_id: String,
    model_name: String,
    generated_at: DateTime<Utc>,
    embedding: Vector,
}

impl Embedding {
    pub fn new(content_chunk_id: String, model_name: String, embedding: Vector) -> Self {
        Self {
            content_chunk_id,
            model_name,
            generated_at: Utc::now(),
            embedding,
        }
    }

    pub fn content_chunk_id(&self) -> &str {
        &self.content_chunk_id
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    pub fn embedding(&self) -> &Vector {
        &self.embedding
    }

    pub fn dimension(&self) -> usize {
        self.embedding.as_slice().len()
    }

    pub fn belongs_to_chunk(&self, chunk_id: &str) -> bool {
        self.content_chunk_id == chunk_id
    }

    /// Cosine similarity against a raw query vector. Zero vectors and
    /// dimension mismatches score 0.
    pub fn cosine_similarity(&self, other: &[f32]) -> f32 {
        cosine_similarity(self.embedding.as_slice(), other)
    }
}

pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_creation() {
        let embedding = Embedding::new(
            "doc_chunk_0".to_string(),
            "all-minilm".to_string(),
            Vector::from(vec![0.1, 0.2, 0.3]),
        );

        assert_eq!(embedding.content_chunk_id(), "doc_chunk_0");
        assert_eq!(embedding.model_name(), "all-minilm");
        assert_eq!(embedding.dimension(), 3);
        assert!(embedding.belongs_to_chunk("doc_chunk_0"));
    }

    #[test]
    fn test_cosine_similarity() {
        let embedding = Embedding::new(
            "c".to_string(),
            "m".to_string(),
            Vector::from(vec![1.0, 0.0, 0.0]),
        );

        assert!((embedding.cosine_similarity(&[1.0, 0.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(embedding.cosine_similarity(&[0.0, 1.0, 0.0]).abs() < 1e-6);
        assert!((embedding.cosine_similarity(&[-2.0, 0.0, 0.0]) + 1.0).abs() < 1e-6);
        assert_eq!(embedding.cosine_similarity(&[0.0, 0.0, 0.0]), 0.0);
        assert_eq!(embedding.cosine_similarity(&[1.0, 0.0]), 0.0);
    }
}
