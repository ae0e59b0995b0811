//! Deterministic stand-ins for the network-backed ports.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use pgvector::Vector;

use crate::application::ports::embedding_provider::{
    BatchEmbeddingRequest, BatchEmbeddingResponse, EmbeddingProvider, EmbeddingProviderError,
    EmbeddingRequest, EmbeddingResponse,
};
use crate::application::ports::inference_client::{
    GenerationResponse, InferenceClient, InferenceError,
};

/// Bag-of-words vectors: each lowercase word bumps one hashed bucket, so
/// texts sharing words score close together.
pub struct HashingEmbeddingProvider {
    dimension: usize,
    pub batch_calls: AtomicUsize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            batch_calls: AtomicUsize::new(0),
        }
    }

    pub fn vector_for(&self, text: &str) -> Vector {
        let mut buckets = vec![0.0f32; self.dimension];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            buckets[(hasher.finish() % self.dimension as u64) as usize] += 1.0;
        }
        Vector::from(buckets)
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn generate_embedding(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, EmbeddingProviderError> {
        Ok(EmbeddingResponse {
            embedding: self.vector_for(&request.text),
            model_name: "hashing".to_string(),
        })
    }

    async fn generate_embeddings(
        &self,
        request: BatchEmbeddingRequest,
    ) -> Result<BatchEmbeddingResponse, EmbeddingProviderError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(BatchEmbeddingResponse {
            embeddings: request.texts.iter().map(|t| self.vector_for(t)).collect(),
            model_name: "hashing".to_string(),
        })
    }

    async fn health_check(&self) -> Result<bool, EmbeddingProviderError> {
        Ok(true)
    }

    fn model_name(&self) -> &str {
        "hashing"
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }
}

/// Always fails, or returns vectors of the wrong size when `wrong_dimension`
/// is set.
pub struct BrokenEmbeddingProvider {
    pub wrong_dimension: bool,
}

#[async_trait]
impl EmbeddingProvider for BrokenEmbeddingProvider {
    async fn generate_embedding(
        &self,
        _request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, EmbeddingProviderError> {
        Err(EmbeddingProviderError::ServiceUnavailable("down".to_string()))
    }

    async fn generate_embeddings(
        &self,
        request: BatchEmbeddingRequest,
    ) -> Result<BatchEmbeddingResponse, EmbeddingProviderError> {
        if self.wrong_dimension {
            return Ok(BatchEmbeddingResponse {
                embeddings: request.texts.iter().map(|_| Vector::from(vec![1.0; 3])).collect(),
                model_name: "broken".to_string(),
            });
        }
        Err(EmbeddingProviderError::ServiceUnavailable("down".to_string()))
    }

    async fn health_check(&self) -> Result<bool, EmbeddingProviderError> {
        Ok(false)
    }

    fn model_name(&self) -> &str {
        "broken"
    }

    fn embedding_dimension(&self) -> usize {
        8
    }
}

/// Replies with a fixed answer and remembers every prompt it was sent.
pub struct ScriptedInferenceClient {
    answer: String,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedInferenceClient {
    pub fn new(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl InferenceClient for ScriptedInferenceClient {
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse, InferenceError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(GenerationResponse {
            text: self.answer.clone(),
            model: "scripted".to_string(),
            total_duration_ms: None,
        })
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Counts attempts and always reports the service as unreachable.
#[derive(Default)]
pub struct UnreachableInferenceClient {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl InferenceClient for UnreachableInferenceClient {
    async fn generate(&self, _prompt: &str) -> Result<GenerationResponse, InferenceError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(InferenceError::Unreachable("connection refused".to_string()))
    }

    fn model_name(&self) -> &str {
        "unreachable"
    }
}
