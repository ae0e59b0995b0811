use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Inference service unreachable: {0}")]
    Unreachable(String),
    #[error("Inference request timed out after {0}s")]
    Timeout(u64),
    #[error("Inference service returned {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("Invalid inference response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone)]
pub struct GenerationResponse {
    pub text: String,
    pub model: String,
    pub total_duration_ms: Option<u64>,
}

/// A text-completion backend. Calls are never retried by callers.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse, InferenceError>;

    fn model_name(&self) -> &str;
}
