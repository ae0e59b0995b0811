use async_trait::async_trait;
use pgvector::Vector;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::application::ports::embedding_provider::{
    BatchEmbeddingRequest, BatchEmbeddingResponse, EmbeddingProvider, EmbeddingProviderError,
    EmbeddingRequest, EmbeddingResponse,
};
use crate::config::EmbeddingConfig;
use super::api_url;

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug)]
enum EmbedAttemptError {
    /// Worth another attempt: connection failures, timeouts, 5xx, 429.
    Transient(EmbeddingProviderError),
    Permanent(EmbeddingProviderError),
}

/// Embeds text with an Ollama server's `/api/embed` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaEmbeddingClient {
    client: Client,
    endpoint: Url,
    model: String,
    dimension: usize,
    max_retries: u32,
    backoff_factor: f64,
}

impl OllamaEmbeddingClient {
    pub fn new(config: &EmbeddingConfig) -> Result<Self, EmbeddingProviderError> {
        let endpoint = api_url(&config.service_url, "api/embed")
            .map_err(|e| EmbeddingProviderError::InvalidInput(e.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingProviderError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            dimension: config.dimension,
            max_retries: config.max_retries,
            backoff_factor: 1.5,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn embed(&self, model: &str, texts: &[String]) -> Result<Vec<Vector>, EmbeddingProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.execute_request(model, texts).await {
                Ok(vectors) => return Ok(vectors),
                Err(EmbedAttemptError::Permanent(e)) => return Err(e),
                Err(EmbedAttemptError::Transient(e)) => {
                    if attempts > self.max_retries {
                        return Err(e);
                    }

                    let backoff_time = Duration::from_millis(
                        (self.backoff_factor.powi(attempts as i32 - 1) * 1000.0) as u64,
                    );
                    warn!(
                        "Embedding attempt {} failed ({}), retrying in {:?}",
                        attempts, e, backoff_time
                    );
                    tokio::time::sleep(backoff_time).await;
                }
            }
        }
    }

    async fn execute_request(
        &self,
        model: &str,
        texts: &[String],
    ) -> Result<Vec<Vector>, EmbedAttemptError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&EmbedRequest { model, input: texts })
            .send()
            .await
            .map_err(|e| {
                EmbedAttemptError::Transient(EmbeddingProviderError::NetworkError(
                    e.without_url().to_string(),
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = EmbeddingProviderError::ApiError(format!("{}: {}", status, body));
            return Err(
                if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                    EmbedAttemptError::Transient(error)
                } else {
                    EmbedAttemptError::Permanent(error)
                },
            );
        }

        let parsed: EmbedResponse = response.json().await.map_err(|e| {
            EmbedAttemptError::Permanent(EmbeddingProviderError::ApiError(e.to_string()))
        })?;

        if parsed.embeddings.len() != texts.len() {
            return Err(EmbedAttemptError::Permanent(EmbeddingProviderError::ApiError(
                format!(
                    "expected {} embeddings, got {}",
                    texts.len(),
                    parsed.embeddings.len()
                ),
            )));
        }

        debug!("Embedded {} text(s) with {}", texts.len(), model);

        Ok(parsed.embeddings.into_iter().map(Vector::from).collect())
    }
}

impl std::fmt::Display for EmbedAttemptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedAttemptError::Transient(e) | EmbedAttemptError::Permanent(e) => write!(f, "{}", e),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingClient {
    async fn generate_embedding(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, EmbeddingProviderError> {
        if request.text.trim().is_empty() {
            return Err(EmbeddingProviderError::InvalidInput(
                "cannot embed empty text".to_string(),
            ));
        }

        let model_name = request.model_name.unwrap_or_else(|| self.model.clone());
        let embedding = self
            .embed(&model_name, std::slice::from_ref(&request.text))
            .await?
            .pop()
            .ok_or_else(|| EmbeddingProviderError::ApiError("No embeddings returned".to_string()))?;

        Ok(EmbeddingResponse {
            embedding,
            model_name,
        })
    }

    async fn generate_embeddings(
        &self,
        request: BatchEmbeddingRequest,
    ) -> Result<BatchEmbeddingResponse, EmbeddingProviderError> {
        let model_name = request.model_name.unwrap_or_else(|| self.model.clone());
        let embeddings = self.embed(&model_name, &request.texts).await?;

        Ok(BatchEmbeddingResponse {
            embeddings,
            model_name,
        })
    }

    async fn health_check(&self) -> Result<bool, EmbeddingProviderError> {
        let test_request = EmbeddingRequest {
            text: "health check".to_string(),
            model_name: None,
        };

        match self.generate_embedding(test_request).await {
            Ok(response) => Ok(response.embedding.as_slice().len() == self.dimension),
            Err(_) => Ok(false),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }
}
