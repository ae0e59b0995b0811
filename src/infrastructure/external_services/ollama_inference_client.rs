use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::application::ports::inference_client::{
    GenerationResponse, InferenceClient, InferenceError,
};
use crate::config::InferenceConfig;
use super::api_url;

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    /// Nanoseconds.
    total_duration: Option<u64>,
}

/// Non-streaming completions from an Ollama server's `/api/generate`.
/// Each call is made exactly once; failures go straight back to the caller.
#[derive(Debug, Clone)]
pub struct OllamaInferenceClient {
    client: Client,
    endpoint: Url,
    model: String,
    timeout_secs: u64,
}

impl OllamaInferenceClient {
    pub fn new(config: &InferenceConfig) -> Result<Self, InferenceError> {
        let endpoint = api_url(&config.base_url, "api/generate")
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InferenceError::Unreachable(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceClient for OllamaInferenceClient {
    async fn generate(&self, prompt: &str) -> Result<GenerationResponse, InferenceError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InferenceError::Timeout(self.timeout_secs)
                } else {
                    InferenceError::Unreachable(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InferenceError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout(self.timeout_secs)
            } else {
                InferenceError::InvalidResponse(e.to_string())
            }
        })?;

        let total_duration_ms = parsed.total_duration.map(|ns| ns / 1_000_000);
        debug!(
            "{} generated {} chars in {:?} ms",
            self.model,
            parsed.response.len(),
            total_duration_ms
        );

        Ok(GenerationResponse {
            text: parsed.response,
            model: self.model.clone(),
            total_duration_ms,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> OllamaInferenceClient {
        OllamaInferenceClient::new(&InferenceConfig {
            base_url: Url::parse(url).unwrap(),
            model: "qwen2.5:7b".to_string(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_request_is_non_streaming() {
        let body = serde_json::to_value(GenerateRequest {
            model: "qwen2.5:7b",
            prompt: "hi",
            stream: false,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({ "model": "qwen2.5:7b", "prompt": "hi", "stream": false })
        );
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let parsed: GenerateResponse = serde_json::from_str(r#"{"done": true}"#).unwrap();
        assert!(parsed.response.is_empty());
        assert!(parsed.total_duration.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let client = client("http://127.0.0.1:9");
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:9/api/generate");

        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(
            err,
            InferenceError::Unreachable(_) | InferenceError::Timeout(_)
        ));
    }
}
