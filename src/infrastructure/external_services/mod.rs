pub mod document_extractors;
pub mod ollama_embedding_client;
pub mod ollama_inference_client;

pub use ollama_embedding_client::OllamaEmbeddingClient;
pub use ollama_inference_client::OllamaInferenceClient;

use url::Url;

/// Joins an API path onto a base URL, keeping any path prefix the base has.
pub(crate) fn api_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    base.join(path)
}
