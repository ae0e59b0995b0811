use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

use crate::domain::value_objects::ChunkMode;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key}='{value}' is invalid: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_url: Option<String>,
    pub upload_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub service_url: Url,
    pub model: String,
    pub dimension: usize,
    pub batch_size: usize,
    pub max_retries: u32,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct InferenceConfig {
    pub base_url: Url,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    pub size: usize,
    pub overlap: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct RetrievalConfig {
    pub default_top_k: usize,
    pub max_top_k: usize,
}

/// Settings read once at startup and shared, read-only, by every component.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub inference: InferenceConfig,
    pub chunking: ChunkingConfig,
    pub retrieval: RetrievalConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset or blank keys
    /// take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let backend = match vars.string("STORAGE_BACKEND", "postgres").to_lowercase().as_str() {
            "postgres" | "postgresql" => StorageBackend::Postgres,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                    reason: "expected 'postgres' or 'memory'".to_string(),
                });
            }
        };
        let database_url = vars.optional("DATABASE_URL");
        if backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let config = AppConfig {
            server: ServerConfig {
                host: vars.string("HOST", "0.0.0.0"),
                port: vars.parse("PORT", 8000)?,
                max_upload_bytes: vars.parse("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            },
            storage: StorageConfig {
                backend,
                database_url,
                upload_dir: PathBuf::from(vars.string("UPLOAD_DIR", "./data/documents")),
            },
            embedding: EmbeddingConfig {
                service_url: vars.url("EMBEDDING_SERVICE_URL", "http://localhost:11434")?,
                model: vars.string("EMBEDDING_MODEL", "all-minilm"),
                dimension: vars.parse("EMBEDDING_DIMENSION", 384)?,
                batch_size: vars.parse("EMBEDDING_BATCH_SIZE", 16)?,
                max_retries: vars.parse("EMBEDDING_MAX_RETRIES", 3)?,
                timeout_secs: vars.parse("EMBEDDING_TIMEOUT_SECS", 30)?,
            },
            inference: InferenceConfig {
                base_url: vars.url("OLLAMA_BASE_URL", "http://localhost:11434")?,
                model: vars.string("OLLAMA_MODEL", "qwen2.5:7b"),
                timeout_secs: vars.parse("LLM_TIMEOUT_SECS", 60)?,
            },
            chunking: ChunkingConfig {
                size: vars.parse("CHUNK_SIZE", 500)?,
                overlap: vars.parse("CHUNK_OVERLAP", 50)?,
            },
            retrieval: RetrievalConfig {
                default_top_k: vars.parse("TOP_K", 3)?,
                max_top_k: vars.parse("MAX_TOP_K", 10)?,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        ChunkMode::chunked(self.chunking.size, self.chunking.overlap).map_err(|reason| {
            ConfigError::Invalid {
                key: "CHUNK_OVERLAP",
                value: self.chunking.overlap.to_string(),
                reason,
            }
        })?;

        let positive = [
            ("EMBEDDING_DIMENSION", self.embedding.dimension),
            ("EMBEDDING_BATCH_SIZE", self.embedding.batch_size),
            ("MAX_UPLOAD_BYTES", self.server.max_upload_bytes),
            ("TOP_K", self.retrieval.default_top_k),
            ("MAX_TOP_K", self.retrieval.max_top_k),
        ];
        for (key, value) in positive {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    key,
                    value: value.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if self.retrieval.default_top_k > self.retrieval.max_top_k {
            return Err(ConfigError::Invalid {
                key: "TOP_K",
                value: self.retrieval.default_top_k.to_string(),
                reason: format!("must not exceed MAX_TOP_K ({})", self.retrieval.max_top_k),
            });
        }

        Ok(())
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn string(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    fn parse<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            None => Ok(default),
            Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            }),
        }
    }

    fn url(&self, key: &'static str, default: &str) -> Result<Url, ConfigError> {
        let value = self.string(key, default);
        Url::parse(&value).map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("STORAGE_BACKEND", "memory")]).unwrap();

        assert_eq!(config.server.bind_address(), "0.0.0.0:8000");
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.embedding.model, "all-minilm");
        assert_eq!(config.embedding.dimension, 384);
        assert_eq!(config.inference.model, "qwen2.5:7b");
        assert_eq!(config.inference.timeout_secs, 60);
        assert_eq!(config.chunking.size, 500);
        assert_eq!(config.chunking.overlap, 50);
        assert_eq!(config.retrieval.default_top_k, 3);
        assert_eq!(config.retrieval.max_top_k, 10);
        assert_eq!(config.server.max_upload_bytes, 10_485_760);
    }

    #[test]
    fn test_postgres_requires_database_url() {
        assert_eq!(config_from(&[]).unwrap_err(), ConfigError::Missing("DATABASE_URL"));

        let config = config_from(&[("DATABASE_URL", "postgres://localhost/kb")]).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Postgres);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let bad = [
            [("CHUNK_SIZE", "100"), ("CHUNK_OVERLAP", "100")],
            [("PORT", "eighty"), ("TOP_K", "3")],
            [("TOP_K", "11"), ("MAX_TOP_K", "10")],
            [("EMBEDDING_DIMENSION", "0"), ("TOP_K", "3")],
            [("OLLAMA_BASE_URL", "not a url"), ("TOP_K", "3")],
        ];

        for pairs in bad {
            let mut pairs = pairs.to_vec();
            pairs.push(("STORAGE_BACKEND", "memory"));
            assert!(
                matches!(config_from(&pairs), Err(ConfigError::Invalid { .. })),
                "{:?} should be rejected",
                pairs
            );
        }
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("STORAGE_BACKEND", "memory"), ("PORT", "  ")]).unwrap();
        assert_eq!(config.server.port, 8000);
    }
}
