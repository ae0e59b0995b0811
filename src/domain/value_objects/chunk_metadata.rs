use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::DocumentType;

/// Free-form metadata attached to every stored chunk. The well-known keys
/// are written through the typed setters below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkMetadata {
    properties: BTreeMap<String, Value>,
}

impl ChunkMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_chunk(
        document_id: Uuid,
        file_name: &str,
        file_type: DocumentType,
        chunk_index: usize,
        chunk_start: usize,
        upload_time: DateTime<Utc>,
    ) -> Self {
        Self::new()
            .with_property("document_id", Value::String(document_id.to_string()))
            .with_property("filename", Value::String(file_name.to_string()))
            .with_property("file_type", Value::String(file_type.to_string()))
            .with_property("chunk_index", Value::from(chunk_index))
            .with_property("chunk_start", Value::from(chunk_start))
            .with_property("upload_time", Value::String(upload_time.to_rfc3339()))
    }

    pub fn with_property(mut self, key: &str, value: Value) -> Self {
        self.properties.insert(key.to_string(), value);
        self
    }

    pub fn set_property(&mut self, key: &str, value: Value) {
        self.properties.insert(key.to_string(), value);
    }

    pub fn get_property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn document_id(&self) -> Option<Uuid> {
        self.get_property("document_id")
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
    }

    pub fn file_name(&self) -> Option<&str> {
        self.get_property("filename").and_then(|v| v.as_str())
    }

    pub fn chunk_index(&self) -> Option<u64> {
        self.get_property("chunk_index").and_then(|v| v.as_u64())
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl From<ChunkMetadata> for Value {
    fn from(metadata: ChunkMetadata) -> Self {
        Value::Object(metadata.properties.into_iter().collect())
    }
}

impl TryFrom<Value> for ChunkMetadata {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self {
                properties: map.into_iter().collect(),
            }),
            Value::Null => Ok(Self::new()),
            other => Err(format!("Chunk metadata must be an object, got {}", other)),
        }
    }
}
