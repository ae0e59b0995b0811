use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub id: Uuid,
    pub path: String,
    pub size: u64,
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Stores the upload as `<file_id>.<extension>`.
    async fn store_file(
        &self,
        file_id: Uuid,
        extension: &str,
        data: &[u8],
    ) -> Result<StoredFile, FileStorageError>;

    async fn retrieve_file(&self, path: &str) -> Result<Vec<u8>, FileStorageError>;

    /// Returns `false` when there was nothing to delete.
    async fn delete_file(&self, path: &str) -> Result<bool, FileStorageError>;

    async fn file_exists(&self, path: &str) -> Result<bool, FileStorageError>;
}
