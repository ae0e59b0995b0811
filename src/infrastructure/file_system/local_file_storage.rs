use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

use crate::application::ports::file_storage::{FileStorage, FileStorageError, StoredFile};

/// Keeps original uploads on local disk as `<document_id>.<ext>`.
pub struct LocalFileStorage {
    base_path: PathBuf,
}

impl LocalFileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub async fn ensure_directory_exists(&self) -> Result<(), FileStorageError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))
    }

    fn get_file_path(&self, file_id: Uuid, extension: &str) -> PathBuf {
        self.base_path.join(format!("{}.{}", file_id, extension))
    }

    /// Only paths inside the upload directory are ever read or removed.
    fn resolve(&self, path: &str) -> Result<PathBuf, FileStorageError> {
        let candidate = PathBuf::from(path);
        let file_name = candidate
            .file_name()
            .ok_or_else(|| FileStorageError::InvalidPath(path.to_string()))?;

        let resolved = self.base_path.join(file_name);
        if candidate != resolved && candidate != Path::new(file_name) {
            return Err(FileStorageError::InvalidPath(path.to_string()));
        }
        Ok(resolved)
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store_file(
        &self,
        file_id: Uuid,
        extension: &str,
        data: &[u8],
    ) -> Result<StoredFile, FileStorageError> {
        if extension.is_empty() || !extension.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(FileStorageError::InvalidPath(format!(
                "invalid extension '{}'",
                extension
            )));
        }

        self.ensure_directory_exists().await?;

        let file_path = self.get_file_path(file_id, extension);

        fs::write(&file_path, data)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))?;

        Ok(StoredFile {
            id: file_id,
            path: file_path.to_string_lossy().to_string(),
            size: data.len() as u64,
        })
    }

    async fn retrieve_file(&self, path: &str) -> Result<Vec<u8>, FileStorageError> {
        let file_path = self.resolve(path)?;

        fs::read(&file_path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => FileStorageError::FileNotFound(path.to_string()),
            _ => FileStorageError::IoError(e.to_string()),
        })
    }

    async fn delete_file(&self, path: &str) -> Result<bool, FileStorageError> {
        let file_path = self.resolve(path)?;

        match fs::remove_file(&file_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(FileStorageError::IoError(e.to_string())),
        }
    }

    async fn file_exists(&self, path: &str) -> Result<bool, FileStorageError> {
        let file_path = self.resolve(path)?;
        fs::try_exists(&file_path)
            .await
            .map_err(|e| FileStorageError::IoError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_store_names_file_after_document() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("uploads"));
        let id = Uuid::new_v4();

        let stored = storage.store_file(id, "txt", b"hello").await.unwrap();

        assert_eq!(stored.size, 5);
        assert!(stored.path.ends_with(&format!("{}.txt", id)));
        assert_eq!(storage.retrieve_file(&stored.path).await.unwrap(), b"hello");
        assert!(storage.file_exists(&stored.path).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path().to_path_buf());
        let stored = storage
            .store_file(Uuid::new_v4(), "pdf", b"%PDF")
            .await
            .unwrap();

        assert!(storage.delete_file(&stored.path).await.unwrap());
        assert!(!storage.delete_file(&stored.path).await.unwrap());
        assert!(matches!(
            storage.retrieve_file(&stored.path).await,
            Err(FileStorageError::FileNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_refuses_paths_outside_base() {
        let dir = TempDir::new().unwrap();
        let storage = LocalFileStorage::new(dir.path().join("uploads"));

        assert!(matches!(
            storage.delete_file("/etc/passwd").await,
            Err(FileStorageError::InvalidPath(_))
        ));
        assert!(matches!(
            storage.store_file(Uuid::new_v4(), "../x", b"").await,
            Err(FileStorageError::InvalidPath(_))
        ));
    }
}
