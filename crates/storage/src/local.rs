use crate::backend::StorageBackend;
use crate::{StorageError, StorageKind, StoredObject};
use bytes::Bytes;
use qrshare_utils::unique_stored_name;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;

/// Fresh names drawn before giving up on a collision
const MAX_NAME_ATTEMPTS: usize = 5;

/// Local filesystem storage backend
pub struct LocalBackend {
    base_url: String,
    upload_dir: PathBuf,
}

impl LocalBackend {
    pub fn new(base_url: String, upload_dir: PathBuf) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            upload_dir,
        }
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn get_url(&self, stored_name: &str) -> String {
        format!("{}/files/{}", self.base_url, stored_name)
    }

    async fn write_new(&self, path: &Path, data: &[u8]) -> Result<bool, StorageError> {
        let mut file = match OpenOptions::new().write(true).create_new(true).open(path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        if let Err(e) = write_all(&mut file, data).await {
            drop(file);
            let _ = tokio::fs::remove_file(path).await;
            return Err(e.into());
        }

        Ok(true)
    }
}

async fn write_all(file: &mut tokio::fs::File, data: &[u8]) -> std::io::Result<()> {
    file.write_all(data).await?;
    file.flush().await?;
    file.sync_all().await
}

#[async_trait::async_trait]
impl StorageBackend for LocalBackend {
    async fn store(&self, data: Bytes, filename: &str) -> Result<StoredObject, StorageError> {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let stored_name = unique_stored_name(filename);
            let path = self.upload_dir.join(&stored_name);

            tracing::info!("Saving file locally: {}", path.display());

            if self.write_new(&path, &data).await? {
                let url = self.get_url(&stored_name);
                tracing::info!(size = data.len(), "File saved locally, accessible at: {}", url);
                return Ok(StoredObject {
                    key: stored_name,
                    url,
                    kind: StorageKind::Local,
                });
            }

            tracing::warn!("Stored name collision for {}, drawing a new one", stored_name);
        }

        Err(StorageError::Io(std::io::Error::new(
            ErrorKind::AlreadyExists,
            format!("could not allocate a unique name for '{}'", filename),
        )))
    }

    fn kind(&self) -> StorageKind {
        StorageKind::Local
    }

    fn is_available(&self) -> bool {
        true
    }

    fn is_remote(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_writes_unique_files() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new("http://10.0.0.5:5000/".to_string(), dir.path().to_path_buf());

        let first = backend.store(Bytes::from_static(b"first"), "doc.pdf").await.unwrap();
        let second = backend.store(Bytes::from_static(b"second"), "doc.pdf").await.unwrap();

        assert_ne!(first.key, second.key);
        assert_eq!(first.kind, StorageKind::Local);
        assert!(first.key.ends_with("_doc.pdf"));
        assert_eq!(first.url, format!("http://10.0.0.5:5000/files/{}", first.key));

        assert_eq!(tokio::fs::read(dir.path().join(&first.key)).await.unwrap(), b"first");
        assert_eq!(tokio::fs::read(dir.path().join(&second.key)).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_store_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::new(
            "http://localhost:5000".to_string(),
            dir.path().join("does-not-exist"),
        );

        let err = backend.store(Bytes::from_static(b"data"), "doc.pdf").await.unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
