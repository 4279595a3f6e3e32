use crate::backend::StorageBackend;
use crate::{StorageError, StorageKind, StoredObject};
use bytes::Bytes;

/// Remote slot used when Google Drive support is disabled or not compiled in.
/// Every call fails fast so the caller falls back to local storage.
pub struct UnavailableBackend {
    reason: String,
}

impl UnavailableBackend {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[async_trait::async_trait]
impl StorageBackend for UnavailableBackend {
    async fn store(&self, _data: Bytes, _filename: &str) -> Result<StoredObject, StorageError> {
        Err(StorageError::CredentialsUnavailable(self.reason.clone()))
    }

    fn kind(&self) -> StorageKind {
        StorageKind::GoogleDrive
    }

    fn is_available(&self) -> bool {
        false
    }

    fn is_remote(&self) -> bool {
        true
    }
}
