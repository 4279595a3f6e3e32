use crate::{StorageError, StorageKind, StoredObject};
use bytes::Bytes;

/// Storage backend trait for file storage abstraction
#[async_trait::async_trait]
pub trait StorageBackend: Send + Sync {
    /// Persist `data` under `filename`, returns the stored object and its shareable URL
    async fn store(&self, data: Bytes, filename: &str) -> Result<StoredObject, StorageError>;

    /// Which backend produced the links
    fn kind(&self) -> StorageKind;

    /// Cheap availability check, no network traffic
    fn is_available(&self) -> bool;

    /// Check if backend is local or remote
    fn is_remote(&self) -> bool;
}
