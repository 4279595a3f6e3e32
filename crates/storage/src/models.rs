use serde::{Deserialize, Serialize};

/// Wire tag reported to clients as `storage_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    GoogleDrive,
    Local,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::GoogleDrive => "google_drive",
            StorageKind::Local => "local",
        }
    }
}

/// A successfully persisted upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Provider file id, or the generated local file name
    pub key: String,
    pub url: String,
    pub kind: StorageKind,
}
