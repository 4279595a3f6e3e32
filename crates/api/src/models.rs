use qrshare_storage::StorageKind;
use serde::{Deserialize, Serialize};

/// Body of a successful `POST /upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Shareable link, remote or local
    pub drive_link: String,
    /// Base64 PNG of the QR code for `drive_link`
    pub qr_image: String,
    pub filename: String,
    pub storage_type: StorageKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
