use crate::errors::ApiError;
use qrshare_config::StorageSettings;
use qrshare_utils::{file_extension, sanitize_or_default};

/// Limits applied to every upload before anything is stored
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    /// Lowercase, without the leading dot
    pub allowed_extensions: Vec<String>,
    pub max_upload_bytes: usize,
}

impl From<&StorageSettings> for UploadPolicy {
    fn from(settings: &StorageSettings) -> Self {
        Self {
            allowed_extensions: settings.allowed_extensions.clone(),
            max_upload_bytes: settings.max_upload_bytes,
        }
    }
}

impl UploadPolicy {
    /// Validates an upload, returning the sanitized filename to store it under
    pub fn validate(&self, raw_filename: &str, size: usize) -> Result<String, ApiError> {
        if raw_filename.is_empty() {
            tracing::warn!("Upload rejected: no file selected");
            return Err(ApiError::InvalidRequest("No file selected".to_string()));
        }

        let filename = sanitize_or_default(raw_filename);

        let allowed = file_extension(&filename)
            .map(|ext| self.is_allowed(&ext))
            .unwrap_or(false);
        if !allowed {
            tracing::warn!(filename = %filename, "Upload rejected: extension not allowed");
            return Err(ApiError::InvalidRequest(format!(
                "File type not allowed: {} (allowed: {})",
                filename,
                self.allowed_extensions.join(", ")
            )));
        }

        if size == 0 {
            tracing::warn!(filename = %filename, "Upload rejected: empty file received");
            return Err(ApiError::InvalidRequest("Empty file received".to_string()));
        }

        if size > self.max_upload_bytes {
            tracing::warn!(
                filename = %filename,
                size,
                max = self.max_upload_bytes,
                "Upload rejected: file too large"
            );
            return Err(ApiError::PayloadTooLarge { max: self.max_upload_bytes });
        }

        Ok(filename)
    }

    fn is_allowed(&self, extension: &str) -> bool {
        self.allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(extension))
    }
}
