use super::auth::Authenticator;
use crate::backend::StorageBackend;
use crate::{StorageError, StorageKind, StoredObject};
use bytes::Bytes;
use qrshare_config::DriveSettings;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize)]
struct CreatedFile {
    #[serde(default)]
    id: Option<String>,
}

/// Google Drive v3 storage backend
pub struct DriveBackend {
    http: reqwest::Client,
    auth: Authenticator,
    api_base_url: String,
    share_base_url: String,
}

impl DriveBackend {
    pub fn new(settings: &DriveSettings) -> Result<Self, StorageError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            auth: Authenticator::new(settings.clone(), http.clone()),
            http,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            share_base_url: settings.share_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.auth
    }

    pub fn share_url(&self, file_id: &str) -> String {
        format!("{}/file/d/{}/view?usp=sharing", self.share_base_url, file_id)
    }

    async fn create_file(&self, token: &str, data: &[u8], filename: &str) -> Result<String, StorageError> {
        let mime = mime_guess::from_path(filename).first_or_octet_stream().to_string();
        let boundary = format!("qrshare-{}", uuid::Uuid::new_v4().simple());
        let metadata = serde_json::json!({ "name": filename, "mimeType": mime });

        let mut body = Vec::with_capacity(data.len() + 512);
        body.extend_from_slice(
            format!(
                "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{meta}\r\n--{b}\r\nContent-Type: {mime}\r\n\r\n",
                b = boundary,
                meta = metadata,
                mime = mime
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        let url = format!("{}/upload/drive/v3/files", self.api_base_url);
        let response = self
            .http
            .post(&url)
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .bearer_auth(token)
            .header(CONTENT_TYPE, format!("multipart/related; boundary={}", boundary))
            .body(body)
            .send()
            .await?;
        let response = ensure_success(response, "file upload").await?;

        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| StorageError::UploadFailed(format!("invalid upload response: {}", e)))?;

        created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| StorageError::UploadFailed("Failed to get file ID from Google Drive".to_string()))
    }

    /// Uploads are private by default
    async fn grant_public_read(&self, token: &str, file_id: &str) -> Result<(), StorageError> {
        let url = format!("{}/drive/v3/files/{}/permissions", self.api_base_url, file_id);
        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "type": "anyone", "role": "reader" }))
            .send()
            .await?;
        ensure_success(response, "permission grant").await?;
        Ok(())
    }
}

async fn ensure_success(response: reqwest::Response, operation: &str) -> Result<reqwest::Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(StorageError::UploadFailed(format!(
        "{} returned {}: {}",
        operation,
        status,
        body.trim()
    )))
}

#[async_trait::async_trait]
impl StorageBackend for DriveBackend {
    async fn store(&self, data: Bytes, filename: &str) -> Result<StoredObject, StorageError> {
        tracing::info!(size = data.len(), "Starting Google Drive upload for {}", filename);

        let token = self.auth.access_token().await?;

        let file_id = self.create_file(&token, &data, filename).await?;
        tracing::info!("File uploaded with ID: {}", file_id);

        self.grant_public_read(&token, &file_id).await?;

        let url = self.share_url(&file_id);
        tracing::info!("File is now shareable: {}", url);

        Ok(StoredObject {
            key: file_id,
            url,
            kind: StorageKind::GoogleDrive,
        })
    }

    fn kind(&self) -> StorageKind {
        StorageKind::GoogleDrive
    }

    fn is_available(&self) -> bool {
        self.auth.credentials_available()
    }

    fn is_remote(&self) -> bool {
        true
    }
}
