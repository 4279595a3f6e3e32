use super::validator::UploadPolicy;
use crate::errors::ApiError;
use crate::models::UploadResponse;
use bytes::Bytes;
use qrshare_encoder::LinkEncoder;
use qrshare_storage::{StorageBackend, StorageError, StoredObject};
use std::sync::Arc;

pub const LOCAL_STORAGE_WARNING: &str =
    "Uploaded to local storage. QR code may not work on other devices.";

/// Validates an upload, stores it remotely or locally, and encodes the link
pub struct UploadService {
    remote: Arc<dyn StorageBackend>,
    local: Arc<dyn StorageBackend>,
    encoder: LinkEncoder,
    policy: UploadPolicy,
}

impl UploadService {
    pub fn new(
        remote: Arc<dyn StorageBackend>,
        local: Arc<dyn StorageBackend>,
        encoder: LinkEncoder,
        policy: UploadPolicy,
    ) -> Self {
        Self {
            remote,
            local,
            encoder,
            policy,
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    pub async fn process(&self, raw_filename: &str, data: Bytes) -> Result<UploadResponse, ApiError> {
        let filename = self.policy.validate(raw_filename, data.len())?;
        let size = data.len();
        tracing::info!(size, "Processing file: {}", filename);

        let (stored, warning) = match self.remote.store(data.clone(), &filename).await {
            Ok(stored) => (stored, None),
            Err(e) => {
                log_remote_failure(&e, &filename, size);
                let stored = self.store_locally(data, &filename).await?;
                (stored, Some(LOCAL_STORAGE_WARNING.to_string()))
            }
        };

        // The stored object is kept even if encoding fails
        let qr_image = self.encoder.encode_base64(&stored.url).map_err(|e| {
            tracing::error!(
                filename = %filename,
                size,
                link = %stored.url,
                "QR generation failed: {}",
                e
            );
            ApiError::EncodingFailure(e.to_string())
        })?;

        tracing::info!(
            storage = stored.kind.as_str(),
            "Upload and QR generation completed for {}",
            filename
        );

        Ok(UploadResponse {
            success: true,
            drive_link: stored.url,
            qr_image,
            filename,
            storage_type: stored.kind,
            warning,
        })
    }

    async fn store_locally(&self, data: Bytes, filename: &str) -> Result<StoredObject, ApiError> {
        let size = data.len();
        self.local.store(data, filename).await.map_err(|e| {
            tracing::error!(filename = %filename, size, "Local storage failed: {}", e);
            ApiError::StorageFailure(e.to_string())
        })
    }
}

fn log_remote_failure(err: &StorageError, filename: &str, size: usize) {
    match err {
        StorageError::CredentialsUnavailable(reason) => {
            tracing::info!(filename = %filename, size, "Google Drive unavailable ({}), falling back to local storage", reason);
        }
        other => {
            tracing::warn!(filename = %filename, size, "Google Drive upload failed: {}", other);
            tracing::info!("Falling back to local storage...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrshare_config::QrSettings;
    use qrshare_storage::{LocalBackend, StorageKind, UnavailableBackend};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeDrive {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeDrive {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail,
            })
        }
    }

    #[async_trait::async_trait]
    impl StorageBackend for FakeDrive {
        async fn store(&self, _data: Bytes, _filename: &str) -> Result<StoredObject, StorageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StorageError::UploadFailed("quota exceeded".to_string()));
            }
            Ok(StoredObject {
                key: "abc".to_string(),
                url: "https://drive.example.test/file/d/abc/view?usp=sharing".to_string(),
                kind: StorageKind::GoogleDrive,
            })
        }

        fn kind(&self) -> StorageKind {
            StorageKind::GoogleDrive
        }

        fn is_available(&self) -> bool {
            true
        }

        fn is_remote(&self) -> bool {
            true
        }
    }

    fn service(remote: Arc<dyn StorageBackend>, local: Arc<dyn StorageBackend>) -> UploadService {
        UploadService::new(
            remote,
            local,
            LinkEncoder::new(QrSettings::default()),
            UploadPolicy {
                allowed_extensions: vec!["pdf".to_string()],
                max_upload_bytes: 1024,
            },
        )
    }

    fn local(dir: &std::path::Path) -> Arc<dyn StorageBackend> {
        Arc::new(LocalBackend::new("http://localhost:5000".to_string(), dir.to_path_buf()))
    }

    fn stored_files(dir: &std::path::Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_remote_success_skips_local() {
        let dir = tempfile::tempdir().unwrap();
        let drive = FakeDrive::new(false);
        let svc = service(drive.clone(), local(dir.path()));

        let response = svc.process("cert.pdf", Bytes::from_static(b"%PDF")).await.unwrap();

        assert!(response.success);
        assert_eq!(response.storage_type, StorageKind::GoogleDrive);
        assert_eq!(response.drive_link, "https://drive.example.test/file/d/abc/view?usp=sharing");
        assert!(response.warning.is_none());
        assert!(!response.qr_image.is_empty());
        assert_eq!(drive.calls.load(Ordering::SeqCst), 1);
        assert_eq!(stored_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(FakeDrive::new(true), local(dir.path()));

        let response = svc.process("cert.pdf", Bytes::from_static(b"%PDF")).await.unwrap();

        assert_eq!(response.storage_type, StorageKind::Local);
        assert_eq!(response.warning.as_deref(), Some(LOCAL_STORAGE_WARNING));
        assert!(response.drive_link.starts_with("http://localhost:5000/files/"));
        assert_eq!(stored_files(dir.path()), 1);
    }

    #[tokio::test]
    async fn test_same_link_yields_same_qr() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(FakeDrive::new(false), local(dir.path()));

        let a = svc.process("a.pdf", Bytes::from_static(b"one")).await.unwrap();
        let b = svc.process("b.pdf", Bytes::from_static(b"two")).await.unwrap();
        assert_eq!(a.qr_image, b.qr_image);
    }

    #[tokio::test]
    async fn test_validation_failure_makes_no_storage_attempt() {
        let dir = tempfile::tempdir().unwrap();
        let drive = FakeDrive::new(false);
        let svc = service(drive.clone(), local(dir.path()));

        assert!(svc.process("cert.pdf", Bytes::new()).await.is_err());
        assert!(svc.process("cert.docx", Bytes::from_static(b"x")).await.is_err());
        assert!(svc.process("cert.pdf", Bytes::from(vec![1u8; 2048])).await.is_err());

        assert_eq!(drive.calls.load(Ordering::SeqCst), 0);
        assert_eq!(stored_files(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_encoding_failure_keeps_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        // No QR version can hold a link this long
        let base_url = format!("http://localhost:5000/{}", "x".repeat(8000));
        let svc = service(
            Arc::new(UnavailableBackend::new("disabled")),
            Arc::new(LocalBackend::new(base_url, dir.path().to_path_buf())),
        );

        let err = svc.process("cert.pdf", Bytes::from_static(b"%PDF")).await.unwrap_err();

        assert!(matches!(err, ApiError::EncodingFailure(_)));
        assert_eq!(stored_files(dir.path()), 1);
    }

    #[tokio::test]
    async fn test_local_failure_is_storage_failure() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(
            Arc::new(UnavailableBackend::new("disabled")),
            local(&dir.path().join("missing")),
        );

        let err = svc.process("cert.pdf", Bytes::from_static(b"%PDF")).await.unwrap_err();
        assert!(matches!(err, ApiError::StorageFailure(_)));
    }
}
