/// Default values for configuration fields
use std::path::PathBuf;

pub fn host() -> String {
    "0.0.0.0".to_string()
}

pub fn port() -> u16 {
    5000
}

pub fn base_url() -> String {
    "http://localhost:5000".to_string()
}

pub fn tcp_nodelay() -> bool {
    true
}

pub fn timeout_secs() -> u64 {
    300  // Remote uploads and the interactive consent flow run inside the request
}

pub fn max_concurrent_requests() -> usize {
    1000
}

pub fn allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

pub fn streaming_threshold_mb() -> u64 {
    100  // Files larger than 100MB will be streamed instead of loaded into memory
}

pub fn enable_compression() -> bool {
    true
}

pub fn server_settings() -> super::models::ServerSettings {
    super::models::ServerSettings {
        host: host(),
        port: port(),
        base_url: base_url(),
        debug: false,
        tcp_nodelay: tcp_nodelay(),
        timeout_secs: timeout_secs(),
        allowed_origins: allowed_origins(),
        max_concurrent_requests: max_concurrent_requests(),
        streaming_threshold_mb: streaming_threshold_mb(),
        enable_compression: enable_compression(),
    }
}

// Storage defaults
pub fn upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

pub fn static_dir() -> PathBuf {
    PathBuf::from("static")
}

pub fn allowed_extensions() -> Vec<String> {
    vec!["pdf".to_string()]
}

pub fn max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

pub fn storage_settings() -> super::models::StorageSettings {
    super::models::StorageSettings {
        upload_dir: upload_dir(),
        static_dir: static_dir(),
        allowed_extensions: allowed_extensions(),
        max_upload_bytes: max_upload_bytes(),
    }
}

// Google Drive defaults
pub fn drive_enabled() -> bool {
    true
}

pub fn scopes() -> Vec<String> {
    vec!["https://www.googleapis.com/auth/drive.file".to_string()]
}

pub fn credentials_file() -> PathBuf {
    PathBuf::from("credentials.json")
}

pub fn token_file() -> PathBuf {
    PathBuf::from("token.json")
}

pub fn service_account_file() -> PathBuf {
    PathBuf::from("service-account.json")
}

pub fn interactive_auth() -> bool {
    true
}

pub fn auth_timeout_secs() -> u64 {
    120
}

pub fn api_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

pub fn share_base_url() -> String {
    "https://drive.google.com".to_string()
}

pub fn request_timeout_secs() -> u64 {
    60
}

pub fn drive_settings() -> super::models::DriveSettings {
    super::models::DriveSettings {
        enabled: drive_enabled(),
        scopes: scopes(),
        credentials_file: credentials_file(),
        token_file: token_file(),
        service_account_file: service_account_file(),
        interactive_auth: interactive_auth(),
        auth_timeout_secs: auth_timeout_secs(),
        api_base_url: api_base_url(),
        share_base_url: share_base_url(),
        request_timeout_secs: request_timeout_secs(),
    }
}

// QR defaults
pub fn qr_version() -> i16 {
    1
}

pub fn qr_error_correction() -> super::models::ErrorCorrection {
    super::models::ErrorCorrection::L
}

pub fn qr_box_size() -> u32 {
    10
}

pub fn qr_border() -> u32 {
    4
}

pub fn qr_settings() -> super::models::QrSettings {
    super::models::QrSettings {
        version: qr_version(),
        error_correction: qr_error_correction(),
        box_size: qr_box_size(),
        border: qr_border(),
    }
}
