use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "super::defaults::server_settings")]
    pub server: ServerSettings,
    #[serde(default = "super::defaults::storage_settings")]
    pub storage: StorageSettings,
    #[serde(default = "super::defaults::drive_settings")]
    pub drive: DriveSettings,
    #[serde(default = "super::defaults::qr_settings")]
    pub qr: QrSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "super::defaults::host")]
    pub host: String,
    #[serde(default = "super::defaults::port")]
    pub port: u16,
    /// Public base URL used to build links to locally stored files
    #[serde(default = "super::defaults::base_url")]
    pub base_url: String,
    #[serde(default)]
    pub debug: bool,
    #[serde(default = "super::defaults::tcp_nodelay")]
    pub tcp_nodelay: bool,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "super::defaults::allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "super::defaults::max_concurrent_requests")]
    pub max_concurrent_requests: usize,
    #[serde(default = "super::defaults::streaming_threshold_mb")]
    pub streaming_threshold_mb: u64,
    #[serde(default = "super::defaults::enable_compression")]
    pub enable_compression: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "super::defaults::upload_dir")]
    pub upload_dir: PathBuf,
    #[serde(default = "super::defaults::static_dir")]
    pub static_dir: PathBuf,
    /// Lowercase extensions without the leading dot
    #[serde(default = "super::defaults::allowed_extensions")]
    pub allowed_extensions: Vec<String>,
    #[serde(default = "super::defaults::max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DriveSettings {
    #[serde(default = "super::defaults::drive_enabled")]
    pub enabled: bool,
    #[serde(default = "super::defaults::scopes")]
    pub scopes: Vec<String>,
    /// OAuth client secrets used by the interactive flow
    #[serde(default = "super::defaults::credentials_file")]
    pub credentials_file: PathBuf,
    /// Persisted user authorization
    #[serde(default = "super::defaults::token_file")]
    pub token_file: PathBuf,
    #[serde(default = "super::defaults::service_account_file")]
    pub service_account_file: PathBuf,
    #[serde(default = "super::defaults::interactive_auth")]
    pub interactive_auth: bool,
    #[serde(default = "super::defaults::auth_timeout_secs")]
    pub auth_timeout_secs: u64,
    #[serde(default = "super::defaults::api_base_url")]
    pub api_base_url: String,
    #[serde(default = "super::defaults::share_base_url")]
    pub share_base_url: String,
    #[serde(default = "super::defaults::request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct QrSettings {
    #[serde(default = "super::defaults::qr_version")]
    pub version: i16,
    #[serde(default = "super::defaults::qr_error_correction")]
    pub error_correction: ErrorCorrection,
    /// Pixels per module
    #[serde(default = "super::defaults::qr_box_size")]
    pub box_size: u32,
    /// Quiet zone width in modules
    #[serde(default = "super::defaults::qr_border")]
    pub border: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum ErrorCorrection {
    L,
    M,
    Q,
    H,
}

impl FromStr for ErrorCorrection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(Self::L),
            "m" | "medium" => Ok(Self::M),
            "q" | "quartile" => Ok(Self::Q),
            "h" | "high" => Ok(Self::H),
            _ => Err(()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: super::defaults::server_settings(),
            storage: super::defaults::storage_settings(),
            drive: super::defaults::drive_settings(),
            qr: super::defaults::qr_settings(),
        }
    }
}

impl Default for QrSettings {
    fn default() -> Self {
        super::defaults::qr_settings()
    }
}
