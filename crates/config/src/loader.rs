use super::errors::ConfigError;
use super::models::Config;
use std::path::Path;

/// Modules per side of the largest QR symbol (version 40)
const MAX_QR_MODULES: u64 = 177;

/// Upper bound on the rendered QR image side, in pixels
const MAX_QR_IMAGE_PX: u64 = 20_000;

impl Config {
    /// Loads configuration from an optional TOML file, then applies
    /// environment overrides and validates the result
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML file; a missing file yields the defaults
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("server.base_url must not be empty".to_string()));
        }

        if self.storage.allowed_extensions.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "storage.allowed_extensions must list at least one extension".to_string(),
            ));
        }

        if self.storage.max_upload_bytes == 0 {
            return Err(ConfigError::InvalidConfig(
                "storage.max_upload_bytes must be greater than zero".to_string(),
            ));
        }

        if !(1..=40).contains(&self.qr.version) {
            return Err(ConfigError::InvalidConfig(format!(
                "qr.version must be between 1 and 40, got {}",
                self.qr.version
            )));
        }

        if self.qr.box_size == 0 {
            return Err(ConfigError::InvalidConfig("qr.box_size must be greater than zero".to_string()));
        }

        let side = (MAX_QR_MODULES + 2 * u64::from(self.qr.border)) * u64::from(self.qr.box_size);
        if side > MAX_QR_IMAGE_PX {
            return Err(ConfigError::InvalidConfig(format!(
                "qr.box_size {} with qr.border {} renders up to {}px images (limit {}px)",
                self.qr.box_size, self.qr.border, side, MAX_QR_IMAGE_PX
            )));
        }

        Ok(())
    }

    /// `host:port` bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
