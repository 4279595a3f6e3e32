use super::errors::ConfigError;
use super::models::{Config, ErrorCorrection};
use std::path::PathBuf;
use std::str::FromStr;

impl Config {
    /// Overlays values from environment-style variables.
    ///
    /// `lookup` resolves a variable name to its value, which keeps this
    /// independent of the process environment.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // Server
        if let Some(v) = var("HOST") {
            self.server.host = v;
        }
        if let Some(v) = var("PORT") {
            self.server.port = parse("PORT", &v)?;
        }
        if let Some(v) = var("BASE_URL") {
            self.server.base_url = v.trim_end_matches('/').to_string();
        }
        if let Some(v) = var("DEBUG") {
            self.server.debug = parse_bool("DEBUG", &v)?;
        }

        // Storage
        if let Some(v) = var("UPLOAD_FOLDER") {
            self.storage.upload_dir = PathBuf::from(v);
        }
        if let Some(v) = var("STATIC_FOLDER") {
            self.storage.static_dir = PathBuf::from(v);
        }
        if let Some(v) = var("ALLOWED_EXTENSIONS") {
            self.storage.allowed_extensions = parse_extensions(&v);
        }
        if let Some(v) = var("MAX_FILE_SIZE") {
            self.storage.max_upload_bytes = parse("MAX_FILE_SIZE", &v)?;
        }

        // Google Drive
        if let Some(v) = var("DRIVE_ENABLED") {
            self.drive.enabled = parse_bool("DRIVE_ENABLED", &v)?;
        }
        if let Some(v) = var("SCOPES") {
            self.drive.scopes = split_list(&v);
        }
        if let Some(v) = var("CREDENTIALS_FILE") {
            self.drive.credentials_file = PathBuf::from(v);
        }
        if let Some(v) = var("TOKEN_FILE") {
            self.drive.token_file = PathBuf::from(v);
        }
        if let Some(v) = var("SERVICE_ACCOUNT_FILE") {
            self.drive.service_account_file = PathBuf::from(v);
        }
        if let Some(v) = var("DRIVE_INTERACTIVE_AUTH") {
            self.drive.interactive_auth = parse_bool("DRIVE_INTERACTIVE_AUTH", &v)?;
        }

        // QR
        if let Some(v) = var("QR_VERSION") {
            self.qr.version = parse("QR_VERSION", &v)?;
        }
        if let Some(v) = var("QR_ERROR_CORRECTION") {
            self.qr.error_correction = ErrorCorrection::from_str(&v)
                .map_err(|_| invalid("QR_ERROR_CORRECTION", &v))?;
        }
        if let Some(v) = var("QR_BOX_SIZE") {
            self.qr.box_size = parse("QR_BOX_SIZE", &v)?;
        }
        if let Some(v) = var("QR_BORDER") {
            self.qr.border = parse("QR_BORDER", &v)?;
        }

        Ok(())
    }
}

fn parse<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| invalid(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_extensions(value: &str) -> Vec<String> {
    split_list(value)
        .into_iter()
        .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .collect()
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn apply(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = Config::default();
        config.apply_env_with(|key| vars.get(key).cloned())?;
        Ok(config)
    }

    #[test]
    fn test_env_overrides() {
        let config = apply(&[
            ("PORT", "8000"),
            ("BASE_URL", "http://192.168.1.20:8000/"),
            ("DEBUG", "yes"),
            ("ALLOWED_EXTENSIONS", "PDF, .docx,,png"),
            ("MAX_FILE_SIZE", "2048"),
            ("QR_ERROR_CORRECTION", "high"),
            ("QR_BORDER", "2"),
            ("SCOPES", "a,b"),
        ])
        .unwrap();

        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.base_url, "http://192.168.1.20:8000");
        assert!(config.server.debug);
        assert_eq!(config.storage.allowed_extensions, vec!["pdf", "docx", "png"]);
        assert_eq!(config.storage.max_upload_bytes, 2048);
        assert_eq!(config.qr.error_correction, ErrorCorrection::H);
        assert_eq!(config.qr.border, 2);
        assert_eq!(config.drive.scopes, vec!["a", "b"]);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = apply(&[("PORT", "  "), ("UPLOAD_FOLDER", "")]).unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.upload_dir, PathBuf::from("uploads"));
    }

    #[test]
    fn test_unparsable_value_is_an_error() {
        let err = apply(&[("MAX_FILE_SIZE", "ten megabytes")]).unwrap_err();
        match err {
            ConfigError::InvalidValue { key, value } => {
                assert_eq!(key, "MAX_FILE_SIZE");
                assert_eq!(value, "ten megabytes");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(apply(&[("DEBUG", "maybe")]).is_err());
        assert!(apply(&[("QR_ERROR_CORRECTION", "x")]).is_err());
    }
}
