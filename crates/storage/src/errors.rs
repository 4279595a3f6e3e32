use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Remote storage credentials unavailable: {0}")]
    CredentialsUnavailable(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

#[cfg(feature = "drive")]
impl From<reqwest::Error> for StorageError {
    fn from(err: reqwest::Error) -> Self {
        StorageError::Http(err.to_string())
    }
}
