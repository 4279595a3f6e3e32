use super::models::FileSystem;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

impl FileSystem {
    /// Creates the upload and static directories, returning their absolute paths
    pub async fn ensure_storage_structure(
        upload_dir: &Path,
        static_dir: &Path,
    ) -> Result<(PathBuf, PathBuf)> {
        let upload_abs = Self::get_absolute_path(upload_dir)?;
        let static_abs = Self::get_absolute_path(static_dir)?;

        Self::create_directory(&upload_abs, "Upload directory").await?;
        Self::create_directory(&static_abs, "Static directory").await?;

        Ok((upload_abs, static_abs))
    }

    /// Returns true when the directory had to be created
    pub async fn create_directory(path: &Path, description: &str) -> Result<bool> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
            tracing::debug!("    Created: {} ({})", path.display(), description);
            Ok(true)
        } else {
            tracing::debug!("    Exists:  {} ({})", path.display(), description);
            Ok(false)
        }
    }

    pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(abs_path)
    }

    pub fn get_absolute_path_string(path: &str) -> Result<String> {
        let path_buf = PathBuf::from(path);
        let abs = Self::get_absolute_path(&path_buf)?;
        Ok(abs.to_string_lossy().to_string())
    }
}
