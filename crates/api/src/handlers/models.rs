use super::upload::UploadService;
use std::path::PathBuf;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(super) uploads: Arc<UploadService>,
    pub(super) upload_dir: Arc<PathBuf>,
    pub(super) streaming_threshold_bytes: u64,
}
