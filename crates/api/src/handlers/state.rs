use super::models::AppState;
use super::upload::UploadService;
use axum::extract::FromRef;
use std::path::PathBuf;
use std::sync::Arc;

impl AppState {
    pub fn new(uploads: Arc<UploadService>, upload_dir: PathBuf, streaming_threshold_mb: u64) -> Self {
        Self {
            uploads,
            upload_dir: Arc::new(upload_dir),
            streaming_threshold_bytes: streaming_threshold_mb * 1024 * 1024,
        }
    }
}

impl FromRef<AppState> for Arc<UploadService> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.uploads)
    }
}
