mod models;
mod state;
mod fallback;
pub mod files;
pub mod upload;

pub use models::AppState;
pub use fallback::not_found;
pub use files::serve_file;
pub use upload::{upload_file, UploadPolicy, UploadService};
