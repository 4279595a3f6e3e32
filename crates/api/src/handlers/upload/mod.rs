mod handler;
mod service;
mod validator;

pub use handler::{upload_file, FILE_FIELD};
pub use service::{UploadService, LOCAL_STORAGE_WARNING};
pub use validator::UploadPolicy;
