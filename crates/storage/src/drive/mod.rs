//! Google Drive storage backend.
//!
//! Authentication prefers a service account key, then a persisted user
//! token (refreshed when expired), then the interactive consent flow using
//! OAuth client secrets.

mod auth;
mod backend;
mod credentials;
mod flow;
mod token;

pub use auth::Authenticator;
pub use backend::DriveBackend;
