mod backend;
mod local;
mod models;
mod unavailable;
mod errors;

#[cfg(feature = "drive")]
mod drive;

pub use backend::StorageBackend;
pub use local::LocalBackend;
pub use models::{StorageKind, StoredObject};
pub use unavailable::UnavailableBackend;
pub use errors::*;

#[cfg(feature = "drive")]
pub use drive::{Authenticator, DriveBackend};
