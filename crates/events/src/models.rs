use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { addr: String, base_url: String },
    Shutdown,

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { upload_dir: String, max_upload_bytes: usize },

    // Directories
    DirectoryCreated { path: String },
    DirectoriesReady,

    // Remote storage
    RemoteStorageEnabled { service_account: bool },
    RemoteStorageDisabled { reason: String },

    // Errors
    Error { context: String, error: String },
}

/// Prints lifecycle events to the console
pub struct EventBus;
