use qrshare_config::Config;
use qrshare_events::{AppEvent, EventBus};
use qrshare_filesystem::FileSystem;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// Absolute directories the server reads and writes
pub struct Folders {
    pub upload_dir: PathBuf,
    pub static_dir: PathBuf,
}

pub async fn initialize_folders(config: &Config, events: &Arc<EventBus>) -> Result<Folders> {
    let upload_existed = FileSystem::get_absolute_path(&config.storage.upload_dir)?.exists();
    let static_existed = FileSystem::get_absolute_path(&config.storage.static_dir)?.exists();

    let (upload_dir, static_dir) =
        FileSystem::ensure_storage_structure(&config.storage.upload_dir, &config.storage.static_dir).await?;

    for (existed, path) in [(upload_existed, &upload_dir), (static_existed, &static_dir)] {
        if !existed {
            events.emit(AppEvent::DirectoryCreated {
                path: path.display().to_string(),
            });
        }
    }

    events.emit(AppEvent::DirectoriesReady);

    Ok(Folders {
        upload_dir,
        static_dir,
    })
}
