use qrshare_config::Config;
use qrshare_events::{AppEvent, EventBus};
use qrshare_filesystem::FileSystem;
use anyhow::Result;
use std::sync::Arc;

pub async fn load(config_path: &str, events: &Arc<EventBus>) -> Result<Config> {
    let abs_config_path = FileSystem::get_absolute_path_string(config_path)?;

    events.emit(AppEvent::ConfigLoading {
        path: abs_config_path,
    });

    let config = Config::load(config_path).await?;

    events.emit(AppEvent::ConfigLoaded {
        upload_dir: config.storage.upload_dir.display().to_string(),
        max_upload_bytes: config.storage.max_upload_bytes,
    });

    Ok(config)
}
