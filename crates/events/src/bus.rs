use super::models::{AppEvent, EventBus};
use std::sync::Arc;
use colored::Colorize;

impl EventBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }

    pub fn emit(&self, event: AppEvent) {
        match event {
            // Application lifecycle
            AppEvent::Starting => {
                println!("\n{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
                println!("  {}", "QRShare - Document Link Server".white().bold());
                println!("  {} {}", "Version".dimmed(), env!("CARGO_PKG_VERSION").cyan());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".bright_black());
            }
            AppEvent::Ready { addr, base_url } => {
                println!("{}", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
                println!("  {} {}", "Server".white(), addr.cyan());
                println!("  {} {}", "URL   ".white(), base_url.blue());
                println!("  {} {}/upload", "Upload".white(), base_url.blue());
                println!("{}\n", "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━".green());
            }
            AppEvent::Shutdown => {
                println!("\n{}", "Server shutting down".red());
            }

            // Configuration
            AppEvent::ConfigLoading { path } => {
                println!("  {} {}", "Loading config".dimmed(), path.cyan());
            }
            AppEvent::ConfigLoaded { upload_dir, max_upload_bytes } => {
                println!(
                    "  {} Uploads in {} (max {} bytes)",
                    "✓".green(),
                    upload_dir.cyan(),
                    max_upload_bytes.to_string().cyan()
                );
            }

            // Directories
            AppEvent::DirectoryCreated { path } => {
                tracing::debug!("Created directory {}", path);
            }
            AppEvent::DirectoriesReady => {
                // Silent
            }

            // Remote storage
            AppEvent::RemoteStorageEnabled { service_account } => {
                let method = if service_account { "service account" } else { "user authorization" };
                println!("  {} Google Drive ({})", "✓".green(), method.dimmed());
            }
            AppEvent::RemoteStorageDisabled { reason } => {
                println!("  {} Google Drive unavailable: {}", "⚠".yellow(), reason.dimmed());
                println!("  {} Uploads will be stored locally", "→".dimmed());
            }

            // Errors
            AppEvent::Error { context, error } => {
                tracing::error!("{}: {}", context, error);
            }
        }
    }
}
