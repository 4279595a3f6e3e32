mod bootstrap;

use qrshare_api::{AppState, UploadPolicy, UploadService};
use qrshare_config::Config;
use qrshare_encoder::LinkEncoder;
use qrshare_events::{AppEvent, EventBus};
use qrshare_storage::{LocalBackend, StorageBackend, UnavailableBackend};
#[cfg(feature = "drive")]
use qrshare_storage::DriveBackend;
use crate::bootstrap::{config, logging, router, server};
use anyhow::Result;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let events = EventBus::new();
    events.emit(AppEvent::Starting);

    let config_path = std::env::var("QRSHARE_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let config = config::load(&config_path, &events).await?;

    logging::initialize(config.server.debug);

    let folders = server::initialize_folders(&config, &events).await?;

    let remote = initialize_remote(&config, &events);
    let local: Arc<dyn StorageBackend> = Arc::new(LocalBackend::new(
        config.server.base_url.clone(),
        folders.upload_dir.clone(),
    ));

    let uploads = UploadService::new(
        remote,
        local,
        LinkEncoder::new(config.qr),
        UploadPolicy::from(&config.storage),
    );

    let app_state = AppState::new(
        Arc::new(uploads),
        folders.upload_dir.clone(),
        config.server.streaming_threshold_mb,
    );
    let app = router::build(&config, app_state, &folders.static_dir);

    let addr = config.bind_addr();
    let listener = bind_server(&addr).await?;

    events.emit(AppEvent::Ready {
        addr: addr.clone(),
        base_url: config.server.base_url.clone(),
    });

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received, initiating graceful shutdown...");
    };

    axum::serve(listener, app.into_make_service())
        .tcp_nodelay(config.server.tcp_nodelay)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    events.emit(AppEvent::Shutdown);
    Ok(())
}

#[cfg(feature = "drive")]
fn initialize_remote(config: &Config, events: &Arc<EventBus>) -> Arc<dyn StorageBackend> {
    if !config.drive.enabled {
        events.emit(AppEvent::RemoteStorageDisabled {
            reason: "disabled in configuration".to_string(),
        });
        return Arc::new(UnavailableBackend::new("Google Drive disabled in configuration"));
    }

    match DriveBackend::new(&config.drive) {
        Ok(backend) => {
            let auth = backend.authenticator();
            if auth.credentials_available() {
                events.emit(AppEvent::RemoteStorageEnabled {
                    service_account: auth.uses_service_account(),
                });
            } else {
                // Credential files are looked up again on every upload
                events.emit(AppEvent::RemoteStorageDisabled {
                    reason: "no credentials found".to_string(),
                });
            }
            Arc::new(backend)
        }
        Err(e) => {
            events.emit(AppEvent::Error {
                context: "Google Drive client".to_string(),
                error: e.to_string(),
            });
            events.emit(AppEvent::RemoteStorageDisabled { reason: e.to_string() });
            Arc::new(UnavailableBackend::new(e.to_string()))
        }
    }
}

#[cfg(not(feature = "drive"))]
fn initialize_remote(_config: &Config, events: &Arc<EventBus>) -> Arc<dyn StorageBackend> {
    let reason = "built without the drive feature";
    events.emit(AppEvent::RemoteStorageDisabled {
        reason: reason.to_string(),
    });
    Arc::new(UnavailableBackend::new(reason))
}

async fn bind_server(addr: &str) -> Result<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            let port = addr.rsplit(':').next().unwrap_or("unknown");
            tracing::error!("Port {} is already in use", port);
            tracing::error!("Stop the other application or set PORT to a free port");
            #[cfg(target_os = "windows")]
            tracing::error!("Find the process with: netstat -ano | findstr :{}", port);
            #[cfg(not(target_os = "windows"))]
            tracing::error!("Find the process with: lsof -i :{}", port);
        } else {
            tracing::error!("Failed to bind server on {}: {}", addr, e);
        }
        anyhow::anyhow!("Failed to bind server: {}", e)
    })
}
