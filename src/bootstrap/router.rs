use qrshare_api::AppState;
use qrshare_config::Config;
use axum::{extract::DefaultBodyLimit, http::StatusCode, Router};
use std::path::Path;
use std::time::Duration;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
};

// Multipart framing on top of the document itself
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

pub fn build(config: &Config, app_state: AppState, static_dir: &Path) -> Router {
    let max_body_size = config.storage.max_upload_bytes + MULTIPART_OVERHEAD;
    let timeout = Duration::from_secs(config.server.timeout_secs);
    let max_concurrent_requests = config.server.max_concurrent_requests;

    let mut router = Router::new()
        .nest_service("/static", ServeDir::new(static_dir))
        .merge(qrshare_api::routes(app_state))
        // Enforced while the multipart body streams, so the handler reports it as JSON
        .layer(DefaultBodyLimit::max(max_body_size))
        .layer(ConcurrencyLimitLayer::new(max_concurrent_requests))
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout));

    if config.server.enable_compression {
        router = router.layer(CompressionLayer::new());
    }

    router.layer(build_cors_layer(&config.server.allowed_origins))
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
