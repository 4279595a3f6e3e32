use tracing_subscriber::EnvFilter;

/// Installs the global subscriber; `RUST_LOG` wins over the debug flag
pub fn initialize(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}
