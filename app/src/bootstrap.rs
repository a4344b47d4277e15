use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Install the fmt subscriber, filtered by `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}

/// Same as [`init_tracing`] but writes to stderr, keeping stdout for
/// interactive prompts.
pub fn init_tracing_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Load `.env` and the runtime configuration.
pub fn init_foundation() -> AppConfig {
    load_dotenv();
    let config = AppConfig::load();
    tracing::info!(
        port = config.server_port,
        default_months = config.default_expiration_months,
        default_size = config.default_size,
        "Settings loaded"
    );
    config
}
