//! Local server binary: serves the QR generator page and its API.

use qr_expiry_lib::app::SharedState;
use qr_expiry_lib::{bootstrap, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    bootstrap::init_tracing();
    tracing::info!("Starting QR generator");

    let config = qr_expiry_lib::init_foundation();
    let state = SharedState::new(config);

    let port = state.server_port();
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
        }
        tracing::info!("Shutting down...");
    };

    tracing::info!(port, "Open the page in a browser. Press Ctrl+C to stop.");
    server::start_server(state, shutdown).await
}
