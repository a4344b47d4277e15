pub mod api;
pub mod assets;
pub mod router;

use anyhow::Result;

use crate::app::SharedState;

/// Start the axum HTTP server and run until `shutdown` resolves.
pub async fn start_server(
    state: SharedState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = state.config().socket_addr();
    let app = router::create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("QR generator listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
