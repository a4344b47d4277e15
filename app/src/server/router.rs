use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use super::{api, assets};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        // --- Live form feedback ---
        .route("/api/form/url", post(api::form::url_edited))
        .route("/api/form/expiration", post(api::form::expiration_edited))
        .route("/api/form/size", post(api::form::size_edited))
        .route("/api/form/metadata", post(api::form::metadata_toggled))
        // --- QR ---
        .route("/api/qr", get(api::qr::get_view).post(api::qr::submit))
        .route("/api/qr/download", get(api::qr::download))
        .route("/api/qr/reset", post(api::qr::reset))
        // --- Page ---
        .route("/", get(assets::page_index))
        .fallback(assets::page_fallback)
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
