//! REST API handlers for the page.

pub mod form;
pub mod qr;

use axum::Json;
use axum::http::StatusCode;
use serde_json::{Value, json};

pub type ApiError = (StatusCode, Json<Value>);

/// Standard error response.
pub fn err_json(status: StatusCode, kind: &str, message: &str) -> ApiError {
    (
        status,
        Json(json!({ "status": "error", "kind": kind, "error": message })),
    )
}
