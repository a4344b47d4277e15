//! QR submission, download and reset.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use chrono::Local;
use qr_form::payload::iso_timestamp;
use qr_form::{FormInput, SubmitError};
use serde_json::{Value, json};

use super::{ApiError, err_json};
use crate::app::{Controller, SharedState};

type ApiResult = Result<Json<Value>, ApiError>;

/// GET /api/qr
pub async fn get_view(State(state): State<SharedState>) -> Json<Value> {
    let ctl = state.controller().await;
    Json(view_json(&ctl))
}

/// POST /api/qr
///
/// The controller lock is released while the image renders; a submission
/// that was overtaken by a newer one (or a reset) answers 409.
pub async fn submit(State(state): State<SharedState>, Json(form): Json<FormInput>) -> ApiResult {
    let (pending, renderer) = {
        let mut ctl = state.controller().await;
        let pending = ctl.begin_submit(&form, Local::now()).map_err(submit_error)?;
        (pending, ctl.renderer())
    };

    let result = pending.render(renderer.as_ref()).await;

    let mut ctl = state.controller().await;
    ctl.complete_submit(pending, result).map_err(submit_error)?;
    Ok(Json(view_json(&ctl)))
}

/// GET /api/qr/download
pub async fn download(State(state): State<SharedState>) -> Result<Response, ApiError> {
    let download = state.controller().await.on_download().ok_or_else(|| {
        err_json(
            StatusCode::NOT_FOUND,
            "no_image",
            "Todavía no se ha generado ningún código QR",
        )
    })?;

    Response::builder()
        .header(header::CONTENT_TYPE, "image/png")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download.filename),
        )
        .body(Body::from(download.png))
        .map_err(|e| err_json(StatusCode::INTERNAL_SERVER_ERROR, "internal", &e.to_string()))
}

/// POST /api/qr/reset
pub async fn reset(State(state): State<SharedState>) -> Json<Value> {
    let mut ctl = state.controller().await;
    ctl.on_reset();
    Json(view_json(&ctl))
}

fn view_json(ctl: &Controller) -> Value {
    let view = ctl.view();
    json!({
        "view": view,
        "panels": view.panels(),
        "url_field": ctl.url_field(),
        "image": ctl.rendered_image().map(|qr| qr.to_data_uri()),
        "expires_at": ctl.expiration_date().map(|d| iso_timestamp(&d)),
    })
}

fn submit_error(e: SubmitError) -> ApiError {
    let status = match &e {
        _ if e.is_validation() => StatusCode::BAD_REQUEST,
        SubmitError::Superseded => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::BAD_REQUEST {
        tracing::debug!("QR submission rejected: {e}");
    } else {
        tracing::warn!("QR submission failed: {e}");
    }
    err_json(status, e.kind(), &e.to_string())
}
