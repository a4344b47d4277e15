//! Live feedback while the user edits the form.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::app::SharedState;

#[derive(Debug, Deserialize)]
pub struct FieldEdit {
    #[serde(default)]
    pub raw: String,
}

#[derive(Debug, Deserialize)]
pub struct Toggle {
    pub checked: bool,
}

/// POST /api/form/url
pub async fn url_edited(
    State(state): State<SharedState>,
    Json(edit): Json<FieldEdit>,
) -> Json<Value> {
    let field = state.controller().await.on_url_edited(&edit.raw);
    Json(json!({ "field": field, "invalid": field.is_invalid() }))
}

/// POST /api/form/expiration
pub async fn expiration_edited(
    State(state): State<SharedState>,
    Json(edit): Json<FieldEdit>,
) -> Json<Value> {
    let help = state.controller().await.on_expiration_edited(&edit.raw);
    Json(json!({ "help": help }))
}

/// POST /api/form/size
pub async fn size_edited(
    State(state): State<SharedState>,
    Json(edit): Json<FieldEdit>,
) -> Json<Value> {
    let help = state.controller().await.on_size_edited(&edit.raw);
    Json(json!({ "help": help }))
}

/// POST /api/form/metadata
pub async fn metadata_toggled(
    State(state): State<SharedState>,
    Json(toggle): Json<Toggle>,
) -> Json<Value> {
    let help = state.controller().await.on_metadata_toggled(toggle.checked);
    Json(json!({ "help": help }))
}
