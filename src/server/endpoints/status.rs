use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::types::AppState;

/// GET /health
pub async fn get_health(State(s): State<Arc<AppState>>) -> Response {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "semester": s.catalog.semester(),
            "catalog_size": s.catalog.len(),
            "scheduled": s.schedule.len(),
        })),
    )
        .into_response()
}
