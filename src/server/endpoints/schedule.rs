use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::schedule::AddOutcome;
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// GET /schedule
/// Returns the user's scheduled courses, in insertion order.
pub async fn get_schedule(State(s): State<Arc<AppState>>) -> Response {
    let courses = s.schedule.list();
    (
        StatusCode::OK,
        Json(json!({
            "count": courses.len(),
            "courses": courses,
        })),
    )
        .into_response()
}

/// POST /schedule/:crn
/// Adds a catalog course to the schedule. The offering is copied by value
/// and assigned a display color.
pub async fn post_add_course(
    Path(crn): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("POST /schedule/{}", crn);

    let Some(course) = s.catalog.get(&crn) else {
        return ApiErrorType::from((StatusCode::NOT_FOUND, "Unknown CRN")).into_response();
    };

    match s.schedule.add(course.clone()) {
        AddOutcome::Added => {
            (StatusCode::CREATED, Json(json!({ "added": crn }))).into_response()
        }
        AddOutcome::AlreadyScheduled => ApiErrorType::from((
            StatusCode::CONFLICT,
            "Course already scheduled",
            Some(format!("CRN {} is already on the schedule", crn)),
        ))
        .into_response(),
    }
}

/// DELETE /schedule/:crn
pub async fn delete_course(
    Path(crn): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("DELETE /schedule/{}", crn);

    if s.schedule.remove(&crn) {
        (StatusCode::OK, Json(json!({ "removed": crn }))).into_response()
    } else {
        ApiErrorType::from((StatusCode::NOT_FOUND, "Course not scheduled")).into_response()
    }
}
