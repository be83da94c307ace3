use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::listing::{
    filter_courses, paginate, sort_courses, CourseSortKey, SortDirection, SubjectFilter, PAGE_SIZE,
};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

#[derive(Debug, Deserialize)]
pub struct CourseListQuery {
    /// Free-text search over title, instructor, subject+number, CRN
    pub q: Option<String>,
    /// Exact subject filter; "All" or absent disables it
    pub subject: Option<String>,
    pub sort_by: Option<CourseSortKey>,
    pub order: Option<SortDirection>,
    /// Visible-count cursor; the client grows this by the page size
    pub count: Option<usize>,
}

/// GET /courses
/// Returns a filtered, sorted, paginated view of the catalog.
pub async fn get_courses(
    Query(params): Query<CourseListQuery>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!(
        "GET /courses q={:?} subject={:?}",
        params.q, params.subject
    );

    let query = params.q.as_deref().unwrap_or("");
    let subject = SubjectFilter::from_param(params.subject.as_deref());

    let mut hits = filter_courses(s.catalog.all(), query, &subject);
    sort_courses(
        &mut hits,
        params.sort_by.unwrap_or_default(),
        params.order.unwrap_or_default(),
    );

    let visible = params.count.unwrap_or(PAGE_SIZE);
    let page = paginate(&hits, visible);

    (
        StatusCode::OK,
        Json(json!({
            "semester": s.catalog.semester(),
            "total": hits.len(),
            "count": page.items.len(),
            "more": page.more,
            "courses": page.items,
        })),
    )
        .into_response()
}

/// GET /courses/:crn
pub async fn get_course(
    Path(crn): Path<String>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /courses/{}", crn);

    match s.catalog.get(&crn) {
        Some(course) => (StatusCode::OK, Json(course)).into_response(),
        None => ApiErrorType::from((StatusCode::NOT_FOUND, "Unknown CRN")).into_response(),
    }
}

/// GET /subjects
/// Distinct subject codes for the category filter dropdown.
pub async fn get_subjects(State(s): State<Arc<AppState>>) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "subjects": s.catalog.subjects() })),
    )
        .into_response()
}
