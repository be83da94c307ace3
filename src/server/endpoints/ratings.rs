use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

use crate::listing::SortDirection;
use crate::ratings::{filter_ratings_by_class, sort_ratings, RatingSortKey};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

#[derive(Debug, Deserialize)]
pub struct ProfessorSearchQuery {
    pub q: Option<String>,
}

/// GET /ratings/professors
/// Searches professors at the configured school. An empty query returns a
/// random sample; an empty result set is an explicit empty state, not an
/// error.
pub async fn get_professors(
    Query(params): Query<ProfessorSearchQuery>,
    State(s): State<Arc<AppState>>,
) -> Response {
    let query = params.q.as_deref().unwrap_or("");
    info!("GET /ratings/professors q='{}'", query);

    match s.ratings.search_professors(query).await {
        Ok(professors) => (
            StatusCode::OK,
            Json(json!({
                "count": professors.len(),
                "professors": professors,
            })),
        )
            .into_response(),
        Err(e) => {
            warn!("Professor search failed: {}", e);
            ApiErrorType::from(&e).into_response()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfessorDetailQuery {
    /// Class filter; absent or "All Classes" keeps every rating
    pub class: Option<String>,
    pub sort_by: Option<RatingSortKey>,
    pub order: Option<SortDirection>,
}

/// GET /ratings/professors/:id
/// Returns a professor's profile and individual ratings, filtered by class
/// and sorted.
pub async fn get_professor(
    Path(id): Path<String>,
    Query(params): Query<ProfessorDetailQuery>,
    State(s): State<Arc<AppState>>,
) -> Response {
    info!("GET /ratings/professors/{}", id);

    let details = match s.ratings.professor_details(&id).await {
        Ok(details) => details,
        Err(e) => {
            warn!("Professor details failed: {}", e);
            return ApiErrorType::from(&e).into_response();
        }
    };

    let class = params
        .class
        .as_deref()
        .filter(|c| !c.is_empty() && *c != "All Classes");
    let mut ratings = filter_ratings_by_class(&details.ratings, class);
    sort_ratings(
        &mut ratings,
        params.sort_by.unwrap_or_default(),
        params.order.unwrap_or(SortDirection::Desc),
    );

    (
        StatusCode::OK,
        Json(json!({
            "professor": details.professor,
            "classes": details.unique_classes(),
            "count": ratings.len(),
            "ratings": ratings,
        })),
    )
        .into_response()
}

/// GET /ratings/cache_stats
pub async fn get_cache_stats(State(s): State<Arc<AppState>>) -> Response {
    let (searches, details) = s.ratings.cache_state().stats();
    (
        StatusCode::OK,
        Json(json!({ "searches": searches, "details": details })),
    )
        .into_response()
}

/// POST /ratings/invalidate_cache
pub async fn invalidate_cache(State(s): State<Arc<AppState>>) -> Response {
    s.ratings.cache_state().invalidate_all();
    info!("Ratings caches invalidated");
    (StatusCode::OK, Json(json!({ "invalidated": true }))).into_response()
}
