use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{courses, layout, ratings, schedule, status};
use crate::types::AppState;

mod endpoints;
pub mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Catalog browsing
    let catalog_router = Router::new()
        .route("/courses", get(courses::get_courses))
        .route("/courses/:crn", get(courses::get_course))
        .route("/subjects", get(courses::get_subjects));

    // The user's weekly schedule and its grid layout
    let schedule_router = Router::new()
        .route("/schedule", get(schedule::get_schedule))
        .route("/schedule/layout", get(layout::get_schedule_layout))
        .route(
            "/schedule/:crn",
            post(schedule::post_add_course).delete(schedule::delete_course),
        );

    // Third-party professor ratings
    let ratings_router = Router::new()
        .route("/ratings/professors", get(ratings::get_professors))
        .route("/ratings/professors/:id", get(ratings::get_professor))
        .route("/ratings/cache_stats", get(ratings::get_cache_stats))
        .route("/ratings/invalidate_cache", post(ratings::invalidate_cache));

    Router::new()
        .route("/health", get(status::get_health))
        .merge(catalog_router)
        .merge(schedule_router)
        .merge(ratings_router)
        .with_state(app_state)
}
