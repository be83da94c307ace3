use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::layout::{layout_meetings, GridConfig, GRID_HOUR_COUNT, GRID_START_HOUR};
use crate::types::AppState;

/// Default day-column width when the client does not send its own.
const DEFAULT_COLUMN_WIDTH: f64 = 100.0;

#[derive(Debug, Deserialize)]
pub struct LayoutQuery {
    /// "full" (Sun..Sat, 70px rows) or "preview" (Mon..Sun, 40px rows)
    pub view: Option<String>,
    /// Day-column width in pixels, from the client's measured layout
    pub column_width: Option<f64>,
}

/// GET /schedule/layout
/// Returns one positioned block per (scheduled course, meeting, weekday),
/// ready to render on the hour grid. Meetings with TBA or unparseable
/// times simply produce no blocks.
pub async fn get_schedule_layout(
    Query(params): Query<LayoutQuery>,
    State(s): State<Arc<AppState>>,
) -> Response {
    let view = params.view.as_deref().unwrap_or("full");
    let column_width = params.column_width.unwrap_or(DEFAULT_COLUMN_WIDTH);

    let grid = match view {
        "preview" => GridConfig::preview(column_width),
        _ => GridConfig::full_week(column_width),
    };

    let mut blocks = Vec::new();
    for entry in s.schedule.list() {
        let meetings = entry.course.meetings();
        for placed in layout_meetings(&meetings, &grid) {
            blocks.push(json!({
                "crn": entry.course.crn,
                "code": entry.course.full_code(),
                "title": entry.course.title,
                "color": entry.color,
                "day": placed.day.label(),
                "start": placed.span.start,
                "end": placed.span.end,
                "geometry": placed.geometry,
            }));
        }
    }

    info!(
        "GET /schedule/layout view={} -> {} blocks for {} courses",
        view,
        blocks.len(),
        s.schedule.len()
    );

    (
        StatusCode::OK,
        Json(json!({
            "view": view,
            "grid_start_hour": GRID_START_HOUR,
            "grid_hour_count": GRID_HOUR_COUNT,
            "row_height": grid.row_height,
            "day_order": grid.day_order.iter().map(|d| d.label()).collect::<Vec<_>>(),
            "blocks": blocks,
        })),
    )
        .into_response()
}
