/// Shared response types for the API server
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::ratings::RatingsError;

/// A structured API error: status code, short message, optional detail.
pub struct ApiErrorType {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl From<(StatusCode, &str, Option<String>)> for ApiErrorType {
    fn from((status, message, detail): (StatusCode, &str, Option<String>)) -> Self {
        Self {
            status,
            message: message.to_string(),
            detail,
        }
    }
}

impl From<(StatusCode, &str)> for ApiErrorType {
    fn from((status, message): (StatusCode, &str)) -> Self {
        Self {
            status,
            message: message.to_string(),
            detail: None,
        }
    }
}

impl From<&RatingsError> for ApiErrorType {
    fn from(err: &RatingsError) -> Self {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else if matches!(err, RatingsError::CircuitBreakerOpen) {
            StatusCode::SERVICE_UNAVAILABLE
        } else {
            StatusCode::BAD_GATEWAY
        };

        Self {
            status,
            message: "Ratings lookup failed".to_string(),
            detail: Some(err.to_string()),
        }
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.message,
            "detail": self.detail,
        });
        (self.status, Json(body)).into_response()
    }
}
