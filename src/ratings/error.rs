//! Error types for the professor ratings subsystem.

use thiserror::Error;

/// Errors that can occur while talking to the ratings provider.
#[derive(Debug, Error, Clone)]
pub enum RatingsError {
    /// Network/HTTP request failed
    #[error("Network error: {message}")]
    Network { message: String },

    /// Provider returned a non-success status or an unusable body
    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    /// The GraphQL response carried an errors array
    #[error("GraphQL error: {message}")]
    GraphQl { message: String },

    /// Response JSON did not decode into the expected shape
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// The configured school could not be found on the provider
    #[error("School not found: {school}")]
    SchoolNotFound { school: String },

    /// No professor exists for the requested id
    #[error("Professor not found: {id}")]
    ProfessorNotFound { id: String },

    /// URL parsing/construction failed
    #[error("URL error: {message}")]
    UrlError { message: String },

    /// Circuit breaker is open due to repeated failures
    #[error("Circuit breaker open - too many recent failures")]
    CircuitBreakerOpen,
}

impl RatingsError {
    /// Returns true if this error is potentially transient and retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RatingsError::Network { .. } | RatingsError::UnexpectedResponse { .. }
        )
    }

    /// Returns true if the caller asked for something that does not exist,
    /// as opposed to the provider misbehaving.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RatingsError::SchoolNotFound { .. } | RatingsError::ProfessorNotFound { .. }
        )
    }
}

impl From<reqwest::Error> for RatingsError {
    fn from(err: reqwest::Error) -> Self {
        RatingsError::Network {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for RatingsError {
    fn from(err: url::ParseError) -> Self {
        RatingsError::UrlError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RatingsError {
    fn from(err: serde_json::Error) -> Self {
        RatingsError::Decode {
            message: err.to_string(),
        }
    }
}
