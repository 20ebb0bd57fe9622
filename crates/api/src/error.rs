//! API error types with HTTP response mapping.
//!
//! Every error renders as `{"detail": <message>}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use connectivity::ProbeFailure;

/// Detail returned when a connectivity check fails in an unexpected way.
pub const CONNECTIVITY_INTERNAL_ERROR: &str =
    "Internal server error while verifying database connectivity";

/// Detail returned for panics caught outside any handler-specific path.
pub const GENERIC_INTERNAL_ERROR: &str = "Internal server error";

/// API-level error type that maps to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No route matches the request path.
    #[error("{0}")]
    NotFound(String),
    /// The route exists but not for this method.
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    /// A backing service cannot serve the request right now.
    #[error("{0}")]
    ServiceUnavailable(String),
    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %detail, "API exception");
        } else {
            tracing::warn!(status = status.as_u16(), %detail, "API exception");
        }

        detail_response(status, &detail)
    }
}

/// Known categories surface as 503 with their fixed message; anything
/// unclassified becomes a generic 500 so driver text never reaches the client.
impl From<ProbeFailure> for ApiError {
    fn from(failure: ProbeFailure) -> Self {
        match failure {
            ProbeFailure::ServiceUnavailable(_) | ProbeFailure::SessionExpired(_) => {
                ApiError::ServiceUnavailable(failure.message())
            }
            ProbeFailure::Unclassified(_) => {
                ApiError::Internal(CONNECTIVITY_INTERNAL_ERROR.to_string())
            }
        }
    }
}

pub(crate) fn detail_response(status: StatusCode, detail: &str) -> Response {
    let body = serde_json::json!({ "detail": detail });
    (status, axum::Json(body)).into_response()
}
