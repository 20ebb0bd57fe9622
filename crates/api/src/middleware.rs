//! Request logging and panic recovery.

use std::any::Any;
use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{GENERIC_INTERNAL_ERROR, detail_response};

/// Logs method and URI on ingress and the status code on egress.
///
/// Each request gets a UUID v4 `request_id` on its span so the two lines,
/// and everything logged in between, can be correlated.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        tracing::info!(uri = %request.uri(), "incoming request");
        let start = Instant::now();

        let response = next.run(request).await;

        tracing::info!(
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "response status"
        );
        response
    }
    .instrument(span)
    .await
}

/// Turns a panic escaping a handler into a 500 `{"detail"}` response.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let reason = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(%reason, "unexpected error");

    detail_response(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_INTERNAL_ERROR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_panic_payload_becomes_generic_detail() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["detail"], "Internal server error");
    }
}
