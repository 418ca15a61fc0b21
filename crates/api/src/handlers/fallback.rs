//! Envelope responses for requests no entity handler accepts.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::response::ApiResponse;

/// Fallback for paths that match no route.
pub async fn not_found() -> ApiResponse<()> {
    ApiResponse::error(StatusCode::NOT_FOUND, "route not found")
}

/// Fallback for a known path called with an unsupported method.
pub async fn method_not_allowed() -> ApiResponse<()> {
    ApiResponse::error(StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

/// Replace the empty `408` produced by the timeout layer with an envelope.
pub async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }

    tracing::warn!("Request timed out");
    ApiResponse::error(StatusCode::REQUEST_TIMEOUT, "request timed out").into_response()
}
