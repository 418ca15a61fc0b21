//! Uniform response envelope.
//!
//! Every API response, success or failure, is a JSON object of the shape
//! `{ "success": bool, "message": string, "data": T | null }`. The message
//! is empty on success.

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Body sent when a successful payload cannot be serialized.
const ENCODE_FAILURE_BODY: &str =
    r#"{"success":false,"message":"error encoding response","data":null}"#;

/// Standard `{ success, message, data }` envelope with its HTTP status.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    #[serde(skip)]
    status: StatusCode,
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// `200 OK` carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::success(StatusCode::OK, data)
    }

    /// `201 Created` carrying `data`.
    pub fn created(data: T) -> Self {
        Self::success(StatusCode::CREATED, data)
    }

    fn success(status: StatusCode, data: T) -> Self {
        Self {
            status,
            success: true,
            message: String::new(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Failure envelope with `data: null`.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let (status, body) = match serde_json::to_vec(&self) {
            Ok(bytes) => (self.status, bytes),
            Err(err) => {
                tracing::error!(error = %err, "Failed to encode response body");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ENCODE_FAILURE_BODY.as_bytes().to_vec(),
                )
            }
        };

        (
            status,
            [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
            body,
        )
            .into_response()
    }
}
