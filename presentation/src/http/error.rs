//! HTTP error responses.
//!
//! Errors are returned as `{"error": {"message": ...}}` with a 4xx status
//! for bad requests and 502 when the backend failed.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ragcast_application::{CompleteChatError, ResolveInputError};
use serde_json::json;
use tracing::warn;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({"error": {"message": self.message}});
        (self.status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<ResolveInputError> for ApiError {
    fn from(err: ResolveInputError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<CompleteChatError> for ApiError {
    fn from(err: CompleteChatError) -> Self {
        Self::bad_gateway(err.to_string())
    }
}
