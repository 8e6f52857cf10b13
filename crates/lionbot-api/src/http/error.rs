//! Application error type mapping to HTTP status codes.
//!
//! Only failures that happen before the chat service runs end up here; the
//! service itself always produces a [`ChatReply`](lionbot_types::chat::ChatReply).

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

pub const INVALID_BODY_REPLY: &str = "Invalid request body.";
pub const BODY_TOO_LARGE_REPLY: &str = "The request is too large.";

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// The body could not be read or parsed as JSON.
    Body(JsonRejection),
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Body(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, reply) = match &self {
            AppError::Body(rejection) => {
                let status = rejection.status();
                tracing::debug!(%status, detail = %rejection.body_text(), "rejected request body");
                // Oversized bodies keep 413; every other rejection is a 400.
                if status == StatusCode::PAYLOAD_TOO_LARGE {
                    (status, BODY_TOO_LARGE_REPLY)
                } else {
                    (StatusCode::BAD_REQUEST, INVALID_BODY_REPLY)
                }
            }
        };

        (status, Json(json!({ "reply": reply }))).into_response()
    }
}
