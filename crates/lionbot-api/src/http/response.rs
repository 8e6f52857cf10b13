//! Reply response format for the chat endpoint.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use lionbot_types::chat::ChatReply;

/// Serializes a [`ChatReply`] as `{"reply": ...}` with its own status code.
#[derive(Debug)]
pub struct ReplyResponse(pub ChatReply);

impl IntoResponse for ReplyResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}
