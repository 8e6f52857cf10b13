//! Chat endpoint.
//!
//! POST /api/chat - One chat round against the shared conversation.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use lionbot_types::chat::ChatRequestBody;

use crate::http::error::AppError;
use crate::http::response::ReplyResponse;
use crate::state::AppState;

/// POST /api/chat - Relay a message and its attachments to the model.
///
/// Soft failures (unsupported input, empty model output) still answer 200
/// with an explanatory reply; see `lionbot_core::chat::reply`.
pub async fn post_chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Result<ReplyResponse, AppError> {
    let Json(body) = body?;
    let reply = state.chat_service.handle(body).await;
    Ok(ReplyResponse(reply))
}
