//! Conversation history endpoints.
//!
//! GET    /api/history - Current length and capacity.
//! DELETE /api/history - Drop every stored turn.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HistoryStats {
    pub turns: usize,
    pub capacity: usize,
}

pub async fn get_history(State(state): State<AppState>) -> Json<HistoryStats> {
    let store = state.chat_service.store();
    let turns = store.lock().await.len();
    Json(HistoryStats {
        turns,
        capacity: store.capacity(),
    })
}

pub async fn clear_history(State(state): State<AppState>) -> StatusCode {
    let mut history = state.chat_service.store().lock().await;
    let dropped = history.len();
    history.clear();
    tracing::info!(dropped, "conversation history cleared");
    StatusCode::NO_CONTENT
}
