//! HTTP layer for LIONBOT.
//!
//! Axum router with `POST /api/chat`, history inspection and reset under
//! `/api/history`, and `GET /health`. Every chat response body is
//! `{"reply": "..."}`.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
