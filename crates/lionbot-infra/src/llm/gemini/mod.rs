//! Google Gemini provider.
//!
//! Speaks the `v1beta/models/{model}:generateContent` API. Non-streaming
//! only.

pub mod client;
pub mod types;

pub use client::GeminiClient;
