//! Business logic and port trait definitions for LIONBOT.
//!
//! This crate turns an inbound chat request into a user turn, keeps the
//! bounded conversation history, and maps outcomes to replies. It defines
//! the "ports" (`CompletionClient`, `DocumentParser`) that the infrastructure
//! layer implements, and never depends on `lionbot-infra` or any IO crate.

pub mod attachment;
pub mod chat;
pub mod conversation;
pub mod llm;
