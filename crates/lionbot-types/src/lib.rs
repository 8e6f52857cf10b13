//! Shared domain types for LIONBOT.
//!
//! This crate contains the data shapes used across the relay: conversation
//! turns and their parts, inbound request bodies, replies, server
//! configuration, and the error taxonomy.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
