//! Infrastructure layer for LIONBOT.
//!
//! Contains implementations of the ports defined in `lionbot-core`:
//! the Gemini `generateContent` client, the office document parser
//! (xlsx via umya-spreadsheet, docx via docx-rs), config file loading,
//! and API-key resolution from the environment.

pub mod config;
pub mod document;
pub mod llm;
pub mod secret;
