use thiserror::Error;

use crate::llm::LlmError;

/// Errors that terminate a chat round.
///
/// Document extraction failures are not listed here: they degrade into
/// explanatory text inside the user turn.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request has neither a message nor a usable attachment")]
    EmptyRequest,

    #[error("attachment payload could not be decoded: {0}")]
    InvalidAttachment(String),

    #[error(transparent)]
    Remote(#[from] LlmError),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors raised while assembling the server configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("no API key found (set GEMINI_API_KEY or GOOGLE_API_KEY)")]
    MissingApiKey,
}
