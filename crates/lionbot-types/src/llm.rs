//! Remote completion outcome and error types.

use crate::chat::Turn;

/// Result of a successful HTTP exchange with the remote model.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// The first candidate's text plus the model turn to record in history.
    Reply { text: String, turn: Turn },
    /// The remote answered 200 but offered no usable candidate.
    NoCandidates,
}

/// Errors from remote completion calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The remote API answered with a non-success status.
    #[error("remote error (HTTP {status}): {message}")]
    Remote {
        status: u16,
        message: String,
        /// Machine-readable status from the error body (e.g. `INVALID_ARGUMENT`).
        reason: Option<String>,
    },

    #[error("remote request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}
