//! Maps chat outcomes to user-facing replies.
//!
//! Replies never carry raw error text, upstream bodies, or credentials. The
//! underlying cause is logged by the caller before mapping.
//!
//! | Outcome | Status | Reply |
//! |---------|--------|-------|
//! | empty request | 400 | [`EMPTY_REQUEST_REPLY`] |
//! | remote 4xx, invalid argument | 200 | [`UNSUPPORTED_INPUT_REPLY`] |
//! | remote overloaded / rate limited | 503 | [`BUSY_REPLY`] |
//! | other remote failure, timeout | 500 | [`UNAVAILABLE_REPLY`] |
//! | no candidates | 200 | [`NO_CANDIDATES_REPLY`] |
//! | anything else | 500 | [`INTERNAL_ERROR_REPLY`] |

use lionbot_types::chat::ChatReply;
use lionbot_types::error::ChatError;
use lionbot_types::llm::LlmError;

pub const EMPTY_REQUEST_REPLY: &str = "Please send a message or an attachment.";

pub const UNSUPPORTED_INPUT_REPLY: &str = "Sorry, this type of file may not be fully supported yet. \
     Please try a PDF or an image instead.";

pub const BUSY_REPLY: &str =
    "The assistant is very busy right now. Please wait a moment and send your message again.";

pub const UNAVAILABLE_REPLY: &str =
    "The system is temporarily unavailable. Please try again later.";

pub const NO_CANDIDATES_REPLY: &str = "The bot did not respond. Please try again.";

pub const INTERNAL_ERROR_REPLY: &str = "An internal server error occurred.";

/// How a remote failure should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFailureClass {
    /// The request carried input the model rejects (typically a mime type).
    UnsupportedInput,
    /// The provider is overloaded or the quota is exhausted.
    Overloaded,
    Other,
}

/// Classify a non-success response from the remote API.
pub fn classify_remote(status: u16, message: &str, reason: Option<&str>) -> RemoteFailureClass {
    let invalid_argument =
        reason == Some("INVALID_ARGUMENT") || message.contains("INVALID_ARGUMENT");
    if (400..500).contains(&status) && invalid_argument {
        return RemoteFailureClass::UnsupportedInput;
    }

    let lower = message.to_lowercase();
    let overloaded = status == 429
        || status == 503
        || reason == Some("RESOURCE_EXHAUSTED")
        || reason == Some("UNAVAILABLE")
        || lower.contains("overloaded")
        || lower.contains("resource has been exhausted")
        || lower.contains("quota")
        || lower.contains("rate limit");
    if overloaded {
        return RemoteFailureClass::Overloaded;
    }

    RemoteFailureClass::Other
}

/// Map a failed chat round to the reply sent to the client.
pub fn map_error(err: &ChatError) -> ChatReply {
    match err {
        ChatError::EmptyRequest => ChatReply::new(400, EMPTY_REQUEST_REPLY),
        ChatError::Remote(LlmError::Remote {
            status,
            message,
            reason,
        }) => match classify_remote(*status, message, reason.as_deref()) {
            RemoteFailureClass::UnsupportedInput => ChatReply::ok(UNSUPPORTED_INPUT_REPLY),
            RemoteFailureClass::Overloaded => ChatReply::new(503, BUSY_REPLY),
            RemoteFailureClass::Other => ChatReply::new(500, UNAVAILABLE_REPLY),
        },
        ChatError::Remote(LlmError::Timeout) => ChatReply::new(500, UNAVAILABLE_REPLY),
        ChatError::Remote(LlmError::Transport(_) | LlmError::Deserialization(_))
        | ChatError::InvalidAttachment(_)
        | ChatError::Internal(_) => ChatReply::new(500, INTERNAL_ERROR_REPLY),
    }
}

/// Reply used when the remote model answered without a candidate.
pub fn no_candidates_reply() -> ChatReply {
    ChatReply::ok(NO_CANDIDATES_REPLY)
}
