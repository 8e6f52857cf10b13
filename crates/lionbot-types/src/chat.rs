//! Conversation, attachment, and request/reply types for LIONBOT.
//!
//! A conversation is an ordered list of [`Turn`]s, each made of ordered
//! [`MessagePart`]s. Inbound requests arrive as [`ChatRequestBody`] and
//! leave as a [`ChatReply`].

use serde::{Deserialize, Serialize};

/// Author of a turn in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One fragment of a turn.
///
/// Order within a turn is significant: context notes come first, then
/// attachment payloads, then the text the user typed.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagePart {
    /// Plain text.
    Text(String),
    /// Binary payload handed to the remote model as-is.
    InlineBinary { mime_type: String, data: Vec<u8> },
    /// A part returned by the remote model, kept verbatim so it can be
    /// echoed back in later requests.
    Raw(serde_json::Value),
}

impl MessagePart {
    /// Convenience constructor for a text part.
    pub fn text(text: impl Into<String>) -> Self {
        MessagePart::Text(text.into())
    }

    /// The text carried by this part, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessagePart::Text(text) => Some(text),
            MessagePart::Raw(value) => value.get("text").and_then(|t| t.as_str()),
            MessagePart::InlineBinary { .. } => None,
        }
    }
}

/// A single message in the conversation. Immutable once appended to history.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: Role,
    pub parts: Vec<MessagePart>,
}

impl Turn {
    pub fn user(parts: Vec<MessagePart>) -> Self {
        Self {
            role: Role::User,
            parts,
        }
    }

    pub fn model(parts: Vec<MessagePart>) -> Self {
        Self {
            role: Role::Model,
            parts,
        }
    }
}

/// An attachment as sent by the client: a mime type and a base64 payload.
///
/// Lives only for the duration of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDescriptor {
    #[serde(rename = "mimeType", alias = "mime_type", default)]
    pub mime_type: String,
    #[serde(default)]
    pub data: String,
}

/// Body of `POST /api/chat`.
///
/// Attachments may arrive under `files` (a list), `file` or `image` (a single
/// object). Those fields are kept as raw JSON so that an unexpected shape
/// degrades to "no attachment" instead of rejecting the whole request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequestBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub files: Option<serde_json::Value>,
    #[serde(default)]
    pub file: Option<serde_json::Value>,
    #[serde(default)]
    pub image: Option<serde_json::Value>,
}

/// Final user-facing outcome of a chat request.
///
/// Serializes to `{"reply": "..."}`; `status` is the HTTP status the
/// transport layer should use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    #[serde(skip)]
    pub status: u16,
    pub reply: String,
}

impl ChatReply {
    pub fn new(status: u16, reply: impl Into<String>) -> Self {
        Self {
            status,
            reply: reply.into(),
        }
    }

    /// A 200 reply.
    pub fn ok(reply: impl Into<String>) -> Self {
        Self::new(200, reply)
    }
}
