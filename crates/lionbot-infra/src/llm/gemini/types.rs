//! Gemini `generateContent` API types.
//!
//! These are Gemini-specific request/response structures used for HTTP
//! communication. They are NOT the generic conversation types from
//! lionbot-types -- those are provider-agnostic.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use lionbot_types::chat::{MessagePart, Role, Turn};
use lionbot_types::llm::CompletionOutcome;

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest<'a> {
    pub contents: Vec<GeminiContent<'a>>,
    pub system_instruction: SystemInstruction<'a>,
}

impl<'a> GenerateContentRequest<'a> {
    /// History followed by the new turn, with the persona as system instruction.
    pub fn new(history: &'a [Turn], new_turn: &'a Turn, persona: &'a str) -> Self {
        let contents = history
            .iter()
            .chain(std::iter::once(new_turn))
            .map(GeminiContent::from_turn)
            .collect();

        Self {
            contents,
            system_instruction: SystemInstruction {
                role: "system",
                parts: vec![TextPart { text: persona }],
            },
        }
    }
}

/// One turn on the wire.
#[derive(Debug, Serialize)]
pub struct GeminiContent<'a> {
    pub role: Role,
    pub parts: Vec<GeminiPart<'a>>,
}

impl<'a> GeminiContent<'a> {
    pub fn from_turn(turn: &'a Turn) -> Self {
        Self {
            role: turn.role,
            parts: turn.parts.iter().map(GeminiPart::from_part).collect(),
        }
    }
}

/// One part on the wire. Model parts are echoed exactly as received.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GeminiPart<'a> {
    Text { text: &'a str },
    InlineData { inline_data: InlineData },
    Raw(&'a Value),
}

impl<'a> GeminiPart<'a> {
    pub fn from_part(part: &'a MessagePart) -> Self {
        match part {
            MessagePart::Text(text) => GeminiPart::Text {
                text: text.as_str(),
            },
            MessagePart::InlineBinary { mime_type, data } => GeminiPart::InlineData {
                inline_data: InlineData {
                    mime_type: mime_type.clone(),
                    data: STANDARD.encode(data),
                },
            },
            MessagePart::Raw(value) => GeminiPart::Raw(value),
        }
    }
}

/// Base64 payload with its mime type.
#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct SystemInstruction<'a> {
    pub role: &'static str,
    pub parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
pub struct TextPart<'a> {
    pub text: &'a str,
}

/// Successful response body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default)]
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Candidate content. Parts stay as raw JSON so they can be replayed
/// verbatim in later requests.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Value>,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: Option<u32>,
    #[serde(default)]
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Finish reason of the first candidate, if reported.
    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.as_deref())
    }

    /// Take the first candidate: concatenate its text parts for the reply and
    /// keep all of its parts for history.
    pub fn into_outcome(self) -> CompletionOutcome {
        let content = self
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content);

        let Some(content) = content.filter(|c| !c.parts.is_empty()) else {
            return CompletionOutcome::NoCandidates;
        };

        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect();

        let parts = content.parts.into_iter().map(MessagePart::Raw).collect();

        CompletionOutcome::Reply {
            text,
            turn: Turn::model(parts),
        }
    }
}

/// Error envelope: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape_for_single_message() {
        let turn = Turn::user(vec![MessagePart::text("hello")]);
        let request = GenerateContentRequest::new(&[], &turn, "Be polite.");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "systemInstruction": { "role": "system", "parts": [{ "text": "Be polite." }] }
            })
        );
    }

    #[test]
    fn test_inline_binary_is_base64_encoded() {
        let turn = Turn::user(vec![MessagePart::InlineBinary {
            mime_type: "image/png".to_string(),
            data: b"ABC".to_vec(),
        }]);
        let request = GenerateContentRequest::new(&[], &turn, "");
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json["contents"][0]["parts"][0],
            json!({ "inline_data": { "mime_type": "image/png", "data": "QUJD" } })
        );
    }

    #[test]
    fn test_model_parts_are_echoed_verbatim() {
        let raw = json!({ "text": "thinking...", "thought": true, "thoughtSignature": "abc" });
        let history = vec![
            Turn::user(vec![MessagePart::text("q")]),
            Turn::model(vec![MessagePart::Raw(raw.clone())]),
        ];
        let next = Turn::user(vec![MessagePart::text("again")]);
        let json = serde_json::to_value(GenerateContentRequest::new(&history, &next, "p")).unwrap();

        assert_eq!(json["contents"].as_array().unwrap().len(), 3);
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["contents"][1]["parts"][0], raw);
        assert_eq!(json["contents"][2]["parts"][0], json!({ "text": "again" }));
    }

    #[test]
    fn test_into_outcome_concatenates_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "hi " },
                        { "functionCall": { "name": "noop", "args": {} } },
                        { "text": "there" }
                    ]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 4, "candidatesTokenCount": 2 }
        }))
        .unwrap();

        assert_eq!(response.finish_reason(), Some("STOP"));
        let CompletionOutcome::Reply { text, turn } = response.into_outcome() else {
            panic!("expected a reply");
        };
        assert_eq!(text, "hi there");
        assert_eq!(turn.role, Role::Model);
        assert_eq!(turn.parts.len(), 3);
        assert_eq!(
            turn.parts[1],
            MessagePart::Raw(json!({ "functionCall": { "name": "noop", "args": {} } }))
        );
    }

    #[test]
    fn test_missing_or_empty_candidates_is_no_candidates() {
        for body in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": null }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            json!({ "candidates": [{ "content": { "parts": [] } }] }),
        ] {
            let response: GenerateContentResponse = serde_json::from_value(body).unwrap();
            assert_eq!(response.into_outcome(), CompletionOutcome::NoCandidates);
        }
    }

    #[test]
    fn test_error_envelope_parses() {
        let envelope: ErrorEnvelope = serde_json::from_value(json!({
            "error": { "code": 400, "message": "Unsupported MIME type", "status": "INVALID_ARGUMENT" }
        }))
        .unwrap();
        assert_eq!(envelope.error.code, Some(400));
        assert_eq!(envelope.error.status.as_deref(), Some("INVALID_ARGUMENT"));
    }
}
