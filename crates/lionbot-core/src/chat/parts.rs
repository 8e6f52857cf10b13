//! Message part builder for the user turn.
//!
//! Part order: one synthetic context note announcing the attachments, then
//! one part per attachment, then the text the user typed.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use lionbot_types::chat::{AttachmentDescriptor, MessagePart};
use lionbot_types::error::ChatError;

use crate::attachment::extract::{DocumentParser, ExtractionResult, describe, extract};

/// Build the ordered parts of the user's turn.
///
/// # Errors
///
/// - [`ChatError::EmptyRequest`] when there is neither an attachment nor
///   non-blank text.
/// - [`ChatError::InvalidAttachment`] when a payload is not valid base64.
pub fn build_user_parts(
    parser: &dyn DocumentParser,
    attachments: &[AttachmentDescriptor],
    message: Option<&str>,
) -> Result<Vec<MessagePart>, ChatError> {
    let mut parts = Vec::with_capacity(attachments.len() + 2);

    if !attachments.is_empty() {
        parts.push(MessagePart::Text(context_note(attachments)));
    }

    for attachment in attachments {
        let bytes = decode_payload(&attachment.data).map_err(|err| {
            ChatError::InvalidAttachment(format!("{}: {err}", attachment.mime_type))
        })?;

        let label = describe(&attachment.mime_type);
        let part = match extract(parser, &attachment.mime_type, &bytes) {
            ExtractionResult::Inline { mime_type, data } => {
                MessagePart::InlineBinary { mime_type, data }
            }
            ExtractionResult::ExtractedText(text) => MessagePart::Text(format!(
                "--- Content of attached {label} ---\n{text}\n--- End of {label} ---"
            )),
            ExtractionResult::ExtractionFailed(reason) => MessagePart::Text(format!(
                "[System: the attached {label} could not be read: {reason}]"
            )),
        };
        parts.push(part);
    }

    if let Some(text) = message.filter(|m| !m.trim().is_empty()) {
        parts.push(MessagePart::text(text));
    }

    if parts.is_empty() {
        return Err(ChatError::EmptyRequest);
    }

    Ok(parts)
}

/// Advisory note telling the model what was attached.
fn context_note(attachments: &[AttachmentDescriptor]) -> String {
    match attachments {
        [single] => format!(
            "\n[System: the user attached one file: {}]\n",
            describe(&single.mime_type)
        ),
        many => {
            let labels: Vec<String> = many.iter().map(|a| describe(&a.mime_type)).collect();
            format!(
                "\n[System: the user attached {} files: {}]\n",
                many.len(),
                labels.join(", ")
            )
        }
    }
}

/// Decode a base64 payload, accepting a `data:<mime>;base64,` prefix.
fn decode_payload(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD.decode(compact)
}
