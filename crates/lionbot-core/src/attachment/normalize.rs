//! Attachment normalization.
//!
//! Clients have sent attachments in three shapes over time:
//! `files` (a list), `file` (one object), and `image` (one object). This
//! module folds all of them into a single ordered list so nothing past the
//! request boundary branches on shape again.

use lionbot_types::chat::{AttachmentDescriptor, ChatRequestBody};
use serde_json::Value;
use tracing::debug;

/// Collect every usable attachment from a request body.
///
/// Order: entries of `files`, then `file`, then `image`. Absent fields,
/// unknown shapes, and descriptors without a payload are skipped rather than
/// failing the request.
pub fn normalize_attachments(body: &ChatRequestBody) -> Vec<AttachmentDescriptor> {
    let mut attachments = Vec::new();

    for (field, value) in [
        ("files", body.files.as_ref()),
        ("file", body.file.as_ref()),
        ("image", body.image.as_ref()),
    ] {
        if let Some(value) = value {
            collect_from_value(field, value, &mut attachments);
        }
    }

    attachments
}

fn collect_from_value(field: &str, value: &Value, out: &mut Vec<AttachmentDescriptor>) {
    match value {
        Value::Array(items) => {
            for item in items {
                push_descriptor(field, item, out);
            }
        }
        Value::Object(_) => push_descriptor(field, value, out),
        Value::Null => {}
        other => debug!(field, kind = value_kind(other), "ignoring attachment field of unexpected shape"),
    }
}

fn push_descriptor(field: &str, value: &Value, out: &mut Vec<AttachmentDescriptor>) {
    match serde_json::from_value::<AttachmentDescriptor>(value.clone()) {
        Ok(descriptor) if !descriptor.data.trim().is_empty() => out.push(descriptor),
        Ok(_) => debug!(field, "ignoring attachment without payload"),
        Err(err) => debug!(field, error = %err, "ignoring malformed attachment"),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
