//! Server-sent-event framing helpers for the completion stream.

use crate::error::ApiError;
use crate::types::StreamChunk;

/// Terminator payload marking the end of a stream.
const DONE_MARKER: &str = "[DONE]";

/// One parsed `data:` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<'a> {
    /// JSON chunk body to parse.
    Data(&'a str),
    /// End-of-stream marker.
    Done,
}

/// Extract the payload from one SSE line, ignoring non-data lines.
pub fn data_payload(line: &str) -> Option<Payload<'_>> {
    let payload = line.strip_prefix("data:")?.trim_start();
    if payload == DONE_MARKER {
        return Some(Payload::Done);
    }
    if payload.is_empty() {
        return None;
    }
    Some(Payload::Data(payload))
}

/// Parse one JSON data payload into a stream chunk.
pub fn parse_chunk(payload: &str) -> Result<StreamChunk, ApiError> {
    serde_json::from_str(payload).map_err(|e| ApiError::Malformed(format!("{e}: {payload}")))
}

/// Condense an error response body into a one-line summary.
///
/// Providers disagree on error shapes; we probe the common `error.message`,
/// `error` (string), and `message` locations before falling back to the raw
/// body with whitespace collapsed.
pub fn error_summary(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let summary = value
            .pointer("/error/message")
            .and_then(|v| v.as_str())
            .map(str::to_owned)
            .or_else(|| {
                value.get("error").and_then(|v| match v {
                    serde_json::Value::String(s) => Some(s.clone()),
                    serde_json::Value::Object(map) => map
                        .get("message")
                        .and_then(|message| message.as_str().map(str::to_owned)),
                    _ => None,
                })
            })
            .or_else(|| value.get("message").and_then(|v| v.as_str().map(str::to_owned)));
        if let Some(text) = summary {
            let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !collapsed.is_empty() {
                return collapsed;
            }
        }
    }

    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}
