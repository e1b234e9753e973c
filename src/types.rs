//! Wire types for the streaming completion protocol.

use serde::{Deserialize, Serialize};

/// One chat message in a completion request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    /// Build a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for one streamed completion turn.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub stream: bool,
    /// Conversation identifier from a previous turn; absent on fresh starts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<String>,
}

/// One SSE data payload from the completion stream.
///
/// The chunk `id` doubles as the conversation identifier; the last non-empty
/// value seen in a stream is the session token for the next turn.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StreamChunk {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

/// One choice entry inside a stream chunk.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: ChunkDelta,
}

/// Incremental content fragment carried by a choice.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ChunkDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl StreamChunk {
    /// Return the content fragment of the first choice, if any.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_absent_chat_id() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![Message::user("hi")],
            stream: true,
            chat_id: None,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("chat_id"), "got: {json}");
    }

    #[test]
    fn request_serializes_active_chat_id() {
        let request = CompletionRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![Message::user("hi")],
            stream: true,
            chat_id: Some("abc123".to_string()),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""chat_id":"abc123""#), "got: {json}");
    }

    #[test]
    fn chunk_content_reads_first_choice_delta() {
        let chunk: StreamChunk = serde_json::from_str(
            r#"{"id":"c1","choices":[{"delta":{"content":"hel"}},{"delta":{"content":"lo"}}]}"#,
        )
        .unwrap();
        assert_eq!(chunk.content(), Some("hel"));
        assert_eq!(chunk.id.as_deref(), Some("c1"));
    }

    #[test]
    fn chunk_tolerates_missing_fields() {
        let chunk: StreamChunk = serde_json::from_str(r#"{"choices":[{"delta":{}}]}"#).unwrap();
        assert_eq!(chunk.content(), None);
        assert_eq!(chunk.id, None);
    }
}
