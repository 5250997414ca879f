use serde::{Deserialize, Serialize};

use crate::types::Turn;

/// The message part of a chat completion response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    /// Role reported by the server; normally `assistant`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The reply text.
    pub content: String,
}

/// Response to a non-streaming chat completion request.
///
/// Only `message.content` is required; a body without it fails to decode and is treated as
/// a malformed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Model that produced the reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// The reply.
    pub message: ResponseMessage,

    /// Whether generation finished.
    #[serde(default)]
    pub done: bool,

    /// Why generation stopped, e.g. `stop` or `length`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_reason: Option<String>,

    /// Wall time spent on the request, in nanoseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_duration: Option<u64>,

    /// Number of prompt tokens evaluated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_eval_count: Option<u64>,

    /// Number of tokens generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eval_count: Option<u64>,
}

impl ChatResponse {
    /// The reply text.
    pub fn content(&self) -> &str {
        &self.message.content
    }

    /// Convert the reply into an assistant turn.
    pub fn into_turn(self) -> Turn {
        Turn::assistant(self.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn test_chat_response_deserialization() {
        let json = serde_json::json!({
            "model": "llama2",
            "created_at": "2024-05-01T10:00:00.123456Z",
            "message": {"role": "assistant", "content": "hi there"},
            "done": true,
            "done_reason": "stop",
            "total_duration": 5191566416u64,
            "prompt_eval_count": 26,
            "eval_count": 12
        });
        let response: ChatResponse = serde_json::from_value(json).unwrap();

        assert_eq!(response.content(), "hi there");
        assert!(response.done);
        assert_eq!(response.done_reason.as_deref(), Some("stop"));
        assert_eq!(response.eval_count, Some(12));

        let turn = response.into_turn();
        assert_eq!(turn.role(), Role::Assistant);
        assert_eq!(turn.content(), "hi there");
    }

    #[test]
    fn missing_content_is_rejected() {
        let json = serde_json::json!({"model": "llama2", "message": {"role": "assistant"}});
        assert!(serde_json::from_value::<ChatResponse>(json).is_err());

        let json = serde_json::json!({"model": "llama2", "done": true});
        assert!(serde_json::from_value::<ChatResponse>(json).is_err());
    }
}
