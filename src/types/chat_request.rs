use serde::{Deserialize, Serialize};

use crate::types::Turn;

/// Body of a chat completion request (`POST /api/chat`).
///
/// The server keeps no state between calls, so `messages` carries the entire conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,

    /// The full ordered history, ending with the newest user turn.
    pub messages: Vec<Turn>,

    /// Always false; replies are read in one piece.
    pub stream: bool,
}

impl ChatRequest {
    /// Create a non-streaming request for the given model and history.
    pub fn new(model: impl Into<String>, messages: Vec<Turn>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: false,
        }
    }
}
