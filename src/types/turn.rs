use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Who produced a turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing into the chat.
    User,

    /// The model.
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// One message in the conversation.
///
/// Turns serialize to the `{"role": ..., "content": ...}` shape the chat endpoint expects,
/// so the history can be sent as-is.  A turn cannot be modified after it is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    /// Create a new `Turn` with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new user `Turn`.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a new assistant `Turn`.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Create the assistant turn that stands in for a failed backend call.
    pub fn error(err: &Error) -> Self {
        Self::assistant(format!("Error: {err}"))
    }

    /// The role of this turn.
    pub fn role(&self) -> Role {
        self.role
    }

    /// The text of this turn.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns true if this turn was written by the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns true if this turn was written by the model (or stands in for a failure).
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_serialization() {
        let turn = Turn::user("hello");
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "user", "content": "hello"})
        );
    }

    #[test]
    fn turn_deserialization() {
        let json = serde_json::json!({"role": "assistant", "content": "hi there"});
        let turn: Turn = serde_json::from_value(json).unwrap();
        assert_eq!(turn.role(), Role::Assistant);
        assert_eq!(turn.content(), "hi there");
    }

    #[test]
    fn unknown_role_is_rejected() {
        let json = serde_json::json!({"role": "system", "content": "be terse"});
        assert!(serde_json::from_value::<Turn>(json).is_err());
    }

    #[test]
    fn error_turn_is_assistant() {
        let turn = Turn::error(&Error::connection("connection refused", None));
        assert!(turn.is_assistant());
        assert_eq!(turn.content(), "Error: Connection error: connection refused");
    }
}
