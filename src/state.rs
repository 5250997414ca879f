//! Conversation history and model selection.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Turn;

/// The ordered turn history plus the selected model.
///
/// Turns are only ever appended or wholly cleared; nothing is edited or reordered in place.
/// The history is resent to the backend verbatim on every turn, so its order matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    turns: Vec<Turn>,
    selected_model: String,
}

impl ConversationState {
    /// Create an empty conversation using `selected_model`.
    pub fn new(selected_model: impl Into<String>) -> Self {
        Self {
            turns: Vec::new(),
            selected_model: selected_model.into(),
        }
    }

    /// Append a turn to the end of the history.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a user turn with no text.
    pub fn append(&mut self, turn: Turn) -> Result<()> {
        if turn.is_user() && turn.content().trim().is_empty() {
            return Err(Error::validation(
                "user turns must not be empty",
                Some("content".to_string()),
            ));
        }
        self.turns.push(turn);
        Ok(())
    }

    /// Drop every turn.  The selected model is kept.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Replace the selected model.
    pub fn set_model(&mut self, model: impl Into<String>) {
        self.selected_model = model.into();
    }

    /// The history, oldest first.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The selected model.
    pub fn selected_model(&self) -> &str {
        &self.selected_model
    }

    /// The most recent turn.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns true if there are no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
