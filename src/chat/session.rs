//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which owns the conversation, sends it to
//! the backend, and turns every outcome into a turn the presentation layer can render.

use std::time::Instant;

use serde::Serialize;
use time::OffsetDateTime;

use crate::backend::Backend;
use crate::catalog::ModelCatalog;
use crate::error::{Error, Result};
use crate::observability::{
    SESSION_EMPTY_INPUTS, SESSION_ERROR_TURNS, SESSION_SENDS, SESSION_TURN_DURATION,
};
use crate::state::ConversationState;
use crate::types::Turn;

/// Where a session is in its send cycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Ready for input.
    Idle,

    /// A send is waiting on the backend.
    AwaitingResponse,

    /// The last send failed and its error turn is in the transcript.  Behaves like `Idle`.
    ErrorDisplayed,
}

/// A chat session that manages conversation state and backend interactions.
///
/// The session exclusively owns its [`ConversationState`].  Every mutating operation takes
/// `&mut self`, so one send is in flight at a time and the model cannot change underneath
/// it.  Callers that share a session across tasks must put it behind a lock, which
/// serializes them.
pub struct ChatSession<B: Backend> {
    backend: B,
    conversation: ConversationState,
    catalog: ModelCatalog,
    state: SessionState,
    request_count: u64,
    failed_request_count: u64,
}

/// Everything a presentation layer needs to redraw the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// The history, oldest first.
    pub turns: Vec<Turn>,
    /// The selected model.
    pub selected_model: String,
    /// The models that may be selected.
    pub models: Vec<String>,
    /// Where the session is in its send cycle.
    pub state: SessionState,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The selected model.
    pub model: String,
    /// The number of turns in the conversation.
    pub message_count: usize,
    /// The number of models in the catalog.
    pub catalog_size: usize,
    /// Whether the catalog holds the fallback list.
    pub catalog_fallback: bool,
    /// When the catalog was fetched.
    pub catalog_fetched_at: OffsetDateTime,
    /// Total number of chat requests made.
    pub total_requests: u64,
    /// Number of chat requests that ended in an error turn.
    pub failed_requests: u64,
}

impl<B: Backend> ChatSession<B> {
    /// Fetches the model catalog and starts an empty session.
    ///
    /// `preferred_model` is selected when the catalog permits it; otherwise the catalog's
    /// default is used.
    pub async fn start(backend: B, preferred_model: Option<String>) -> Self {
        let catalog = ModelCatalog::fetch(&backend).await;
        let selected_model = preferred_model.unwrap_or_else(|| catalog.default_model().to_string());
        Self::with_catalog(backend, catalog, selected_model)
    }

    /// Creates a session from a catalog the caller already fetched.
    ///
    /// A `selected_model` the catalog does not permit is replaced by the catalog's default.
    pub fn with_catalog(
        backend: B,
        catalog: ModelCatalog,
        selected_model: impl Into<String>,
    ) -> Self {
        let mut selected_model = selected_model.into();
        if !catalog.permits(&selected_model) {
            tracing::warn!(
                "model {selected_model} is not available, using {}",
                catalog.default_model()
            );
            selected_model = catalog.default_model().to_string();
        }
        Self {
            backend,
            conversation: ConversationState::new(selected_model),
            catalog,
            state: SessionState::Idle,
            request_count: 0,
            failed_request_count: 0,
        }
    }

    /// Sends a user message and waits for the reply.
    ///
    /// This method:
    /// 1. Ignores empty input, returning `None` and recording nothing
    /// 2. Adds the user turn to history
    /// 3. Sends the entire history to the backend with the selected model
    /// 4. Adds the reply, or an error turn describing the failure, and returns it
    ///
    /// Backend failures never escape; they come back as an assistant turn whose content
    /// starts with `Error:`.
    pub async fn send(&mut self, user_input: &str) -> Option<Turn> {
        if self.conversation.append(Turn::user(user_input)).is_err() {
            SESSION_EMPTY_INPUTS.click();
            return None;
        }

        SESSION_SENDS.click();
        self.state = SessionState::AwaitingResponse;
        self.request_count = self.request_count.saturating_add(1);

        let start = Instant::now();
        let result = self
            .backend
            .chat(
                self.conversation.selected_model(),
                self.conversation.turns(),
            )
            .await;
        SESSION_TURN_DURATION.add(start.elapsed().as_secs_f64());

        let turn = match result {
            Ok(reply) if reply.is_assistant() => {
                self.state = SessionState::Idle;
                reply
            }
            Ok(reply) => {
                self.state = SessionState::Idle;
                Turn::assistant(reply.content())
            }
            Err(err) => {
                tracing::warn!(
                    "chat with {} failed: {err}",
                    self.conversation.selected_model()
                );
                SESSION_ERROR_TURNS.click();
                self.failed_request_count = self.failed_request_count.saturating_add(1);
                self.state = SessionState::ErrorDisplayed;
                Turn::error(&err)
            }
        };

        // Only user turns are validated.
        if let Err(err) = self.conversation.append(turn.clone()) {
            tracing::error!("could not record assistant turn: {err}");
        }
        Some(turn)
    }

    /// Clears the conversation history.
    pub fn clear(&mut self) {
        self.conversation.clear();
        self.state = SessionState::Idle;
    }

    /// Changes the model used for responses.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the catalog does not offer `model`.
    pub fn set_model(&mut self, model: impl Into<String>) -> Result<()> {
        let model = model.into();
        if !self.catalog.permits(&model) {
            return Err(Error::not_found("model is not in the catalog", Some(model)));
        }
        self.conversation.set_model(model);
        Ok(())
    }

    /// Returns the current model.
    pub fn model(&self) -> &str {
        self.conversation.selected_model()
    }

    /// Returns the conversation history.
    pub fn turns(&self) -> &[Turn] {
        self.conversation.turns()
    }

    /// Returns the number of turns in the conversation.
    pub fn message_count(&self) -> usize {
        self.conversation.len()
    }

    /// Returns the conversation state.
    pub fn conversation(&self) -> &ConversationState {
        &self.conversation
    }

    /// Returns the model catalog fetched at startup.
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    /// Returns where the session is in its send cycle.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns a copy of everything needed to redraw the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            turns: self.conversation.turns().to_vec(),
            selected_model: self.conversation.selected_model().to_string(),
            models: self.catalog.identifiers().to_vec(),
            state: self.state,
        }
    }

    /// Returns the current session statistics snapshot.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            model: self.conversation.selected_model().to_string(),
            message_count: self.message_count(),
            catalog_size: self.catalog.len(),
            catalog_fallback: self.catalog.is_fallback(),
            catalog_fetched_at: self.catalog.fetched_at(),
            total_requests: self.request_count,
            failed_requests: self.failed_request_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    struct Echo;

    #[async_trait::async_trait]
    impl Backend for Echo {
        async fn list_models(&self) -> Result<Vec<String>> {
            Ok(vec!["llama2".to_string(), "mistral".to_string()])
        }

        async fn chat(&self, model: &str, turns: &[Turn]) -> Result<Turn> {
            let last = turns.last().map(Turn::content).unwrap_or_default();
            Ok(Turn::assistant(format!("{model} heard {last}")))
        }
    }

    struct Refused;

    #[async_trait::async_trait]
    impl Backend for Refused {
        async fn list_models(&self) -> Result<Vec<String>> {
            Err(Error::connection("connection refused", None))
        }

        async fn chat(&self, _: &str, _: &[Turn]) -> Result<Turn> {
            Err(Error::connection("connection refused", None))
        }
    }

    struct Parrot;

    #[async_trait::async_trait]
    impl Backend for Parrot {
        async fn list_models(&self) -> Result<Vec<String>> {
            Ok(vec![])
        }

        async fn chat(&self, _: &str, turns: &[Turn]) -> Result<Turn> {
            Ok(turns.last().cloned().unwrap_or_else(|| Turn::user("?")))
        }
    }

    #[tokio::test]
    async fn new_session_empty() {
        let session = ChatSession::start(Echo, None).await;
        assert_eq!(session.message_count(), 0);
        assert_eq!(session.model(), "llama2");
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn preferred_model_is_honored_when_listed() {
        let session = ChatSession::start(Echo, Some("mistral".to_string())).await;
        assert_eq!(session.model(), "mistral");

        let session = ChatSession::start(Echo, Some("gemma".to_string())).await;
        assert_eq!(session.model(), "llama2");
    }

    #[tokio::test]
    async fn with_catalog_replaces_unlisted_model() {
        let catalog = ModelCatalog::from_identifiers(["llama2"]);
        let mut session = ChatSession::with_catalog(Echo, catalog, "gpt-4");
        assert_eq!(session.model(), "llama2");
        assert!(session.catalog().permits(session.model()));

        let reply = session.send("hi").await.unwrap();
        assert_eq!(reply.content(), "llama2 heard hi");

        let catalog = ModelCatalog::from_identifiers(["llama2", "mistral"]);
        let session = ChatSession::with_catalog(Echo, catalog, "mistral");
        assert_eq!(session.model(), "mistral");
    }

    #[tokio::test]
    async fn send_appends_reply() {
        let mut session = ChatSession::start(Echo, None).await;
        let reply = session.send("hello").await.unwrap();
        assert_eq!(reply, Turn::assistant("llama2 heard hello"));
        assert_eq!(
            session.turns(),
            [Turn::user("hello"), Turn::assistant("llama2 heard hello")]
        );
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn empty_input_is_ignored() {
        let mut session = ChatSession::start(Echo, None).await;
        assert!(session.send("").await.is_none());
        assert!(session.send("   ").await.is_none());
        assert_eq!(session.message_count(), 0);
        assert_eq!(session.stats().total_requests, 0);
    }

    #[tokio::test]
    async fn failure_becomes_error_turn() {
        let mut session = ChatSession::start(Refused, None).await;
        assert!(session.catalog().is_fallback());

        let reply = session.send("hello").await.unwrap();
        assert_eq!(reply.role(), Role::Assistant);
        assert!(reply.content().starts_with("Error: "));
        assert_eq!(session.message_count(), 2);
        assert_eq!(session.state(), SessionState::ErrorDisplayed);

        let stats = session.stats();
        assert_eq!(stats.total_requests, 1);
        assert_eq!(stats.failed_requests, 1);
        assert!(stats.catalog_fallback);
    }

    #[tokio::test]
    async fn reply_is_always_assistant() {
        let mut session = ChatSession::start(Parrot, None).await;
        let reply = session.send("echo me").await.unwrap();
        assert_eq!(reply, Turn::assistant("echo me"));
    }

    #[tokio::test]
    async fn clear_session() {
        let mut session = ChatSession::start(Refused, None).await;
        session.send("hello").await;
        assert_eq!(session.state(), SessionState::ErrorDisplayed);

        session.clear();
        assert_eq!(session.message_count(), 0);
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.model(), "llama2");
    }

    #[tokio::test]
    async fn set_model() {
        let mut session = ChatSession::start(Echo, None).await;
        session.set_model("mistral").unwrap();
        assert_eq!(session.model(), "mistral");

        let err = session.set_model("gemma").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(session.model(), "mistral");

        let reply = session.send("hi").await.unwrap();
        assert_eq!(reply.content(), "mistral heard hi");
    }

    #[tokio::test]
    async fn empty_catalog_permits_any_model() {
        let mut session = ChatSession::start(Parrot, Some("phi3".to_string())).await;
        assert_eq!(session.model(), "phi3");
        session.set_model("qwen2").unwrap();
        assert_eq!(session.model(), "qwen2");
    }

    #[tokio::test]
    async fn snapshot_reflects_session() {
        let mut session = ChatSession::start(Echo, None).await;
        session.send("hello").await;
        let snapshot = session.snapshot();
        assert_eq!(snapshot.turns.len(), 2);
        assert_eq!(snapshot.selected_model, "llama2");
        assert_eq!(snapshot.models, vec!["llama2", "mistral"]);
        assert_eq!(snapshot.state, SessionState::Idle);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["state"], "idle");
    }
}
