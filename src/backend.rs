//! The narrow contract between the chat core and an inference server.
//!
//! [`ChatSession`](crate::chat::ChatSession) and [`ModelCatalog`](crate::ModelCatalog) only
//! ever talk to a [`Backend`].  [`Ollama`] is the production implementation; tests supply
//! their own.

use crate::error::Result;
use crate::types::{ChatRequest, Turn};
use crate::{Error, Ollama};

/// An inference server reachable through two stateless calls.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Return the identifiers of the models the server can run, in server order.
    async fn list_models(&self) -> Result<Vec<String>>;

    /// Complete the conversation with `model`.
    ///
    /// `turns` is the entire history, ending with the newest user turn.  On success the
    /// result is an assistant turn holding the reply.
    async fn chat(&self, model: &str, turns: &[Turn]) -> Result<Turn>;
}

#[async_trait::async_trait]
impl Backend for Ollama {
    async fn list_models(&self) -> Result<Vec<String>> {
        Ollama::list_models(self).await?.identifiers()
    }

    async fn chat(&self, model: &str, turns: &[Turn]) -> Result<Turn> {
        let request = ChatRequest::new(model, turns.to_vec());
        Ok(Ollama::chat(self, &request).await?.into_turn())
    }
}

/// Check that the backend answers before any interaction is allowed.
pub async fn probe(backend: &dyn Backend) -> Result<()> {
    backend.list_models().await.map(|_| ())
}

/// The instructions shown when the startup probe fails.
pub fn remediation_message(err: &Error) -> String {
    format!(
        "Ollama is not running or not installed!\n\n\
         Please make sure to:\n\
         1. Install Ollama from https://ollama.ai/\n\
         2. Run `ollama serve` in your terminal\n\
         3. Pull some models: `ollama pull llama2`\n\n\
         Error details: {err}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Down;

    #[async_trait::async_trait]
    impl Backend for Down {
        async fn list_models(&self) -> Result<Vec<String>> {
            Err(Error::connection("connection refused", None))
        }

        async fn chat(&self, _: &str, _: &[Turn]) -> Result<Turn> {
            Err(Error::connection("connection refused", None))
        }
    }

    struct Up;

    #[async_trait::async_trait]
    impl Backend for Up {
        async fn list_models(&self) -> Result<Vec<String>> {
            Ok(vec![])
        }

        async fn chat(&self, _: &str, _: &[Turn]) -> Result<Turn> {
            Ok(Turn::assistant("ok"))
        }
    }

    #[test]
    fn probe_reports_failure() {
        let err = tokio_test::block_on(probe(&Down)).unwrap_err();
        assert!(err.is_unreachable());
    }

    #[test]
    fn probe_accepts_empty_catalog() {
        assert!(tokio_test::block_on(probe(&Up)).is_ok());
    }

    #[test]
    fn remediation_mentions_every_step() {
        let message = remediation_message(&Error::connection("connection refused", None));
        assert!(message.contains("https://ollama.ai/"));
        assert!(message.contains("ollama serve"));
        assert!(message.contains("ollama pull llama2"));
        assert!(message.ends_with("Error details: Connection error: connection refused"));
    }
}
