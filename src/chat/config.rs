//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::Ollama;
use crate::error::Result;

/// Command-line arguments for the ollama-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Model to use for chat.
    #[arrrg(optional, "Model to use (default: first model the server lists)", "MODEL")]
    pub model: Option<String>,

    /// Address of the Ollama server.
    #[arrrg(optional, "Ollama server address (default: $OLLAMA_HOST or localhost:11434)", "HOST")]
    pub host: Option<String>,

    /// Per-request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 300)", "SECONDS")]
    pub timeout: Option<u64>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Preferred model; the session falls back to the catalog default if it is not listed.
    pub model: Option<String>,

    /// Server address.  `None` defers to the client's environment lookup.
    pub host: Option<String>,

    /// Per-request timeout.  `None` uses the client default.
    pub timeout: Option<Duration>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    pub fn new() -> Self {
        Self {
            model: None,
            host: None,
            timeout: None,
            use_color: true,
        }
    }

    /// Sets the preferred model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the server address.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Builds the client this configuration describes.
    pub fn client(&self) -> Result<Ollama> {
        Ollama::with_options(self.host.clone(), self.timeout)
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            model: args.model,
            host: args.host,
            timeout: args
                .timeout
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            use_color: !args.no_color,
        }
    }
}
