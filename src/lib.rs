// Public modules
pub mod backend;
pub mod catalog;
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod observability;
pub mod state;
pub mod types;

// Re-exports
pub use backend::{Backend, probe, remediation_message};
pub use catalog::{DEFAULT_MODEL, FALLBACK_MODELS, ModelCatalog};
pub use client::Ollama;
pub use client_logger::ClientLogger;
pub use error::{Error, Result};
pub use observability::register_biometrics;
pub use state::ConversationState;
pub use types::*;
