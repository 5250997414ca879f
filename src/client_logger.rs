//! Logging trait for Ollama client operations.
//!
//! This module provides the [`ClientLogger`] trait that allows users to capture
//! and log every response passing through the [`Ollama`](crate::Ollama) client.

use crate::{ChatResponse, ModelListResponse};

/// A trait for logging Ollama client operations.
///
/// Implement this trait to capture and record backend interactions.  Methods are only
/// called for responses that decoded successfully; failures surface as errors instead.
///
/// # Example
///
/// ```rust,ignore
/// use ollama_chat::{ChatResponse, ClientLogger, ModelListResponse};
/// use std::sync::Mutex;
///
/// struct FileLogger {
///     file: Mutex<std::fs::File>,
/// }
///
/// impl ClientLogger for FileLogger {
///     fn log_model_list(&self, response: &ModelListResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Models: {}", serde_json::to_string(response).unwrap()).unwrap();
///     }
///
///     fn log_chat_response(&self, response: &ChatResponse) {
///         let mut file = self.file.lock().unwrap();
///         writeln!(file, "Reply: {}", serde_json::to_string(response).unwrap()).unwrap();
///     }
/// }
/// ```
pub trait ClientLogger: Send + Sync {
    /// Log the decoded response of a `list_models` call.
    fn log_model_list(&self, response: &ModelListResponse);

    /// Log the decoded response of a `chat` call.
    ///
    /// This method is called once per successful call with the full [`ChatResponse`],
    /// including the timing and token counts the server reports.
    fn log_chat_response(&self, response: &ChatResponse);
}
