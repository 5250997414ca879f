use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// One locally installed model, as reported by `GET /api/tags`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier, e.g. `llama2:latest`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Display name.  Older servers only report this field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// RFC 3339 time the model was last pulled or modified.
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub modified_at: Option<OffsetDateTime>,

    /// Size on disk, in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,

    /// Content digest of the model blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl ModelInfo {
    /// Create a `ModelInfo` that carries only an identifier.
    pub fn new(model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            name: Some(model.clone()),
            model: Some(model),
            modified_at: None,
            size: None,
            digest: None,
        }
    }

    /// The identifier to pass back to the chat endpoint.
    ///
    /// Prefers `model` and falls back to `name`.
    pub fn identifier(&self) -> Option<&str> {
        self.model
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.name.as_deref().filter(|id| !id.is_empty()))
    }
}
