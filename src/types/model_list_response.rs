use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::ModelInfo;

/// Response from the list models endpoint (`GET /api/tags`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelListResponse {
    /// Models installed on the server.
    pub models: Vec<ModelInfo>,
}

impl ModelListResponse {
    /// Create a new `ModelListResponse`.
    pub fn new(models: Vec<ModelInfo>) -> Self {
        Self { models }
    }

    /// Get the list of models.
    pub fn models(&self) -> &[ModelInfo] {
        &self.models
    }

    /// Collect the identifiers of every listed model, in server order.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if any entry carries neither `model` nor `name`.
    pub fn identifiers(&self) -> Result<Vec<String>> {
        self.models
            .iter()
            .enumerate()
            .map(|(idx, info)| {
                info.identifier().map(String::from).ok_or_else(|| {
                    Error::serialization(format!("model entry {idx} has no identifier"), None)
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_list_response_deserialization() {
        let json = serde_json::json!({
            "models": [
                {"name": "llama2:latest", "model": "llama2:latest"},
                {"name": "mistral:latest", "model": "mistral:latest"}
            ]
        });
        let response: ModelListResponse = serde_json::from_value(json).unwrap();

        assert_eq!(response.models().len(), 2);
        assert_eq!(
            response.identifiers().unwrap(),
            vec!["llama2:latest".to_string(), "mistral:latest".to_string()]
        );
    }

    #[test]
    fn missing_models_field_is_malformed() {
        let json = serde_json::json!({"data": []});
        assert!(serde_json::from_value::<ModelListResponse>(json).is_err());
    }

    #[test]
    fn entry_without_identifier_is_malformed() {
        let response = ModelListResponse::new(vec![
            ModelInfo::new("llama2"),
            serde_json::from_value(serde_json::json!({"size": 1})).unwrap(),
        ]);
        let err = response.identifiers().unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("entry 1"));
    }
}
