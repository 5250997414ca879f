//! The set of models a session may select.

use time::OffsetDateTime;

use crate::Error;
use crate::backend::Backend;
use crate::observability::{CATALOG_FALLBACKS, CATALOG_FETCHES};

/// Models offered when the backend cannot be asked.
pub const FALLBACK_MODELS: [&str; 3] = ["llama2", "mistral", "gemma"];

/// Model selected when the backend reports no models at all.
pub const DEFAULT_MODEL: &str = "llama2";

/// The model identifiers the backend reported, fetched once per session.
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    identifiers: Vec<String>,
    fetched_at: OffsetDateTime,
    failure: Option<Error>,
}

impl ModelCatalog {
    /// Ask the backend for its models.
    ///
    /// This never fails.  When the backend is unreachable or answers with garbage the catalog
    /// holds [`FALLBACK_MODELS`] and [`ModelCatalog::failure`] says why.
    pub async fn fetch(backend: &dyn Backend) -> Self {
        CATALOG_FETCHES.click();
        match backend.list_models().await {
            Ok(identifiers) => Self::from_identifiers(identifiers),
            Err(err) => {
                CATALOG_FALLBACKS.click();
                tracing::warn!("error fetching models, using fallback list: {err}");
                Self::fallback(err)
            }
        }
    }

    /// Build a catalog from identifiers already in hand.  Duplicates are dropped, keeping
    /// the first occurrence.
    pub fn from_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for id in identifiers {
            let id = id.into();
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self {
            identifiers: unique,
            fetched_at: OffsetDateTime::now_utc(),
            failure: None,
        }
    }

    /// The fallback catalog, remembering the failure that caused it.
    pub fn fallback(failure: Error) -> Self {
        Self {
            failure: Some(failure),
            ..Self::from_identifiers(FALLBACK_MODELS)
        }
    }

    /// Identifiers in backend order.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    /// When the catalog was built.
    pub fn fetched_at(&self) -> OffsetDateTime {
        self.fetched_at
    }

    /// The error that forced the fallback list, if any.
    pub fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    /// Returns true if the catalog holds the fallback list.
    pub fn is_fallback(&self) -> bool {
        self.failure.is_some()
    }

    /// Returns true if the backend listed `id`.
    pub fn contains(&self, id: &str) -> bool {
        self.identifiers.iter().any(|known| known == id)
    }

    /// Returns true if a session may select `id`.
    ///
    /// An empty catalog tells us nothing, so any identifier is allowed.
    pub fn permits(&self, id: &str) -> bool {
        self.identifiers.is_empty() || self.contains(id)
    }

    /// The first listed model, or [`DEFAULT_MODEL`] when nothing is listed.
    pub fn default_model(&self) -> &str {
        self.identifiers
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_MODEL)
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Returns true if the backend listed no models.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Turn;
    use crate::error::Result;

    struct Listing(Result<Vec<String>>);

    #[async_trait::async_trait]
    impl Backend for Listing {
        async fn list_models(&self) -> Result<Vec<String>> {
            self.0.clone()
        }

        async fn chat(&self, _: &str, _: &[Turn]) -> Result<Turn> {
            unreachable!("the catalog never chats")
        }
    }

    #[test]
    fn fetch_keeps_backend_order() {
        let backend = Listing(Ok(vec![
            "mistral:latest".to_string(),
            "llama2:latest".to_string(),
            "mistral:latest".to_string(),
        ]));
        let catalog = tokio_test::block_on(ModelCatalog::fetch(&backend));
        assert!(!catalog.is_fallback());
        assert_eq!(catalog.identifiers(), ["mistral:latest", "llama2:latest"]);
        assert_eq!(catalog.default_model(), "mistral:latest");
        assert!(catalog.contains("llama2:latest"));
        assert!(!catalog.permits("gemma"));
    }

    #[test]
    fn fetch_falls_back_on_malformed_response() {
        let backend = Listing(Err(Error::serialization("missing field `models`", None)));
        let catalog = tokio_test::block_on(ModelCatalog::fetch(&backend));
        assert!(catalog.is_fallback());
        assert!(catalog.failure().unwrap().is_malformed());
        assert_eq!(catalog.identifiers(), FALLBACK_MODELS);
        assert_eq!(catalog.default_model(), "llama2");
    }

    #[test]
    fn empty_listing_permits_anything() {
        let catalog = ModelCatalog::from_identifiers(Vec::<String>::new());
        assert!(catalog.is_empty());
        assert!(!catalog.is_fallback());
        assert_eq!(catalog.default_model(), DEFAULT_MODEL);
        assert!(catalog.permits("phi3"));
    }

    #[test]
    fn fetched_at_is_recent() {
        let before = OffsetDateTime::now_utc();
        let catalog = ModelCatalog::from_identifiers(["llama2"]);
        assert!(catalog.fetched_at() >= before);
    }
}
