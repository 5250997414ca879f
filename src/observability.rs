use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("ollama_chat.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter =
    Counter::new("ollama_chat.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("ollama_chat.client.request_duration_seconds");

pub(crate) static CATALOG_FETCHES: Counter = Counter::new("ollama_chat.catalog.fetches");
pub(crate) static CATALOG_FALLBACKS: Counter = Counter::new("ollama_chat.catalog.fallbacks");

pub(crate) static SESSION_SENDS: Counter = Counter::new("ollama_chat.session.sends");
pub(crate) static SESSION_EMPTY_INPUTS: Counter =
    Counter::new("ollama_chat.session.empty_inputs");
pub(crate) static SESSION_ERROR_TURNS: Counter = Counter::new("ollama_chat.session.error_turns");
pub(crate) static SESSION_TURN_DURATION: Moments =
    Moments::new("ollama_chat.session.turn_duration_seconds");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&CATALOG_FETCHES);
    collector.register_counter(&CATALOG_FALLBACKS);

    collector.register_counter(&SESSION_SENDS);
    collector.register_counter(&SESSION_EMPTY_INPUTS);
    collector.register_counter(&SESSION_ERROR_TURNS);
    collector.register_moments(&SESSION_TURN_DURATION);
}
