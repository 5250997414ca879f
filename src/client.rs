use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, RequestBuilder, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::{Host, Url};

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_DURATION, CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{ChatRequest, ChatResponse, ModelListResponse};

const DEFAULT_HOST: &str = "http://localhost:11434/";
const HOST_ENV_VAR: &str = "OLLAMA_HOST";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for the Ollama HTTP API.
///
/// Every call is an independent request; the server holds no conversation state.
#[derive(Clone)]
pub struct Ollama {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl Ollama {
    /// Create a new Ollama client.
    ///
    /// The server address is read from the OLLAMA_HOST environment variable, falling back to
    /// `http://localhost:11434`.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    ///
    /// A `base_url` without a scheme (`127.0.0.1:11434`) is treated as plain HTTP.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => url,
            None => env::var(HOST_ENV_VAR).unwrap_or_else(|_| DEFAULT_HOST.to_string()),
        };
        let base_url = normalize_base_url(&base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let mut builder = ReqwestClient::builder()
            .timeout(timeout)
            .default_headers(default_headers());
        // A proxy cannot reach the caller's own loopback interface.
        if is_loopback(&base_url) {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes every decoded response.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The server address requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// List the models installed on the server.
    pub async fn list_models(&self) -> Result<ModelListResponse> {
        let url = self.endpoint("api/tags")?;
        let response: ModelListResponse = self.execute(self.client.get(url), None).await?;
        if let Some(logger) = &self.logger {
            logger.log_model_list(&response);
        }
        Ok(response)
    }

    /// Send the conversation to the server and wait for the complete reply.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.endpoint("api/chat")?;
        let response: ChatResponse = self
            .execute(self.client.post(url).json(request), Some(request.model.as_str()))
            .await?;
        if let Some(logger) = &self.logger {
            logger.log_chat_response(&response);
        }
        Ok(response)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource_id: Option<&str>,
    ) -> Result<T> {
        CLIENT_REQUESTS.click();
        let start = Instant::now();
        let result = self.execute_inner(request, resource_id).await;
        CLIENT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if let Err(err) = &result {
            CLIENT_REQUEST_ERRORS.click();
            tracing::debug!("request to {} failed: {err}", self.base_url);
        }
        result
    }

    async fn execute_inner<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource_id: Option<&str>,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::timeout(
                    format!("Request timed out: {}", e),
                    Some(self.timeout.as_secs_f64()),
                )
            } else if e.is_connect() {
                Error::connection(e.to_string(), Some(Box::new(e)))
            } else {
                Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
            }
        })?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response, resource_id).await);
        }

        response.json::<T>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Process API response errors and convert to our Error type
    async fn process_error_response(response: Response, resource_id: Option<&str>) -> Error {
        let status_code = response.status().as_u16();

        // Ollama reports failures as {"error": "..."}
        #[derive(Deserialize)]
        struct ErrorResponse {
            error: Option<String>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let error_message = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.error)
            .unwrap_or_else(|| {
                if error_body.trim().is_empty() {
                    format!("server returned status {status_code}")
                } else {
                    error_body.clone()
                }
            });

        match status_code {
            400 => Error::bad_request(error_message),
            404 => Error::not_found(error_message, resource_id.map(String::from)),
            408 => Error::timeout(error_message, None),
            500 => Error::internal_server(error_message),
            502..=504 => Error::service_unavailable(error_message),
            _ => Error::api(status_code, error_message),
        }
    }
}

impl fmt::Debug for Ollama {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ollama")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

/// Create and return default headers for API requests.
fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::url("server address is empty", None));
    }
    let mut url = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    };
    // Url::join replaces the last path segment unless the base ends in a slash.
    if !url.ends_with('/') {
        url.push('/');
    }
    Ok(Url::parse(&url)?)
}
