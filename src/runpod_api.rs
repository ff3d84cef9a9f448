//! `RunPod` REST dispatcher.
//!
//! Unique responsibility: the sole point of contact with the `RunPod` REST
//! API. Every tool invocation funnels through [`RunpodApi::request`], which
//! issues exactly one HTTP attempt: no retry, no backoff, no state held
//! between calls.
//!
//! API endpoint:
//! - base <https://rest.runpod.io/v1>
//! - Header: Authorization: Bearer <key> (the key arrives with every call and
//!   is forwarded verbatim)

use std::{env, fmt, time::Duration};

use reqwest::{Method, StatusCode, header::CONTENT_TYPE};
use serde_json::Value;
use tracing::debug;

/// Default REST API base URL.
const DEFAULT_REST_URL: &str = "https://rest.runpod.io/v1";

/// Default HTTP request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// User agent sent with every outbound request.
const DEFAULT_USER_AGENT: &str = concat!("runpod-mcp/", env!("CARGO_PKG_VERSION"));

/// Configuration for the `RunPod` REST dispatcher.
///
/// The API key is deliberately absent: every invocation is independently
/// authenticated with a caller-supplied key.
#[derive(Clone, Debug)]
pub struct RunpodApiConfig {
    /// REST API base URL.
    /// Env: `RUNPOD_REST_URL` (default: "<https://rest.runpod.io/v1>")
    pub rest_url: String,

    /// HTTP request timeout in milliseconds.
    /// Env: `RUNPOD_HTTP_TIMEOUT_MS` (default: 30000)
    pub timeout_ms: u64,

    /// User agent for HTTP requests.
    /// Env: `RUNPOD_USER_AGENT` (default: "runpod-mcp/<crate version>")
    pub user_agent: String,
}

impl Default for RunpodApiConfig {
    fn default() -> Self {
        Self {
            rest_url: DEFAULT_REST_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl RunpodApiConfig {
    /// Load configuration from environment variables.
    ///
    /// In local dev, this will also attempt to load `.env` from the current
    /// directory. If `.env` is missing, it does not fail. No variable is
    /// required; each one overrides a built-in default.
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable is present but invalid.
    pub fn from_env() -> Result<Self, RunpodApiError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            rest_url: env::var("RUNPOD_REST_URL")
                .unwrap_or_else(|_| DEFAULT_REST_URL.to_string()),
            timeout_ms: parse_u64_env("RUNPOD_HTTP_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?,
            user_agent: env::var("RUNPOD_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
        })
    }

    /// Configuration pointing at a non-default base URL, defaults elsewhere.
    ///
    /// Mainly useful for exercising the dispatcher against a local server.
    #[must_use]
    pub fn with_rest_url(rest_url: impl Into<String>) -> Self {
        Self {
            rest_url: rest_url.into(),
            ..Self::default()
        }
    }
}

/// REST dispatcher for the `RunPod` API.
pub struct RunpodApi {
    cfg: RunpodApiConfig,
    http: reqwest::Client,
}

impl RunpodApi {
    /// Create a new dispatcher from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(cfg: RunpodApiConfig) -> Result<Self, RunpodApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(RunpodApiError::Http)?;

        Ok(Self { cfg, http })
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub const fn config(&self) -> &RunpodApiConfig {
        &self.cfg
    }

    /// Issue a GET request against `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects it.
    pub async fn get(&self, api_key: &str, path: &str) -> Result<Value, RunpodApiError> {
        self.request(api_key, Method::GET, path, None).await
    }

    /// Issue a POST request against `path` with an optional JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the provider rejects it.
    pub async fn post(
        &self,
        api_key: &str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, RunpodApiError> {
        self.request(api_key, Method::POST, path, body).await
    }

    /// Issue a single request and parse the JSON response.
    ///
    /// The full URL is `<base><path>` with no doubled slash. A body is
    /// serialized only when one is given and the verb is not GET. On a
    /// non-success status the provider's `error` message is surfaced when the
    /// body carries one, else a status-coded message.
    ///
    /// # Errors
    ///
    /// Returns [`RunpodApiError::Api`] on a non-success status,
    /// [`RunpodApiError::Http`] on transport failure, and
    /// [`RunpodApiError::Json`] when a success body is not valid JSON.
    pub async fn request(
        &self,
        api_key: &str,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, RunpodApiError> {
        let url = self.url_for(path);
        debug!(method = %method, url = %url, "dispatching provider request");

        let mut req = self
            .http
            .request(method.clone(), &url)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(api_key);

        if let Some(body) = body
            && method != Method::GET
        {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(RunpodApiError::Http)?;
        let status = resp.status();
        let text = resp.text().await.map_err(RunpodApiError::Http)?;

        if !status.is_success() {
            return Err(RunpodApiError::Api {
                status,
                message: api_error_message(status, &text),
            });
        }

        serde_json::from_str(&text).map_err(|e| RunpodApiError::Json { source: e, body: text })
    }

    /// Build the full URL for a sub-path, avoiding doubled slashes.
    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.cfg.rest_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Extract the provider's error message from a failure body.
///
/// The provider reports `{"error": "..."}` on most failures; anything else
/// falls back to a status-coded message.
fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()))
}

/// Error type for dispatcher operations.
#[derive(Debug)]
pub enum RunpodApiError {
    /// Invalid environment variable value.
    InvalidEnv {
        /// The environment variable key.
        key: &'static str,
        /// The reason for invalidity.
        reason: &'static str,
    },
    /// HTTP transport error (network, DNS, timeout).
    Http(reqwest::Error),
    /// Success response whose body was not valid JSON.
    Json {
        /// The JSON parsing error.
        source: serde_json::Error,
        /// The response body.
        body: String,
    },
    /// Provider rejected the request with a non-success status.
    Api {
        /// HTTP status code.
        status: StatusCode,
        /// Provider-reported error message, or a status-coded fallback.
        message: String,
    },
}

impl fmt::Display for RunpodApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnv { key, reason } => write!(f, "invalid env var {key}: {reason}"),
            Self::Http(e) => write!(f, "provider api error: {e}"),
            Self::Json { source, .. } => {
                write!(f, "provider api error: invalid json response: {source}")
            }
            Self::Api { message, .. } => write!(f, "runpod api error: {message}"),
        }
    }
}

impl std::error::Error for RunpodApiError {}

#[inline]
fn parse_u64_env(key: &'static str, default: u64) -> Result<u64, RunpodApiError> {
    env::var(key).map_or_else(
        |_| Ok(default),
        |v| {
            v.parse::<u64>().map_err(|_| RunpodApiError::InvalidEnv {
                key,
                reason: "expected an unsigned integer",
            })
        },
    )
}
