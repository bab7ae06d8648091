//! REST API client.
//!
//! Thin wrapper over `reqwest` for the server's `/api` endpoints. Responses
//! are returned as raw status + body; non-2xx statuses are not errors so
//! the caller can render whatever the server said.
//!
//! # Example
//!
//! ```rust,no_run
//! use ravenpair_cli::client::{ApiClient, HttpApiClient};
//!
//! # async fn example() -> Result<(), ravenpair_cli::CliError> {
//! let client = HttpApiClient::new("http://localhost:8080", None)?;
//! let response = client.get_status().await?;
//! println!("HTTP {}", response.status);
//! # Ok(())
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, trace};

use crate::error::CliError;

/// Default request timeout.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status endpoint.
pub const STATUS_PATH: &str = "/api/status";

/// Pairs collection endpoint.
pub const PAIRS_PATH: &str = "/api/pairs";

/// Raw response from the REST API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Body parsed as JSON, if it is valid JSON.
    #[must_use]
    pub fn json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }
}

/// Operations offered by the REST API.
///
/// This trait allows for testing with fake implementations.
pub trait ApiClient: Send + Sync {
    /// `GET /api/status`.
    fn get_status(&self) -> impl Future<Output = Result<ApiResponse, CliError>> + Send;

    /// `GET /api/pairs`.
    fn list_pairs(&self) -> impl Future<Output = Result<ApiResponse, CliError>> + Send;

    /// `POST /api/pairs`, with `{"name": ...}` when `name` is non-empty.
    fn create_pair(&self, name: &str) -> impl Future<Output = Result<ApiResponse, CliError>> + Send;
}

/// HTTP implementation of [`ApiClient`].
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl HttpApiClient {
    /// Create a client for the server at `base_url`.
    ///
    /// Trailing slashes on the base URL are ignored. An empty token is the
    /// same as no token.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self, CliError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .user_agent(concat!("ravenpair/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
            http,
        })
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse, CliError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%method, url = %url, "Sending API request");

        let mut request = self
            .http
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json");

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CliError::Http(format!("sending request to {url}: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| CliError::Http(format!("reading response: {e}")))?;

        trace!(status, len = body.len(), "Received API response");
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

impl ApiClient for HttpApiClient {
    async fn get_status(&self) -> Result<ApiResponse, CliError> {
        self.send(Method::GET, STATUS_PATH, None).await
    }

    async fn list_pairs(&self) -> Result<ApiResponse, CliError> {
        self.send(Method::GET, PAIRS_PATH, None).await
    }

    async fn create_pair(&self, name: &str) -> Result<ApiResponse, CliError> {
        let body = (!name.is_empty()).then(|| json!({ "name": name }));
        self.send(Method::POST, PAIRS_PATH, body).await
    }
}
