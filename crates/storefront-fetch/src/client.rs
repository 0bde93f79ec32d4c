//! HTTP client for JSON resources.

use http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::timeout::TimeoutConfig;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error: {status} for {url}")]
    Http { status: StatusCode, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl FetchError {
    /// HTTP status code, if the server answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout(e.to_string())
        } else if e.is_connect() {
            Self::Connection(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// Fetch client for JSON documents.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    timeout: TimeoutConfig,
}

impl FetchClient {
    /// Create a client without timeouts.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(TimeoutConfig::none())
    }

    /// Create a client with the given timeouts.
    pub fn with_timeout(timeout: TimeoutConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(connect) = timeout.connect {
            builder = builder.connect_timeout(connect);
        }
        if let Some(total) = timeout.total {
            builder = builder.timeout(total);
        }
        let http = builder
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self { http, timeout })
    }

    /// The timeouts this client was built with.
    pub fn timeout(&self) -> &TimeoutConfig {
        &self.timeout
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// Any status of 400 or above is an error, as is a body that does not
    /// decode into `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "fetching");

        let resp = self
            .http
            .get(url)
            .header(http::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(FetchError::from_transport)?;

        let status = resp.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Http {
                status,
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(FetchError::from_transport)?;
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
    }
}
