//! HTTP client module for posting log events to the ingestion endpoint.
//!
//! One request carries one batch. There is no retry: a failed attempt is
//! reported to the caller, which decides what to do with it.

use reqwest::{Client, StatusCode};

use crate::config::ShipperConfig;
use crate::event::LogEvent;

/// User agent sent with every request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while posting a batch.
#[derive(Debug)]
pub enum SendError {
    /// HTTP request failed (DNS, connect, invalid URL, ...)
    Request(reqwest::Error),

    /// Request timeout
    Timeout,

    /// Server answered with something other than 200
    Status {
        code: StatusCode,
        body: String,
    },

    /// Client configuration error
    Config(String),
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::Request(e) => write!(f, "HTTP request failed: {}", e),
            SendError::Timeout => write!(f, "Request timed out"),
            SendError::Status { code, body } => {
                write!(f, "Ingestion endpoint returned {}: {}", code, body)
            }
            SendError::Config(e) => write!(f, "Client configuration error: {}", e),
        }
    }
}

impl std::error::Error for SendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SendError::Request(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SendError::Timeout
        } else {
            SendError::Request(err)
        }
    }
}

/// HTTP client for the ingestion endpoint.
///
/// The underlying `reqwest::Client` is built once and reused for every
/// request, so connections are pooled across events.
#[derive(Debug, Clone)]
pub struct IngestClient {
    client: Client,
    destination_url: String,
    auth_token: String,
}

impl IngestClient {
    /// Create a new client from the shipper configuration.
    ///
    /// # Errors
    ///
    /// Returns `SendError::Config` if the HTTP client cannot be built.
    pub fn new(config: &ShipperConfig) -> Result<Self, SendError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SendError::Config(e.to_string()))?;

        Ok(Self {
            client,
            destination_url: config.destination_url.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    /// POST `batch` as a JSON array.
    ///
    /// Only HTTP 200 counts as success; any other status comes back as
    /// `SendError::Status` with the response body.
    pub async fn post_batch(&self, batch: &[LogEvent]) -> Result<(), SendError> {
        let response = self
            .client
            .post(&self.destination_url)
            .bearer_auth(&self.auth_token)
            .json(batch)
            .send()
            .await?;

        let code = response.status();
        if code == StatusCode::OK {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<unreadable body: {}>", e));

        Err(SendError::Status { code, body })
    }
}
