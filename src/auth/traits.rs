//! Trait abstraction for the HTTP transport to enable mocking in tests

use async_trait::async_trait;
use thiserror::Error;

/// Status and body of an HTTP response, whatever the status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Failures where no HTTP response was obtained
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("server unreachable: {0}")]
    Unreachable(String),
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

/// Sends one JSON request and hands back the raw response
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthTransport: Send + Sync {
    /// POST `body` as JSON to `url`. Non-2xx statuses are not errors here.
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportError>;
}
