//! HTTP client for the Job Portal authentication service
//!
//! Thin `reqwest` wrapper: it only moves JSON over the wire. Turning
//! statuses into outcomes is the coordinator's job.

use super::traits::{AuthTransport, RawResponse, TransportError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Default request timeout, used when the config does not set one
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a new transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("job-portal-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl AuthTransport for HttpTransport {
    async fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<RawResponse, TransportError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    TransportError::InvalidUrl(url.to_string())
                } else {
                    TransportError::Unreachable(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        // A body we cannot read is classified as a body without a message
        let body = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Failed to read response body from {url}: {e}");
                String::new()
            }
        };

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_builds_client() {
        assert!(HttpTransport::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS)).is_ok());
    }

    #[tokio::test]
    async fn test_malformed_url_is_invalid_url() {
        let transport = HttpTransport::new(Duration::from_secs(1)).unwrap();
        let result = transport.post_json("not a url", &json!({})).await;
        assert_eq!(
            result,
            Err(TransportError::InvalidUrl("not a url".to_string()))
        );
    }

    #[tokio::test]
    async fn test_closed_port_is_unreachable() {
        // Bind then drop to get a local port with nothing listening
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();

        let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();
        let result = transport
            .post_json(&format!("http://127.0.0.1:{port}/auth/login"), &json!({}))
            .await;
        assert!(matches!(result, Err(TransportError::Unreachable(_))));
    }
}
