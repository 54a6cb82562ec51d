//! REST client for the simulation host's control routes.
//!
//! Wraps `GET /api/stop` and `GET /api/status` using [`reqwest`]. Bodies
//! are returned as opaque [`Payload`]s; the typed helpers decode them into
//! the shapes the simulation host is known to emit.

use std::time::Duration;

use seal_core::endpoints::{self, STATUS_PATH, STOP_PATH};
use seal_core::{Payload, StatusReport, StopAck};

use crate::config::{ClientConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::error::ClientError;

/// HTTP client for a single simulation host.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct SealApi {
    client: reqwest::Client,
    api_url: String,
    /// `None` when the caller supplied its own [`reqwest::Client`].
    request_timeout: Option<Duration>,
}

impl SealApi {
    /// Create a new API client for a simulation host, with the default
    /// 10 second request timeout.
    ///
    /// * `api_url` - Base HTTP URL, e.g. `http://host:5000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_timeout(api_url, DEFAULT_REQUEST_TIMEOUT)
            .expect("Failed to build reqwest HTTP client")
    }

    /// Create an API client whose requests give up after `timeout`.
    pub fn with_timeout(
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let mut api = Self::with_client(client, api_url);
        api.request_timeout = Some(timeout);
        Ok(api)
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    ///
    /// Timeouts are whatever the given client was built with.
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            api_url,
            request_timeout: None,
        }
    }

    /// Build a client with the configured base URL and request timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_timeout(config.api_url.clone(), config.request_timeout)
    }

    /// Base HTTP URL (e.g. `http://host:5000`).
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Per-request timeout, when this client set one itself.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    /// Stop the running simulation.
    ///
    /// Sends `GET /api/stop` and returns the body untouched.
    pub async fn stop(&self) -> Result<Payload, ClientError> {
        self.get(STOP_PATH).await
    }

    /// Query whether a simulation is running.
    ///
    /// Sends `GET /api/status` and returns the body untouched.
    pub async fn status(&self) -> Result<Payload, ClientError> {
        self.get(STATUS_PATH).await
    }

    /// Query status and decode it as a [`StatusReport`].
    pub async fn status_report(&self) -> Result<StatusReport, ClientError> {
        Ok(self.status().await?.json()?)
    }

    /// Stop the simulation and decode the acknowledgement.
    pub async fn stop_ack(&self) -> Result<StopAck, ClientError> {
        Ok(self.stop().await?.json()?)
    }

    // ---- private helpers ----

    async fn get(&self, path: &str) -> Result<Payload, ClientError> {
        let url = endpoints::join(&self.api_url, path);
        tracing::debug!(url = %url, "Sending control request");

        let response = self.client.get(&url).send().await?;
        let response = Self::ensure_success(response).await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?;
        Ok(Payload::new(status, body.to_vec()))
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`ClientError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}
