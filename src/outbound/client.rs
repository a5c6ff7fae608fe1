//! Relay client built on `reqwest`.

use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::config::OutboundConfig;
use crate::observability::metrics;

/// Body sent with every relayed call.
const RELAY_BODY: &str = "";

/// Errors that can occur during the outbound call.
#[derive(Debug, Error)]
pub enum OutboundCallError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, protocol or body-read failure.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Status and body of a relayed call.
#[derive(Debug, Clone)]
pub struct OutboundResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Issues the single POST behind `/httpclient`.
#[derive(Clone)]
pub struct OutboundClient {
    client: Client,
    url: String,
}

impl OutboundClient {
    /// Create a client from configuration.
    ///
    /// Without `timeout_secs` the `reqwest` default (no timeout) applies.
    /// System proxy settings are ignored.
    pub fn new(config: &OutboundConfig) -> Result<Self, OutboundCallError> {
        let mut builder = Client::builder().no_proxy();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(OutboundCallError::Build)?;

        Ok(Self {
            client,
            url: config.url.trim().to_string(),
        })
    }

    /// Send the relay POST and read the whole response body.
    pub async fn relay(&self) -> Result<OutboundResponse, OutboundCallError> {
        let start = Instant::now();

        tracing::info!(uri = %self.url, method = "POST", "Rest request");
        tracing::debug!(body = RELAY_BODY, "Send request");

        let response = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(RELAY_BODY)
            .send()
            .await
            .map_err(|source| self.request_error(source))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| self.request_error(source))?;

        tracing::info!(
            status_code = status.as_u16(),
            status_text = status.canonical_reason().unwrap_or(""),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Rest response"
        );
        tracing::debug!(body = %body, "Get response");

        metrics::record_outbound_call(Some(status.as_u16()));

        Ok(OutboundResponse { status, body })
    }

    fn request_error(&self, source: reqwest::Error) -> OutboundCallError {
        tracing::error!(uri = %self.url, error = %source, "Outbound call failed");
        metrics::record_outbound_call(None);
        OutboundCallError::Request {
            url: self.url.clone(),
            source,
        }
    }
}
