//! `reqwest` client for the application server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder};
use shared_types::ProcessRequest;
use tracing::{debug, error};

use crate::domain::config::UpstreamConfig;
use crate::ports::outbound::{ApplicationServer, RelayError, RelayedResponse};

/// HTTP implementation of `ApplicationServer`.
pub struct HttpApplicationServer {
    client: Client,
    base_url: String,
    process_timeout: Duration,
    health_timeout: Duration,
}

impl HttpApplicationServer {
    pub fn new(config: &UpstreamConfig) -> Result<Self, RelayError> {
        let client = Client::builder()
            .connect_timeout(config.process_timeout)
            .build()
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            process_timeout: config.process_timeout,
            health_timeout: config.health_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn relay(&self, request: RequestBuilder) -> Result<RelayedResponse, RelayError> {
        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(classify)?;

        debug!(status, bytes = body.len(), "Application server responded");
        Ok(RelayedResponse {
            status,
            content_type,
            body,
        })
    }
}

fn classify(e: reqwest::Error) -> RelayError {
    if e.is_timeout() {
        error!("Application server timeout");
        RelayError::Timeout
    } else if e.is_connect() {
        error!(error = %e, "Cannot connect to application server");
        RelayError::Unreachable(e.to_string())
    } else {
        error!(error = %e, "Application server transport error");
        RelayError::Transport(e.to_string())
    }
}

#[async_trait]
impl ApplicationServer for HttpApplicationServer {
    async fn process(&self, number: i64) -> Result<RelayedResponse, RelayError> {
        self.relay(
            self.client
                .post(self.url("/process"))
                .json(&ProcessRequest::new(number))
                .timeout(self.process_timeout),
        )
        .await
    }

    async fn numbers(&self) -> Result<RelayedResponse, RelayError> {
        self.relay(
            self.client
                .get(self.url("/numbers"))
                .timeout(self.process_timeout),
        )
        .await
    }

    async fn health(&self) -> Result<u16, RelayError> {
        let response = self
            .client
            .get(self.url("/health"))
            .timeout(self.health_timeout)
            .send()
            .await
            .map_err(classify)?;
        Ok(response.status().as_u16())
    }
}
