// Copyright 2025 Metricode Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP ingestion sink.
//!
//! Sends the result document as a JSON body in a single `POST`. Only a
//! `201 Created` response counts as success; any other status is a
//! rejection carrying the response body, and any network-level error is a
//! transport failure.

use super::{Outcome, PublishingSink};
use crate::document::ResultDocument;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use tracing::warn;

/// Default ingestion endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5003/api/benchmarks";

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`HttpSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSinkConfig {
    /// Endpoint receiving the `POST`.
    pub endpoint: String,
    /// Upper bound for the whole request.
    pub timeout: Duration,
}

impl Default for HttpSinkConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpSinkConfig {
    /// Config for a specific endpoint with the default timeout.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Sink that POSTs result documents to an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSink {
    /// Create a sink for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the endpoint is not a valid
    /// `http`/`https` URL or the HTTP client cannot be built.
    pub fn new(config: HttpSinkConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            Error::configuration(format!("Invalid metrics endpoint '{}': {}", config.endpoint, e))
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::configuration(format!(
                "Unsupported metrics endpoint scheme '{}'",
                endpoint.scheme()
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    /// Endpoint this sink posts to.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

#[async_trait]
impl PublishingSink for HttpSink {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn send(&self, document: &ResultDocument) -> Outcome {
        let response = match self
            .client
            .post(self.endpoint.clone())
            .json(document)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Outcome::TransportFailure(e.to_string()),
        };

        let status = response.status();
        if status == StatusCode::CREATED {
            return Outcome::Success;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => format!("<unreadable response body: {}>", e),
        };
        warn!(
            status = status.as_u16(),
            endpoint = %self.endpoint,
            body_len = body.len(),
            "Metrics endpoint refused document"
        );
        Outcome::BackendRejected(body)
    }
}
