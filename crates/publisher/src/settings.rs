// Copyright 2025 Metricode Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bootstrap settings.
//!
//! [`Settings`] is the only place that reads process environment. It turns
//! the variables below into the explicit configuration structs consumed by
//! the collector and the sinks.
//!
//! | Variable | Used for |
//! |---|---|
//! | `PROJECT_ID` | collector project identifier (required) |
//! | `RUNTIME` | collector runtime label |
//! | `METRICS_API_URL` | HTTP sink endpoint |
//! | `DATABASE_URL` | store sink connection URL |
//! | `DATABASE_NAME` | store sink database name |
//! | `METRICS_SINK` | `http` (default) or `store` |
//! | `PUBLISH_TIMEOUT_SECS` | sink timeout in seconds |

use crate::collector::CollectorConfig;
use crate::error::Result;
use crate::sink::http::{self, HttpSink, HttpSinkConfig};
use crate::sink::store::{StoreSink, StoreSinkConfig, RESULTS_TABLE};
use crate::sink::{PublishingSink, SinkKind};
use config::{Config, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Raw settings as read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// `PROJECT_ID`
    pub project_id: Option<String>,
    /// `RUNTIME`
    pub runtime: Option<String>,
    /// `METRICS_API_URL`
    pub metrics_api_url: Option<String>,
    /// `DATABASE_URL`
    pub database_url: Option<String>,
    /// `DATABASE_NAME`
    pub database_name: Option<String>,
    /// `METRICS_SINK`
    pub metrics_sink: Option<String>,
    /// `PUBLISH_TIMEOUT_SECS`
    pub publish_timeout_secs: Option<u64>,
}

impl Settings {
    /// Load settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::default())
    }

    /// Load settings from an explicit variable map instead of the process
    /// environment. Keys use the environment variable names.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self> {
        Self::load(Environment::default().source(Some(vars)))
    }

    fn load(source: Environment) -> Result<Self> {
        let settings = Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }

    /// Collector configuration. Validation happens in
    /// [`MetricsCollector::new`](crate::MetricsCollector::new).
    pub fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            project_id: self.project_id.clone(),
            runtime: self.runtime.clone(),
        }
    }

    /// Sink timeout, 10 seconds unless overridden.
    pub fn timeout(&self) -> Duration {
        self.publish_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(http::DEFAULT_TIMEOUT)
    }

    /// Configured sink variant, HTTP unless overridden.
    pub fn sink_kind(&self) -> Result<SinkKind> {
        match self.metrics_sink.as_deref() {
            None | Some("") => Ok(SinkKind::default()),
            Some(kind) => kind.parse(),
        }
    }

    /// HTTP sink configuration.
    pub fn http_sink_config(&self) -> HttpSinkConfig {
        let endpoint = self
            .metrics_api_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| http::DEFAULT_ENDPOINT.to_string());
        HttpSinkConfig::new(endpoint).with_timeout(self.timeout())
    }

    /// Store sink configuration.
    pub fn store_sink_config(&self) -> StoreSinkConfig {
        StoreSinkConfig {
            url: self.database_url.clone(),
            database: self.database_name.clone(),
            timeout: self.timeout(),
        }
    }

    /// Build the sink for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`](crate::Error::Configuration) when the
    /// chosen sink's settings are missing or invalid.
    pub fn build_sink(&self, kind: SinkKind) -> Result<Box<dyn PublishingSink>> {
        let sink: Box<dyn PublishingSink> = match kind {
            SinkKind::Http => Box::new(HttpSink::new(self.http_sink_config())?),
            SinkKind::Store => Box::new(StoreSink::new(self.store_sink_config())?),
        };
        Ok(sink)
    }

    /// Describe where results would be published, for status output.
    ///
    /// Fails exactly when [`build_sink`](Self::build_sink) would.
    pub fn destination(&self, kind: SinkKind) -> Result<String> {
        match kind {
            SinkKind::Http => {
                let sink = HttpSink::new(self.http_sink_config())?;
                Ok(sink.endpoint().to_string())
            }
            SinkKind::Store => {
                let sink = StoreSink::new(self.store_sink_config())?;
                Ok(format!("{} (table {})", sink.database(), RESULTS_TABLE))
            }
        }
    }
}
