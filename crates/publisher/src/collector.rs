// Copyright 2025 Metricode Contributors
// SPDX-License-Identifier: Apache-2.0

//! Metrics collector.
//!
//! A [`MetricsCollector`] is the unit of one benchmark run: it is built
//! once from a [`CollectorConfig`], accumulates scalar and time-series
//! fields, and publishes a [`ResultDocument`] snapshot through a
//! [`PublishingSink`].
//!
//! # Lifecycle
//!
//! ```text
//! Constructed ──add_*──▶ Accumulating ──publish──▶ Published
//!                            ▲    │                    │
//!                            └────┘ add_*              │ add_*
//!                            ▲                         │
//!                            └─────────────────────────┘
//! ```
//!
//! Publishing does not consume or freeze the collector. A later `publish`
//! sends the current state again as an independent document.

use crate::document::ResultDocument;
use crate::error::{Error, Result};
use crate::field::{FieldValue, ScalarField, TimeSeriesField};
use crate::series::TimeSeries;
use crate::sink::{Outcome, PublishingSink};
use chrono::Utc;
use metricode_harness::Distribution;
use std::collections::BTreeMap;
use tracing::{debug, error, info, warn};

/// Runtime label used when none is configured.
pub const DEFAULT_RUNTIME: &str = "unknown";

/// Identifiers a collector is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Project identifier, required and non-empty.
    pub project_id: Option<String>,
    /// Runtime label, defaults to [`DEFAULT_RUNTIME`].
    pub runtime: Option<String>,
}

impl CollectorConfig {
    /// Config for a project with the default runtime.
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            runtime: None,
        }
    }

    /// Set the runtime label.
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }
}

/// Accumulates the fields of one benchmark run.
#[derive(Debug, Clone)]
pub struct MetricsCollector {
    project_id: String,
    runtime: String,
    fields: BTreeMap<String, ScalarField>,
    timeseries_fields: BTreeMap<String, TimeSeriesField>,
    timestamp: i64,
}

impl MetricsCollector {
    /// Create a collector and capture the run timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the project ID is absent or
    /// blank.
    pub fn new(config: CollectorConfig) -> Result<Self> {
        let project_id = config
            .project_id
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| Error::configuration("Missing required project ID (PROJECT_ID)"))?;
        let runtime = config
            .runtime
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_RUNTIME.to_string());

        let collector = Self {
            project_id,
            runtime,
            fields: BTreeMap::new(),
            timeseries_fields: BTreeMap::new(),
            timestamp: Utc::now().timestamp_millis(),
        };
        debug!(
            project_id = %collector.project_id,
            runtime = %collector.runtime,
            timestamp = collector.timestamp,
            "Metrics collector created"
        );
        Ok(collector)
    }

    /// Project identifier.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Runtime label.
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    /// Construction time in epoch milliseconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Set a scalar field, replacing any previous field of the same name.
    ///
    /// Non-finite floats are stored as text, see [`FieldValue`].
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
        unit: impl Into<String>,
    ) {
        self.fields.insert(
            name.into(),
            ScalarField {
                value: value.into(),
                unit: unit.into(),
            },
        );
    }

    /// Set a time-series field, replacing any previous field of the same
    /// name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if `values` and `timestamps` differ in
    /// length. Nothing is stored in that case.
    pub fn add_time_series_field(
        &mut self,
        name: impl Into<String>,
        values: Vec<f64>,
        timestamps: Vec<i64>,
        unit: impl Into<String>,
    ) -> Result<()> {
        let name = name.into();
        if values.len() != timestamps.len() {
            return Err(Error::validation(format!(
                "Time series '{}' has {} values but {} timestamps",
                name,
                values.len(),
                timestamps.len()
            )));
        }

        self.timeseries_fields.insert(
            name,
            TimeSeriesField {
                values,
                timestamps,
                unit: unit.into(),
            },
        );
        Ok(())
    }

    /// Store a recorded [`TimeSeries`] under `name`.
    pub fn add_time_series(&mut self, name: impl Into<String>, series: TimeSeries) {
        self.timeseries_fields.insert(name.into(), series.into());
    }

    /// Record the headline statistics of a timing distribution as
    /// `<prefix>_mean`, `_min`, `_max`, `_p50`, `_p95` and `_p99`.
    pub fn record_distribution(&mut self, prefix: &str, distribution: &Distribution, unit: &str) {
        let stats = [
            ("mean", distribution.mean),
            ("min", distribution.min),
            ("max", distribution.max),
            ("p50", distribution.p50),
            ("p95", distribution.p95),
            ("p99", distribution.p99),
        ];
        for (suffix, value) in stats {
            self.add_field(format!("{}_{}", prefix, suffix), value, unit);
        }
    }

    /// Scalar field by name.
    pub fn field(&self, name: &str) -> Option<&ScalarField> {
        self.fields.get(name)
    }

    /// Time-series field by name.
    pub fn time_series_field(&self, name: &str) -> Option<&TimeSeriesField> {
        self.timeseries_fields.get(name)
    }

    /// Snapshot of the current state.
    pub fn document(&self) -> ResultDocument {
        ResultDocument {
            project_id: self.project_id.clone(),
            runtime: self.runtime.clone(),
            fields: self.fields.clone(),
            timeseries_fields: self.timeseries_fields.clone(),
            timestamp: self.timestamp,
        }
    }

    /// Send the current snapshot through `sink` once.
    ///
    /// Failures are logged and returned as the [`Outcome`]; they are never
    /// raised. There is no retry and no guard against publishing twice.
    pub async fn publish(&self, sink: &dyn PublishingSink) -> Outcome {
        let document = self.document();
        let outcome = sink.send(&document).await;

        match &outcome {
            Outcome::Success => info!(
                project_id = %self.project_id,
                timestamp = self.timestamp,
                sink = sink.name(),
                fields = document.fields.len(),
                timeseries_fields = document.timeseries_fields.len(),
                "Benchmark results published"
            ),
            Outcome::BackendRejected(detail) => warn!(
                project_id = %self.project_id,
                sink = sink.name(),
                detail = %detail,
                "Backend rejected benchmark results"
            ),
            Outcome::TransportFailure(detail) => error!(
                project_id = %self.project_id,
                sink = sink.name(),
                detail = %detail,
                "Failed to deliver benchmark results"
            ),
        }

        outcome
    }
}
