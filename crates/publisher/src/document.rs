//! Result document types.
//!
//! This module provides the `ResultDocument` struct, the snapshot of one
//! benchmark run that every sink delivers.

use crate::field::{ScalarField, TimeSeriesField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of one benchmark run's metrics, materialized at publish time.
///
/// Serializes with the keys `projectId`, `runtime`, `fields`,
/// `timeseriesFields` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDocument {
    /// Project the run belongs to.
    pub project_id: String,
    /// Runtime label of the run.
    pub runtime: String,
    /// Scalar fields by name.
    pub fields: BTreeMap<String, ScalarField>,
    /// Time-series fields by name.
    pub timeseries_fields: BTreeMap<String, TimeSeriesField>,
    /// Collector construction time in epoch milliseconds.
    pub timestamp: i64,
}

impl ResultDocument {
    /// Serialize the document to its JSON wire form.
    pub fn to_json(&self) -> serde_json::Value {
        // All map keys are strings, so conversion cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
