// Copyright 2025 Metricode Contributors
// SPDX-License-Identifier: Apache-2.0

//! Incremental time-series recorder.
//!
//! Builds a [`TimeSeriesField`] point by point during a run. Values and
//! timestamps are pushed together, so the recorder cannot end up with
//! sequences of different lengths.

use crate::field::TimeSeriesField;
use chrono::Utc;

/// Point-by-point builder for a time-series field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    values: Vec<f64>,
    timestamps: Vec<i64>,
    unit: String,
}

impl TimeSeries {
    /// Create an empty series with a unit label.
    pub fn new(unit: impl Into<String>) -> Self {
        Self {
            values: Vec::new(),
            timestamps: Vec::new(),
            unit: unit.into(),
        }
    }

    /// Record a value stamped with the current time.
    pub fn record(&mut self, value: f64) {
        self.record_at(value, Utc::now().timestamp_millis());
    }

    /// Record a value at an explicit epoch-millisecond timestamp.
    pub fn record_at(&mut self, value: f64, timestamp: i64) {
        self.values.push(value);
        self.timestamps.push(timestamp);
    }

    /// Number of recorded points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no points were recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Unit label of the series.
    pub fn unit(&self) -> &str {
        &self.unit
    }
}

impl From<TimeSeries> for TimeSeriesField {
    fn from(series: TimeSeries) -> Self {
        TimeSeriesField {
            values: series.values,
            timestamps: series.timestamps,
            unit: series.unit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_at_keeps_correspondence() {
        let mut series = TimeSeries::new("%");
        series.record_at(25.0, 1_000);
        series.record_at(35.0, 1_500);
        series.record_at(20.0, 2_000);

        let field = TimeSeriesField::from(series);
        assert_eq!(field.values, vec![25.0, 35.0, 20.0]);
        assert_eq!(field.timestamps, vec![1_000, 1_500, 2_000]);
        assert_eq!(field.unit, "%");
    }

    #[test]
    fn test_record_uses_wall_clock() {
        let before = Utc::now().timestamp_millis();
        let mut series = TimeSeries::new("");
        series.record(1.0);
        let after = Utc::now().timestamp_millis();

        let field = TimeSeriesField::from(series);
        assert!(field.timestamps[0] >= before && field.timestamps[0] <= after);
    }

    #[test]
    fn test_empty_series() {
        let series = TimeSeries::new("ms");
        assert!(series.is_empty());
        assert_eq!(series.len(), 0);
        assert_eq!(series.unit(), "ms");
    }
}
