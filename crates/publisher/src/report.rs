//! Markdown rendering of result documents.
//!
//! This module renders a human-readable summary of a [`ResultDocument`]
//! for terminal output before or after publishing.

use crate::document::ResultDocument;
use chrono::{TimeZone, Utc};
use std::fmt::{self, Write};

/// Generate a markdown summary of a result document.
pub fn render_summary(document: &ResultDocument) -> String {
    let mut output = String::new();
    // Writing into a String is infallible.
    let _ = write_summary(&mut output, document);
    output
}

fn write_summary(output: &mut String, document: &ResultDocument) -> fmt::Result {
    writeln!(output, "# Benchmark Results: {}", document.project_id)?;
    writeln!(output)?;
    writeln!(output, "Runtime: {}", document.runtime)?;
    match Utc.timestamp_millis_opt(document.timestamp).single() {
        Some(time) => writeln!(output, "Recorded: {}", time.format("%Y-%m-%d %H:%M:%S UTC"))?,
        None => writeln!(output, "Recorded: {} ms", document.timestamp)?,
    }
    writeln!(output)?;

    writeln!(output, "## Fields")?;
    writeln!(output)?;
    if document.fields.is_empty() {
        writeln!(output, "_none_")?;
    } else {
        writeln!(output, "| Name | Value | Unit |")?;
        writeln!(output, "|------|-------|------|")?;
        for (name, field) in &document.fields {
            writeln!(output, "| {} | {} | {} |", name, field.value, field.unit)?;
        }
    }
    writeln!(output)?;

    writeln!(output, "## Time Series")?;
    writeln!(output)?;
    if document.timeseries_fields.is_empty() {
        writeln!(output, "_none_")?;
    } else {
        writeln!(output, "| Name | Points | Unit | Last |")?;
        writeln!(output, "|------|--------|------|------|")?;
        for (name, series) in &document.timeseries_fields {
            let last = series
                .last_value()
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(output, "| {} | {} | {} | {} |", name, series.len(), series.unit, last)?;
        }
    }
    writeln!(output)?;

    writeln!(output, "---")?;
    writeln!(
        output,
        "Total fields: {}, time series: {}",
        document.fields.len(),
        document.timeseries_fields.len()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldValue, ScalarField, TimeSeriesField};
    use std::collections::BTreeMap;

    #[test]
    fn test_summary_lists_fields_and_series() {
        let mut fields = BTreeMap::new();
        fields.insert(
            "json_parse".to_string(),
            ScalarField {
                value: FieldValue::Float(12.5),
                unit: "µs".to_string(),
            },
        );
        let mut timeseries_fields = BTreeMap::new();
        timeseries_fields.insert(
            "cpu_usage".to_string(),
            TimeSeriesField {
                values: vec![25.0, 20.0],
                timestamps: vec![1, 2],
                unit: "%".to_string(),
            },
        );
        let document = ResultDocument {
            project_id: "P1".to_string(),
            runtime: "rust".to_string(),
            fields,
            timeseries_fields,
            timestamp: 0,
        };

        let summary = render_summary(&document);
        assert!(summary.contains("# Benchmark Results: P1"));
        assert!(summary.contains("Recorded: 1970-01-01 00:00:00 UTC"));
        assert!(summary.contains("| json_parse | 12.5 | µs |"));
        assert!(summary.contains("| cpu_usage | 2 | % | 20 |"));
        assert!(summary.contains("Total fields: 1, time series: 1"));
    }

    #[test]
    fn test_summary_of_empty_document() {
        let document = ResultDocument {
            project_id: "P1".to_string(),
            runtime: "unknown".to_string(),
            fields: BTreeMap::new(),
            timeseries_fields: BTreeMap::new(),
            timestamp: 1_700_000_000_000,
        };
        let summary = render_summary(&document);
        assert_eq!(summary.matches("_none_").count(), 2);
    }
}
