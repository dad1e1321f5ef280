//! Parsers for field and series arguments.
//!
//! - `--field name=value[:unit]`, e.g. `latency=12.5:ms`
//! - `--series name=v1,v2,...@t1,t2,...[:unit]`, e.g. `cpu=25,35@1000,1500:%`
//!
//! The unit is whatever follows the last `:`.

use metricode_publisher::FieldValue;

/// A scalar field given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name.
    pub name: String,
    /// Parsed value.
    pub value: FieldValue,
    /// Unit label, empty when omitted.
    pub unit: String,
}

/// A time-series field given on the command line.
///
/// Lengths are not checked here; the collector rejects mismatched series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSpec {
    /// Field name.
    pub name: String,
    /// Values in order.
    pub values: Vec<f64>,
    /// Epoch-millisecond timestamps in order.
    pub timestamps: Vec<i64>,
    /// Unit label, empty when omitted.
    pub unit: String,
}

fn split_name(spec: &str) -> Result<(&str, &str), String> {
    match spec.split_once('=') {
        Some((name, rest)) if !name.trim().is_empty() => Ok((name.trim(), rest)),
        _ => Err(format!("expected NAME=VALUE, got '{}'", spec)),
    }
}

fn split_unit(rest: &str) -> (&str, &str) {
    rest.rsplit_once(':').unwrap_or((rest, ""))
}

/// Parse `name=value[:unit]`.
pub fn parse_field(spec: &str) -> Result<FieldSpec, String> {
    let (name, rest) = split_name(spec)?;
    let (value, unit) = split_unit(rest);
    if value.is_empty() {
        return Err(format!("field '{}' has no value", name));
    }
    let value = match value.parse::<FieldValue>() {
        Ok(value) => value,
        Err(never) => match never {},
    };

    Ok(FieldSpec {
        name: name.to_string(),
        value,
        unit: unit.to_string(),
    })
}

/// Parse `name=v1,v2,...@t1,t2,...[:unit]`.
pub fn parse_series(spec: &str) -> Result<SeriesSpec, String> {
    let (name, rest) = split_name(spec)?;
    let (points, unit) = split_unit(rest);
    let (values, timestamps) = points
        .split_once('@')
        .ok_or_else(|| format!("series '{}' must be VALUES@TIMESTAMPS", name))?;

    let values = parse_list::<f64>(values).map_err(|e| format!("series '{}': {}", name, e))?;
    let timestamps =
        parse_list::<i64>(timestamps).map_err(|e| format!("series '{}': {}", name, e))?;

    Ok(SeriesSpec {
        name: name.to_string(),
        values,
        timestamps,
        unit: unit.to_string(),
    })
}

fn parse_list<T>(list: &str) -> Result<Vec<T>, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    list.split(',')
        .map(|item| {
            item.trim()
                .parse::<T>()
                .map_err(|e| format!("invalid number '{}': {}", item.trim(), e))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_with_unit() {
        let field = parse_field("latency=12.5:ms").unwrap();
        assert_eq!(field.name, "latency");
        assert_eq!(field.value, FieldValue::Float(12.5));
        assert_eq!(field.unit, "ms");
    }

    #[test]
    fn test_parse_field_without_unit() {
        let field = parse_field("status=started").unwrap();
        assert_eq!(field.value, FieldValue::Text("started".to_string()));
        assert_eq!(field.unit, "");

        let field = parse_field("passed=true").unwrap();
        assert_eq!(field.value, FieldValue::Bool(true));
    }

    #[test]
    fn test_parse_field_errors() {
        assert!(parse_field("no-equals").is_err());
        assert!(parse_field("=5").is_err());
        assert!(parse_field("empty=").is_err());
    }

    #[test]
    fn test_parse_series() {
        let series = parse_series("cpu_usage=25,35.5,20@1000,1500,2000:%").unwrap();
        assert_eq!(series.name, "cpu_usage");
        assert_eq!(series.values, vec![25.0, 35.5, 20.0]);
        assert_eq!(series.timestamps, vec![1000, 1500, 2000]);
        assert_eq!(series.unit, "%");
    }

    #[test]
    fn test_parse_series_keeps_mismatched_lengths() {
        let series = parse_series("cpu=1,2@1000").unwrap();
        assert_eq!(series.values.len(), 2);
        assert_eq!(series.timestamps.len(), 1);
    }

    #[test]
    fn test_parse_series_errors() {
        assert!(parse_series("cpu=1,2").is_err());
        assert!(parse_series("cpu=1,x@1,2").is_err());
        assert!(parse_series("cpu=1@1.5").is_err());
    }
}
