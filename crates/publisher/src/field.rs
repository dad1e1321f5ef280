// Copyright 2025 Metricode Contributors
// SPDX-License-Identifier: Apache-2.0

//! Field types stored in a result document.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Value of a scalar field.
///
/// Serialized untagged, so a field value appears in JSON as a plain
/// number, string or boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Integral number.
    Integer(i64),
    /// Floating-point number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Short text.
    Text(String),
}

impl FieldValue {
    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Bool(_) | Self::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Text(v) => f.write_str(v),
        }
    }
}

/// Parses command-line text: integer, then float, then `true`/`false`,
/// falling back to text.
impl FromStr for FieldValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(v) = s.parse::<i64>() {
            return Ok(Self::Integer(v));
        }
        if let Ok(v) = s.parse::<f64>() {
            if v.is_finite() {
                return Ok(Self::Float(v));
            }
        }
        Ok(match s {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => Self::Text(s.to_string()),
        })
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(v: $t) -> Self {
                Self::Integer(i64::from(v))
            }
        })*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        Self::from(f64::from(v))
    }
}

/// JSON has no NaN or infinity, so non-finite floats are kept as text
/// (`"NaN"`, `"inf"`, `"-inf"`) instead of being serialized as `null`.
impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        if v.is_finite() {
            Self::Float(v)
        } else {
            Self::Text(v.to_string())
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// A named scalar measurement with a unit annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarField {
    /// Measured value.
    pub value: FieldValue,
    /// Unit label, empty when unitless.
    pub unit: String,
}

/// A named pair of parallel value and timestamp sequences.
///
/// `values[i]` was observed at `timestamps[i]` (epoch milliseconds). Both
/// sequences always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesField {
    /// Observed values.
    pub values: Vec<f64>,
    /// Observation times in epoch milliseconds.
    pub timestamps: Vec<i64>,
    /// Unit label, empty when unitless.
    pub unit: String,
}

impl TimeSeriesField {
    /// Number of points in the series.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent value by index.
    pub fn last_value(&self) -> Option<f64> {
        self.values.last().copied()
    }
}
