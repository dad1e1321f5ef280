// Copyright 2025 Metricode Contributors
// SPDX-License-Identifier: Apache-2.0

//! Summary statistics over timing samples.

use serde::{Deserialize, Serialize};

/// Distribution of timing samples, all values in microseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    /// Minimum duration
    pub min: f64,
    /// Maximum duration
    pub max: f64,
    /// Mean duration
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// 50th percentile (median)
    pub p50: f64,
    /// 90th percentile
    pub p90: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
    /// Number of samples
    pub sample_count: usize,
}

impl Distribution {
    /// Create a distribution from a slice of durations in microseconds.
    ///
    /// An empty slice yields the all-zero default.
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = sorted
            .iter()
            .map(|d| {
                let diff = d - mean;
                diff * diff
            })
            .sum::<f64>()
            / n as f64;

        let percentile = |p: usize| sorted[(n * p / 100).min(n - 1)];

        Self {
            min: sorted[0],
            max: sorted[n - 1],
            mean,
            std_dev: variance.sqrt(),
            p50: percentile(50),
            p90: percentile(90),
            p95: percentile(95),
            p99: percentile(99),
            sample_count: n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribution_of_known_samples() {
        let samples = [300.0, 100.0, 250.0, 150.0, 200.0];
        let dist = Distribution::from_samples(&samples);

        assert_eq!(dist.min, 100.0);
        assert_eq!(dist.max, 300.0);
        assert_eq!(dist.mean, 200.0);
        assert_eq!(dist.p50, 200.0);
        assert_eq!(dist.p99, 300.0);
        assert_eq!(dist.sample_count, 5);
        assert!((dist.std_dev - 5000.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_single_sample() {
        let dist = Distribution::from_samples(&[42.0]);
        assert_eq!(dist.min, 42.0);
        assert_eq!(dist.max, 42.0);
        assert_eq!(dist.p95, 42.0);
        assert_eq!(dist.std_dev, 0.0);
    }

    #[test]
    fn test_empty_samples() {
        let dist = Distribution::from_samples(&[]);
        assert_eq!(dist, Distribution::default());
        assert_eq!(dist.sample_count, 0);
    }

    #[test]
    fn test_serializes_with_field_names() {
        let dist = Distribution::from_samples(&[1.0, 2.0]);
        let json = serde_json::to_value(&dist).unwrap();
        assert_eq!(json["sample_count"], 2);
        assert_eq!(json["max"], 2.0);
    }
}
