// Copyright 2025 Metricode Contributors
// SPDX-License-Identifier: Apache-2.0

//! Sampling loop for timed operations.
//!
//! Every invocation is bracketed by two reads of [`Instant`], so only the
//! time spent inside the operation lands in the recorded sample. Durations
//! are kept as fractional microseconds.

use crate::distribution::Distribution;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

/// Iteration count used by [`measure_default`].
pub const DEFAULT_ITERATIONS: usize = 1000;

const MICROS_PER_SEC: f64 = 1_000_000.0;

/// Errors that can occur while measuring an operation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HarnessError {
    /// The iteration count was zero.
    #[error("Invalid iteration count {0}: at least one iteration is required")]
    InvalidIterations(usize),
}

/// Result type for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Per-invocation durations recorded by [`sample`], in microseconds.
///
/// A `Samples` value always holds at least one duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    durations: Vec<f64>,
}

impl Samples {
    /// Arithmetic mean of the recorded durations, in microseconds.
    pub fn mean(&self) -> f64 {
        self.durations.iter().sum::<f64>() / self.durations.len() as f64
    }

    /// Number of recorded durations.
    pub fn len(&self) -> usize {
        self.durations.len()
    }

    /// Whether no durations were recorded.
    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }

    /// Recorded durations in invocation order.
    pub fn as_slice(&self) -> &[f64] {
        &self.durations
    }

    /// Summary statistics over the recorded durations.
    pub fn distribution(&self) -> Distribution {
        Distribution::from_samples(&self.durations)
    }
}

/// Invoke `operation` `iterations` times and record each invocation's
/// duration in microseconds.
///
/// The invocations run sequentially with no delay between them. Any side
/// effects of `operation` happen once per iteration.
///
/// # Errors
///
/// Returns [`HarnessError::InvalidIterations`] when `iterations` is zero.
pub fn sample<F>(mut operation: F, iterations: usize) -> Result<Samples>
where
    F: FnMut(),
{
    if iterations == 0 {
        return Err(HarnessError::InvalidIterations(iterations));
    }

    let mut durations = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let start = Instant::now();
        operation();
        let elapsed = start.elapsed();
        durations.push(elapsed.as_secs_f64() * MICROS_PER_SEC);
    }

    let samples = Samples { durations };
    debug!(iterations, mean_us = samples.mean(), "Operation sampled");
    Ok(samples)
}

/// Mean duration of `operation` over `iterations` invocations, in
/// microseconds.
///
/// # Errors
///
/// Returns [`HarnessError::InvalidIterations`] when `iterations` is zero.
/// The mean of an empty sample set is never reported as `0.0` or `NaN`.
pub fn measure<F>(operation: F, iterations: usize) -> Result<f64>
where
    F: FnMut(),
{
    sample(operation, iterations).map(|samples| samples.mean())
}

/// [`measure`] with [`DEFAULT_ITERATIONS`] iterations.
pub fn measure_default<F>(operation: F) -> Result<f64>
where
    F: FnMut(),
{
    measure(operation, DEFAULT_ITERATIONS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_zero_iterations_is_rejected() {
        let mut calls = 0;
        let result = measure(|| calls += 1, 0);
        assert_eq!(result, Err(HarnessError::InvalidIterations(0)));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_operation_runs_once_per_iteration() {
        let mut calls = 0;
        let samples = sample(|| calls += 1, 37).unwrap();
        assert_eq!(calls, 37);
        assert_eq!(samples.len(), 37);
    }

    #[test]
    fn test_noop_mean_is_small_and_non_negative() {
        let mean = measure(|| {}, 1000).unwrap();
        assert!(mean >= 0.0);
        assert!(mean.is_finite());
        assert!(mean < 1_000.0, "no-op mean was {mean} µs");
    }

    #[test]
    fn test_measure_default_uses_default_iterations() {
        let mut calls = 0;
        let mean = measure_default(|| calls += 1).unwrap();
        assert_eq!(calls, DEFAULT_ITERATIONS);
        assert!(mean >= 0.0);
    }

    #[test]
    fn test_sleep_is_reported_in_microseconds() {
        let mean = measure(|| std::thread::sleep(Duration::from_millis(2)), 3).unwrap();
        assert!(mean >= 2_000.0, "mean was {mean} µs");
    }

    #[test]
    fn test_mean_matches_recorded_samples() {
        let samples = sample(|| std::thread::sleep(Duration::from_micros(50)), 10).unwrap();
        let expected = samples.as_slice().iter().sum::<f64>() / 10.0;
        assert!((samples.mean() - expected).abs() < f64::EPSILON * 10.0);
        assert!(!samples.is_empty());
    }
}
