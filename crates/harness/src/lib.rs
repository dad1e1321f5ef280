//! Timing harness for Metricode benchmark runs.
//!
//! The harness repeatedly invokes a unit of work, times every invocation
//! against a monotonic clock and reduces the samples to a summary value
//! that can be recorded as a metrics field.
//!
//! # Quick Start
//!
//! ```
//! use metricode_harness::{measure, sample};
//!
//! let mut buffer = Vec::new();
//! let mean_us = measure(|| buffer.push(1u8), 100).unwrap();
//! assert!(mean_us >= 0.0);
//!
//! let samples = sample(|| { std::hint::black_box(2 + 2); }, 50).unwrap();
//! let distribution = samples.distribution();
//! assert_eq!(distribution.sample_count, 50);
//! ```
//!
//! # Modules
//!
//! - [`measure`] - The sampling loop and mean reduction
//! - [`distribution`] - Summary statistics over recorded samples

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod distribution;
pub mod measure;

pub use distribution::Distribution;
pub use measure::{measure, measure_default, sample, HarnessError, Samples, DEFAULT_ITERATIONS};
