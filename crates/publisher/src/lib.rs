//! Benchmark metrics collection and publishing for Metricode.
//!
//! Code under test records scalar fields and time-series fields on a
//! [`MetricsCollector`] during a run. At the end of the run the collector
//! publishes one [`ResultDocument`] through a [`PublishingSink`]: either an
//! HTTP ingestion endpoint or a direct database insert.
//!
//! # Quick Start
//!
//! ```no_run
//! use metricode_publisher::{CollectorConfig, HttpSink, HttpSinkConfig, MetricsCollector};
//!
//! # async fn run() -> metricode_publisher::Result<()> {
//! let mut collector = MetricsCollector::new(CollectorConfig::new("P1").with_runtime("rust"))?;
//! collector.add_field("latency_ms", 12.5, "ms");
//! collector.add_time_series_field("cpu_usage", vec![25.0, 35.0], vec![1_000, 1_500], "%")?;
//!
//! let sink = HttpSink::new(HttpSinkConfig::default())?;
//! let outcome = collector.publish(&sink).await;
//! if !outcome.is_success() {
//!     eprintln!("results not stored: {}", outcome);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`collector`] - The `MetricsCollector` and its configuration
//! - [`document`] - The published `ResultDocument`
//! - [`field`] - Scalar and time-series field types
//! - [`series`] - Point-by-point time-series recorder
//! - [`sink`] - The `PublishingSink` trait with HTTP and store variants
//! - [`settings`] - Environment-backed bootstrap settings
//! - [`report`] - Markdown summaries of result documents

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod collector;
pub mod document;
pub mod error;
pub mod field;
pub mod report;
pub mod series;
pub mod settings;
pub mod sink;

pub use collector::{CollectorConfig, MetricsCollector, DEFAULT_RUNTIME};
pub use document::ResultDocument;
pub use error::{Error, Result};
pub use field::{FieldValue, ScalarField, TimeSeriesField};
pub use series::TimeSeries;
pub use settings::Settings;
pub use sink::{
    HttpSink, HttpSinkConfig, Outcome, PublishingSink, SinkKind, StoreSink, StoreSinkConfig,
};
