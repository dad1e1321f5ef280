// Copyright 2025 Metricode Contributors
// SPDX-License-Identifier: Apache-2.0

//! Publishing sinks.
//!
//! A sink delivers one [`ResultDocument`] to a backend and classifies the
//! attempt as an [`Outcome`]. Sinks never return errors or panic for
//! ordinary backend or network failures; misconfiguration is caught when
//! the sink is constructed.
//!
//! # Variants
//!
//! - [`HttpSink`] - POSTs the document as JSON to an ingestion endpoint
//! - [`StoreSink`] - inserts the document as one record into the results table

pub mod http;
pub mod store;

pub use http::{HttpSink, HttpSinkConfig};
pub use store::{StoreSink, StoreSinkConfig};

use crate::document::ResultDocument;
use crate::error::Error;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of one publish attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// The backend acknowledged the document.
    Success,
    /// The backend answered but refused the document.
    BackendRejected(String),
    /// The backend could not be reached or the exchange failed.
    TransportFailure(String),
}

impl Outcome {
    /// Whether the document was stored.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    /// Failure detail, `None` on success.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Outcome::Success => None,
            Outcome::BackendRejected(detail) | Outcome::TransportFailure(detail) => Some(detail),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success => f.write_str("success"),
            Outcome::BackendRejected(detail) => write!(f, "backend rejected: {}", detail),
            Outcome::TransportFailure(detail) => write!(f, "transport failure: {}", detail),
        }
    }
}

/// Delivery mechanism for result documents.
///
/// Implementations perform a single attempt per call and report the
/// result as an [`Outcome`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublishingSink: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Deliver one document.
    async fn send(&self, document: &ResultDocument) -> Outcome;
}

/// Which sink variant to publish through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SinkKind {
    /// HTTP ingestion endpoint.
    #[default]
    Http,
    /// Direct database insert.
    Store,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Http => f.write_str("http"),
            SinkKind::Store => f.write_str("store"),
        }
    }
}

impl FromStr for SinkKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" | "api" => Ok(SinkKind::Http),
            "store" | "db" | "database" => Ok(SinkKind::Store),
            other => Err(Error::configuration(format!(
                "Unknown sink '{}': expected 'http' or 'store'",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_detail() {
        assert_eq!(Outcome::Success.detail(), None);
        assert_eq!(
            Outcome::BackendRejected("db full".to_string()).detail(),
            Some("db full")
        );
        assert!(!Outcome::TransportFailure("refused".to_string()).is_success());
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(Outcome::BackendRejected("db full".to_string())).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"outcome": "backend_rejected", "detail": "db full"})
        );
    }

    #[test]
    fn test_sink_kind_parsing() {
        assert_eq!("http".parse::<SinkKind>().unwrap(), SinkKind::Http);
        assert_eq!(" Store ".parse::<SinkKind>().unwrap(), SinkKind::Store);
        let err = "kafka".parse::<SinkKind>().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("kafka"));
    }
}
