// Copyright 2025 Metricode Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the metrics publisher.
//!
//! Only failures that must abort a run are errors. Publish failures are
//! reported as an [`Outcome`](crate::sink::Outcome) instead.

use thiserror::Error;

/// Errors raised by collector, sink and settings construction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Caller-supplied data violates an invariant.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Whether this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Configuration(err.to_string())
    }
}

/// Result type for publisher operations.
pub type Result<T> = std::result::Result<T, Error>;
