//! Error types for visit-planner operations.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    /// Bad or missing recurrence input. Detected before any generation work.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input to the matcher that cannot form a query (e.g. no drafts).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The partner availability lookup failed.
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),
}

/// Failures reported by a [`PartnerLookup`](crate::matcher::PartnerLookup) implementation.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("availability service unavailable: {0}")]
    Unavailable(String),

    #[error("availability lookup timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed availability response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl PlannerError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        PlannerError::Configuration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
