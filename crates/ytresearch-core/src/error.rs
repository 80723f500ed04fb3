//! Error types for the research pipeline
//!
//! Provides a comprehensive error enum with human-readable messages
//! and JSON-friendly serialization.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all research operations
///
/// Expected "not found" and empty-page outcomes are modeled as values
/// (`Option` / empty vectors) at the client layer; only input problems,
/// empty aggregate results and genuinely unexpected faults surface here.
#[derive(Error, Debug)]
pub enum ResearchError {
    /// Caller-supplied input is missing or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Best-effort processing finished but produced nothing usable
    #[error("No results: {0}")]
    NoResults(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream payload did not match the expected shape
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),

    /// Rate limited by the API (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// The overall request budget ran out before all work completed
    #[error("Operation timed out")]
    Timeout,
}

impl ResearchError {
    /// Whether the error should be reported as a caller mistake (HTTP 400)
    /// rather than a server fault (HTTP 500).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ResearchError::InvalidInput(_) | ResearchError::NoResults(_)
        )
    }
}

impl Serialize for ResearchError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for research operations
pub type Result<T> = std::result::Result<T, ResearchError>;
