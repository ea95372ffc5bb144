//! Error types for the YouTube search library
//!
//! Callers of [`crate::TubeScraper::search`] only ever see input errors
//! (`InvalidQuery`, `InvalidHeader`) or [`TubeSearchError::Exhausted`]. The
//! remaining variants come from the transport and are consumed by the
//! retry loop.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all search operations
///
/// Implements Display for human-readable messages and Serialize
/// for Tauri command compatibility.
#[derive(Error, Debug)]
pub enum TubeSearchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("Failed to decode JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Search query was empty or otherwise unusable
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Client configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Caller-supplied header that cannot be sent
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Rate limited by server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Server answered 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server answered with a status the client does not handle
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Every search attempt failed
    #[error("Unable to retrieve searchable data after {attempts} attempts")]
    Exhausted { attempts: u32 },
}

impl Serialize for TubeSearchError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for search operations
pub type Result<T> = std::result::Result<T, TubeSearchError>;
