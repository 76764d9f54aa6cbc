//! Unified error types for the crate
//!
//! Everything that can go wrong while fetching or configuring the inbox is
//! collected in [`InboxError`]. The presentation layer never sees these
//! variants: the fetch path collapses them into a single user-facing failure
//! message, and the typed detail exists for logs and for `MessageSource`
//! implementors.

use thiserror::Error;

/// Error type for fetch and configuration operations
#[derive(Debug, Error)]
pub enum InboxError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed message payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias using InboxError
pub type Result<T> = std::result::Result<T, InboxError>;
