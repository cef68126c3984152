//! Error types for the crawler engine.
//!
//! This module provides a unified error handling system using
//! thiserror for ergonomic error definitions.

use thiserror::Error;

/// Result type alias using RiptideError
pub type Result<T> = std::result::Result<T, RiptideError>;

/// Main error type for crawler operations.
///
/// Variants map to the error-handling policy table: configuration and sink
/// errors are fatal and abort the run, everything else is absorbed per-URL.
#[derive(Error, Debug)]
pub enum RiptideError {
    /// Transport-level failure (DNS, connect, TLS, read timeout).
    #[error("transport failure: {0}")]
    Transport(String),

    /// Non-2xx HTTP response.
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// robots.txt denies the user agent for this URL.
    #[error("robots.txt denies fetch of {0}")]
    RobotsDenied(String),

    /// The extractor could not produce a page record.
    #[error("extraction failed for {0}")]
    Extraction(String),

    /// The configuration object failed validation.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Operation timed out.
    #[error("operation timed out after {0}ms")]
    Timeout(u64),

    /// URL parse error.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error (configuration file).
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// I/O error (robots fetch, sink writes, config file reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The result sink could not be written; this is fatal.
    #[error("result sink error: {0}")]
    Sink(String),

    /// Generic error with custom message.
    #[error("{0}")]
    Custom(String),

    /// Error from anyhow for interoperability at process boundaries.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RiptideError {
    /// Create a custom error with a message.
    pub fn custom<S: Into<String>>(msg: S) -> Self {
        RiptideError::Custom(msg.into())
    }

    /// Whether this error is fatal to the whole run (configuration or sink
    /// failure), as opposed to absorbed per-URL.
    pub fn is_fatal(&self) -> bool {
        matches!(self, RiptideError::Configuration(_) | RiptideError::Sink(_))
    }

    /// Whether a fetch that produced this error should feed back into the
    /// rate limiter's failure branch.
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            RiptideError::Transport(_) | RiptideError::HttpStatus { .. } | RiptideError::Timeout(_)
        )
    }
}
