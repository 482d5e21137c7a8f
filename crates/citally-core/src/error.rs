//! Error types for citally-core

use thiserror::Error as ThisError;

/// Result type alias for citally operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for citally operations
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The API credential was not provided
    #[error("Missing credential: {0}")]
    MissingToken(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(String),

    /// Workflow API error (non-success status, bad payload)
    #[error("Workflow error: {0}")]
    Workflow(String),

    /// API rate limit exceeded
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(String),

    /// JSON parsing or encoding error
    #[error("JSON error: {0}")]
    Json(String),

    /// Runtime error (Tokio, threading, etc.)
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // reqwest errors may embed the request URL but never headers
        Error::Http(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err.to_string())
    }
}

/// Fieldless error category for zero-cost pattern matching.
///
/// Single byte representation (`#[repr(u8)]`), `Copy`, no allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration error
    Config,
    /// Missing credential
    MissingToken,
    /// I/O operation error
    Io,
    /// HTTP transport error
    Http,
    /// Workflow API error
    Workflow,
    /// API rate limit exceeded
    RateLimitExceeded,
    /// YAML parsing error
    Yaml,
    /// JSON error
    Json,
    /// Runtime error
    Runtime,
}

impl Error {
    /// Get the error kind. Zero allocation, returns a Copy enum.
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::MissingToken(_) => ErrorKind::MissingToken,
            Error::Io(_) => ErrorKind::Io,
            Error::Http(_) => ErrorKind::Http,
            Error::Workflow(_) => ErrorKind::Workflow,
            Error::RateLimitExceeded(_) => ErrorKind::RateLimitExceeded,
            Error::Yaml(_) => ErrorKind::Yaml,
            Error::Json(_) => ErrorKind::Json,
            Error::Runtime(_) => ErrorKind::Runtime,
        }
    }

    /// Borrow the error message without allocating.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Error::Config(msg)
            | Error::MissingToken(msg)
            | Error::Http(msg)
            | Error::Workflow(msg)
            | Error::RateLimitExceeded(msg)
            | Error::Yaml(msg)
            | Error::Json(msg)
            | Error::Runtime(msg) => msg,
            Error::Io(_) => "I/O error",
        }
    }
}
