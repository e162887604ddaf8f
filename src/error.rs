//! Error types for resource streams
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for resource streams
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Protocol Errors
    // ============================================================================
    /// A page response did not have the expected shape
    #[error("Response did not contain next page information: {message}")]
    ProtocolShape {
        /// What was wrong with the response
        message: String,
    },

    // ============================================================================
    // Fetch Errors
    // ============================================================================
    /// Transport-level HTTP failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Response body
        body: String,
    },

    /// Request did not complete in time
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout that elapsed
        timeout_ms: u64,
    },

    /// A page fetch failed outside the HTTP layer
    #[error("Dispatch failed: {message}")]
    Dispatch {
        /// Failure description
        message: String,
    },

    /// Page target could not be turned into a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Decode Errors
    // ============================================================================
    /// Body or item could not be decoded
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Invalid configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Failure description
        message: String,
    },

    /// Config file is not valid YAML
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file does not exist
    #[error("File not found: {path}")]
    FileNotFound {
        /// Missing path
        path: String,
    },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Error raised by a caller-provided dispatcher
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a protocol shape error
    pub fn protocol_shape(message: impl Into<String>) -> Self {
        Self::ProtocolShape {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a dispatch error
    pub fn dispatch(message: impl Into<String>) -> Self {
        Self::Dispatch {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error means a page response had the wrong shape
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, Error::ProtocolShape { .. })
    }

    /// Check if this error came from the page fetch itself
    pub fn is_fetch_failure(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::HttpStatus { .. }
                | Error::Timeout { .. }
                | Error::Dispatch { .. }
                | Error::InvalidUrl(_)
                | Error::Anyhow(_)
        )
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::dispatch(format!("page fetch task failed: {err}"))
    }
}

/// Result type alias for resource streams
pub type Result<T> = std::result::Result<T, Error>;
