//! Custom error types for relay operations

use thiserror::Error;

/// Relay-related errors
#[derive(Error, Debug)]
pub enum RelayError {
    /// Request body failed validation
    #[error("Validation error: {message}")]
    Validation {
        message: String,
    },

    /// Required external-endpoint configuration is missing
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
    },

    /// Outbound call failed or returned a non-2xx status
    #[error("Upstream error: {message}")]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    /// Outbound call exceeded the configured timeout
    #[error("Upstream request timed out after {timeout_ms} ms")]
    Timeout {
        timeout_ms: u64,
    },

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

impl RelayError {
    /// Status code the relay answers with for this error.
    ///
    /// Upstream 4xx/5xx statuses are propagated; everything else that is
    /// not a validation failure maps to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Validation { .. } => 400,
            RelayError::Upstream {
                status: Some(status),
                ..
            } if (400..600).contains(status) => *status,
            _ => 500,
        }
    }

    /// Short error label used in the `error` field of the response body
    pub fn label(&self) -> &'static str {
        match self {
            RelayError::Validation { .. } => "Bad Request",
            RelayError::Configuration { .. } => "Configuration Error",
            RelayError::Upstream { .. } | RelayError::Timeout { .. } => "Translation Failed",
            RelayError::Client(_) => "Internal Server Error",
        }
    }

    /// Human-readable message surfaced to the caller
    pub fn message(&self) -> String {
        match self {
            RelayError::Validation { message }
            | RelayError::Configuration { message }
            | RelayError::Upstream { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for relay operations
pub type Result<T> = std::result::Result<T, RelayError>;
