//! Error type definitions for the catalog and proxy services
//!
//! Every failure in the application is request-scoped. The web layer maps
//! these variants to HTTP statuses and a flat `{"error": ...}` body; nothing
//! here is fatal to the process.

use thiserror::Error;

/// Top-level application error type
///
/// Uses `thiserror` to provide automatic error trait implementations and
/// proper error chaining.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input validation errors (missing or malformed request parameters)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Access key mismatch on the gated proxy
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    /// Upstream replied with a non-success status; relayed to the caller
    #[error("Upstream error: {reason}")]
    Upstream { status: u16, reason: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// JSON parse failures while loading reference data
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create an upstream error carrying the upstream status and reason
    pub fn upstream<S: Into<String>>(status: u16, reason: S) -> Self {
        Self::Upstream {
            status,
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
