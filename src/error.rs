//! Error types for the portal MCP server.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when interacting with the portal API.
#[derive(Error, Debug)]
pub enum PortalApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code or an unsuccessful envelope
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed or no session
    #[error("Authentication failed")]
    Unauthorized,

    /// Signed-in user lacks the role for this operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Backend answered with `success: false`
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Client-side or backend field validation rejected the input
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Session storage failed
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Generic API error with context
    #[error("API error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Errors raised by the persisted session store.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Session lock poisoned")]
    Poisoned,
}

/// Convenience type alias for Results with PortalApiError
pub type PortalApiResult<T> = Result<T, PortalApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with SessionError
pub type SessionResult<T> = Result<T, SessionError>;
