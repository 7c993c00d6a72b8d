//! Error types for Trimlink
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.
//!
//! The variants follow the failure taxonomy of the remote API:
//! authentication failures force a logout, validation failures are surfaced
//! inline next to the form that produced them, and transport failures leave
//! local state untouched so the user can retry.

use thiserror::Error;

/// Main error type for Trimlink operations
///
/// This enum encompasses all possible errors that can occur while talking to
/// the shortening service: configuration loading, session persistence,
/// HTTP transport, and server-side rejections that are not tied to a
/// specific form field.
#[derive(Error, Debug)]
pub enum TrimlinkError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication errors (401 responses, missing or expired session)
    ///
    /// Any operation that surfaces this variant must be followed by a forced
    /// logout; the stored session is no longer usable.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Server-side validation failures (rejected field values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found (404 responses)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected API responses (5xx, malformed bodies)
    #[error("API error: {0}")]
    Api(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Session storage errors (OS credential store)
    #[error("Session store error: {0}")]
    SessionStore(#[from] keyring::Error),
}

/// Result type alias for Trimlink operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

/// Returns `true` when the error is an authentication failure.
///
/// Callers use this to decide whether to attempt a silent token refresh or
/// to cascade into a forced logout.
///
/// # Examples
///
/// ```
/// use trimlink::error::{is_authentication, TrimlinkError};
///
/// let err = anyhow::Error::from(TrimlinkError::Authentication("expired".to_string()));
/// assert!(is_authentication(&err));
///
/// let err = anyhow::Error::from(TrimlinkError::Config("bad".to_string()));
/// assert!(!is_authentication(&err));
/// ```
pub fn is_authentication(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<TrimlinkError>(),
        Some(TrimlinkError::Authentication(_))
    )
}
