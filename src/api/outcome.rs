//! Discriminated result for API operations
//!
//! The server signals field-level rejections with a `{ "message": ... }`
//! body rather than a distinct status class, so each operation returns an
//! explicit two-armed outcome instead of sniffing response fields at the
//! call site.

/// Outcome of an API operation that the server may reject with a message.
///
/// `Success` carries the parsed response; `Rejected` carries the server's
/// human-readable message, to be surfaced inline without discarding local
/// state (the editing dialog stays open, the cache stays untouched).
///
/// Transport failures and authentication failures are NOT outcomes; they
/// propagate as errors because they require a retry or a forced logout
/// rather than an inline message.
///
/// # Examples
///
/// ```
/// use trimlink::api::ApiOutcome;
///
/// let ok: ApiOutcome<u32> = ApiOutcome::Success(7);
/// assert!(ok.is_success());
///
/// let rejected: ApiOutcome<u32> = ApiOutcome::Rejected("Title is required".to_string());
/// assert_eq!(rejected.rejection_message(), Some("Title is required"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome<T> {
    /// The server accepted the request; the parsed response is attached.
    Success(T),

    /// The server rejected the request with the attached message.
    Rejected(String),
}

impl<T> ApiOutcome<T> {
    /// Returns `true` for the `Success` arm.
    pub fn is_success(&self) -> bool {
        matches!(self, ApiOutcome::Success(_))
    }

    /// Returns `true` for the `Rejected` arm.
    pub fn is_rejected(&self) -> bool {
        matches!(self, ApiOutcome::Rejected(_))
    }

    /// Consumes the outcome, returning the success value when present.
    pub fn success(self) -> Option<T> {
        match self {
            ApiOutcome::Success(value) => Some(value),
            ApiOutcome::Rejected(_) => None,
        }
    }

    /// Returns the rejection message when present.
    pub fn rejection_message(&self) -> Option<&str> {
        match self {
            ApiOutcome::Success(_) => None,
            ApiOutcome::Rejected(message) => Some(message),
        }
    }

    /// Maps the success value, leaving a rejection untouched.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ApiOutcome<U> {
        match self {
            ApiOutcome::Success(value) => ApiOutcome::Success(f(value)),
            ApiOutcome::Rejected(message) => ApiOutcome::Rejected(message),
        }
    }
}
