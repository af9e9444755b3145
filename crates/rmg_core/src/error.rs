use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable error codes shared across the workspace.
///
/// The remote-facing codes (`REMOTE_*`, `NOT_FOUND`, `DUPLICATE_INCIDENT_ID`)
/// are produced by repository implementations; the rest are raised locally
/// before any network call is issued.
pub mod codes {
    pub const IDENTITY_MISSING: &str = "IDENTITY_MISSING";
    pub const VALIDATION_FAILED: &str = "VALIDATION_FAILED";
    pub const REMOTE_UNAVAILABLE: &str = "REMOTE_UNAVAILABLE";
    pub const REMOTE_REJECTED: &str = "REMOTE_REJECTED";
    pub const REMOTE_DECODE_FAILED: &str = "REMOTE_DECODE_FAILED";
    pub const DUPLICATE_INCIDENT_ID: &str = "DUPLICATE_INCIDENT_ID";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const EDIT_IN_PROGRESS: &str = "EDIT_IN_PROGRESS";
    pub const EDIT_NOT_OPEN: &str = "EDIT_NOT_OPEN";
    pub const INCIDENT_CLOSED: &str = "INCIDENT_CLOSED";
}

/// Single structured error shape used across all layers.
///
/// `message` is the human-readable surface text; `details` carries diagnostic
/// context (field names, status codes, transport errors) for logs rather than
/// for display. Nothing is retried automatically: `retryable` only tells the
/// caller whether re-triggering the same operation could succeed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
    pub retryable: bool,
}

impl AppError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
