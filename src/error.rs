use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the resource clients and panels.
///
/// Timeouts are reported distinctly from other network failures so the UI can
/// offer retry copy. HTTP errors keep the machine status alongside the message
/// extracted from the response body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of the response, if this error came from one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the request with an HTTP 409.
    ///
    /// The backend overloads 409 for several distinct domain conflicts
    /// (schedule overlap, duplicate enrollment, unit-cap violation, in-term
    /// removal lock) without a machine-readable cause, so this is a hint that
    /// *some* conflict happened, not which one. Only the status code is
    /// consulted; message text containing "409" is never enough.
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// A single field-level validation error, surfaced inline next to the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_hint_requires_status_409() {
        let conflict = ApiError::Status {
            status: 409,
            message: "schedule conflict".to_string(),
        };
        assert!(conflict.is_conflict());

        // "409" appearing inside an unrelated message must not count.
        let unrelated = ApiError::Status {
            status: 500,
            message: "ticket 409 failed upstream".to_string(),
        };
        assert!(!unrelated.is_conflict());
        assert!(!ApiError::Timeout.is_conflict());
    }
}
