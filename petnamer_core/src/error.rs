//! Error types shared by the transport, the coordinator and the clipboard.

use thiserror::Error;

/// Normalized failure of a call to the naming/fact service.
///
/// Every network-originated failure is folded into one of these variants at
/// the transport boundary, so nothing above it has to know about reqwest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// DNS, connection, or timeout failure.
    #[error("{message}")]
    Connectivity { message: String },

    /// The service answered with a non-success status code.
    #[error("API Error: {status} - {status_text}")]
    Http { status: u16, status_text: String },

    /// A success response whose body was not the JSON we expected.
    #[error("Unexpected response from the service: {message}")]
    MalformedResponse { message: String },
}

impl ServiceError {
    pub fn connectivity(message: impl Into<String>) -> Self {
        ServiceError::Connectivity {
            message: message.into(),
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, ServiceError::Connectivity { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Both clipboard mechanisms failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    #[error("{mechanism} clipboard unavailable: {reason}")]
    Unavailable {
        mechanism: &'static str,
        reason: String,
    },

    #[error("clipboard copy failed (primary: {primary}; fallback: {fallback})")]
    Exhausted { primary: String, fallback: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_includes_status_and_text() {
        let err = ServiceError::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "API Error: 500 - Internal Server Error");
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_connectivity());
    }

    #[test]
    fn connectivity_error_shows_underlying_message() {
        let err = ServiceError::connectivity("connection refused");
        assert_eq!(err.to_string(), "connection refused");
        assert!(err.is_connectivity());
        assert_eq!(err.status(), None);
    }
}
