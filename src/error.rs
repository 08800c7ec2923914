//! Error types for the dashboard client
//!
//! Every failure surfaces to the caller as an `ApiError`. Nothing here is
//! fatal to the process; each failed request is local to that request.

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur when talking to the dashboard backend or a public data API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (`status` is `None`) or a non-success HTTP status
    #[error("Network error for {url}: {reason}")]
    Network {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    /// Response body was not valid JSON, or did not have the expected shape
    #[error("Failed to parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// Upload endpoint answered with a non-success status
    #[error("Upload failed ({status}): {reason}")]
    Upload { status: u16, reason: String },

    /// Local file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Client configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status attached to the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network { status, .. } => *status,
            ApiError::Upload { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Builds a `Network` error for a non-success status
    pub(crate) fn from_status(url: &str, status: u16, reason: &str) -> Self {
        let reason = if reason.is_empty() {
            format!("HTTP {}", status)
        } else {
            format!("HTTP {} - {}", status, reason)
        };
        ApiError::Network {
            url: url.to_string(),
            status: Some(status),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message_includes_code_and_reason() {
        let err = ApiError::from_status("http://host/api/x", 404, "Not Found");
        let msg = err.to_string();
        assert!(msg.contains("http://host/api/x"));
        assert!(msg.contains("HTTP 404 - Not Found"));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_status_error_without_reason() {
        let err = ApiError::from_status("http://host/api/x", 500, "");
        assert!(err.to_string().ends_with("HTTP 500"));
    }

    #[test]
    fn test_transport_error_has_no_status() {
        let err = ApiError::Network {
            url: "http://host/api".to_string(),
            status: None,
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_parse_error_keeps_source() {
        let source = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err = ApiError::Parse {
            url: "http://host/api/x".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_upload_error_status() {
        let err = ApiError::Upload {
            status: 413,
            reason: "Payload Too Large".to_string(),
        };
        assert_eq!(err.status(), Some(413));
        assert!(err.to_string().contains("413"));
    }
}
