//! Error types for the Tekton Pipeline client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Tekton Pipeline client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// No service URL was configured
    #[error("Service URL is not set")]
    MissingServiceUrl,

    /// The configured service URL cannot be used to build request URLs
    #[error("Invalid service URL: {0}")]
    InvalidServiceUrl(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Credentials could not be attached to the request
    #[error("Authentication failed: {0}")]
    Authentication(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

/// Pull a human readable message out of an error response body
///
/// The service answers with `{"errors": [{"code", "message"}], "trace", "status_code"}`;
/// older endpoints use a top level `error` or `message` string. Anything else
/// is returned verbatim.
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let message = ["/errors/0/message", "/error", "/message"]
            .iter()
            .find_map(|pointer| value.pointer(pointer).and_then(|v| v.as_str()));
        if let Some(message) = message {
            return message.to_string();
        }
    }

    if body.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_helpers() {
        let err = ClientError::api_error(404, "Pipeline not found");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert!(!err.is_server_error());

        let err = ClientError::api_error(503, "unavailable");
        assert!(err.is_server_error());
        assert!(!ClientError::MissingServiceUrl.is_client_error());
    }

    #[test]
    fn test_error_message_from_ibm_body() {
        let body = r#"{"errors":[{"code":"not_found","message":"Pipeline not found"}],"trace":"abc","status_code":404}"#;
        assert_eq!(error_message(body), "Pipeline not found");
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(r#"{"error":"bad token"}"#), "bad token");
        assert_eq!(error_message(r#"{"message":"slow down"}"#), "slow down");
        assert_eq!(error_message("gateway timeout"), "gateway timeout");
        assert_eq!(error_message(""), "Unknown error");
    }
}
