//! Error types for the dashboard client.
//!
//! Uses thiserror for ergonomic error definitions. No failure here is fatal
//! to the session; callers surface these as blocking notices.

use thiserror::Error;

/// Custom Result type using our Error
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Remote gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Transport-level failures (connection refused, DNS, ...)
    #[error("HTTP error: {0}")]
    Http(String),

    /// Response body was not the JSON we expected
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx response; carries the server-supplied error string when
    /// the body had one, else a generic status message
    #[error("{0}")]
    Api(String),

    /// Local file writes (CSV download)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Http(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_displays_server_message() {
        let err = GatewayError::Api("Insufficient stock".to_string());
        assert_eq!(err.to_string(), "Insufficient stock");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: GatewayError = json_err.into();
        assert!(matches!(err, GatewayError::Json(_)));
    }
}
