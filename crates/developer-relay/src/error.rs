//! Relay error types.

use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Relay error type.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Control-plane answered with a non-success status.
    #[error("HTTP error: {status} - {message}")]
    Http { status: u16, message: String },

    /// Request could not be sent, or the response body could not be read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response declared a media type other than the one required.
    #[error("Unexpected content type: expected {expected}, got {}", .actual.as_deref().unwrap_or("none"))]
    ContentType {
        expected: &'static str,
        actual: Option<String>,
    },

    /// Response payload does not match the expected shape.
    #[error("Schema validation failed: {0}")]
    SchemaValidation(serde_json::Error),

    /// URI list contained no usable candidate after comment filtering.
    #[error("Relay returned no connection candidates")]
    EmptyCandidateList,

    /// WebSocket upgrade handshake failed.
    #[error("Failed to open relay stream: {0}")]
    StreamOpen(#[source] tungstenite::Error),

    /// Invalid base or endpoint URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Authentication is enabled but no credential is available.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// WebSocket error on an established stream.
    #[error("Stream error: {0}")]
    Frame(#[source] tungstenite::Error),

    /// Stream ended before an expected message arrived.
    #[error("Relay stream closed")]
    StreamClosed,

    /// JSON serialization error on an established stream.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using RelayError.
pub type RelayResult<T> = Result<T, RelayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_message_names_both_types() {
        let err = RelayError::ContentType {
            expected: "text/uri-list",
            actual: Some("application/json".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Unexpected content type: expected text/uri-list, got application/json"
        );

        let missing = RelayError::ContentType {
            expected: "text/uri-list",
            actual: None,
        };
        assert!(missing.to_string().ends_with("got none"));
    }

    #[test]
    fn test_http_error_message() {
        let err = RelayError::Http {
            status: 403,
            message: "Forbidden".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error: 403 - Forbidden");
    }
}
