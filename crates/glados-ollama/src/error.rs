//! Internal error types for Ollama requests.
//!
//! These errors are internal to `glados-ollama` and are mapped to
//! [`BackendError`] at the port boundary.

use glados_core::BackendError;
use thiserror::Error;

/// Result type alias for Ollama operations.
pub type OllamaResult<T> = Result<T, OllamaError>;

/// Errors related to Ollama API operations.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The server answered with a non-success status.
    #[error("Ollama request to {url} failed with status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Error text from the response body, if any
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Invalid response from Ollama: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl OllamaError {
    /// Map to the port error for a warm-up exchange.
    pub(crate) fn into_connection(self) -> BackendError {
        BackendError::Connection(self.to_string())
    }

    /// Map to the port error for a chat request.
    pub(crate) fn into_inference(self) -> BackendError {
        BackendError::Inference(self.to_string())
    }

    /// Map to the port error for a catalog listing.
    pub(crate) fn into_catalog(self) -> BackendError {
        BackendError::Catalog(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = OllamaError::Status {
            status: 404,
            url: "http://127.0.0.1:11434/api/chat".to_string(),
            message: "model 'nope' not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("model 'nope' not found"));
    }

    #[test]
    fn test_port_mapping_keeps_message() {
        let err = OllamaError::InvalidResponse {
            message: "missing message".to_string(),
        };
        assert_eq!(
            err.into_inference(),
            BackendError::Inference("Invalid response from Ollama: missing message".to_string())
        );
    }
}
