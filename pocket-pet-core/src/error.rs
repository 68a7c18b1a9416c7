//! Error types for the pet client.
//!
//! This module provides a unified error type for everything that can go
//! wrong talking to the pet API. All network-path errors are converted into
//! the disconnected sentinel UI at the call site that issued the request;
//! nothing propagates to a top-level handler.

use thiserror::Error;

/// The main error type for pocket-pet-core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never completed (connection refused, DNS failure, reset).
    #[error("request to '{url}' failed: {message}")]
    Transport {
        /// The URL that was being requested.
        url: String,
        /// Description of the transport failure.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("server returned HTTP {status} for '{url}'")]
    HttpStatus {
        /// The response status code.
        status: u16,
        /// The URL that was requested.
        url: String,
    },

    /// The response body could not be parsed as a pet state snapshot.
    #[error("malformed response body from '{url}': {source}")]
    MalformedBody {
        /// The URL that was requested.
        url: String,
        /// The underlying JSON parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL is not a valid URL.
    ///
    /// Raised at client construction time; an unreachable API surface is an
    /// unrecoverable startup fault, not something to retry.
    #[error("invalid base URL '{url}': {message}")]
    InvalidBaseUrl {
        /// The offending URL string.
        url: String,
        /// Description of the parse failure.
        message: String,
    },

    /// The operation was cancelled.
    #[error("operation cancelled")]
    Cancelled,
}

impl Error {
    /// Create a new `Transport` error for the given URL.
    pub fn transport(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a new `InvalidBaseUrl` error.
    pub fn invalid_base_url(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidBaseUrl {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from the network path (transport, status, or
    /// body decode) and should render the disconnected sentinel.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. } | Error::HttpStatus { .. } | Error::MalformedBody { .. }
        )
    }
}

/// A specialized `Result` type for pocket-pet-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::transport("http://localhost:8000/status", "connection refused");
        assert!(err.to_string().contains("connection refused"));
        assert!(err.to_string().contains("/status"));

        let err = Error::HttpStatus {
            status: 500,
            url: "http://localhost:8000/feed".to_string(),
        };
        assert!(err.to_string().contains("HTTP 500"));

        let err = Error::invalid_base_url("not a url", "relative URL without a base");
        assert!(err.to_string().contains("not a url"));

        let err = Error::Cancelled;
        assert_eq!(err.to_string(), "operation cancelled");
    }

    #[test]
    fn test_is_network() {
        assert!(Error::transport("u", "m").is_network());
        assert!(Error::HttpStatus {
            status: 404,
            url: "u".to_string()
        }
        .is_network());
        assert!(!Error::Cancelled.is_network());
        assert!(!Error::invalid_base_url("u", "m").is_network());
    }
}
