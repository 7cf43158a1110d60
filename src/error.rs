//! Error types for wiki-wordcount
//!
//! This module provides the error taxonomy for the library:
//! - Fetch errors (non-success HTTP responses, missing response fields)
//! - Parse errors (expected markup structure absent)
//! - Input errors (malformed numeric input to digit classification)
//! - Transport errors converted from `reqwest` and `serde_json`

use thiserror::Error;

/// Result type alias for wiki-wordcount operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wiki-wordcount
///
/// This is the primary error type used throughout the library. Each variant includes
/// contextual information to help diagnose issues.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "wikipedia.api_base")
        key: Option<String>,
    },

    /// Fetch-related error (bad status, missing response field)
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Article markup could not be parsed into text
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A negative number was passed to leading-digit classification
    #[error("cannot classify leading digit of negative word count {value}")]
    NegativeWordCount {
        /// The offending input value
        value: i64,
    },

    /// Network error
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Fetch errors (HTTP-level failures and malformed API responses)
#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered with a non-success status code
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that was requested
        url: String,
        /// The HTTP status code returned by the server
        status: u16,
    },

    /// Response body did not contain an expected field
    #[error("response from {url} is missing field '{field}'")]
    MissingField {
        /// The URL that was requested
        url: String,
        /// Dotted path of the missing field (e.g., "query.random[0].id")
        field: String,
    },
}

/// Parse errors (expected markup structure absent)
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document has no main content container
    #[error("no main content container (div.mw-parser-output) in document")]
    ContentRootMissing,
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_display_includes_status_and_url() {
        let err = Error::Fetch(FetchError::HttpStatus {
            url: "https://en.wikipedia.org/wiki?curid=42".to_string(),
            status: 404,
        });
        let msg = err.to_string();
        assert!(msg.contains("404"), "message should contain the status: {msg}");
        assert!(msg.contains("curid=42"), "message should contain the URL: {msg}");
    }

    #[test]
    fn missing_field_display_includes_field_path() {
        let err = Error::Fetch(FetchError::MissingField {
            url: "https://en.wikipedia.org/w/api.php".to_string(),
            field: "query.random[0].id".to_string(),
        });
        assert!(err.to_string().contains("query.random[0].id"));
    }

    #[test]
    fn content_root_missing_names_the_container() {
        let err = Error::Parse(ParseError::ContentRootMissing);
        assert!(err.to_string().contains("mw-parser-output"));
    }

    #[test]
    fn negative_word_count_display_includes_value() {
        let err = Error::NegativeWordCount { value: -7 };
        assert!(err.to_string().contains("-7"));
    }

    #[test]
    fn fetch_error_converts_into_error() {
        let fetch = FetchError::HttpStatus {
            url: "http://localhost/".to_string(),
            status: 500,
        };
        let err: Error = fetch.into();
        assert!(matches!(
            err,
            Error::Fetch(FetchError::HttpStatus { status: 500, .. })
        ));
    }

    #[test]
    fn serde_json_error_converts_into_error() {
        let json_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
