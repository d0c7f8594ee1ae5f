//! Error types for corpus-dl
//!
//! This module provides error handling for the library, including:
//! - The top-level [`Error`] enum covering every failure class
//! - The [`ShapeMismatch`] sub-enum produced by response shape validation
//! - A crate-wide [`Result`] alias

use thiserror::Error;

/// Result type alias for corpus-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for corpus-dl
///
/// Every variant except [`Error::Shape`] terminates the run: the library
/// deliberately fails loud rather than producing an incomplete archive.
/// Shape mismatches are only recoverable when they occur on an individual
/// work inside a filtering fold; a mismatch on the top-level works list is
/// propagated through this type and is fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "concurrency")
        key: Option<String>,
    },

    /// An upstream payload failed shape validation
    #[error("shape validation failed: {0}")]
    Shape(#[from] ShapeMismatch),

    /// Network error (connection failure, transport error, request timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status code
    #[error("HTTP status {status} fetching {url}")]
    Http {
        /// The status code the server returned
        status: reqwest::StatusCode,
        /// The URL that produced the response
        url: String,
    },

    /// I/O error (directory creation or file write failure)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Rejection produced by the response shape validator
///
/// Validation is all-or-nothing: a single mismatched field rejects the whole
/// value and no partial result is available. Callers must not read any field
/// from a rejected value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeMismatch {
    /// The payload is not valid JSON at all
    #[error("payload is not valid JSON: {0}")]
    Unparsable(String),

    /// The value is not a JSON object where an object was required
    #[error("expected a JSON object")]
    NotAnObject,

    /// The value is not a JSON array where an array was required
    #[error("expected a JSON array")]
    NotAnArray,

    /// A required field is absent
    #[error("missing required field {field:?}")]
    MissingField {
        /// Name of the absent field
        field: String,
    },

    /// A field is present but holds the wrong JSON type
    #[error("field {field:?} is not a {expected}")]
    WrongType {
        /// Name of the offending field
        field: String,
        /// The JSON type the contract requires
        expected: &'static str,
    },

    /// A field must equal an exact literal and does not
    #[error("field {field:?} is {actual:?}, expected {expected:?}")]
    LiteralMismatch {
        /// Name of the offending field
        field: String,
        /// The literal the contract requires
        expected: String,
        /// The value actually found
        actual: String,
    },

    /// A field must be an empty array and is not
    #[error("field {field:?} must be an empty array")]
    NotEmpty {
        /// Name of the offending field
        field: String,
    },
}
