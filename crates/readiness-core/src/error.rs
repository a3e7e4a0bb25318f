//! Store and answer error types.
//!
//! `StoreError` is defined in `readiness-core` so callers can inspect a
//! failed fetch with `downcast_ref` instead of string matching.

use thiserror::Error;

/// Errors that can occur when reading collections from a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store does not know the requested collection.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The store returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// A record could not be decoded into the expected shape.
    #[error("malformed record in '{collection}': {message}")]
    MalformedRecord { collection: String, message: String },
}

/// Rejected answer values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LikertError {
    #[error("answer value {0} is outside 1-5")]
    OutOfRange(i64),

    #[error("not an answer value: '{0}'")]
    NotANumber(String),
}
