//! Internal error types for store operations.
//!
//! These errors are internal to `linkshelf-store` and are mapped to the core
//! `StoreError` at the boundary.

use thiserror::Error;

/// Result type alias for store operations.
pub type SupabaseResult<T> = Result<T, SupabaseError>;

#[derive(Debug, Error)]
pub enum SupabaseError {
    /// The API answered with an error status.
    #[error("Request failed with status {status}: {message}")]
    Api {
        status: u16,
        /// PostgREST `message`, or the raw body if it was not JSON
        message: String,
    },

    /// A filter by id matched no row.
    #[error("Link not found: {id}")]
    NotFound { id: String },

    /// The store is read-only.
    #[error("{0} is read-only")]
    ReadOnly(&'static str),

    /// API returned an invalid or unexpected response.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// Network or HTTP client error (connect, timeout, truncated body).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Local file error (static source only).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
