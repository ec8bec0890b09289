//! Internal error types for Notion operations.
//!
//! These errors are internal to `linkshelf-notion` and are mapped to the core
//! `WorkspaceError` at the boundary.

use thiserror::Error;

/// Result type alias for Notion operations.
pub type NotionResult<T> = Result<T, NotionError>;

#[derive(Debug, Error)]
pub enum NotionError {
    /// API request failed with an HTTP error status.
    #[error("Notion API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    /// A property kind with no projection rule.
    #[error("Property '{property}' has unsupported type '{kind}'")]
    UnsupportedProperty { property: String, kind: String },

    /// API returned an invalid or unexpected response.
    #[error("Invalid response from Notion API: {message}")]
    InvalidResponse { message: String },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
