//! Workspace source port.
//!
//! The import bridge pulls rows from an external workspace tool (Notion)
//! through this trait. Implementations are responsible for projecting the
//! tool's typed property wrappers down to plain JSON scalars and arrays.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// One projected row: `{"id": ..., <property>: <plain value>, ...}`.
pub type WorkspaceRow = Map<String, Value>;

/// Errors from workspace source operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkspaceError {
    /// The request never completed.
    #[error("Network error: {message}")]
    Transport { message: String },

    /// The workspace API answered with an error status.
    #[error("Workspace API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A property kind the projection does not know how to flatten.
    #[error("Unsupported property '{property}' of type '{kind}'")]
    UnsupportedProperty { property: String, kind: String },

    /// The response body did not have the expected shape.
    #[error("Invalid workspace response: {message}")]
    InvalidResponse { message: String },
}

/// Port for reading every row of a workspace database.
#[async_trait]
pub trait WorkspaceSourcePort: Send + Sync {
    /// Fetch and project all rows of the given database.
    async fn fetch_rows(&self, database_id: &str) -> Result<Vec<WorkspaceRow>, WorkspaceError>;
}
