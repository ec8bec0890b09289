//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `reqwest` or `axum` types in any signature
//! - Store traits are minimal and CRUD-focused
//! - Adapters map their own errors into the port errors at the boundary

pub mod link_store;
pub mod notifier;
pub mod workspace_source;

use thiserror::Error;

pub use link_store::LinkStorePort;
pub use notifier::{NoopNotifier, Notifier, Toast, ToastLog, ToastVariant};
pub use workspace_source::{WorkspaceError, WorkspaceRow, WorkspaceSourcePort};

/// Broad failure class, used only to decide whether a retry affordance makes
/// sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// The request never reached the store or never came back.
    Transport,
    /// The store answered with an application-level error.
    Store,
}

/// Errors from link store operations.
///
/// This error type abstracts away transport details (HTTP status codes,
/// PostgREST error bodies) and provides a clean interface for services.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Network-level failure (connect, timeout, truncated body).
    #[error("Network error: {message}")]
    Transport { message: String },

    /// The store reported an error, carrying its message.
    #[error("{message}")]
    Store { message: String },

    /// No link with the given id exists.
    #[error("Link not found: {id}")]
    NotFound { id: String },

    /// The store answered, but not with the expected shape.
    #[error("Invalid store response: {message}")]
    InvalidResponse { message: String },
}

impl StoreError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub const fn class(&self) -> FailureClass {
        match self {
            Self::Transport { .. } => FailureClass::Transport,
            Self::Store { .. } | Self::NotFound { .. } | Self::InvalidResponse { .. } => {
                FailureClass::Store
            }
        }
    }

    /// Whether the failure was network-level.
    pub const fn is_transport(&self) -> bool {
        matches!(self.class(), FailureClass::Transport)
    }

    /// The error's message, or `fallback` when the store sent none.
    pub fn message_or(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }
}
