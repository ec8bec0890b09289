//! Link store trait definition.
//!
//! This port defines the interface to the remote collection of links.
//! Implementations must handle all transport details internally.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::{LinkPatch, NewLink, StoredLink};

/// Gateway to the remote link collection.
///
/// # Design Rules
///
/// - No HTTP types in signatures
/// - CRUD-only: list, insert, update, delete
/// - Rows are returned as the store reports them; null list columns are
///   normalized by the read cache, not here
/// - No retries: every failure is returned to the caller untouched
#[async_trait]
pub trait LinkStorePort: Send + Sync {
    /// List every link, newest first by `created_at`.
    async fn list(&self) -> Result<Vec<StoredLink>, StoreError>;

    /// Insert a new link. The store assigns `id` and `created_at`.
    async fn insert(&self, link: &NewLink) -> Result<StoredLink, StoreError>;

    /// Apply a partial update to the link with the given id.
    ///
    /// Returns `Err(StoreError::NotFound)` if no such link exists.
    async fn update(&self, id: &str, patch: &LinkPatch) -> Result<StoredLink, StoreError>;

    /// Delete the link with the given id.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
