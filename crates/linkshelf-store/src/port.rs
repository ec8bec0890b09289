//! Port trait implementations.
//!
//! Implements the core-owned `LinkStorePort` for both sources, converting
//! internal errors into `StoreError` at the boundary.

use async_trait::async_trait;
use linkshelf_core::{LinkPatch, LinkStorePort, NewLink, StoreError, StoredLink};

use crate::client::SupabaseLinkStore;
use crate::error::SupabaseError;
use crate::http::HttpBackend;
use crate::static_source::StaticLinkSource;

// ============================================================================
// Error Mapping
// ============================================================================

/// Convert internal `SupabaseError` to core `StoreError`.
fn map_error(err: SupabaseError) -> StoreError {
    match err {
        SupabaseError::Network(e) => StoreError::transport(e.to_string()),
        SupabaseError::Api { message, .. } => StoreError::store(message),
        SupabaseError::NotFound { id } => StoreError::not_found(id),
        SupabaseError::ReadOnly(_) | SupabaseError::Io(_) | SupabaseError::InvalidUrl(_) => {
            StoreError::store(err.to_string())
        }
        SupabaseError::InvalidResponse { message } => StoreError::InvalidResponse { message },
        SupabaseError::JsonParse(e) => StoreError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

// ============================================================================
// Port Implementations
// ============================================================================

#[async_trait]
impl<B: HttpBackend> LinkStorePort for SupabaseLinkStore<B> {
    async fn list(&self) -> Result<Vec<StoredLink>, StoreError> {
        self.fetch_all().await.map_err(map_error)
    }

    async fn insert(&self, link: &NewLink) -> Result<StoredLink, StoreError> {
        self.insert_row(link).await.map_err(map_error)
    }

    async fn update(&self, id: &str, patch: &LinkPatch) -> Result<StoredLink, StoreError> {
        self.update_row(id, patch).await.map_err(map_error)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.delete_row(id).await.map_err(map_error)
    }
}

#[async_trait]
impl<B: HttpBackend> LinkStorePort for StaticLinkSource<B> {
    async fn list(&self) -> Result<Vec<StoredLink>, StoreError> {
        self.load().await.map_err(map_error)
    }

    async fn insert(&self, _link: &NewLink) -> Result<StoredLink, StoreError> {
        Err(map_error(Self::read_only()))
    }

    async fn update(&self, _id: &str, _patch: &LinkPatch) -> Result<StoredLink, StoreError> {
        Err(map_error(Self::read_only()))
    }

    async fn delete(&self, _id: &str) -> Result<(), StoreError> {
        Err(map_error(Self::read_only()))
    }
}
