//! Mutation coordinator.
//!
//! Every write is attempt-then-invalidate: the gateway call runs first, and
//! only a successful write marks the read cache stale. Nothing touches the
//! snapshot optimistically.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::read_cache::ReadCache;
use crate::domain::{LinkPatch, LinkRecord, NewLink};
use crate::ports::{LinkStorePort, StoreError};

/// Coordinates writes against the store with cache invalidation.
pub struct LinkMutations {
    store: Arc<dyn LinkStorePort>,
    cache: Arc<ReadCache>,
}

impl LinkMutations {
    /// Create a coordinator writing through `store` and invalidating `cache`.
    pub fn new(store: Arc<dyn LinkStorePort>, cache: Arc<ReadCache>) -> Self {
        Self { store, cache }
    }

    /// The cache this coordinator invalidates.
    pub const fn cache(&self) -> &Arc<ReadCache> {
        &self.cache
    }

    /// Insert a link.
    pub async fn create(&self, link: &NewLink) -> Result<LinkRecord, StoreError> {
        debug!(name = %link.name, "Creating link");
        let created = self.store.insert(link).await.inspect_err(|e| {
            warn!(name = %link.name, error = %e, "Create failed");
        })?;

        info!(id = %created.id, name = %link.name, "Link created");
        self.refresh();
        Ok(created.normalize())
    }

    /// Apply a partial update.
    pub async fn update(&self, id: &str, patch: &LinkPatch) -> Result<LinkRecord, StoreError> {
        debug!(id, "Updating link");
        let updated = self.store.update(id, patch).await.inspect_err(|e| {
            warn!(id, error = %e, "Update failed");
        })?;

        info!(id, "Link updated");
        self.refresh();
        Ok(updated.normalize())
    }

    /// Delete a link.
    pub async fn remove(&self, id: &str) -> Result<(), StoreError> {
        debug!(id, "Removing link");
        self.store.delete(id).await.inspect_err(|e| {
            warn!(id, error = %e, "Remove failed");
        })?;

        info!(id, "Link removed");
        self.refresh();
        Ok(())
    }

    // The refetch runs as a spawned task; readers pick it up through the
    // cache, so the handle is not awaited here.
    fn refresh(&self) {
        let _pending = self.cache.invalidate();
    }
}
