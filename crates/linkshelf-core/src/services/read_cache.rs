//! Read cache - the last-known-good snapshot of the link collection.
//!
//! The cache owns the only shared mutable state in the client: the
//! [`QuerySnapshot`]. Every other component reads it (or subscribes to it)
//! but never writes it.
//!
//! # Fetch discipline
//!
//! - At most one `list()` call is in flight per cache instance. Callers that
//!   arrive while a fetch is running join it through a shared
//!   [`PendingFetch`] instead of issuing another request.
//! - `ensure_loaded()` fetches only when nothing was ever loaded or the
//!   snapshot was invalidated. A failed load counts as loaded: the cache
//!   never retries on its own.
//! - `invalidate()` marks the snapshot stale and fetches immediately (or joins
//!   the fetch already running).
//! - Fetches run as spawned tasks, so dropping every awaiting caller does not
//!   cancel the request. This requires a tokio runtime.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};

use chrono::{DateTime, Utc};
use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::{LinkRecord, StoredLink};
use crate::ports::{LinkStorePort, StoreError};

/// Query identity of the link collection.
pub const LINKS_QUERY_KEY: &str = "llmLinks";

/// Identity of the query a cache holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for QueryKey {
    fn default() -> Self {
        Self::new(LINKS_QUERY_KEY)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Load status of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Nothing has settled yet.
    Loading,
    /// The last fetch succeeded.
    Success,
    /// The last fetch failed; `data` still holds the previous good result.
    Error,
}

/// The cache's view of the remote collection plus its load status.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot {
    /// Records newest-first, or `None` until the first successful load.
    pub data: Option<Arc<Vec<LinkRecord>>>,
    pub status: QueryStatus,
    /// Present iff `status` is [`QueryStatus::Error`].
    pub error: Option<StoreError>,
    /// True while a `list()` call is outstanding.
    pub is_fetching: bool,
    /// Bumped on every settled fetch; derived views key their memos on it.
    pub version: u64,
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuerySnapshot {
    /// The never-loaded snapshot.
    pub const fn empty() -> Self {
        Self {
            data: None,
            status: QueryStatus::Loading,
            error: None,
            is_fetching: false,
            version: 0,
            updated_at: None,
        }
    }

    /// A settled, successful snapshot over the given records.
    pub fn from_records(records: Vec<LinkRecord>) -> Self {
        Self {
            data: Some(Arc::new(records)),
            status: QueryStatus::Success,
            error: None,
            is_fetching: false,
            version: 1,
            updated_at: None,
        }
    }

    /// The loaded records, or an empty slice if nothing was loaded yet.
    pub fn records(&self) -> &[LinkRecord] {
        self.data.as_deref().map_or(&[][..], Vec::as_slice)
    }

    pub const fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Find a loaded record by id.
    pub fn get(&self, id: &str) -> Option<&LinkRecord> {
        self.records().iter().find(|record| record.id == id)
    }
}

impl Default for QuerySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// A fetch that is running (or has finished). Cloneable; every clone resolves
/// to the same snapshot.
#[derive(Clone)]
pub struct PendingFetch {
    inner: Shared<BoxFuture<'static, QuerySnapshot>>,
}

impl Future for PendingFetch {
    type Output = QuerySnapshot;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.poll_unpin(cx)
    }
}

impl fmt::Debug for PendingFetch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingFetch")
            .field("settled", &self.inner.peek().is_some())
            .finish()
    }
}

#[derive(Default)]
struct FetchControl {
    in_flight: Option<PendingFetch>,
    loaded: bool,
    stale: bool,
    fetches: u64,
}

struct CacheState {
    key: QueryKey,
    snapshot: watch::Sender<QuerySnapshot>,
    control: Mutex<FetchControl>,
}

impl CacheState {
    fn control(&self) -> MutexGuard<'_, FetchControl> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record the outcome of a fetch and return the resulting snapshot.
    fn settle(&self, result: Result<Vec<StoredLink>, StoreError>) -> QuerySnapshot {
        let mut control = self.control();
        control.in_flight = None;
        control.loaded = true;

        match &result {
            Ok(rows) => debug!(query = %self.key, count = rows.len(), "Links loaded"),
            Err(e) => warn!(query = %self.key, error = %e, "Failed to load links"),
        }

        self.snapshot.send_modify(|snapshot| {
            snapshot.is_fetching = false;
            snapshot.version += 1;
            snapshot.updated_at = Some(Utc::now());
            match result {
                Ok(rows) => {
                    let records: Vec<LinkRecord> =
                        rows.into_iter().map(StoredLink::normalize).collect();
                    snapshot.data = Some(Arc::new(records));
                    snapshot.status = QueryStatus::Success;
                    snapshot.error = None;
                }
                Err(error) => {
                    snapshot.status = QueryStatus::Error;
                    snapshot.error = Some(error);
                }
            }
        });

        let snapshot = self.snapshot.borrow().clone();
        drop(control);
        snapshot
    }
}

/// Cache of the link collection for one query identity.
pub struct ReadCache {
    gateway: Arc<dyn LinkStorePort>,
    state: Arc<CacheState>,
}

impl ReadCache {
    /// Create a cache for the default links query.
    pub fn new(gateway: Arc<dyn LinkStorePort>) -> Self {
        Self::with_key(QueryKey::default(), gateway)
    }

    /// Create a cache for a specific query identity.
    pub fn with_key(key: QueryKey, gateway: Arc<dyn LinkStorePort>) -> Self {
        let (snapshot, _) = watch::channel(QuerySnapshot::empty());
        Self {
            gateway,
            state: Arc::new(CacheState {
                key,
                snapshot,
                control: Mutex::new(FetchControl::default()),
            }),
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.state.key
    }

    /// Synchronous read of the held snapshot.
    pub fn current_snapshot(&self) -> QuerySnapshot {
        self.state.snapshot.borrow().clone()
    }

    /// Receive every snapshot transition (fetch start and settle).
    pub fn subscribe(&self) -> watch::Receiver<QuerySnapshot> {
        self.state.snapshot.subscribe()
    }

    /// Number of `list()` calls this cache has issued.
    pub fn fetch_count(&self) -> u64 {
        self.state.control().fetches
    }

    /// Load the collection if it was never loaded or was invalidated.
    ///
    /// Joins a fetch that is already in flight. Otherwise returns the held
    /// snapshot without touching the gateway.
    pub async fn ensure_loaded(&self) -> QuerySnapshot {
        let pending = {
            let mut control = self.state.control();
            match control.in_flight.clone() {
                Some(in_flight) => {
                    debug!(query = %self.state.key, "Joining in-flight fetch");
                    Some(in_flight)
                }
                None if !control.loaded || control.stale => Some(self.start_fetch(&mut control)),
                None => None,
            }
        };

        match pending {
            Some(pending) => pending.await,
            None => self.current_snapshot(),
        }
    }

    /// Mark the snapshot stale and refetch.
    ///
    /// The returned handle may be awaited for the refreshed snapshot or
    /// dropped; the fetch runs to completion either way.
    pub fn invalidate(&self) -> PendingFetch {
        let mut control = self.state.control();
        control.stale = true;
        if let Some(in_flight) = control.in_flight.clone() {
            debug!(query = %self.state.key, "Invalidation coalesced into in-flight fetch");
            return in_flight;
        }
        self.start_fetch(&mut control)
    }

    fn start_fetch(&self, control: &mut FetchControl) -> PendingFetch {
        control.stale = false;
        control.fetches += 1;
        debug!(query = %self.state.key, fetch = control.fetches, "Fetching links");

        self.state
            .snapshot
            .send_modify(|snapshot| snapshot.is_fetching = true);

        let gateway = Arc::clone(&self.gateway);
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            let result = gateway.list().await;
            state.settle(result)
        });

        let state = Arc::clone(&self.state);
        let pending = PendingFetch {
            inner: async move {
                match task.await {
                    Ok(snapshot) => snapshot,
                    Err(e) => state.settle(Err(StoreError::transport(format!(
                        "fetch task failed: {e}"
                    )))),
                }
            }
            .boxed()
            .shared(),
        };

        control.in_flight = Some(pending.clone());
        pending
    }
}

impl fmt::Debug for ReadCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadCache")
            .field("key", &self.state.key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LinkPatch, NewLink};
    use crate::testing::{InMemoryLinkStore, stored_link};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    mockall::mock! {
        pub Store {}

        #[async_trait]
        impl LinkStorePort for Store {
            async fn list(&self) -> Result<Vec<StoredLink>, StoreError>;
            async fn insert(&self, link: &NewLink) -> Result<StoredLink, StoreError>;
            async fn update(&self, id: &str, patch: &LinkPatch) -> Result<StoredLink, StoreError>;
            async fn delete(&self, id: &str) -> Result<(), StoreError>;
        }
    }

    fn seeded_store() -> Arc<InMemoryLinkStore> {
        let store = InMemoryLinkStore::new();
        store.seed(NewLink::new("First", "https://first.example"));
        store.seed(NewLink::new("Second", "https://second.example"));
        Arc::new(store)
    }

    #[test]
    fn test_empty_snapshot_has_no_records() {
        let snapshot = QuerySnapshot::empty();
        assert!(snapshot.records().is_empty());
        assert_eq!(snapshot.status, QueryStatus::Loading);
        assert!(!snapshot.has_data());
    }

    #[tokio::test]
    async fn test_first_load_fetches_and_normalizes() {
        let mut legacy = stored_link("legacy", "Legacy");
        legacy.category = None;
        legacy.tags = None;
        let store = Arc::new(InMemoryLinkStore::with_rows(vec![legacy]));
        let cache = ReadCache::new(store.clone());

        let snapshot = cache.ensure_loaded().await;

        assert_eq!(snapshot.status, QueryStatus::Success);
        assert!(snapshot.error.is_none());
        assert!(!snapshot.is_fetching);
        assert_eq!(snapshot.version, 1);
        let record = snapshot.get("legacy").unwrap();
        assert!(record.category.is_empty());
        assert!(record.tags.is_empty());
        assert_eq!(store.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_loaded_cache_does_not_refetch() {
        let store = seeded_store();
        let cache = ReadCache::new(store.clone());

        cache.ensure_loaded().await;
        let snapshot = cache.ensure_loaded().await;

        assert_eq!(snapshot.records().len(), 2);
        assert_eq!(store.list_calls(), 1);
        assert_eq!(cache.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_records_are_newest_first() {
        let cache = ReadCache::new(seeded_store());
        let snapshot = cache.ensure_loaded().await;
        let names: Vec<&str> = snapshot.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn test_concurrent_ensure_loaded_issue_one_request() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(
            InMemoryLinkStore::new().with_list_gate(Arc::clone(&gate)),
        );
        store.seed(NewLink::new("Only", "https://only.example"));
        let cache = ReadCache::new(store.clone());

        let (a, b, ()) = tokio::join!(cache.ensure_loaded(), cache.ensure_loaded(), async {
            gate.notify_one();
        });

        assert_eq!(store.list_calls(), 1);
        assert_eq!(a, b);
        assert!(Arc::ptr_eq(a.data.as_ref().unwrap(), b.data.as_ref().unwrap()));
    }

    #[tokio::test]
    async fn test_invalidate_during_fetch_is_coalesced() {
        let gate = Arc::new(Notify::new());
        let store = Arc::new(
            InMemoryLinkStore::new().with_list_gate(Arc::clone(&gate)),
        );
        let cache = ReadCache::new(store.clone());

        let first = cache.invalidate();
        let second = cache.invalidate();
        assert!(cache.current_snapshot().is_fetching);

        gate.notify_one();
        let (a, b) = tokio::join!(first, second);

        assert_eq!(store.list_calls(), 1);
        assert_eq!(a.version, b.version);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let store = seeded_store();
        let cache = ReadCache::new(store.clone());
        cache.ensure_loaded().await;

        store.fail_next_list(StoreError::transport("connection reset"));
        let snapshot = cache.invalidate().await;

        assert_eq!(snapshot.status, QueryStatus::Error);
        assert_eq!(
            snapshot.error,
            Some(StoreError::transport("connection reset"))
        );
        assert_eq!(snapshot.records().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_first_load_is_not_retried_automatically() {
        let store = Arc::new(InMemoryLinkStore::new());
        store.fail_next_list(StoreError::store("permission denied for table llm_links"));
        let cache = ReadCache::new(store.clone());

        let snapshot = cache.ensure_loaded().await;
        assert_eq!(snapshot.status, QueryStatus::Error);
        assert!(snapshot.data.is_none());

        // A second ensure_loaded must not issue another request.
        cache.ensure_loaded().await;
        assert_eq!(store.list_calls(), 1);

        // Manual refresh recovers.
        let snapshot = cache.invalidate().await;
        assert_eq!(snapshot.status, QueryStatus::Success);
        assert!(snapshot.error.is_none());
        assert_eq!(store.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_dropped_invalidation_still_completes() {
        let store = seeded_store();
        let cache = ReadCache::new(store.clone());
        cache.ensure_loaded().await;

        drop(cache.invalidate());
        let snapshot = cache.ensure_loaded().await;

        assert_eq!(store.list_calls(), 2);
        assert_eq!(snapshot.version, 2);
    }

    #[tokio::test]
    async fn test_subscribers_see_settled_snapshot() {
        let cache = ReadCache::new(seeded_store());
        let mut rx = cache.subscribe();

        cache.ensure_loaded().await;

        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.status, QueryStatus::Success);
    }

    #[tokio::test]
    async fn test_list_called_exactly_once_with_mock() {
        let mut mock = MockStore::new();
        mock.expect_list()
            .times(1)
            .returning(|| Ok(vec![stored_link("m1", "Mocked")]));

        let cache = ReadCache::new(Arc::new(mock));
        cache.ensure_loaded().await;
        let snapshot = cache.ensure_loaded().await;

        assert_eq!(snapshot.records()[0].name, "Mocked");
    }
}
