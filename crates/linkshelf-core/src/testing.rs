//! In-process fakes for the core ports.
//!
//! Available to this crate's tests and, through the `test-utils` feature, to
//! adapter crates' tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Notify;

use crate::domain::{LinkPatch, NewLink, StoredLink};
use crate::ports::{LinkStorePort, StoreError, WorkspaceError, WorkspaceRow, WorkspaceSourcePort};

// 2024-01-01T00:00:00Z; seeded rows get one second per id after this.
const BASE_TIMESTAMP: i64 = 1_704_067_200;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A fully populated stored row, for tests that build rows by hand.
pub fn stored_link(id: &str, name: &str) -> StoredLink {
    StoredLink {
        id: id.to_string(),
        name: Some(name.to_string()),
        url: Some(format!("https://{}.example", name.to_lowercase())),
        model: Some(String::new()),
        description: Some(String::new()),
        category: Some(Vec::new()),
        tags: Some(Vec::new()),
        is_popular: Some(false),
        created_at: None,
    }
}

/// An in-memory link store.
///
/// Behaves like the hosted store: ids and timestamps are assigned on insert,
/// lists come back newest first, and unknown ids are `NotFound`. Failures can
/// be injected, and `list()` can be held open with a [`Notify`] gate to
/// exercise request coalescing.
#[derive(Default)]
pub struct InMemoryLinkStore {
    rows: Mutex<Vec<StoredLink>>,
    next_id: AtomicU64,
    list_calls: AtomicUsize,
    write_calls: AtomicUsize,
    list_failures: Mutex<VecDeque<StoreError>>,
    write_failure: Mutex<Option<StoreError>>,
    list_gate: Option<Arc<Notify>>,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with rows exactly as given (nulls included).
    pub fn with_rows(rows: Vec<StoredLink>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    /// Make every `list()` wait for one `notify_one()` on `gate`.
    #[must_use]
    pub fn with_list_gate(mut self, gate: Arc<Notify>) -> Self {
        self.list_gate = Some(gate);
        self
    }

    /// Insert synchronously, bypassing counters and failure injection.
    pub fn seed(&self, link: NewLink) -> StoredLink {
        let row = self.build_row(&link);
        lock(&self.rows).push(row.clone());
        row
    }

    /// Fail the next `list()` with `error`. Queued failures apply in order.
    pub fn fail_next_list(&self, error: StoreError) {
        lock(&self.list_failures).push_back(error);
    }

    /// Fail every write with `error` until [`Self::clear_failures`].
    pub fn fail_writes_with(&self, error: StoreError) {
        *lock(&self.write_failure) = Some(error);
    }

    pub fn clear_failures(&self) {
        lock(&self.list_failures).clear();
        *lock(&self.write_failure) = None;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    /// Current rows in insertion order.
    pub fn rows(&self) -> Vec<StoredLink> {
        lock(&self.rows).clone()
    }

    fn build_row(&self, link: &NewLink) -> StoredLink {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let offset = i64::try_from(n).unwrap_or(i64::MAX - BASE_TIMESTAMP);
        StoredLink {
            id: format!("link-{n}"),
            name: Some(link.name.clone()),
            url: Some(link.url.clone()),
            model: link.model.clone(),
            description: link.description.clone(),
            category: Some(link.category.clone()),
            tags: Some(link.tags.clone()),
            is_popular: Some(link.is_popular),
            created_at: DateTime::<Utc>::from_timestamp(BASE_TIMESTAMP + offset, 0),
        }
    }

    fn begin_write(&self) -> Result<(), StoreError> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        lock(&self.write_failure).clone().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl LinkStorePort for InMemoryLinkStore {
    async fn list(&self) -> Result<Vec<StoredLink>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.list_gate {
            gate.notified().await;
        }
        if let Some(error) = lock(&self.list_failures).pop_front() {
            return Err(error);
        }

        let mut rows = lock(&self.rows).clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn insert(&self, link: &NewLink) -> Result<StoredLink, StoreError> {
        self.begin_write()?;
        Ok(self.seed(link.clone()))
    }

    async fn update(&self, id: &str, patch: &LinkPatch) -> Result<StoredLink, StoreError> {
        self.begin_write()?;
        let mut rows = lock(&self.rows);
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        row.apply(patch);
        Ok(row.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.begin_write()?;
        let mut rows = lock(&self.rows);
        let index = rows
            .iter()
            .position(|row| row.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        rows.remove(index);
        Ok(())
    }
}

/// A workspace source returning a canned result and counting calls.
///
/// Clones share the call counter.
#[derive(Clone)]
pub struct FakeWorkspaceSource {
    result: Result<Vec<WorkspaceRow>, WorkspaceError>,
    calls: Arc<AtomicUsize>,
}

impl Default for FakeWorkspaceSource {
    fn default() -> Self {
        Self::with_rows(Vec::new())
    }
}

impl FakeWorkspaceSource {
    pub fn with_rows(rows: Vec<WorkspaceRow>) -> Self {
        Self {
            result: Ok(rows),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(error: WorkspaceError) -> Self {
        Self {
            result: Err(error),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared handle to the number of `fetch_rows` calls.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl WorkspaceSourcePort for FakeWorkspaceSource {
    async fn fetch_rows(&self, _database_id: &str) -> Result<Vec<WorkspaceRow>, WorkspaceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}
