//! Memoized derived views.

use std::sync::Arc;

use super::derive::{self, LinkStats};
use super::filters::CatalogFilters;
use crate::domain::LinkRecord;
use crate::services::QuerySnapshot;

/// Identity of the snapshot data a memo was computed from.
#[derive(Debug, Clone)]
struct SnapshotKey {
    version: u64,
    data: Option<Arc<Vec<LinkRecord>>>,
}

impl SnapshotKey {
    fn of(snapshot: &QuerySnapshot) -> Self {
        Self {
            version: snapshot.version,
            data: snapshot.data.clone(),
        }
    }
}

impl PartialEq for SnapshotKey {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && match (&self.data, &other.data) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
    }
}

struct Memo<K, V> {
    key: K,
    value: V,
}

/// Caches `categories`, `filter` and `stats` results.
///
/// Each result is recomputed only when the snapshot data (or, for the
/// filtered list, the filter inputs) change.
#[derive(Default)]
pub struct CatalogView {
    categories: Option<Memo<SnapshotKey, Arc<[String]>>>,
    filtered: Option<Memo<(SnapshotKey, CatalogFilters), Arc<[LinkRecord]>>>,
    stats: Option<Memo<SnapshotKey, LinkStats>>,
    recomputations: u64,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(&mut self, snapshot: &QuerySnapshot) -> Arc<[String]> {
        let key = SnapshotKey::of(snapshot);
        memoize(&mut self.categories, &mut self.recomputations, key, || {
            derive::categories(snapshot).into()
        })
    }

    pub fn filtered(
        &mut self,
        snapshot: &QuerySnapshot,
        filters: &CatalogFilters,
    ) -> Arc<[LinkRecord]> {
        let key = (SnapshotKey::of(snapshot), filters.clone());
        memoize(&mut self.filtered, &mut self.recomputations, key, || {
            derive::filter(
                snapshot,
                &filters.search,
                &filters.selected_category,
                filters.popular_only,
            )
            .into_iter()
            .cloned()
            .collect()
        })
    }

    pub fn stats(&mut self, snapshot: &QuerySnapshot) -> LinkStats {
        let key = SnapshotKey::of(snapshot);
        memoize(&mut self.stats, &mut self.recomputations, key, || {
            derive::stats(snapshot)
        })
    }

    /// How many derivations actually ran.
    pub const fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

fn memoize<K: PartialEq, V: Clone>(
    slot: &mut Option<Memo<K, V>>,
    counter: &mut u64,
    key: K,
    compute: impl FnOnce() -> V,
) -> V {
    if let Some(memo) = slot.as_ref().filter(|memo| memo.key == key) {
        return memo.value.clone();
    }
    *counter += 1;
    let value = compute();
    *slot = Some(Memo {
        key,
        value: value.clone(),
    });
    value
}
