//! Core domain, ports and client-side sync services for linkshelf.
//!
//! This crate knows nothing about HTTP, Supabase or Notion. Adapters implement
//! the traits in [`ports`]; everything in [`services`], [`views`] and [`grid`]
//! is written against those traits only.
//!
//! Reads flow `ReadCache -> views -> grid/cards`. Writes flow
//! `grid/form -> LinkMutations -> LinkStorePort`, and a successful write
//! invalidates the cache.
#![deny(unused_crate_dependencies)]
#![deny(unsafe_code)]

pub mod domain;
pub mod form;
pub mod grid;
pub mod ports;
pub mod services;
pub mod views;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use domain::{
    FieldKind, LinkField, LinkPatch, LinkRecord, NewLink, StoredLink, join_labels, split_labels,
};
pub use form::{FormError, KNOWN_MODELS, NewLinkForm};
pub use grid::{
    CellState, ColumnSort, CommitRequest, EditableCell, EditableGrid, GridError, SortDirection,
    TableState,
};
pub use ports::{
    FailureClass, LinkStorePort, NoopNotifier, Notifier, StoreError, Toast, ToastLog,
    ToastVariant, WorkspaceError, WorkspaceRow, WorkspaceSourcePort,
};
pub use services::{
    CatalogSpec, DEFAULT_CACHE_PATH, ImportError, ImportService, ImportSummary,
    LINKS_QUERY_KEY, LLM_LINKS_CATALOG, LinkMutations, PendingFetch, QueryKey, QuerySnapshot,
    QueryStatus, ReadCache,
};
pub use views::{
    CATEGORY_ALL, CATEGORY_POPULAR, CatalogFilters, CatalogView, LinkStats, PageState,
};

