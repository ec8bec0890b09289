//! Application services.
//!
//! Services hold the stateful orchestration logic and depend only on ports.

pub mod import;
pub mod mutations;
pub mod read_cache;

pub use import::{
    CatalogSpec, DEFAULT_CACHE_PATH, ImportError, ImportService, ImportSummary, LLM_LINKS_CATALOG,
};
pub use mutations::LinkMutations;
pub use read_cache::{
    LINKS_QUERY_KEY, PendingFetch, QueryKey, QuerySnapshot, QueryStatus, ReadCache,
};
