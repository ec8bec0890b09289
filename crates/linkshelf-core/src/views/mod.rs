//! Derived view engine.
//!
//! Read-only projections of the cached snapshot: category facets, the
//! filtered card list, and aggregate counts.

mod derive;
mod filters;
mod memo;
mod page;

pub use derive::{CATEGORY_ALL, CATEGORY_POPULAR, LinkStats, categories, filter, stats};
pub use filters::{CatalogFilters, NO_LINKS_MESSAGE, NO_MATCHES_MESSAGE};
pub use memo::CatalogView;
pub use page::{LOAD_FAILED_MESSAGE, PageState, refresh};
