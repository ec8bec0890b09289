//! Filter inputs of the catalog page.

use serde::{Deserialize, Serialize};

use super::derive::{CATEGORY_ALL, CATEGORY_POPULAR};

/// Message shown when filters exclude every record.
pub const NO_MATCHES_MESSAGE: &str = "Try adjusting your search or filter criteria.";

/// Message shown when the catalog itself is empty.
pub const NO_LINKS_MESSAGE: &str = "No LLM links available.";

/// Search term, selected category and popular-only toggle.
///
/// Defaults to the popular view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogFilters {
    pub search: String,
    pub selected_category: String,
    pub popular_only: bool,
}

impl Default for CatalogFilters {
    fn default() -> Self {
        Self {
            search: String::new(),
            selected_category: CATEGORY_POPULAR.to_string(),
            popular_only: true,
        }
    }
}

impl CatalogFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters that match every record.
    pub fn everything() -> Self {
        let mut filters = Self::default();
        filters.select_all();
        filters
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn select_popular(&mut self) {
        self.selected_category = CATEGORY_POPULAR.to_string();
        self.popular_only = true;
    }

    pub fn select_all(&mut self) {
        self.selected_category = CATEGORY_ALL.to_string();
        self.popular_only = false;
    }

    /// Select a concrete category. Leaves the popular-only toggle alone.
    pub fn select_category(&mut self, category: impl Into<String>) {
        self.selected_category = category.into();
    }

    /// Reset search and category. Leaves the popular-only toggle alone.
    pub fn clear(&mut self) {
        self.search.clear();
        self.selected_category = CATEGORY_ALL.to_string();
    }

    /// True when a search or a non-`all` category narrows the view.
    pub fn has_active_criteria(&self) -> bool {
        !self.search.is_empty() || self.selected_category != CATEGORY_ALL
    }

    /// What to show when the filtered list is empty.
    pub fn empty_message(&self) -> &'static str {
        if self.has_active_criteria() {
            NO_MATCHES_MESSAGE
        } else {
            NO_LINKS_MESSAGE
        }
    }
}
