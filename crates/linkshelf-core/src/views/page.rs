//! Page-level state derived from the snapshot.

use crate::ports::{Notifier, Toast};
use crate::services::{PendingFetch, QuerySnapshot, QueryStatus, ReadCache};

/// Generic fallback when a failure carries no message.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load links.";

/// What the catalog page should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    /// First load still running.
    Loading,
    /// First load failed and there is nothing to show. Offers a retry.
    FullPageError { message: String },
    /// Data is available. `stale_error` is set when the latest refresh
    /// failed and the page shows the previous data.
    Ready { stale_error: Option<String> },
}

impl PageState {
    pub fn from_snapshot(snapshot: &QuerySnapshot) -> Self {
        let message = snapshot
            .error
            .as_ref()
            .map(|e| e.message_or(LOAD_FAILED_MESSAGE));

        match (snapshot.has_data(), snapshot.status) {
            (true, _) => Self::Ready {
                stale_error: message,
            },
            (false, QueryStatus::Error) => Self::FullPageError {
                message: message.unwrap_or_else(|| LOAD_FAILED_MESSAGE.to_string()),
            },
            (false, _) => Self::Loading,
        }
    }

    /// Whether a retry affordance should be offered.
    pub const fn offers_retry(&self) -> bool {
        matches!(self, Self::FullPageError { .. })
    }
}

/// Manual refresh: announce it, then invalidate the cache.
pub fn refresh(cache: &ReadCache, notifier: &dyn Notifier) -> PendingFetch {
    notifier.notify(Toast::info("Refreshing...", "Fetching the latest links."));
    cache.invalidate()
}
