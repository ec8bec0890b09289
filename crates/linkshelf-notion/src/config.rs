//! Public configuration for the Notion client.

use std::time::Duration;

/// API version sent in the `Notion-Version` header.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Configuration for the Notion client.
///
/// # Example
///
/// ```
/// use linkshelf_notion::NotionClientConfig;
///
/// let config = NotionClientConfig::new("secret_abc").with_page_size(50);
/// ```
#[derive(Debug, Clone)]
pub struct NotionClientConfig {
    /// Integration token
    pub(crate) api_key: String,
    /// Base URL for the Notion API
    pub(crate) base_url: String,
    pub(crate) notion_version: String,
    pub(crate) timeout: Duration,
    /// Rows requested per query page (Notion caps this at 100)
    pub(crate) page_size: u8,
    pub(crate) user_agent: String,
}

impl NotionClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.notion.com/v1".to_string(),
            notion_version: DEFAULT_NOTION_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            page_size: 100,
            user_agent: concat!("linkshelf-notion/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the base URL for the Notion API.
    ///
    /// Defaults to `https://api.notion.com/v1`.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_notion_version(mut self, version: impl Into<String>) -> Self {
        self.notion_version = version.into();
        self
    }

    /// Set the request timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the page size, clamped to 1..=100.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u8) -> Self {
        self.page_size = page_size.clamp(1, 100);
        self
    }
}
