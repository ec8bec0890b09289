//! Public configuration for the Supabase gateway.

use std::time::Duration;

/// Default table holding the links.
pub const DEFAULT_TABLE: &str = "llm_links";

/// Configuration for the Supabase link store.
///
/// # Example
///
/// ```
/// use linkshelf_store::SupabaseConfig;
/// use std::time::Duration;
///
/// let config = SupabaseConfig::new("https://project.supabase.co", "anon-key")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://<ref>.supabase.co`
    pub(crate) url: String,
    /// Anonymous (public) API key
    pub(crate) anon_key: String,
    /// Table name
    pub(crate) table: String,
    /// Request timeout; expiry surfaces as a transport failure
    pub(crate) timeout: Duration,
    pub(crate) user_agent: String,
}

impl SupabaseConfig {
    /// Create a configuration for a project URL and anon key.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            table: DEFAULT_TABLE.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("linkshelf-store/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the table name. Defaults to `llm_links`.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Set the request timeout. Defaults to 30 seconds.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}
