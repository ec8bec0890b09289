//! Notion client for reading whole databases.

use serde_json::{Map, Value, json};
use tracing::debug;
use url::Url;

use crate::config::NotionClientConfig;
use crate::error::NotionResult;
use crate::http::{HttpBackend, ReqwestBackend};
use crate::models::{QueryResponse, project_page};

/// Default Notion client using the reqwest HTTP backend.
pub type DefaultNotionClient = NotionClient<ReqwestBackend>;

/// Client for querying Notion databases.
///
/// Generic over the HTTP backend for testing; use [`DefaultNotionClient`]
/// in production code.
pub struct NotionClient<B: HttpBackend> {
    pub(crate) backend: B,
    base_url: Url,
    page_size: u8,
}

impl DefaultNotionClient {
    pub fn new(config: &NotionClientConfig) -> NotionResult<Self> {
        let backend = ReqwestBackend::new(
            &config.api_key,
            &config.notion_version,
            config.timeout,
            &config.user_agent,
        )?;
        Self::with_backend(config, backend)
    }
}

impl<B: HttpBackend> NotionClient<B> {
    pub(crate) fn with_backend(config: &NotionClientConfig, backend: B) -> NotionResult<Self> {
        // Trailing slash so `join` appends instead of replacing the last segment.
        let base_url = Url::parse(&format!("{}/", config.base_url.trim_end_matches('/')))?;
        Ok(Self {
            backend,
            base_url,
            page_size: config.page_size,
        })
    }

    /// Every row of a database, projected, following pagination cursors
    /// until the API reports no more pages.
    pub(crate) async fn query_all(&self, database_id: &str) -> NotionResult<Vec<Map<String, Value>>> {
        let url = self
            .base_url
            .join(&format!("databases/{database_id}/query"))?;

        let mut rows = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut body = json!({ "page_size": self.page_size });
            if let Some(start) = &cursor {
                body["start_cursor"] = Value::String(start.clone());
            }

            let page: QueryResponse = self.backend.post_json(&url, &body).await?;
            debug!(
                database = database_id,
                count = page.results.len(),
                has_more = page.has_more,
                "Fetched query page"
            );
            for result in page.results {
                rows.push(project_page(result)?);
            }

            match page.next_cursor {
                Some(next) if page.has_more => cursor = Some(next),
                _ => break,
            }
        }
        Ok(rows)
    }
}
