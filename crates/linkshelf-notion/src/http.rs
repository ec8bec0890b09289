//! HTTP backend abstraction for the Notion API.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{NotionError, NotionResult};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends that POST JSON and decode JSON.
///
/// Implementations turn non-2xx statuses into [`NotionError::Api`].
#[async_trait]
pub trait HttpBackend: Send + Sync {
    async fn post_json<T: DeserializeOwned + Send>(&self, url: &Url, body: &Value) -> NotionResult<T>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest. Sends the bearer token and the
/// `Notion-Version` header on every request. No retries.
pub struct ReqwestBackend {
    client: reqwest::Client,
    api_key: String,
    notion_version: String,
}

impl ReqwestBackend {
    pub fn new(
        api_key: &str,
        notion_version: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> NotionResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            notion_version: notion_version.to_string(),
        })
    }
}

/// Shape of a Notion error body.
#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn post_json<T: DeserializeOwned + Send>(&self, url: &Url, body: &Value) -> NotionResult<T> {
        let response = self
            .client
            .post(url.as_str())
            .bearer_auth(&self.api_key)
            .header("Notion-Version", &self.notion_version)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or(text);
            return Err(NotionError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(serde_json::from_str(&text)?)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
