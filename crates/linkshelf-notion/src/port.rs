//! Port trait implementation for `NotionClient`.

use async_trait::async_trait;
use linkshelf_core::{WorkspaceError, WorkspaceRow, WorkspaceSourcePort};
use tracing::info;

use crate::client::NotionClient;
use crate::error::NotionError;
use crate::http::HttpBackend;

/// Convert internal `NotionError` to core `WorkspaceError`.
fn map_error(err: NotionError) -> WorkspaceError {
    match err {
        NotionError::Api { status, message } => WorkspaceError::Api { status, message },
        NotionError::UnsupportedProperty { property, kind } => {
            WorkspaceError::UnsupportedProperty { property, kind }
        }
        NotionError::InvalidResponse { message } => WorkspaceError::InvalidResponse { message },
        NotionError::Network(e) => WorkspaceError::Transport {
            message: e.to_string(),
        },
        NotionError::InvalidUrl(e) => WorkspaceError::InvalidResponse {
            message: format!("invalid request URL: {e}"),
        },
        NotionError::JsonParse(e) => WorkspaceError::InvalidResponse {
            message: e.to_string(),
        },
    }
}

#[async_trait]
impl<B: HttpBackend> WorkspaceSourcePort for NotionClient<B> {
    async fn fetch_rows(&self, database_id: &str) -> Result<Vec<WorkspaceRow>, WorkspaceError> {
        let rows = self.query_all(database_id).await.map_err(map_error)?;
        info!(database = database_id, count = rows.len(), "Fetched Notion rows");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotionClientConfig;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use linkshelf_core::{CatalogSpec, ImportService, LLM_LINKS_CATALOG};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_map_error_keeps_property_details() {
        let mapped = map_error(NotionError::UnsupportedProperty {
            property: "Rating".into(),
            kind: "number".into(),
        });
        assert_eq!(
            mapped,
            WorkspaceError::UnsupportedProperty {
                property: "Rating".into(),
                kind: "number".into()
            }
        );
    }

    #[tokio::test]
    async fn test_api_status_is_preserved() {
        let backend = FakeBackend::new().with_response(CannedResponse::Status {
            status: 401,
            message: "API token is invalid.".into(),
        });
        let client =
            NotionClient::with_backend(&NotionClientConfig::new("bad"), backend).unwrap();

        let err = client.fetch_rows("db").await.unwrap_err();
        assert_eq!(
            err,
            WorkspaceError::Api {
                status: 401,
                message: "API token is invalid.".into()
            }
        );
    }

    #[tokio::test]
    async fn test_import_service_over_notion_client() {
        let backend = FakeBackend::new().with_response(CannedResponse::Json(json!({
            "results": [{
                "id": "p1",
                "properties": {
                    "name": {"type": "title", "title": [{"plain_text": "Chat"}]},
                    "isPopular": {"type": "checkbox", "checkbox": true}
                }
            }],
            "has_more": false
        })));
        let client =
            NotionClient::with_backend(&NotionClientConfig::new("secret"), backend).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llmLinks.json");
        let service = ImportService::new(
            Arc::new(client),
            vec![CatalogSpec::llm_links(Some("db-1".into())).with_cache_path(&path)],
        );

        let summary = service.run(Some(LLM_LINKS_CATALOG)).await.unwrap();

        assert_eq!(summary.count, 1);
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!([{"id": "p1", "name": "Chat", "isPopular": true}]));
    }
}
