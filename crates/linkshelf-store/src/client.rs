//! Supabase PostgREST client for the links table.

use linkshelf_core::{LinkPatch, NewLink, StoredLink};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::SupabaseConfig;
use crate::error::{SupabaseError, SupabaseResult};
use crate::http::{HttpBackend, HttpRequest, HttpResponse, Method, ReqwestBackend};

/// Default Supabase store using the reqwest HTTP backend.
pub type DefaultSupabaseStore = SupabaseLinkStore<ReqwestBackend>;

/// Gateway to the `llm_links` table through the PostgREST API.
///
/// Generic over the HTTP backend so tests can run against canned responses.
/// Use [`DefaultSupabaseStore`] in production code.
pub struct SupabaseLinkStore<B: HttpBackend> {
    pub(crate) backend: B,
    table_url: Url,
    anon_key: String,
}

impl DefaultSupabaseStore {
    /// Create a store for the configured project.
    pub fn new(config: &SupabaseConfig) -> SupabaseResult<Self> {
        let backend = ReqwestBackend::new(config.timeout, &config.user_agent)?;
        Self::with_backend(config, backend)
    }
}

impl<B: HttpBackend> SupabaseLinkStore<B> {
    /// Create a store with a custom backend.
    pub(crate) fn with_backend(config: &SupabaseConfig, backend: B) -> SupabaseResult<Self> {
        let table_url = Url::parse(&format!(
            "{}/rest/v1/{}",
            config.url.trim_end_matches('/'),
            config.table
        ))?;
        Ok(Self {
            backend,
            table_url,
            anon_key: config.anon_key.clone(),
        })
    }

    /// Every row, newest first.
    pub(crate) async fn fetch_all(&self) -> SupabaseResult<Vec<StoredLink>> {
        let mut url = self.table_url.clone();
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc");

        let body = self.execute(self.request(Method::Get, url)).await?;
        let rows: Vec<StoredLink> = serde_json::from_str(&body)?;
        debug!(count = rows.len(), "Fetched rows");
        Ok(rows)
    }

    pub(crate) async fn insert_row(&self, link: &NewLink) -> SupabaseResult<StoredLink> {
        let request = self
            .request(Method::Post, self.table_url.clone())
            .header("Prefer", "return=representation")
            .json(serde_json::to_value(link)?);

        let body = self.execute(request).await?;
        first_row(&body)?.ok_or_else(|| SupabaseError::InvalidResponse {
            message: "insert returned no row".to_string(),
        })
    }

    pub(crate) async fn update_row(&self, id: &str, patch: &LinkPatch) -> SupabaseResult<StoredLink> {
        let request = self
            .request(Method::Patch, self.row_url(id))
            .header("Prefer", "return=representation")
            .json(serde_json::to_value(patch)?);

        let body = self.execute(request).await?;
        first_row(&body)?.ok_or_else(|| SupabaseError::NotFound { id: id.to_string() })
    }

    pub(crate) async fn delete_row(&self, id: &str) -> SupabaseResult<()> {
        let request = self
            .request(Method::Delete, self.row_url(id))
            .header("Prefer", "return=representation");

        let body = self.execute(request).await?;
        first_row(&body)?
            .map(|_| ())
            .ok_or_else(|| SupabaseError::NotFound { id: id.to_string() })
    }

    fn request(&self, method: Method, url: Url) -> HttpRequest {
        HttpRequest::new(method, url)
            .header("apikey", self.anon_key.clone())
            .header("Authorization", format!("Bearer {}", self.anon_key))
    }

    fn row_url(&self, id: &str) -> Url {
        let mut url = self.table_url.clone();
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));
        url
    }

    async fn execute(&self, request: HttpRequest) -> SupabaseResult<String> {
        debug!(method = ?request.method, url = %request.url, "Store request");
        let response = self.backend.send(request).await?;
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(api_error(response))
        }
    }
}

/// Shape of a PostgREST error body.
#[derive(Deserialize)]
struct PostgrestError {
    message: Option<String>,
}

fn api_error(response: HttpResponse) -> SupabaseError {
    let message = serde_json::from_str::<PostgrestError>(&response.body)
        .ok()
        .and_then(|error| error.message)
        .unwrap_or_else(|| response.body.trim().to_string());
    SupabaseError::Api {
        status: response.status,
        message,
    }
}

fn first_row(body: &str) -> SupabaseResult<Option<StoredLink>> {
    let rows: Vec<StoredLink> = serde_json::from_str(body)?;
    Ok(rows.into_iter().next())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use linkshelf_core::LinkField;
    use serde_json::json;

    fn store(backend: FakeBackend) -> SupabaseLinkStore<FakeBackend> {
        let config = SupabaseConfig::new("https://proj.supabase.co/", "anon");
        SupabaseLinkStore::with_backend(&config, backend).unwrap()
    }

    fn row(id: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Chat",
            "url": "https://chat.example",
            "model": null,
            "description": null,
            "category": null,
            "tags": ["a"],
            "isPopular": false,
            "created_at": "2024-05-01T10:00:00+00:00"
        })
    }

    #[tokio::test]
    async fn test_list_query_and_auth_headers() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "llm_links",
            CannedResponse::ok(json!([row("1"), row("2")])),
        );
        let requests = backend.requests();
        let rows = store(backend).fetch_all().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert!(rows[0].category.is_none());

        let sent = requests.lock().unwrap()[0].clone();
        assert_eq!(
            sent.url.as_str(),
            "https://proj.supabase.co/rest/v1/llm_links?select=*&order=created_at.desc"
        );
        assert_eq!(sent.header_value("apikey"), Some("anon"));
        assert_eq!(sent.header_value("Authorization"), Some("Bearer anon"));
    }

    #[tokio::test]
    async fn test_insert_posts_representation() {
        let backend = FakeBackend::new().with_response(
            Method::Post,
            "llm_links",
            CannedResponse::status(201, json!([row("new")])),
        );
        let requests = backend.requests();
        let link = NewLink::new("Chat", "https://chat.example");

        let created = store(backend).insert_row(&link).await.unwrap();

        assert_eq!(created.id, "new");
        let sent = requests.lock().unwrap()[0].clone();
        assert_eq!(sent.header_value("Prefer"), Some("return=representation"));
        assert_eq!(sent.body.unwrap()["name"], "Chat");
    }

    #[tokio::test]
    async fn test_update_filters_by_id() {
        let backend = FakeBackend::new().with_response(
            Method::Patch,
            "id=eq.42",
            CannedResponse::ok(json!([row("42")])),
        );
        let requests = backend.requests();

        store(backend)
            .update_row("42", &LinkPatch::text(LinkField::Name, "New"))
            .await
            .unwrap();

        let sent = requests.lock().unwrap()[0].clone();
        assert_eq!(sent.body.unwrap(), json!({"name": "New"}));
    }

    #[tokio::test]
    async fn test_empty_representation_is_not_found() {
        let backend = FakeBackend::new()
            .with_response(Method::Patch, "llm_links", CannedResponse::ok(json!([])))
            .with_response(Method::Delete, "llm_links", CannedResponse::ok(json!([])));
        let store = store(backend);

        let err = store
            .update_row("missing", &LinkPatch::popular(true))
            .await
            .unwrap_err();
        assert!(matches!(err, SupabaseError::NotFound { ref id } if id == "missing"));

        let err = store.delete_row("missing").await.unwrap_err();
        assert!(matches!(err, SupabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_postgrest_error_message_is_kept() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "llm_links",
            CannedResponse::status(
                401,
                json!({"code": "PGRST301", "message": "JWT expired", "details": null}),
            ),
        );

        let err = store(backend).fetch_all().await.unwrap_err();
        match err {
            SupabaseError::Api { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "JWT expired");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_error() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "llm_links",
            CannedResponse::ok(json!({"not": "an array"})),
        );
        assert!(matches!(
            store(backend).fetch_all().await,
            Err(SupabaseError::JsonParse(_))
        ));
    }
}
