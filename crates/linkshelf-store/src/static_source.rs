//! Read-only source over the static JSON cache file written by the import
//! bridge.

use std::path::PathBuf;

use linkshelf_core::StoredLink;
use tracing::debug;
use url::Url;

use crate::error::{SupabaseError, SupabaseResult};
use crate::http::{HttpBackend, HttpRequest, Method, ReqwestBackend};

const SOURCE_NAME: &str = "Static link source";

/// Default static source using the reqwest HTTP backend.
pub type DefaultStaticSource = StaticLinkSource<ReqwestBackend>;

/// Where the cache file lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticLocation {
    Url(Url),
    Path(PathBuf),
}

impl StaticLocation {
    /// Interpret `location` as a URL if it has an http(s) scheme, else as a
    /// file path.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Self::Url(url),
            _ => Self::Path(PathBuf::from(location)),
        }
    }
}

/// Link source reading a JSON array of rows on every `list()`.
///
/// Rows keep file order. Non-2xx answers and malformed JSON fail the load;
/// there is no retry. Every write fails.
pub struct StaticLinkSource<B: HttpBackend> {
    pub(crate) backend: B,
    location: StaticLocation,
}

impl DefaultStaticSource {
    pub fn new(location: StaticLocation) -> SupabaseResult<Self> {
        let backend = ReqwestBackend::new(
            std::time::Duration::from_secs(30),
            concat!("linkshelf-store/", env!("CARGO_PKG_VERSION")),
        )?;
        Ok(Self::with_backend(location, backend))
    }
}

impl<B: HttpBackend> StaticLinkSource<B> {
    pub(crate) const fn with_backend(location: StaticLocation, backend: B) -> Self {
        Self { backend, location }
    }

    pub const fn location(&self) -> &StaticLocation {
        &self.location
    }

    pub(crate) async fn load(&self) -> SupabaseResult<Vec<StoredLink>> {
        let body = match &self.location {
            StaticLocation::Url(url) => {
                let response = self
                    .backend
                    .send(HttpRequest::new(Method::Get, url.clone()))
                    .await?;
                if !response.is_success() {
                    return Err(SupabaseError::Api {
                        status: response.status,
                        message: format!("failed to load {url}"),
                    });
                }
                response.body
            }
            StaticLocation::Path(path) => tokio::fs::read_to_string(path).await?,
        };

        let rows: Vec<StoredLink> = serde_json::from_str(&body)?;
        debug!(count = rows.len(), location = ?self.location, "Loaded static links");
        Ok(rows)
    }

    pub(crate) const fn read_only() -> SupabaseError {
        SupabaseError::ReadOnly(SOURCE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::{CannedResponse, FakeBackend};
    use serde_json::json;

    #[test]
    fn test_location_parse() {
        assert!(matches!(
            StaticLocation::parse("http://localhost:3002/data/llmLinks.json"),
            StaticLocation::Url(_)
        ));
        assert_eq!(
            StaticLocation::parse("public/data/llmLinks.json"),
            StaticLocation::Path(PathBuf::from("public/data/llmLinks.json"))
        );
    }

    #[tokio::test]
    async fn test_load_from_file_accepts_string_category() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llmLinks.json");
        std::fs::write(
            &path,
            json!([
                {"id": "n1", "name": "Chat", "isPopular": true, "model": "GPT-4",
                 "category": "Chat", "description": "", "tags": ["a"], "url": "https://c.example"},
                {"id": "n2", "name": "Code", "isPopular": false, "model": "",
                 "category": ["Dev", "Tools"], "description": "", "tags": [], "url": "https://d.example"}
            ])
            .to_string(),
        )
        .unwrap();

        let source = StaticLinkSource::with_backend(StaticLocation::Path(path), FakeBackend::new());
        let rows = source.load().await.unwrap();

        assert_eq!(rows[0].id, "n1");
        assert_eq!(rows[0].category, Some(vec!["Chat".to_string()]));
        assert_eq!(rows[1].category.as_ref().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_load_from_url() {
        let backend = FakeBackend::new().with_response(
            Method::Get,
            "/data/llmLinks.json",
            CannedResponse::ok(json!([{"id": "u1"}])),
        );
        let url = Url::parse("http://localhost:3002/data/llmLinks.json").unwrap();
        let rows = StaticLinkSource::with_backend(StaticLocation::Url(url), backend)
            .load()
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_and_malformed_fail() {
        let url = Url::parse("http://localhost:3002/data/llmLinks.json").unwrap();
        let missing = StaticLinkSource::with_backend(StaticLocation::Url(url.clone()), FakeBackend::new());
        assert!(matches!(
            missing.load().await,
            Err(SupabaseError::Api { status: 404, .. })
        ));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[{\"id\": ").unwrap();
        let broken = StaticLinkSource::with_backend(StaticLocation::Path(path), FakeBackend::new());
        assert!(matches!(broken.load().await, Err(SupabaseError::JsonParse(_))));
    }
}
