//! Import bridge.
//!
//! One-shot batch job: pull every row of a configured workspace database and
//! overwrite the catalog's static JSON cache file with them.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::ports::{WorkspaceError, WorkspaceRow, WorkspaceSourcePort};

/// Key of the built-in links catalog.
pub const LLM_LINKS_CATALOG: &str = "llm_links";

/// Default location of the links cache file, relative to the working directory.
pub const DEFAULT_CACHE_PATH: &str = "public/data/llmLinks.json";

/// One importable catalog: where its rows come from and where they land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSpec {
    /// Key accepted by the `type` query parameter.
    pub key: String,
    /// Workspace database id. `None` or empty means not configured.
    pub database_id: Option<String>,
    /// Cache file overwritten on every successful import.
    pub cache_path: PathBuf,
}

impl CatalogSpec {
    pub fn new(key: impl Into<String>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            database_id: None,
            cache_path: cache_path.into(),
        }
    }

    /// The links catalog at its default cache path.
    pub fn llm_links(database_id: Option<String>) -> Self {
        Self::new(LLM_LINKS_CATALOG, DEFAULT_CACHE_PATH).with_database_id(database_id)
    }

    #[must_use]
    pub fn with_database_id(mut self, database_id: Option<String>) -> Self {
        self.database_id = database_id;
        self
    }

    #[must_use]
    pub fn with_cache_path(mut self, cache_path: impl Into<PathBuf>) -> Self {
        self.cache_path = cache_path.into();
        self
    }

    fn configured_database(&self) -> Option<&str> {
        self.database_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Errors from an import run.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The catalog key was missing or unknown.
    #[error("Invalid or missing data type specified.")]
    InvalidCatalog { requested: Option<String> },

    /// The catalog has no database id.
    #[error("Notion Database ID for '{key}' is not configured.")]
    Configuration { key: String },

    /// The workspace request failed.
    #[error("Failed to fetch data from Notion API for '{key}'.")]
    Fetch {
        key: String,
        #[source]
        source: WorkspaceError,
    },

    /// A row carried a property kind that cannot be projected.
    #[error("Failed to fetch data from Notion API for '{key}'.")]
    Projection {
        key: String,
        #[source]
        source: WorkspaceError,
    },

    /// The cache file could not be written.
    #[error("Failed to write cache file for '{key}'.")]
    Write {
        key: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ImportError {
    /// True when the caller asked for something invalid (as opposed to a
    /// server-side failure).
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidCatalog { .. })
    }

    fn from_workspace(key: &str, source: WorkspaceError) -> Self {
        let key = key.to_string();
        match source {
            WorkspaceError::UnsupportedProperty { .. } => Self::Projection { key, source },
            source => Self::Fetch { key, source },
        }
    }
}

/// Outcome of a successful import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub key: String,
    pub count: usize,
    pub path: PathBuf,
}

impl ImportSummary {
    /// Human-readable result line.
    pub fn message(&self) -> String {
        format!(
            "Successfully fetched and cached {} items for '{}'.",
            self.count, self.key
        )
    }
}

/// Runs imports for a fixed set of catalogs.
pub struct ImportService {
    source: Arc<dyn WorkspaceSourcePort>,
    catalogs: Vec<CatalogSpec>,
}

impl ImportService {
    pub fn new(source: Arc<dyn WorkspaceSourcePort>, catalogs: Vec<CatalogSpec>) -> Self {
        Self { source, catalogs }
    }

    /// Keys of every registered catalog.
    pub fn catalog_keys(&self) -> impl Iterator<Item = &str> {
        self.catalogs.iter().map(|catalog| catalog.key.as_str())
    }

    /// Look up a catalog by key.
    pub fn catalog(&self, key: Option<&str>) -> Result<&CatalogSpec, ImportError> {
        let requested = key.map(str::trim).filter(|k| !k.is_empty());
        requested
            .and_then(|k| self.catalogs.iter().find(|catalog| catalog.key == k))
            .ok_or_else(|| ImportError::InvalidCatalog {
                requested: key.map(str::to_string),
            })
    }

    /// Fetch every row for `key` and overwrite its cache file.
    pub async fn run(&self, key: Option<&str>) -> Result<ImportSummary, ImportError> {
        let catalog = self.catalog(key)?;
        let database_id =
            catalog
                .configured_database()
                .ok_or_else(|| ImportError::Configuration {
                    key: catalog.key.clone(),
                })?;

        info!(catalog = %catalog.key, "Fetching rows from workspace");
        let rows = self
            .source
            .fetch_rows(database_id)
            .await
            .map_err(|e| {
                error!(catalog = %catalog.key, error = %e, "Workspace fetch failed");
                ImportError::from_workspace(&catalog.key, e)
            })?;

        write_cache(&catalog.cache_path, &rows)
            .await
            .map_err(|source| {
                error!(
                    catalog = %catalog.key,
                    path = %catalog.cache_path.display(),
                    error = %source,
                    "Cache write failed"
                );
                ImportError::Write {
                    key: catalog.key.clone(),
                    path: catalog.cache_path.clone(),
                    source,
                }
            })?;

        let summary = ImportSummary {
            key: catalog.key.clone(),
            count: rows.len(),
            path: catalog.cache_path.clone(),
        };
        info!(
            catalog = %summary.key,
            count = summary.count,
            path = %summary.path.display(),
            "Import complete"
        );
        Ok(summary)
    }
}

/// Overwrite `path` with a pretty-printed JSON array of `rows`.
///
/// Writes to a sibling temp file first so readers never see a partial file.
async fn write_cache(path: &Path, rows: &[WorkspaceRow]) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    let json = serde_json::to_string_pretty(rows).map_err(io::Error::other)?;
    let staging = path.with_extension("json.tmp");
    tokio::fs::write(&staging, json).await?;
    tokio::fs::rename(&staging, path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeWorkspaceSource;
    use serde_json::{Value, json};

    fn row(value: Value) -> WorkspaceRow {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test rows are objects"),
        }
    }

    fn service(source: FakeWorkspaceSource, path: &Path, database_id: Option<&str>) -> ImportService {
        ImportService::new(
            Arc::new(source),
            vec![
                CatalogSpec::llm_links(database_id.map(str::to_string)).with_cache_path(path),
            ],
        )
    }

    #[tokio::test]
    async fn test_import_writes_pretty_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("llmLinks.json");
        let source = FakeWorkspaceSource::with_rows(vec![
            row(json!({"id": "p1", "name": "Chat", "isPopular": true, "tags": ["a"]})),
            row(json!({"id": "p2", "name": "Code", "isPopular": false, "tags": []})),
        ]);

        let summary = service(source, &path, Some("db-1"))
            .run(Some(LLM_LINKS_CATALOG))
            .await
            .unwrap();

        assert_eq!(summary.count, 2);
        assert_eq!(
            summary.message(),
            "Successfully fetched and cached 2 items for 'llm_links'."
        );

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {"));
        let parsed: Vec<Value> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["id"], "p1");
        assert_eq!(parsed[1]["name"], "Code");
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_import_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llmLinks.json");
        std::fs::write(&path, "[{\"id\": \"old\"}, {\"id\": \"older\"}]").unwrap();

        let source = FakeWorkspaceSource::with_rows(vec![row(json!({"id": "new"}))]);
        service(source, &path, Some("db-1"))
            .run(Some(LLM_LINKS_CATALOG))
            .await
            .unwrap();

        let parsed: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["id"], "new");
    }

    #[tokio::test]
    async fn test_missing_or_unknown_key_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let svc = service(FakeWorkspaceSource::default(), &dir.path().join("x.json"), Some("db"));

        for key in [None, Some(""), Some("unknown")] {
            let err = svc.run(key).await.unwrap_err();
            assert!(err.is_client_error());
            assert_eq!(err.to_string(), "Invalid or missing data type specified.");
        }
    }

    #[tokio::test]
    async fn test_unconfigured_database_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.json");
        let source = FakeWorkspaceSource::default();
        let calls = source.calls();

        for database_id in [None, Some("  ")] {
            let err = service(source.clone(), &path, database_id)
                .run(Some(LLM_LINKS_CATALOG))
                .await
                .unwrap_err();
            assert!(matches!(err, ImportError::Configuration { .. }));
            assert_eq!(
                err.to_string(),
                "Notion Database ID for 'llm_links' is not configured."
            );
        }
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 0);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_cache_file_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("llmLinks.json");
        std::fs::write(&path, "[]").unwrap();
        let source = FakeWorkspaceSource::failing(WorkspaceError::Api {
            status: 401,
            message: "API token is invalid.".into(),
        });

        let err = service(source, &path, Some("db-1"))
            .run(Some(LLM_LINKS_CATALOG))
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::Fetch { .. }));
        assert_eq!(
            err.to_string(),
            "Failed to fetch data from Notion API for 'llm_links'."
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_unsupported_property_is_projection_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeWorkspaceSource::failing(WorkspaceError::UnsupportedProperty {
            property: "Score".into(),
            kind: "number".into(),
        });

        let err = service(source, &dir.path().join("x.json"), Some("db-1"))
            .run(Some(LLM_LINKS_CATALOG))
            .await
            .unwrap_err();

        assert!(matches!(err, ImportError::Projection { .. }));
        assert!(!err.is_client_error());
    }

    #[tokio::test]
    async fn test_unwritable_path_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where a directory is expected.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let path = blocker.join("llmLinks.json");

        let err = service(
            FakeWorkspaceSource::with_rows(Vec::new()),
            &path,
            Some("db-1"),
        )
        .run(Some(LLM_LINKS_CATALOG))
        .await
        .unwrap_err();

        assert!(matches!(err, ImportError::Write { .. }));
    }
}
