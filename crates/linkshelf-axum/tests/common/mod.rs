//! Shared helpers for linkshelf-axum integration tests.

// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use linkshelf_axum::bootstrap::AxumContext;
use linkshelf_core::testing::FakeWorkspaceSource;
use linkshelf_core::{CatalogSpec, WorkspaceRow};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Database id configured for the links catalog in tests.
pub const TEST_DATABASE_ID: &str = "db-links";

/// A context whose links catalog writes to `cache_path`.
pub fn context(source: FakeWorkspaceSource, cache_path: &Path) -> AxumContext {
    context_with(
        source,
        CatalogSpec::llm_links(Some(TEST_DATABASE_ID.into())).with_cache_path(cache_path),
    )
}

pub fn context_with(source: FakeWorkspaceSource, catalog: CatalogSpec) -> AxumContext {
    AxumContext::new(Arc::new(source), vec![catalog])
}

/// Two projected rows as the Notion source would return them.
pub fn sample_rows() -> Vec<WorkspaceRow> {
    [
        json!({"id": "p1", "name": "ChatGPT", "isPopular": true, "category": ["Chat"]}),
        json!({"id": "p2", "name": "Perplexity", "isPopular": false, "category": []}),
    ]
    .into_iter()
    .filter_map(|row| match row {
        Value::Object(map) => Some(map),
        _ => None,
    })
    .collect()
}

/// Send a GET and collect the status and body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, Bytes) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

/// Send a GET and parse the body as JSON.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}
