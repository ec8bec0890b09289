//! Integration tests for the import bridge routes.
//!
//! These tests verify that routes are correctly wired to handlers and that
//! import failures map to the documented status codes and bodies.

mod common;

use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use linkshelf_axum::bootstrap::CorsConfig;
use linkshelf_axum::routes::{create_data_router, create_router};
use linkshelf_core::testing::FakeWorkspaceSource;
use linkshelf_core::{CatalogSpec, WorkspaceError};
use serde_json::{Value, json};

use common::{context, context_with, get, get_json, sample_rows};

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(FakeWorkspaceSource::default(), &dir.path().join("llmLinks.json"));
    let app = create_router(ctx, &CorsConfig::AllowAll);

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn fetch_and_cache_writes_the_cache_file() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("data").join("llmLinks.json");
    let source = FakeWorkspaceSource::with_rows(sample_rows());
    let calls = source.calls();
    let app = create_router(context(source, &cache), &CorsConfig::AllowAll);

    let (status, body) = get_json(app, "/api/fetch-and-cache?type=llm_links").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "Successfully fetched and cached 2 items for 'llm_links'."})
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let text = std::fs::read_to_string(&cache).unwrap();
    assert!(text.contains("\n  {"), "cache file should be pretty-printed");
    let written: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(written[0]["id"], "p1");
    assert_eq!(written[1]["name"], "Perplexity");
}

#[tokio::test]
async fn fetch_and_cache_overwrites_previous_contents() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("llmLinks.json");
    std::fs::write(&cache, "[{\"id\": \"stale\"}]").unwrap();
    let app = create_router(
        context(FakeWorkspaceSource::with_rows(Vec::new()), &cache),
        &CorsConfig::AllowAll,
    );

    let (status, _) = get_json(app, "/api/fetch-and-cache?type=llm_links").await;

    assert_eq!(status, StatusCode::OK);
    let written: Value = serde_json::from_str(&std::fs::read_to_string(&cache).unwrap()).unwrap();
    assert_eq!(written, json!([]));
}

#[tokio::test]
async fn missing_type_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let source = FakeWorkspaceSource::with_rows(sample_rows());
    let calls = source.calls();
    let app = create_router(
        context(source, &dir.path().join("llmLinks.json")),
        &CorsConfig::AllowAll,
    );

    let (status, body) = get_json(app, "/api/fetch-and-cache").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing data type specified.");
    assert_eq!(body["status"], 400);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unknown_type_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(
        context(FakeWorkspaceSource::default(), &dir.path().join("llmLinks.json")),
        &CorsConfig::AllowAll,
    );

    let (status, body) = get_json(app, "/api/fetch-and-cache?type=recipes").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid or missing data type specified.");
}

#[tokio::test]
async fn unconfigured_database_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("llmLinks.json");
    let source = FakeWorkspaceSource::with_rows(sample_rows());
    let calls = source.calls();
    let app = create_router(
        context_with(source, CatalogSpec::llm_links(None).with_cache_path(&cache)),
        &CorsConfig::AllowAll,
    );

    let (status, body) = get_json(app, "/api/fetch-and-cache?type=llm_links").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Notion Database ID for 'llm_links' is not configured."
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!cache.exists());
}

#[tokio::test]
async fn fetch_failure_is_server_error_and_keeps_old_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("llmLinks.json");
    std::fs::write(&cache, "[]").unwrap();
    let source = FakeWorkspaceSource::failing(WorkspaceError::Api {
        status: 401,
        message: "API token is invalid.".into(),
    });
    let app = create_router(context(source, &cache), &CorsConfig::AllowAll);

    let (status, body) = get_json(app, "/api/fetch-and-cache?type=llm_links").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Failed to fetch data from Notion API for 'llm_links'."
    );
    assert_eq!(std::fs::read_to_string(&cache).unwrap(), "[]");
}

#[tokio::test]
async fn unsupported_property_is_reported_as_fetch_failure() {
    let dir = tempfile::tempdir().unwrap();
    let source = FakeWorkspaceSource::failing(WorkspaceError::UnsupportedProperty {
        property: "Rating".into(),
        kind: "number".into(),
    });
    let app = create_router(
        context(source, &dir.path().join("llmLinks.json")),
        &CorsConfig::AllowAll,
    );

    let (status, body) = get_json(app, "/api/fetch-and-cache?type=llm_links").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "Failed to fetch data from Notion API for 'llm_links'."
    );
}

#[tokio::test]
async fn data_router_serves_imported_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("llmLinks.json");
    let ctx = context(FakeWorkspaceSource::with_rows(sample_rows()), &cache);
    let app = create_data_router(ctx, dir.path(), &CorsConfig::AllowAll);

    let (status, _) = get_json(app.clone(), "/api/fetch-and-cache?type=llm_links").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get_json(app, "/data/llmLinks.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn data_router_still_answers_health() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(FakeWorkspaceSource::default(), &dir.path().join("llmLinks.json"));
    let app = create_data_router(ctx, dir.path(), &CorsConfig::AllowAll);

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}
