//! Route definitions and router construction.

use axum::Router;
use axum::routing::get;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::bootstrap::{AxumContext, CorsConfig};
use crate::handlers;
use crate::state::AppState;

/// Build CORS layer from configuration.
fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    match config {
        CorsConfig::AllowAll => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsConfig::AllowOrigins(origins) => {
            use axum::http::HeaderValue;
            let allowed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

/// API routes without the `/api` prefix; the caller nests them and applies
/// `.with_state()`.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new().route(
        "/fetch-and-cache",
        get(handlers::import::fetch_and_cache),
    )
}

/// Router with `/health` and the API under `/api`.
pub fn create_router(ctx: AxumContext, cors_config: &CorsConfig) -> Router {
    let state: AppState = Arc::new(ctx);
    let cors = build_cors_layer(cors_config);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes().with_state(state).layer(cors))
        .layer(TraceLayer::new_for_http())
}

/// [`create_router`] plus read-only serving of `data_dir` under `/data`,
/// so a frontend can fetch the cache files the import writes.
pub fn create_data_router<P: AsRef<Path>>(
    ctx: AxumContext,
    data_dir: P,
    cors_config: &CorsConfig,
) -> Router {
    let data = Router::new()
        .nest_service("/data", ServeDir::new(data_dir.as_ref()))
        .layer(build_cors_layer(cors_config));

    create_router(ctx, cors_config).merge(data)
}

/// Health check endpoint.
pub(crate) async fn health_check() -> &'static str {
    "OK"
}
