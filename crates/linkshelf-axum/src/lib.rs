//! Axum web server for the linkshelf import bridge.
//!
//! Exposes `GET /api/fetch-and-cache?type=<catalog>`, which pulls a Notion
//! database through [`linkshelf_core::ImportService`] and overwrites the
//! catalog's JSON cache file, plus `GET /health` and read-only serving of the
//! cache directory under `/data`.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings; these are used by tests/
#[cfg(test)]
use http_body_util as _;
#[cfg(test)]
use serde_json as _;
#[cfg(test)]
use tempfile as _;
#[cfg(test)]
use tower as _;

pub mod bootstrap;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export primary types
pub use bootstrap::{
    AxumContext, CorsConfig, DEFAULT_DATA_DIR, DEFAULT_PORT, ServerConfig, bootstrap,
    start_server,
};
pub use error::HttpError;
pub use routes::{create_data_router, create_router};
pub use state::AppState;
