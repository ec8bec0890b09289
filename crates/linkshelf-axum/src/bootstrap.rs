//! Axum server bootstrap - the composition root.
//!
//! This module is the only place where the import bridge's infrastructure is
//! wired together: the Notion client, the catalog table and the import
//! service that writes cache files.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use linkshelf_core::{CatalogSpec, ImportService, WorkspaceSourcePort};
use linkshelf_notion::{DefaultNotionClient, NotionClientConfig};

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3002;

/// Directory served under `/data` by default. Import cache files land here.
pub const DEFAULT_DATA_DIR: &str = "public/data";

/// CORS configuration for the web server.
#[derive(Debug, Clone, Default)]
pub enum CorsConfig {
    /// Allow all origins (development mode).
    #[default]
    AllowAll,
    /// Allow specific origins (production mode).
    AllowOrigins(Vec<String>),
}

/// Server configuration for the Axum adapter.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server.
    pub port: u16,
    /// Directory served read-only under `/data`. `None` disables it.
    pub data_dir: Option<PathBuf>,
    /// CORS configuration.
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: Some(PathBuf::from(DEFAULT_DATA_DIR)),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the directory served under `/data`.
    #[must_use]
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    #[must_use]
    pub fn without_data_dir(mut self) -> Self {
        self.data_dir = None;
        self
    }

    /// Set CORS to allow specific origins.
    #[must_use]
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.cors = CorsConfig::AllowOrigins(origins);
        self
    }
}

/// Application context for the Axum adapter.
pub struct AxumContext {
    /// Runs catalog imports.
    pub import: Arc<ImportService>,
}

impl AxumContext {
    /// Build a context over any workspace source.
    pub fn new(source: Arc<dyn WorkspaceSourcePort>, catalogs: Vec<CatalogSpec>) -> Self {
        Self {
            import: Arc::new(ImportService::new(source, catalogs)),
        }
    }
}

/// Wire the Notion client and the import service.
pub fn bootstrap(notion: &NotionClientConfig, catalogs: Vec<CatalogSpec>) -> Result<AxumContext> {
    for catalog in &catalogs {
        tracing::info!(
            target: "linkshelf.import",
            catalog = %catalog.key,
            configured = catalog.database_id.is_some(),
            cache_path = %catalog.cache_path.display(),
            "Registered import catalog"
        );
    }

    let client =
        DefaultNotionClient::new(notion).context("failed to build the Notion client")?;
    Ok(AxumContext::new(Arc::new(client), catalogs))
}

/// Start the web server on the configured port.
pub async fn start_server(ctx: AxumContext, config: ServerConfig) -> Result<()> {
    use tokio::net::TcpListener;
    use tracing::info;

    // Choose router based on whether cache file serving is configured
    let app = if let Some(ref data_dir) = config.data_dir {
        info!("Serving cache files from: {}", data_dir.display());
        crate::routes::create_data_router(ctx, data_dir, &config.cors)
    } else {
        crate::routes::create_router(ctx, &config.cors)
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("linkshelf import bridge listening on http://{}", addr);
    info!(
        "Fetch and cache endpoint: http://{}/api/fetch-and-cache",
        addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}
