//! Serve command handler.
//!
//! Starts the import bridge HTTP server and runs until interrupted.

use anyhow::Result;
use linkshelf_axum::{ServerConfig, start_server};

use crate::bootstrap::import_context;
use crate::commands::ServeArgs;

/// Server configuration for the flags.
pub fn server_config(args: &ServeArgs) -> ServerConfig {
    let mut config = ServerConfig::default().with_port(args.port);
    config = if args.no_data {
        config.without_data_dir()
    } else {
        config.with_data_dir(&args.data_dir)
    };
    if !args.allow_origins.is_empty() {
        config = config.with_allowed_origins(args.allow_origins.clone());
    }
    config
}

/// Execute the serve command.
pub async fn execute(args: &ServeArgs) -> Result<()> {
    let ctx = import_context(&args.notion)?;
    start_server(ctx, server_config(args)).await
}
