//! Copy-url command handler.
//!
//! Prints only the URL so the output can be piped to a clipboard tool.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::loaded_grid;

/// Execute the copy-url command.
pub async fn execute(ctx: &CliContext, id: &str) -> Result<String> {
    let grid = loaded_grid(ctx).await?;
    let url = grid.copy_url(id).map_err(CliError::from)?;
    println!("{url}");
    Ok(url)
}
