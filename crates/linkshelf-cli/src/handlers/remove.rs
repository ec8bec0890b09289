//! Remove command handler.

use anyhow::Result;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::loaded_grid;

/// Execute the remove command. There is no confirmation prompt.
pub async fn execute(ctx: &CliContext, id: &str) -> Result<()> {
    let mut grid = loaded_grid(ctx).await?;
    grid.delete_row(id).await.map_err(CliError::from)?;
    Ok(())
}
