//! Command handlers that delegate to linkshelf-core.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<()>`
//! - Thin wrappers that parse CLI-specific input, call the core services and
//!   format output for the terminal
//!
//! Handlers should not talk to a store directly; reads go through the
//! `ReadCache` and writes through `LinkMutations` or the grid controller.

pub mod add;
pub mod categories;
pub mod copy_url;
pub mod edit;
pub mod import;
pub mod list;
pub mod remove;
pub mod serve;
pub mod stats;
pub mod table;

use linkshelf_core::views::PageState;
use linkshelf_core::{EditableGrid, QuerySnapshot};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Load the links once, failing the command when nothing could be loaded.
pub(crate) async fn load_snapshot(ctx: &CliContext) -> Result<QuerySnapshot, CliError> {
    let snapshot = ctx.cache.ensure_loaded().await;
    match PageState::from_snapshot(&snapshot) {
        PageState::FullPageError { message } => Err(snapshot
            .error
            .map_or(CliError::Core(message), CliError::from)),
        _ => Ok(snapshot),
    }
}

/// A grid over freshly loaded rows.
pub(crate) async fn loaded_grid(ctx: &CliContext) -> Result<EditableGrid, CliError> {
    load_snapshot(ctx).await?;
    let mut grid = ctx.grid();
    grid.load().await;
    Ok(grid)
}
