//! Categories command handler.

use anyhow::Result;
use linkshelf_core::views::categories;

use crate::bootstrap::CliContext;
use crate::handlers::load_snapshot;

/// Execute the categories command: one label per line, sorted.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let snapshot = load_snapshot(ctx).await?;
    let labels = categories(&snapshot);
    if labels.is_empty() {
        println!("No categories found.");
    }
    for label in labels {
        println!("{label}");
    }
    Ok(())
}
