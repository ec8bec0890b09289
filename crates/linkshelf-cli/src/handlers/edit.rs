//! Edit and toggle-popular command handlers.
//!
//! Both go through the grid controller so a command behaves exactly like an
//! inline cell edit: focus, type, blur, commit.

use anyhow::Result;
use linkshelf_core::{LinkField, LinkRecord};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::loaded_grid;

/// Execute the edit command.
pub async fn execute(
    ctx: &CliContext,
    id: &str,
    field: LinkField,
    value: &str,
) -> Result<LinkRecord> {
    let mut grid = loaded_grid(ctx).await?;

    grid.focus(id, field).map_err(CliError::from)?;
    grid.input(id, field, value).map_err(CliError::from)?;
    let record = grid.blur(id, field).await.map_err(CliError::from)?;

    println!("{}: {} = {}", record.id, field, record.field_text(field));
    Ok(record)
}

/// Execute the toggle-popular command.
pub async fn toggle_popular(ctx: &CliContext, id: &str) -> Result<LinkRecord> {
    let mut grid = loaded_grid(ctx).await?;

    let record = grid.toggle_popular(id).await.map_err(CliError::from)?;
    println!(
        "{} is {}",
        record.name,
        if record.is_popular {
            "now popular"
        } else {
            "no longer popular"
        }
    );
    Ok(record)
}
