//! Table command handler.
//!
//! Renders the editable grid's row model with client-side sort and column
//! filters.

use anyhow::Result;
use linkshelf_core::{LinkField, TableState};

use crate::bootstrap::CliContext;
use crate::commands::TableArgs;
use crate::error::CliError;
use crate::handlers::loaded_grid;
use crate::presentation::render_table;

/// Apply `--sort field[:desc]` options in priority order.
pub fn apply_sorting(table: &mut TableState, sorts: &[String]) -> Result<(), CliError> {
    for (index, spec) in sorts.iter().enumerate() {
        let (name, descending) = match spec.rsplit_once(':') {
            Some((name, "desc")) => (name, true),
            Some((name, "asc")) => (name, false),
            Some(_) => {
                return Err(CliError::Arguments(format!(
                    "sort must be FIELD, FIELD:asc or FIELD:desc, got '{spec}'"
                )));
            }
            None => (spec.as_str(), false),
        };
        let field: LinkField = name.parse().map_err(CliError::Arguments)?;
        let multi = index > 0;
        table.toggle_sorting(field, multi);
        if descending {
            table.toggle_sorting(field, multi);
        }
    }
    Ok(())
}

/// Apply `--filter field=text` options.
pub fn apply_filters(table: &mut TableState, filters: &[String]) -> Result<(), CliError> {
    for spec in filters {
        let (name, value) = spec.split_once('=').ok_or_else(|| {
            CliError::Arguments(format!("filter must be FIELD=TEXT, got '{spec}'"))
        })?;
        let field: LinkField = name.parse().map_err(CliError::Arguments)?;
        table.set_filter(field, value);
    }
    Ok(())
}

/// Execute the table command.
pub async fn execute(ctx: &CliContext, args: &TableArgs) -> Result<()> {
    let mut grid = loaded_grid(ctx).await?;
    apply_sorting(grid.table_mut(), &args.sort)?;
    apply_filters(grid.table_mut(), &args.filter)?;

    let rows = grid.visible_rows();
    let refs: Vec<_> = rows.iter().collect();
    print!("{}", render_table(&refs));
    println!("{} row(s)", rows.len());
    Ok(())
}
