//! List command handler.
//!
//! Shows the catalog page as text: filtered cards, or JSON with `--json`.

use anyhow::Result;
use linkshelf_core::{CatalogFilters, CatalogView, QuerySnapshot};

use crate::bootstrap::CliContext;
use crate::commands::ListArgs;
use crate::handlers::load_snapshot;
use crate::presentation::render_cards;

/// Filters for the CLI flags. Without flags every link is shown.
pub fn filters_for(args: &ListArgs) -> CatalogFilters {
    let mut filters = CatalogFilters::everything();
    if args.popular {
        filters.select_popular();
    }
    if let Some(category) = &args.category {
        filters.select_category(category.clone());
    }
    if let Some(search) = &args.search {
        filters.set_search(search.clone());
    }
    filters
}

/// Render the filtered list.
pub fn render(snapshot: &QuerySnapshot, args: &ListArgs) -> Result<String> {
    let filters = filters_for(args);
    let links = CatalogView::new().filtered(snapshot, &filters);

    if args.json {
        return Ok(serde_json::to_string_pretty(&*links)?);
    }
    if links.is_empty() {
        return Ok(filters.empty_message().to_string());
    }
    Ok(format!(
        "Found {} link(s):\n\n{}",
        links.len(),
        render_cards(links.iter())
    ))
}

/// Execute the list command.
pub async fn execute(ctx: &CliContext, args: &ListArgs) -> Result<()> {
    let snapshot = load_snapshot(ctx).await?;
    println!("{}", render(&snapshot, args)?);
    Ok(())
}
