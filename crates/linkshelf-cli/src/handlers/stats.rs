//! Stats command handler.

use anyhow::Result;
use linkshelf_core::LinkStats;
use linkshelf_core::views::stats;

use crate::bootstrap::CliContext;
use crate::handlers::load_snapshot;

pub fn render(stats: &LinkStats) -> String {
    format!(
        "Total links:      {}\nCategories:       {}\nPopular links:    {}",
        stats.total, stats.categories, stats.popular
    )
}

/// Execute the stats command.
pub async fn execute(ctx: &CliContext) -> Result<()> {
    let snapshot = load_snapshot(ctx).await?;
    println!("{}", render(&stats(&snapshot)));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::*;

    #[tokio::test]
    async fn test_counts() {
        let (store, _, _) = seeded_store();
        let (ctx, _) = context(&store);
        let snapshot = load_snapshot(&ctx).await.unwrap();

        let text = render(&stats(&snapshot));

        assert!(text.contains("Total links:      2"));
        assert!(text.contains("Categories:       2"));
        assert!(text.contains("Popular links:    1"));
    }
}
