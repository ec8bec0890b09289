//! Import command handler.
//!
//! Runs the same import the bridge's `fetch-and-cache` endpoint runs, once,
//! without starting a server.

use anyhow::Result;
use linkshelf_core::ImportSummary;

use crate::bootstrap::import_context;
use crate::commands::ImportArgs;
use crate::error::CliError;

/// Execute the import command.
pub async fn execute(args: &ImportArgs) -> Result<ImportSummary> {
    let ctx = import_context(&args.notion)?;
    let summary = ctx
        .import
        .run(Some(&args.catalog))
        .await
        .map_err(CliError::from)?;

    println!("{}", summary.message());
    println!("Cache file: {}", summary.path.display());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::NotionArgs;

    #[tokio::test]
    async fn test_unconfigured_database_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = ImportArgs {
            catalog: "llm_links".into(),
            notion: NotionArgs {
                api_key: Some("secret".into()),
                database_id: None,
                cache_path: dir.path().join("llmLinks.json"),
            },
        };

        let err = execute(&args).await.unwrap_err();

        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 78);
        assert!(!dir.path().join("llmLinks.json").exists());
    }

    #[tokio::test]
    async fn test_unknown_catalog_is_usage_error() {
        let args = ImportArgs {
            catalog: "recipes".into(),
            notion: NotionArgs {
                api_key: None,
                database_id: Some("db".into()),
                cache_path: "unused.json".into(),
            },
        };

        let err = execute(&args).await.unwrap_err();

        assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 2);
    }
}
