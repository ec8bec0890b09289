//! Main commands enum and subcommand arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use linkshelf_axum::{DEFAULT_DATA_DIR, DEFAULT_PORT};
use linkshelf_core::{DEFAULT_CACHE_PATH, LLM_LINKS_CATALOG, LinkField};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Run the import bridge HTTP server
    Serve(ServeArgs),

    /// Pull a Notion database into its JSON cache file once
    Import(ImportArgs),

    /// List links as cards, filtered like the catalog page
    List(ListArgs),

    /// Show every category label in use
    Categories,

    /// Show link, category and popular counts
    Stats,

    /// Add a link to the catalog
    Add(AddArgs),

    /// Edit one field of a link
    Edit {
        /// Link ID
        id: String,
        /// Field to edit: name, url, model, description, category, tags
        field: LinkField,
        /// New value. List fields take comma-separated labels.
        value: String,
    },

    /// Flip a link's popular flag
    TogglePopular {
        /// Link ID
        id: String,
    },

    /// Remove a link from the catalog
    Remove {
        /// Link ID
        id: String,
    },

    /// Show links as an editable-grid table
    Table(TableArgs),

    /// Print a link's URL
    CopyUrl {
        /// Link ID
        id: String,
    },
}

/// Notion settings shared by `serve` and `import`.
#[derive(Args, Debug, Clone)]
pub struct NotionArgs {
    /// Notion integration token
    #[arg(long = "notion-api-key", env = "NOTION_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Notion database backing the `llm_links` catalog
    #[arg(long = "database-id", env = "NOTION_LINKS_DATABASE_ID")]
    pub database_id: Option<String>,

    /// Cache file written by an `llm_links` import
    #[arg(long = "cache-path", default_value = DEFAULT_CACHE_PATH)]
    pub cache_path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory served under /data
    #[arg(long = "data-dir", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Do not serve the cache directory
    #[arg(long = "no-data", conflicts_with = "data_dir")]
    pub no_data: bool,

    /// Restrict CORS to these origins (repeatable). Default allows all.
    #[arg(long = "allow-origin")]
    pub allow_origins: Vec<String>,

    #[command(flatten)]
    pub notion: NotionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Catalog to import
    #[arg(short = 't', long = "type", default_value = LLM_LINKS_CATALOG)]
    pub catalog: String,

    #[command(flatten)]
    pub notion: NotionArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Case-insensitive search over name, description, model and tags
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only links carrying this category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Only popular links
    #[arg(short, long)]
    pub popular: bool,

    /// Print JSON instead of cards
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Display title
    #[arg(long)]
    pub name: String,

    /// Target address
    #[arg(long)]
    pub url: String,

    /// Model label
    #[arg(long, default_value = "")]
    pub model: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Comma-separated categories
    #[arg(long, default_value = "")]
    pub categories: String,

    /// Comma-separated tags
    #[arg(long, default_value = "")]
    pub tags: String,

    /// Feature the link in the popular view
    #[arg(long)]
    pub popular: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// Sort by a column, `field` or `field:desc` (repeatable; first wins ties)
    #[arg(long = "sort", value_name = "FIELD[:desc]")]
    pub sort: Vec<String>,

    /// Column filter, `field=text` (repeatable)
    #[arg(long = "filter", value_name = "FIELD=TEXT")]
    pub filter: Vec<String>,
}
