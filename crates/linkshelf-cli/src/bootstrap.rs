//! CLI bootstrap - the composition root.
//!
//! This module is the only place where the CLI's infrastructure is wired
//! together:
//! - Link store (Supabase, or the static cache file with `--static-source`)
//! - Read cache and mutation coordinator (via linkshelf-core)
//! - Notion client and import service (via linkshelf-axum)
//!
//! Command handlers receive the composed context and delegate work to it.

use std::sync::Arc;

use anyhow::{Context, Result};
use linkshelf_axum::AxumContext;
use linkshelf_core::{
    CatalogSpec, EditableGrid, LinkMutations, LinkStorePort, Notifier, ReadCache,
};
use linkshelf_notion::NotionClientConfig;
use linkshelf_store::{DefaultStaticSource, DefaultSupabaseStore, StaticLocation, SupabaseConfig};

use crate::commands::NotionArgs;
use crate::error::CliError;
use crate::parser::SupabaseArgs;
use crate::presentation::TerminalNotifier;

/// Where links are read from and written to.
#[derive(Debug, Clone)]
pub enum LinkSourceConfig {
    /// Read/write Supabase table.
    Supabase(SupabaseConfig),
    /// Read-only JSON cache file.
    Static(StaticLocation),
}

/// Bootstrap configuration for the store-backed commands.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub source: LinkSourceConfig,
}

impl CliConfig {
    /// Pick the link source from the global flags.
    ///
    /// `--static-source` wins; otherwise both Supabase settings are required.
    pub fn resolve(static_source: Option<&str>, supabase: &SupabaseArgs) -> Result<Self, CliError> {
        if let Some(location) = static_source.map(str::trim).filter(|l| !l.is_empty()) {
            return Ok(Self {
                source: LinkSourceConfig::Static(StaticLocation::parse(location)),
            });
        }

        let url = non_empty(supabase.url.as_deref());
        let anon_key = non_empty(supabase.anon_key.as_deref());
        match (url, anon_key) {
            (Some(url), Some(anon_key)) => Ok(Self {
                source: LinkSourceConfig::Supabase(SupabaseConfig::new(url, anon_key)),
            }),
            _ => Err(CliError::Config(
                "SUPABASE_URL and SUPABASE_ANON_KEY must be set (or pass --static-source)".into(),
            )),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Fully composed context for store-backed commands.
pub struct CliContext {
    /// Shared snapshot of the link list.
    pub cache: Arc<ReadCache>,
    /// Writes that invalidate `cache` on success.
    pub mutations: Arc<LinkMutations>,
    /// Where toasts go.
    pub notifier: Arc<dyn Notifier>,
}

impl CliContext {
    /// Compose the services over any store.
    pub fn new(store: Arc<dyn LinkStorePort>, notifier: Arc<dyn Notifier>) -> Self {
        let cache = Arc::new(ReadCache::new(Arc::clone(&store)));
        let mutations = Arc::new(LinkMutations::new(store, Arc::clone(&cache)));
        Self {
            cache,
            mutations,
            notifier,
        }
    }

    /// A grid controller over this context's mutations.
    pub fn grid(&self) -> EditableGrid {
        EditableGrid::new(Arc::clone(&self.mutations), Arc::clone(&self.notifier))
    }
}

/// Build the store and the services on top of it.
pub fn bootstrap(config: &CliConfig) -> Result<CliContext> {
    let store: Arc<dyn LinkStorePort> = match &config.source {
        LinkSourceConfig::Supabase(supabase) => {
            tracing::debug!(
                target: "linkshelf.store",
                url = supabase.url(),
                table = supabase.table(),
                "Using Supabase link store"
            );
            Arc::new(
                DefaultSupabaseStore::new(supabase)
                    .context("failed to build the Supabase client")?,
            )
        }
        LinkSourceConfig::Static(location) => {
            tracing::debug!(
                target: "linkshelf.store",
                location = ?location,
                "Using static link source"
            );
            Arc::new(
                DefaultStaticSource::new(location.clone())
                    .context("failed to build the static link source")?,
            )
        }
    };

    Ok(CliContext::new(store, Arc::new(TerminalNotifier)))
}

/// Build the import bridge context from the Notion flags.
pub fn import_context(args: &NotionArgs) -> Result<AxumContext> {
    let api_key = non_empty(args.api_key.as_deref()).unwrap_or_default();
    if api_key.is_empty() {
        tracing::warn!("NOTION_API_KEY is not set; imports will be rejected by Notion");
    }

    let catalog = CatalogSpec::llm_links(args.database_id.clone()).with_cache_path(&args.cache_path);
    linkshelf_axum::bootstrap(&NotionClientConfig::new(api_key), vec![catalog])
}
