//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::{Args, Parser};

use crate::commands::Commands;

/// Command-line interface for the curated LLM links catalog.
#[derive(Parser)]
#[command(name = "linkshelf")]
#[command(about = "Browse, edit and import the curated LLM links catalog")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Read links from a static JSON cache file (path or URL) instead of
    /// Supabase. Writes are rejected in this mode.
    #[arg(long = "static-source", global = true, value_name = "PATH_OR_URL")]
    pub static_source: Option<String>,

    #[command(flatten)]
    pub supabase: SupabaseArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Connection settings for the Supabase store.
#[derive(Args, Debug, Clone, Default)]
pub struct SupabaseArgs {
    /// Supabase project URL
    #[arg(long = "supabase-url", env = "SUPABASE_URL", global = true)]
    pub url: Option<String>,

    /// Supabase anonymous API key
    #[arg(
        long = "supabase-anon-key",
        env = "SUPABASE_ANON_KEY",
        global = true,
        hide_env_values = true
    )]
    pub anon_key: Option<String>,
}
