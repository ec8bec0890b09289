//! Command-line interface for linkshelf.
//!
//! The `linkshelf` binary browses and edits the catalog through the same
//! read cache, mutation coordinator and grid controller a UI would use, and
//! runs the Notion import bridge either once (`import`) or as an HTTP server
//! (`serve`).
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Silence unused dev-dependency warnings
#[cfg(test)]
use tempfile as _;

// Used by main.rs
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, LinkSourceConfig, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
