//! Notion source for the linkshelf import bridge.
//!
//! [`DefaultNotionClient`] implements `linkshelf_core::WorkspaceSourcePort`:
//! it queries every page of a database and flattens each row's typed
//! properties (title, rich text, select, multi-select, checkbox, url) to
//! plain JSON. Any other property kind fails the import.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
#![allow(private_interfaces, private_bounds)]

mod client;
mod config;
mod error;
mod http;
mod models;
mod port;

// ============================================================================
// Public API
// ============================================================================

pub use client::{DefaultNotionClient, NotionClient};
pub use config::{DEFAULT_NOTION_VERSION, NotionClientConfig};
pub use error::NotionError;
