//! Remote store gateway for linkshelf.
//!
//! Two implementations of `linkshelf_core::LinkStorePort`:
//!
//! - [`SupabaseLinkStore`]: read/write gateway to the Supabase PostgREST
//!   table `llm_links`
//! - [`StaticLinkSource`]: read-only source over the static JSON cache file
//!   (local path or URL)
//!
//! Neither retries. Network failures map to `StoreError::Transport`, answers
//! from the store to `StoreError::Store` or `StoreError::NotFound`.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]
// The HTTP backend is an implementation detail; callers go through the
// type aliases and the port trait.
#![allow(private_interfaces, private_bounds)]

mod client;
mod config;
mod error;
mod http;
mod port;
mod static_source;

// ============================================================================
// Public API
// ============================================================================

pub use client::{DefaultSupabaseStore, SupabaseLinkStore};
pub use config::{DEFAULT_TABLE, SupabaseConfig};
pub use error::SupabaseError;
pub use static_source::{DefaultStaticSource, StaticLinkSource, StaticLocation};
