//! HTTP request handlers for the import bridge.
//!
//! Handlers are thin wrappers that delegate to `ImportService`.

pub mod import;
