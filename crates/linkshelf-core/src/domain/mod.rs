//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (PostgREST, Notion, filesystem).

mod link;

pub use link::{
    FieldKind, LinkField, LinkPatch, LinkRecord, NewLink, StoredLink, join_labels, split_labels,
};
