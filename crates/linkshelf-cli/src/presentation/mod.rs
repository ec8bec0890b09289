//! Shared CLI presentation utilities.
//!
//! Keep this module format-only: filtering, sorting and counting belong to
//! linkshelf-core's views and grid.

pub mod cards;
pub mod tables;
pub mod toasts;

// Re-export commonly used items
pub use cards::{render_card, render_cards};
pub use tables::{print_separator, render_table, separator, truncate_string};
pub use toasts::{TerminalNotifier, format_toast};
