//! Table formatting utilities for CLI output.

use std::fmt::Write as _;

use linkshelf_core::{LinkRecord, join_labels};

/// Truncates a string to a maximum number of characters, adding "..." if
/// needed.
///
/// # Examples
///
/// ```rust
/// use linkshelf_cli::presentation::truncate_string;
///
/// assert_eq!(truncate_string("Hello", 10), "Hello");
/// assert_eq!(truncate_string("Hello World", 8), "Hello...");
/// ```
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// A horizontal separator line.
pub fn separator(width: usize) -> String {
    "-".repeat(width)
}

/// Print a horizontal separator line.
pub fn print_separator(width: usize) {
    println!("{}", separator(width));
}

const TABLE_WIDTH: usize = 118;

/// Grid view of `rows` in the order given: one line per link with every
/// editable column.
pub fn render_table(rows: &[&LinkRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12} {:<22} {:<12} {:<18} {:<16} {:<3} URL",
        "ID", "Name", "Model", "Categories", "Tags", "Pop"
    );
    let _ = writeln!(out, "{}", separator(TABLE_WIDTH));

    for row in rows {
        let _ = writeln!(
            out,
            "{:<12} {:<22} {:<12} {:<18} {:<16} {:<3} {}",
            truncate_string(&row.id, 12),
            truncate_string(&row.name, 22),
            truncate_string(&row.model, 12),
            truncate_string(&join_labels(&row.category), 18),
            truncate_string(&join_labels(&row.tags), 16),
            if row.is_popular { "*" } else { "" },
            row.url
        );
    }
    out
}
