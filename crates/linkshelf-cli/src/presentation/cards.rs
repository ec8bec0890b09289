//! Card rendering for the catalog list.

use std::fmt::Write as _;

use linkshelf_core::LinkRecord;

/// One link as a card: title line, description, labels and URL.
pub fn render_card(link: &LinkRecord) -> String {
    let mut out = String::new();
    let star = if link.is_popular { " ★" } else { "" };
    if link.model.is_empty() {
        let _ = writeln!(out, "{}{star}", link.name);
    } else {
        let _ = writeln!(out, "{}{star}  [{}]", link.name, link.model);
    }
    if !link.description.is_empty() {
        let _ = writeln!(out, "  {}", link.description);
    }
    let labels: Vec<String> = link
        .category
        .iter()
        .cloned()
        .chain(link.tags.iter().map(|tag| format!("#{tag}")))
        .collect();
    if !labels.is_empty() {
        let _ = writeln!(out, "  {}", labels.join("  "));
    }
    let _ = writeln!(out, "  {}", link.url);
    out
}

/// Cards separated by blank lines.
pub fn render_cards<'a>(links: impl IntoIterator<Item = &'a LinkRecord>) -> String {
    links
        .into_iter()
        .map(render_card)
        .collect::<Vec<_>>()
        .join("\n")
}
