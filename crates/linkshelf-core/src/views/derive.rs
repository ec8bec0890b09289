//! Pure derivations over a snapshot.
//!
//! None of these functions fail: a snapshot without data yields empty results.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::LinkRecord;
use crate::services::QuerySnapshot;

/// Pseudo-category that matches every record.
pub const CATEGORY_ALL: &str = "all";

/// Pseudo-category selected together with the popular-only toggle. Matches
/// every record on its own.
pub const CATEGORY_POPULAR: &str = "popular";

/// Aggregate counts over the snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LinkStats {
    pub total: usize,
    /// Number of category lists. Each record's list counts on its own, even
    /// when another record carries the same labels.
    pub categories: usize,
    pub popular: usize,
}

/// Sorted, de-duplicated, non-empty category labels across all records.
pub fn categories(snapshot: &QuerySnapshot) -> Vec<String> {
    snapshot
        .records()
        .iter()
        .flat_map(|record| record.category.iter())
        .filter(|label| !label.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Records matching every criterion, in snapshot order.
///
/// - `search`: empty, or a case-insensitive substring of the name, model,
///   description or any tag
/// - `selected_category`: [`CATEGORY_ALL`], [`CATEGORY_POPULAR`], or a label
///   in the record's `category`
/// - `popular_only`: when set, only popular records
pub fn filter<'a>(
    snapshot: &'a QuerySnapshot,
    search: &str,
    selected_category: &str,
    popular_only: bool,
) -> Vec<&'a LinkRecord> {
    let needle = search.to_lowercase();
    snapshot
        .records()
        .iter()
        .filter(|record| matches_search(record, &needle))
        .filter(|record| matches_category(record, selected_category))
        .filter(|record| !popular_only || record.is_popular)
        .collect()
}

/// Totals for the header cards.
pub fn stats(snapshot: &QuerySnapshot) -> LinkStats {
    let records = snapshot.records();
    LinkStats {
        total: records.len(),
        categories: records.len(),
        popular: records.iter().filter(|record| record.is_popular).count(),
    }
}

fn matches_search(record: &LinkRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let contains = |text: &str| text.to_lowercase().contains(needle);
    contains(&record.name)
        || contains(&record.model)
        || contains(&record.description)
        || record.tags.iter().any(|tag| contains(tag))
}

fn matches_category(record: &LinkRecord, selected: &str) -> bool {
    selected == CATEGORY_ALL
        || selected == CATEGORY_POPULAR
        || record.category.iter().any(|label| label == selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str) -> LinkRecord {
        LinkRecord {
            id: id.into(),
            name: name.into(),
            url: format!("https://{id}.example"),
            model: String::new(),
            description: String::new(),
            category: Vec::new(),
            tags: Vec::new(),
            is_popular: false,
            created_at: None,
        }
    }

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn sample() -> QuerySnapshot {
        let mut chat = record("1", "ChatGPT");
        chat.model = "GPT-4o".into();
        chat.category = labels(&["a", "b"]);
        chat.is_popular = true;

        let mut coder = record("2", "Code Helper");
        coder.description = "Writes Rust".into();
        coder.category = labels(&["b", "c"]);
        coder.tags = labels(&["Programming"]);

        let legacy = record("3", "");

        QuerySnapshot::from_records(vec![chat, coder, legacy])
    }

    #[test]
    fn test_unfiltered_returns_all_in_order() {
        let snapshot = sample();
        let ids: Vec<&str> = filter(&snapshot, "", CATEGORY_ALL, false)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_categories_sorted_union() {
        assert_eq!(categories(&sample()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_categories_skip_only_empty_labels() {
        let mut odd = record("x", "Odd");
        odd.category = labels(&["", "  ", "z"]);
        let snapshot = QuerySnapshot::from_records(vec![odd]);
        assert_eq!(categories(&snapshot), vec!["  ", "z"]);
        // every offered facet still selects its record
        assert_eq!(filter(&snapshot, "", "  ", false).len(), 1);
    }

    #[test]
    fn test_search_matches_tag_only() {
        let snapshot = sample();
        let hits = filter(&snapshot, "programming", CATEGORY_ALL, false);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "2");
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let snapshot = sample();
        assert_eq!(filter(&snapshot, "gpt-4O", CATEGORY_ALL, false).len(), 1);
        assert_eq!(filter(&snapshot, "RUST", CATEGORY_ALL, false).len(), 1);
        assert!(filter(&snapshot, "nothing", CATEGORY_ALL, false).is_empty());
    }

    #[test]
    fn test_category_and_popular_compose() {
        let snapshot = sample();
        assert_eq!(filter(&snapshot, "", "b", false).len(), 2);
        assert_eq!(filter(&snapshot, "", "c", false).len(), 1);
        assert_eq!(filter(&snapshot, "", "b", true).len(), 1);
        assert_eq!(filter(&snapshot, "", CATEGORY_POPULAR, false).len(), 3);
        assert_eq!(filter(&snapshot, "", CATEGORY_POPULAR, true).len(), 1);
    }

    #[test]
    fn test_stats_counts_every_category_list() {
        let mut twin = record("4", "Twin");
        twin.category = labels(&["a", "b"]);
        let mut snapshot = sample();
        let mut records = snapshot.records().to_vec();
        records.push(twin);
        snapshot = QuerySnapshot::from_records(records);

        // equal lists on different records are still separate lists
        assert_eq!(
            stats(&snapshot),
            LinkStats {
                total: 4,
                categories: 4,
                popular: 1
            }
        );
    }

    #[test]
    fn test_stats_identical_lists_count_separately() {
        let mut first = record("1", "One");
        first.category = labels(&["a", "b"]);
        let mut second = record("2", "Two");
        second.category = labels(&["a", "b"]);
        let snapshot = QuerySnapshot::from_records(vec![first, second, record("3", "Three")]);

        assert_eq!(stats(&snapshot).categories, 3);
    }

    #[test]
    fn test_absent_data_yields_empty_results() {
        let snapshot = QuerySnapshot::empty();
        assert!(categories(&snapshot).is_empty());
        assert!(filter(&snapshot, "x", "a", true).is_empty());
        assert_eq!(stats(&snapshot), LinkStats::default());
    }
}
