//! Column sorting and filtering over loaded rows.
//!
//! All of this is client-side: the store is never asked to sort or filter.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{LinkField, LinkRecord};

/// Sort direction of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One entry of the sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSort {
    pub field: LinkField,
    pub direction: SortDirection,
}

/// Per-column sort and filter state of the grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    sorting: Vec<ColumnSort>,
    filters: BTreeMap<LinkField, String>,
}

impl TableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active sorts, highest priority first.
    pub fn sorting(&self) -> &[ColumnSort] {
        &self.sorting
    }

    pub fn sort_direction(&self, field: LinkField) -> Option<SortDirection> {
        self.sorting
            .iter()
            .find(|sort| sort.field == field)
            .map(|sort| sort.direction)
    }

    /// Cycle a column through none, ascending, descending, none.
    ///
    /// Without `multi`, every other column's sort is dropped. With `multi`,
    /// the column keeps (or takes the last) position in the sort order.
    pub fn toggle_sorting(&mut self, field: LinkField, multi: bool) {
        let next = match self.sort_direction(field) {
            None => Some(SortDirection::Ascending),
            Some(SortDirection::Ascending) => Some(SortDirection::Descending),
            Some(SortDirection::Descending) => None,
        };

        if !multi {
            self.sorting = next
                .map(|direction| vec![ColumnSort { field, direction }])
                .unwrap_or_default();
            return;
        }

        match (
            self.sorting.iter().position(|sort| sort.field == field),
            next,
        ) {
            (Some(index), Some(direction)) => self.sorting[index].direction = direction,
            (Some(index), None) => {
                self.sorting.remove(index);
            }
            (None, Some(direction)) => self.sorting.push(ColumnSort { field, direction }),
            (None, None) => {}
        }
    }

    pub fn clear_sorting(&mut self) {
        self.sorting.clear();
    }

    /// Set a column's text filter. An empty value removes it.
    pub fn set_filter(&mut self, field: LinkField, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.filters.remove(&field);
        } else {
            self.filters.insert(field, value);
        }
    }

    pub fn filter_value(&self, field: LinkField) -> Option<&str> {
        self.filters.get(&field).map(String::as_str)
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Rows passing every column filter, in sort order.
    ///
    /// Unsorted rows keep their input order; sorting is stable.
    pub fn row_model<'a>(&self, rows: &'a [LinkRecord]) -> Vec<&'a LinkRecord> {
        let needles: Vec<(LinkField, String)> = self
            .filters
            .iter()
            .map(|(field, value)| (*field, value.trim().to_lowercase()))
            .collect();

        let mut visible: Vec<&LinkRecord> = rows
            .iter()
            .filter(|row| {
                needles.iter().all(|(field, needle)| {
                    row.field_text(*field).to_lowercase().contains(needle.as_str())
                })
            })
            .collect();

        if !self.sorting.is_empty() {
            visible.sort_by(|a, b| self.compare(a, b));
        }
        visible
    }

    fn compare(&self, a: &LinkRecord, b: &LinkRecord) -> Ordering {
        self.sorting
            .iter()
            .map(|sort| {
                let ordering = compare_field(a, b, sort.field);
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

fn compare_field(a: &LinkRecord, b: &LinkRecord, field: LinkField) -> Ordering {
    match field {
        LinkField::IsPopular => a.is_popular.cmp(&b.is_popular),
        _ => {
            let (left, right) = (a.field_text(field), b.field_text(field));
            left.to_lowercase()
                .cmp(&right.to_lowercase())
                .then_with(|| left.cmp(&right))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, name: &str, model: &str, popular: bool) -> LinkRecord {
        LinkRecord {
            id: id.into(),
            name: name.into(),
            url: format!("https://{id}.example"),
            model: model.into(),
            description: String::new(),
            category: Vec::new(),
            tags: vec![format!("tag-{id}")],
            is_popular: popular,
            created_at: None,
        }
    }

    fn rows() -> Vec<LinkRecord> {
        vec![
            row("1", "beta", "GPT-4", true),
            row("2", "Alpha", "Claude", false),
            row("3", "gamma", "Claude", true),
        ]
    }

    fn ids(rows: &[&LinkRecord]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_toggle_cycles_none_asc_desc_none() {
        let mut table = TableState::new();
        table.toggle_sorting(LinkField::Name, false);
        assert_eq!(table.sort_direction(LinkField::Name), Some(SortDirection::Ascending));
        table.toggle_sorting(LinkField::Name, false);
        assert_eq!(table.sort_direction(LinkField::Name), Some(SortDirection::Descending));
        table.toggle_sorting(LinkField::Name, false);
        assert_eq!(table.sort_direction(LinkField::Name), None);
        assert!(table.sorting().is_empty());
    }

    #[test]
    fn test_single_sort_replaces_other_columns() {
        let mut table = TableState::new();
        table.toggle_sorting(LinkField::Model, false);
        table.toggle_sorting(LinkField::Name, false);
        assert_eq!(table.sorting().len(), 1);
        assert_eq!(table.sorting()[0].field, LinkField::Name);
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let mut table = TableState::new();
        let data = rows();
        table.toggle_sorting(LinkField::Name, false);
        assert_eq!(ids(&table.row_model(&data)), vec!["2", "1", "3"]);
        table.toggle_sorting(LinkField::Name, false);
        assert_eq!(ids(&table.row_model(&data)), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_multi_sort_breaks_ties_in_order() {
        let mut table = TableState::new();
        let data = rows();
        table.toggle_sorting(LinkField::Model, false);
        table.toggle_sorting(LinkField::Name, true);
        table.toggle_sorting(LinkField::Name, true);
        // Claude (gamma, Alpha desc), then GPT-4
        assert_eq!(ids(&table.row_model(&data)), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_column_filters_compose_with_and() {
        let mut table = TableState::new();
        let data = rows();
        table.set_filter(LinkField::Model, "claude");
        assert_eq!(ids(&table.row_model(&data)), vec!["2", "3"]);
        table.set_filter(LinkField::IsPopular, "true");
        assert_eq!(ids(&table.row_model(&data)), vec!["3"]);
        table.set_filter(LinkField::Tags, "tag-2");
        assert!(table.row_model(&data).is_empty());

        table.set_filter(LinkField::Tags, "");
        table.set_filter(LinkField::IsPopular, "  ");
        assert_eq!(table.filter_value(LinkField::Tags), None);
        assert_eq!(table.row_model(&data).len(), 2);
    }

    #[test]
    fn test_unsorted_keeps_input_order() {
        let table = TableState::new();
        let data = rows();
        assert_eq!(ids(&table.row_model(&data)), vec!["1", "2", "3"]);
    }
}
