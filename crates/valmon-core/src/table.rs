//! Generic table state: sorting, filtering, pagination, selection tracking.

use std::cmp::Ordering;
use std::ops::Range;

/// Rows per page. A row-count ceiling rather than real paging: validator sets
/// fit on the first page.
pub const DEFAULT_PAGE_LEN: usize = 1000;

/// Sort key types for table columns.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Integer(i64),
    Float(f64),
    String(String),
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (SortKey::Integer(a), SortKey::Integer(b)) => a.partial_cmp(b),
            (SortKey::Float(a), SortKey::Float(b)) => a.partial_cmp(b),
            (SortKey::String(a), SortKey::String(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// Trait for table row items.
pub trait TableRow {
    /// Identity that survives sorting and filtering.
    type Id: Copy + PartialEq;

    fn id(&self) -> Self::Id;

    /// Number of columns.
    fn column_count() -> usize;

    /// Whether the column may be used as a sort key.
    fn is_sortable(column: usize) -> bool;

    /// Sort key for the specified column.
    fn sort_key(&self, column: usize) -> SortKey;

    /// Check if item matches the filter.
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Active sort. `None` in [`TableState::sort`] means source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: usize,
    pub ascending: bool,
}

/// State for a table widget. Items are owned by the caller; this only holds
/// how they are arranged and which one is selected.
#[derive(Debug, Clone)]
pub struct TableState<Id> {
    pub sort: Option<SortSpec>,
    /// Filter string.
    pub filter: Option<String>,
    /// Zero-based page index.
    pub page: usize,
    pub page_len: usize,
    /// Selected row index within the current page.
    pub selected: usize,
    /// Tracked entity ID; follows the selected row across sort/filter changes.
    pub tracked_id: Option<Id>,
}

impl<Id> Default for TableState<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> TableState<Id> {
    pub fn new() -> Self {
        Self {
            sort: None,
            filter: None,
            page: 0,
            page_len: DEFAULT_PAGE_LEN,
            selected: 0,
            tracked_id: None,
        }
    }

    /// Returns filtered and sorted items. Sorting is stable, so rows with
    /// equal keys keep their source order.
    pub fn arrange<'a, T>(&self, items: &'a [T]) -> Vec<&'a T>
    where
        T: TableRow<Id = Id>,
    {
        let mut rows: Vec<&T> = items
            .iter()
            .filter(|item| {
                self.filter
                    .as_ref()
                    .map(|f| item.matches_filter(f))
                    .unwrap_or(true)
            })
            .collect();

        if let Some(SortSpec { column, ascending }) = self.sort {
            rows.sort_by(|a, b| {
                let cmp = a
                    .sort_key(column)
                    .partial_cmp(&b.sort_key(column))
                    .unwrap_or(Ordering::Equal);
                if ascending { cmp } else { cmp.reverse() }
            });
        }
        rows
    }

    /// Number of pages for `total` rows; never zero.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_len.max(1)).max(1)
    }

    /// Index range of the current page within `total` arranged rows.
    pub fn page_range(&self, total: usize) -> Range<usize> {
        let len = self.page_len.max(1);
        let start = (self.page * len).min(total);
        start..(start + len).min(total)
    }

    /// Pulls the page index back in range after the row count shrank.
    pub fn clamp_page(&mut self, total: usize) {
        self.page = self.page.min(self.page_count(total) - 1);
    }

    pub fn next_page(&mut self, total: usize) {
        if self.page + 1 < self.page_count(total) {
            self.page += 1;
            self.selected = 0;
            self.tracked_id = None;
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 0 {
            self.page -= 1;
            self.selected = 0;
            self.tracked_id = None;
        }
    }

    /// Cycles to the next sortable column (descending, highest first).
    pub fn next_sort_column<T: TableRow<Id = Id>>(&mut self) {
        let count = T::column_count();
        let start = self.sort.map(|s| s.column).unwrap_or(0);
        let next = (1..=count)
            .map(|step| (start + step) % count)
            .find(|&col| T::is_sortable(col));
        if let Some(column) = next {
            self.sort = Some(SortSpec {
                column,
                ascending: false,
            });
        }
    }

    /// Sorts by `column`; a second request on the same column flips the
    /// direction. Returns false for non-sortable columns.
    pub fn sort_by_column<T: TableRow<Id = Id>>(&mut self, column: usize) -> bool {
        if column >= T::column_count() || !T::is_sortable(column) {
            return false;
        }
        self.sort = Some(match self.sort {
            Some(s) if s.column == column => SortSpec {
                column,
                ascending: !s.ascending,
            },
            _ => SortSpec {
                column,
                ascending: false,
            },
        });
        true
    }

    /// Toggles sort direction.
    pub fn toggle_sort_direction(&mut self) {
        if let Some(s) = self.sort.as_mut() {
            s.ascending = !s.ascending;
        }
    }

    /// Back to source order.
    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Sets filter string.
    pub fn set_filter(&mut self, filter: Option<String>) {
        self.filter = filter;
        self.page = 0;
        self.selected = 0;
    }

    pub fn select_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.tracked_id = None;
    }

    pub fn select_down(&mut self) {
        self.selected = self.selected.saturating_add(1);
        self.tracked_id = None;
    }

    pub fn page_up(&mut self, n: usize) {
        self.selected = self.selected.saturating_sub(n);
        self.tracked_id = None;
    }

    pub fn page_down(&mut self, n: usize) {
        self.selected = self.selected.saturating_add(n);
        self.tracked_id = None;
    }

    pub fn home(&mut self) {
        self.selected = 0;
        self.tracked_id = None;
    }

    pub fn end(&mut self) {
        self.selected = usize::MAX;
        self.tracked_id = None;
    }
}

impl<Id: Copy + PartialEq> TableState<Id> {
    /// Resolves selection by tracked entity ID.
    /// If the tracked entity is on the current page, moves `selected` to its
    /// new index. Otherwise clears `tracked_id` and clamps `selected`.
    /// Always updates `tracked_id` from the current row.
    pub fn resolve_selection(&mut self, page_ids: &[Id]) {
        let len = page_ids.len();
        if len == 0 {
            self.selected = 0;
            self.tracked_id = None;
            return;
        }

        if let Some(tid) = self.tracked_id {
            if let Some(pos) = page_ids.iter().position(|&id| id == tid) {
                self.selected = pos;
            } else {
                self.tracked_id = None;
            }
        }
        self.selected = self.selected.min(len - 1);
        self.tracked_id = Some(page_ids[self.selected]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Item {
        id: u32,
        name: &'static str,
        score: i64,
    }

    impl TableRow for Item {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn column_count() -> usize {
            3
        }

        fn is_sortable(column: usize) -> bool {
            column != 0
        }

        fn sort_key(&self, column: usize) -> SortKey {
            match column {
                1 => SortKey::String(self.name.to_string()),
                2 => SortKey::Integer(self.score),
                _ => SortKey::Integer(0),
            }
        }

        fn matches_filter(&self, filter: &str) -> bool {
            self.name.contains(filter)
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { id: 1, name: "carol", score: 5 },
            Item { id: 2, name: "alice", score: 9 },
            Item { id: 3, name: "bob", score: 5 },
        ]
    }

    fn ids(rows: &[&Item]) -> Vec<u32> {
        rows.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn unsorted_keeps_source_order() {
        let items = items();
        let state = TableState::<u32>::new();
        assert_eq!(ids(&state.arrange(&items)), vec![1, 2, 3]);
    }

    #[test]
    fn sort_is_stable_in_both_directions() {
        let items = items();
        let mut state = TableState::<u32>::new();
        assert!(state.sort_by_column::<Item>(2));
        assert_eq!(ids(&state.arrange(&items)), vec![2, 1, 3]);
        assert!(state.sort_by_column::<Item>(2));
        assert!(state.sort.unwrap().ascending);
        assert_eq!(ids(&state.arrange(&items)), vec![1, 3, 2]);
    }

    #[test]
    fn rank_column_is_not_sortable() {
        let mut state = TableState::<u32>::new();
        assert!(!state.sort_by_column::<Item>(0));
        assert!(!state.sort_by_column::<Item>(7));
        assert_eq!(state.sort, None);
    }

    #[test]
    fn next_sort_column_skips_unsortable() {
        let mut state = TableState::<u32>::new();
        state.next_sort_column::<Item>();
        assert_eq!(state.sort.unwrap().column, 1);
        state.next_sort_column::<Item>();
        assert_eq!(state.sort.unwrap().column, 2);
        state.next_sort_column::<Item>();
        assert_eq!(state.sort.unwrap().column, 1);
    }

    #[test]
    fn filter_applies_before_sort() {
        let items = items();
        let mut state = TableState::<u32>::new();
        state.set_filter(Some("o".to_string()));
        state.sort_by_column::<Item>(1);
        state.toggle_sort_direction();
        assert_eq!(ids(&state.arrange(&items)), vec![3, 1]);
    }

    #[test]
    fn pagination_ranges() {
        let mut state = TableState::<u32>::new();
        state.page_len = 2;
        assert_eq!(state.page_count(0), 1);
        assert_eq!(state.page_count(5), 3);
        assert_eq!(state.page_range(5), 0..2);
        state.next_page(5);
        state.next_page(5);
        state.next_page(5);
        assert_eq!(state.page, 2);
        assert_eq!(state.page_range(5), 4..5);
        state.clamp_page(3);
        assert_eq!(state.page, 1);
        state.prev_page();
        state.prev_page();
        assert_eq!(state.page, 0);
    }

    #[test]
    fn selection_follows_tracked_row() {
        let mut state = TableState::<u32>::new();
        state.resolve_selection(&[1, 2, 3]);
        state.select_down();
        state.resolve_selection(&[1, 2, 3]);
        assert_eq!(state.tracked_id, Some(2));

        // re-sorted: row 2 moved to the end
        state.resolve_selection(&[1, 3, 2]);
        assert_eq!(state.selected, 2);

        // row 2 filtered out: clamp
        state.resolve_selection(&[1]);
        assert_eq!(state.selected, 0);
        assert_eq!(state.tracked_id, Some(1));

        state.end();
        state.resolve_selection(&[4, 5]);
        assert_eq!(state.selected, 1);

        state.resolve_selection(&[]);
        assert_eq!(state.tracked_id, None);
    }
}
