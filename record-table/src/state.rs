//! View state owned by a single table instance.

use std::collections::HashSet;

use crate::column::ColumnKey;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator for this direction.
    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// The active sort: which column and which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: ColumnKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: ColumnKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: ColumnKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

/// Filter, sort, visibility and paging state of one table.
///
/// Every field is independent. The only cross-field rule is that `visible`
/// never holds a key outside the `known` column set.
#[derive(Debug, Clone)]
pub struct ViewState {
    /// Global filter text. Empty means no filter.
    pub(crate) filter_text: String,
    /// Active sort. `None` means insertion order.
    pub(crate) sort: Option<SortSpec>,
    /// Keys of visible columns.
    pub(crate) visible: HashSet<ColumnKey>,
    /// Keys of all columns the table was built with.
    known: Vec<ColumnKey>,
    /// Rows per page. `None` shows everything.
    pub(crate) page_size: Option<usize>,
    /// Current page, 0-based. Clamped on read.
    pub(crate) page: usize,
}

impl ViewState {
    /// Fresh state for the given columns: no filter, insertion order,
    /// every column visible, no paging.
    pub fn new(columns: &[ColumnKey]) -> Self {
        Self {
            filter_text: String::new(),
            sort: None,
            visible: columns.iter().copied().collect(),
            known: columns.to_vec(),
            page_size: None,
            page: 0,
        }
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Set the filter text. Returns true if it changed.
    ///
    /// A new filter jumps back to the first page.
    pub fn set_filter_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.filter_text {
            return false;
        }
        self.filter_text = text;
        self.page = 0;
        true
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Toggle sort for a column.
    ///
    /// If the column is already sorted, flips the direction. Otherwise the
    /// column becomes the sort column, ascending. Never returns to
    /// insertion order. Unknown keys are ignored.
    pub fn toggle_sort(&mut self, key: &str) -> Option<SortSpec> {
        let key = self.known_key(key)?;
        let next = match self.sort {
            Some(current) if current.key == key => SortSpec {
                key,
                direction: current.direction.flipped(),
            },
            _ => SortSpec::ascending(key),
        };
        self.sort = Some(next);
        Some(next)
    }

    /// Set sort explicitly. Unknown keys are ignored.
    pub fn set_sort(&mut self, spec: SortSpec) -> bool {
        if self.known_key(spec.key).is_none() {
            return false;
        }
        self.sort = Some(spec);
        true
    }

    /// Return to insertion order.
    pub fn clear_sort(&mut self) -> bool {
        self.sort.take().is_some()
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    /// Show or hide a column. Returns the new visibility, or `None` if the
    /// key is not one of the table's columns.
    ///
    /// Hiding the last visible column is allowed.
    pub fn toggle_column(&mut self, key: &str) -> Option<bool> {
        let key = self.known_key(key)?;
        if self.visible.remove(key) {
            Some(false)
        } else {
            self.visible.insert(key);
            Some(true)
        }
    }

    /// Show or hide a column explicitly. Returns true if visibility
    /// changed. Unknown keys are ignored.
    pub fn set_column_visible(&mut self, key: &str, visible: bool) -> bool {
        let Some(key) = self.known_key(key) else {
            return false;
        };
        if visible {
            self.visible.insert(key)
        } else {
            self.visible.remove(key)
        }
    }

    /// Make every column visible again.
    pub fn show_all_columns(&mut self) {
        self.visible = self.known.iter().copied().collect();
    }

    /// Visible keys in column order.
    pub fn visible_columns(&self) -> Vec<ColumnKey> {
        self.known
            .iter()
            .copied()
            .filter(|key| self.visible.contains(key))
            .collect()
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    /// Set rows per page. `None` or `Some(0)` disables paging.
    pub fn set_page_size(&mut self, size: Option<usize>) {
        self.page_size = size.filter(|&s| s > 0);
        self.page = 0;
    }

    /// Number of pages for `row_count` rows. Always at least one.
    pub fn page_count(&self, row_count: usize) -> usize {
        match self.page_size {
            Some(size) => row_count.div_ceil(size).max(1),
            None => 1,
        }
    }

    /// Current page, clamped to the last page for `row_count` rows.
    pub fn page(&self, row_count: usize) -> usize {
        self.page.min(self.page_count(row_count) - 1)
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    fn known_key(&self, key: &str) -> Option<ColumnKey> {
        self.known.iter().copied().find(|known| *known == key)
    }
}
