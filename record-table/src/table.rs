//! The record table: caller-supplied data plus its own view state.

use std::sync::Arc;

use log::{debug, trace};

use crate::column::{ColumnDef, ColumnKey};
use crate::pipeline::{filter_indices, sort_indices};
use crate::record::Record;
use crate::state::{SortSpec, ViewState};

/// Callback invoked with the original record when a row is activated.
pub type RowActivateHandler<R> = Box<dyn FnMut(&R)>;

/// Produces the extra toolbar entries shown next to the filter.
pub type ToolbarExtras = Box<dyn Fn() -> Vec<String>>;

/// One entry of the column visibility menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMenuEntry {
    pub key: ColumnKey,
    pub label: String,
    pub visible: bool,
}

/// A filterable, sortable table over a shared list of records.
///
/// `RecordTable<R>` holds:
/// - The column schema and the caller's records (never mutated)
/// - A global text filter over every record attribute
/// - Single-column sort toggled from the header
/// - Per-column visibility (render only)
/// - Optional paging
///
/// View state lives and dies with the table. Two tables over the same
/// records share nothing but the records.
///
/// # Example
///
/// ```ignore
/// let mut table = RecordTable::new("Feedback", columns, Arc::new(clusters))
///     .on_row_activate(|cluster| open_cluster(&cluster.id));
/// table.set_filter_text("billing");
/// table.toggle_sort("votes");
/// let rows = table.visible_rows();
/// ```
pub struct RecordTable<R: Record> {
    title: String,
    columns: Vec<ColumnDef<R>>,
    records: Arc<Vec<R>>,
    state: ViewState,
    on_row_activate: Option<RowActivateHandler<R>>,
    toolbar_extras: Option<ToolbarExtras>,
    /// Set by every view change, cleared by [`RecordTable::take_dirty`].
    dirty: bool,
}

impl<R: Record> RecordTable<R> {
    /// Create a table with fresh view state.
    pub fn new(title: impl Into<String>, columns: Vec<ColumnDef<R>>, records: Arc<Vec<R>>) -> Self {
        let keys: Vec<ColumnKey> = columns.iter().map(|c| c.key).collect();
        Self {
            title: title.into(),
            columns,
            records,
            state: ViewState::new(&keys),
            on_row_activate: None,
            toolbar_extras: None,
            dirty: true,
        }
    }

    /// Set the row activation callback.
    pub fn on_row_activate(mut self, handler: impl FnMut(&R) + 'static) -> Self {
        self.on_row_activate = Some(Box::new(handler));
        self
    }

    /// Set the toolbar extras provider.
    pub fn toolbar_extras(mut self, extras: impl Fn() -> Vec<String> + 'static) -> Self {
        self.toolbar_extras = Some(Box::new(extras));
        self
    }

    /// Start with paging enabled.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.state.set_page_size(Some(size));
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Get the column definitions.
    pub fn columns(&self) -> &[ColumnDef<R>] {
        &self.columns
    }

    /// Find a column by key.
    pub fn column(&self, key: &str) -> Option<&ColumnDef<R>> {
        self.columns.iter().find(|c| c.key == key)
    }

    /// The records exactly as supplied.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Replace the records. View state is kept.
    pub fn set_records(&mut self, records: Arc<Vec<R>>) {
        self.records = records;
        self.dirty = true;
    }

    /// Current view state.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Extra toolbar entries, if a provider was set.
    pub fn extras(&self) -> Vec<String> {
        self.toolbar_extras.as_ref().map(|f| f()).unwrap_or_default()
    }

    /// Returns true once after any view change.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    // -------------------------------------------------------------------------
    // Filter
    // -------------------------------------------------------------------------

    pub fn filter_text(&self) -> &str {
        self.state.filter_text()
    }

    /// Set the global filter text.
    pub fn set_filter_text(&mut self, text: impl Into<String>) {
        if self.state.set_filter_text(text) {
            debug!("Table '{}': filter set to {:?}", self.title, self.state.filter_text());
            self.dirty = true;
        }
    }

    /// Remove the global filter.
    pub fn clear_filter(&mut self) {
        self.set_filter_text(String::new());
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get current sort state.
    pub fn sort(&self) -> Option<SortSpec> {
        self.state.sort()
    }

    /// Toggle sort for a column, as a header click does.
    ///
    /// Returns the new sort state, or `None` for an unknown key.
    pub fn toggle_sort(&mut self, key: &str) -> Option<SortSpec> {
        let spec = self.state.toggle_sort(key)?;
        debug!(
            "Table '{}': sort by {} {:?}",
            self.title, spec.key, spec.direction
        );
        self.dirty = true;
        Some(spec)
    }

    /// Set sort explicitly.
    pub fn set_sort(&mut self, spec: SortSpec) {
        if self.state.set_sort(spec) {
            self.dirty = true;
        }
    }

    /// Return to insertion order. Header clicks never do this.
    pub fn clear_sort(&mut self) {
        if self.state.clear_sort() {
            self.dirty = true;
        }
    }

    // -------------------------------------------------------------------------
    // Column visibility
    // -------------------------------------------------------------------------

    pub fn is_column_visible(&self, key: &str) -> bool {
        self.state.is_visible(key)
    }

    /// Show or hide a column. Unknown keys are ignored.
    pub fn toggle_column(&mut self, key: &str) -> Option<bool> {
        let visible = self.state.toggle_column(key)?;
        debug!(
            "Table '{}': column {} {}",
            self.title,
            key,
            if visible { "shown" } else { "hidden" }
        );
        self.dirty = true;
        Some(visible)
    }

    /// Show or hide a column regardless of its current state.
    ///
    /// Returns `None` for an unknown key, otherwise whether it changed.
    pub fn set_column_visible(&mut self, key: &str, visible: bool) -> Option<bool> {
        self.column(key)?;
        let changed = self.state.set_column_visible(key, visible);
        if changed {
            debug!(
                "Table '{}': column {} {}",
                self.title,
                key,
                if visible { "shown" } else { "hidden" }
            );
            self.dirty = true;
        }
        Some(changed)
    }

    /// Make every column visible.
    pub fn show_all_columns(&mut self) {
        self.state.show_all_columns();
        self.dirty = true;
    }

    /// Visible columns in schema order.
    pub fn visible_columns(&self) -> Vec<&ColumnDef<R>> {
        self.columns
            .iter()
            .filter(|c| self.state.is_visible(c.key))
            .collect()
    }

    /// Entries for a column visibility menu, in schema order.
    pub fn column_menu(&self) -> Vec<ColumnMenuEntry> {
        self.columns
            .iter()
            .map(|c| ColumnMenuEntry {
                key: c.key,
                label: c.label.clone(),
                visible: self.state.is_visible(c.key),
            })
            .collect()
    }

    // -------------------------------------------------------------------------
    // Paging
    // -------------------------------------------------------------------------

    /// Set rows per page. `None` shows every row.
    pub fn set_page_size(&mut self, size: Option<usize>) {
        self.state.set_page_size(size);
        self.dirty = true;
    }

    /// Current page, 0-based.
    pub fn page(&self) -> usize {
        self.state.page(self.filtered_count())
    }

    pub fn page_count(&self) -> usize {
        self.state.page_count(self.filtered_count())
    }

    /// Jump to a page. Out of range pages clamp to the last one.
    pub fn set_page(&mut self, page: usize) {
        let page = page.min(self.page_count() - 1);
        if page != self.page() {
            self.dirty = true;
        }
        // Always store, so a stale page beyond the clamp cannot come back.
        self.state.set_page(page);
    }

    /// Advance one page. Returns false on the last page.
    pub fn next_page(&mut self) -> bool {
        let current = self.page();
        if current + 1 < self.page_count() {
            self.set_page(current + 1);
            return true;
        }
        false
    }

    /// Go back one page. Returns false on the first page.
    pub fn prev_page(&mut self) -> bool {
        let current = self.page();
        if current > 0 {
            self.set_page(current - 1);
            return true;
        }
        false
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Record indices after filtering and sorting, before paging.
    pub fn filtered_rows(&self) -> Vec<usize> {
        let mut indices = filter_indices(self.records(), self.state.filter_text());
        if let Some(spec) = self.state.sort()
            && let Some(column) = self.column(spec.key)
        {
            sort_indices(self.records(), &mut indices, column.accessor, spec.direction);
        }
        trace!(
            "Table '{}': {} of {} records pass the view",
            self.title,
            indices.len(),
            self.records.len()
        );
        indices
    }

    /// Number of records passing the filter, ignoring paging.
    pub fn filtered_count(&self) -> usize {
        filter_indices(self.records(), self.state.filter_text()).len()
    }

    /// Record indices shown on the current page, in display order.
    pub fn visible_rows(&self) -> Vec<usize> {
        let rows = self.filtered_rows();
        match self.state.page_size() {
            Some(size) => {
                let page = self.state.page(rows.len());
                rows.into_iter().skip(page * size).take(size).collect()
            }
            None => rows,
        }
    }

    /// Record shown at a display position on the current page.
    pub fn row_at(&self, position: usize) -> Option<&R> {
        let index = *self.visible_rows().get(position)?;
        self.records.get(index)
    }

    /// Activate the row at a display position.
    ///
    /// The callback receives a reference into the original record list.
    /// Returns false if no row is shown at `position`.
    pub fn activate_row(&mut self, position: usize) -> bool {
        let Some(&index) = self.visible_rows().get(position) else {
            return false;
        };
        let Some(record) = self.records.get(index) else {
            return false;
        };
        debug!("Table '{}': activate row {}", self.title, record.id());
        if let Some(handler) = self.on_row_activate.as_mut() {
            handler(record);
        }
        true
    }
}
