//! Rendering a table to plain cells and fixed-width text lines.
//!
//! Column visibility only matters here. Filtering and sorting have already
//! looked at every column by the time rows are rendered.

use crate::column::{Alignment, ColumnKey};
use crate::record::Record;
use crate::state::SortDirection;
use crate::table::RecordTable;
use crate::text::{display_width, fit_to_width, truncate_to_width};

/// Separator drawn between columns.
pub const COLUMN_SEPARATOR: &str = " │ ";

/// Everything shown above the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbar {
    pub title: String,
    pub filter_text: String,
    /// Rows passing the filter, before paging.
    pub row_count: usize,
    pub page: usize,
    pub page_count: usize,
    pub extras: Vec<String>,
}

impl Toolbar {
    /// One-line summary, e.g. `Feedback · 12 rows · page 1/2 · [Export]`.
    pub fn summary(&self) -> String {
        let mut parts = vec![
            self.title.clone(),
            format!(
                "{} {}",
                self.row_count,
                if self.row_count == 1 { "row" } else { "rows" }
            ),
        ];
        if self.page_count > 1 {
            parts.push(format!("page {}/{}", self.page + 1, self.page_count));
        }
        parts.extend(self.extras.iter().map(|e| format!("[{}]", e)));
        parts.join(" · ")
    }
}

/// A header cell of a visible column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: ColumnKey,
    pub label: String,
    /// Direction if this is the active sort column.
    pub sort: Option<SortDirection>,
    pub width: Option<u16>,
    pub align: Alignment,
}

impl HeaderCell {
    /// Label plus sort indicator.
    pub fn text(&self) -> String {
        match self.sort {
            Some(direction) => format!("{} {}", self.label, direction.indicator()),
            None => self.label.clone(),
        }
    }
}

/// A body cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub text: String,
    pub class: Option<String>,
    pub align: Alignment,
}

/// A body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    /// Index into the original record list.
    pub index: usize,
    /// Row key.
    pub id: String,
    pub cells: Vec<RenderedCell>,
}

/// A table flattened to text cells for the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub toolbar: Toolbar,
    pub header: Vec<HeaderCell>,
    pub rows: Vec<RenderedRow>,
}

impl<R: Record> RecordTable<R> {
    /// Render the current page.
    pub fn render(&self) -> RenderedTable {
        let sort = self.sort();
        let columns = self.visible_columns();

        let header = columns
            .iter()
            .map(|c| HeaderCell {
                key: c.key,
                label: c.label.clone(),
                sort: sort.filter(|s| s.key == c.key).map(|s| s.direction),
                width: c.width,
                align: c.align,
            })
            .collect();

        let rows = self
            .visible_rows()
            .into_iter()
            .map(|index| {
                let record = &self.records()[index];
                RenderedRow {
                    index,
                    id: record.id(),
                    cells: columns
                        .iter()
                        .map(|c| RenderedCell {
                            text: c.cell_text(record),
                            class: c.class.clone(),
                            align: c.align,
                        })
                        .collect(),
                }
            })
            .collect();

        RenderedTable {
            toolbar: Toolbar {
                title: self.title().to_string(),
                filter_text: self.filter_text().to_string(),
                row_count: self.filtered_count(),
                page: self.page(),
                page_count: self.page_count(),
                extras: self.extras(),
            },
            header,
            rows,
        }
    }
}

impl RenderedTable {
    /// Width of each visible column: its fixed width, or the widest of its
    /// header and cells.
    pub fn column_widths(&self) -> Vec<usize> {
        self.header
            .iter()
            .enumerate()
            .map(|(i, h)| match h.width {
                Some(w) => w as usize,
                None => self
                    .rows
                    .iter()
                    .filter_map(|r| r.cells.get(i))
                    .map(|c| display_width(&c.text))
                    .fold(display_width(&h.text()), usize::max),
            })
            .collect()
    }

    /// Which header column covers x-coordinate `x` of a line from
    /// [`RenderedTable::to_lines`]. Separators belong to no column.
    pub fn column_at_x(&self, x: usize) -> Option<ColumnKey> {
        let separator = display_width(COLUMN_SEPARATOR);
        let mut start = 0;
        for (header, width) in self.header.iter().zip(self.column_widths()) {
            if x >= start && x < start + width {
                return Some(header.key);
            }
            start += width + separator;
        }
        None
    }

    /// Header line followed by one line per row, each cut to `max_width`.
    pub fn to_lines(&self, max_width: usize) -> Vec<String> {
        let widths = self.column_widths();

        let header = self
            .header
            .iter()
            .zip(&widths)
            .map(|(h, &w)| fit_to_width(&h.text(), w, h.align))
            .collect::<Vec<_>>()
            .join(COLUMN_SEPARATOR);

        let mut lines = vec![truncate_to_width(header.trim_end(), max_width)];
        for row in &self.rows {
            let line = row
                .cells
                .iter()
                .zip(&widths)
                .map(|(c, &w)| fit_to_width(&c.text, w, c.align))
                .collect::<Vec<_>>()
                .join(COLUMN_SEPARATOR);
            lines.push(truncate_to_width(line.trim_end(), max_width));
        }
        lines
    }
}
