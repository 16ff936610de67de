//! Record table - a filterable, sortable view over a list of records.
//!
//! The table provides:
//! - Typed columns reading one attribute each, with optional custom rendering
//! - A global case-insensitive text filter across every record attribute
//! - Single-column sort toggled from the header (ascending, then descending)
//! - Per-column visibility that affects rendering only
//! - Optional paging
//! - Row activation that hands back the caller's own record
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use record_table::{CellValue, ColumnDef, Record, RecordTable};
//!
//! struct Idea {
//!     id: u32,
//!     title: &'static str,
//!     votes: u32,
//! }
//!
//! impl Record for Idea {
//!     fn id(&self) -> String {
//!         self.id.to_string()
//!     }
//!
//!     fn values(&self) -> Vec<CellValue> {
//!         vec![self.id.into(), self.title.into(), self.votes.into()]
//!     }
//! }
//!
//! let ideas = Arc::new(vec![
//!     Idea { id: 1, title: "Dark mode", votes: 3 },
//!     Idea { id: 2, title: "SSO", votes: 8 },
//!     Idea { id: 3, title: "Dashboard export", votes: 5 },
//! ]);
//! let columns = vec![
//!     ColumnDef::new("title", "Title", |i: &Idea| i.title.into()),
//!     ColumnDef::new("votes", "Votes", |i: &Idea| i.votes.into()).class("numeric"),
//! ];
//!
//! let mut table = RecordTable::new("Ideas", columns, ideas);
//! table.set_filter_text("d");
//! table.toggle_sort("votes");
//! let titles: Vec<_> = table
//!     .visible_rows()
//!     .into_iter()
//!     .map(|i| table.records()[i].title)
//!     .collect();
//! assert_eq!(titles, vec!["Dark mode", "Dashboard export"]);
//! ```

mod column;
mod events;
mod pipeline;
mod record;
mod render;
mod state;
mod table;
pub mod text;
mod value;

pub use column::{Alignment, CellRenderer, ColumnDef, ColumnKey, NUMERIC_CLASS};
pub use events::EventResult;
pub use pipeline::{filter_indices, sort_indices};
pub use record::Record;
pub use render::{COLUMN_SEPARATOR, HeaderCell, RenderedCell, RenderedRow, RenderedTable, Toolbar};
pub use state::{SortDirection, SortSpec, ViewState};
pub use table::{ColumnMenuEntry, RecordTable, RowActivateHandler, ToolbarExtras};
pub use value::CellValue;
