//! Column definitions.

use std::fmt;
use std::rc::Rc;

use crate::value::CellValue;

/// Identity of a column: the name of the attribute its accessor reads.
pub type ColumnKey = &'static str;

/// Class hint that right-aligns a column by default.
pub const NUMERIC_CLASS: &str = "numeric";

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Custom cell renderer.
pub type CellRenderer<R> = Rc<dyn Fn(&R) -> String>;

/// Column configuration.
///
/// A column binds a key to a typed accessor for one attribute of `R`, a
/// header label, and optional rendering hints.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     ColumnDef::new("title", "Title", |c: &Cluster| c.title.as_str().into()),
///     ColumnDef::new("votes", "Votes", |c: &Cluster| c.votes.into()).class("numeric"),
///     ColumnDef::new("tags", "Tags", |c: &Cluster| c.tags.clone().into())
///         .render(|c| c.tags.join(" · ")),
/// ];
/// ```
pub struct ColumnDef<R> {
    /// Accessor key, unique within a table.
    pub key: ColumnKey,
    /// Header text.
    pub label: String,
    /// Reads the attribute this column shows.
    pub accessor: fn(&R) -> CellValue,
    /// Overrides the default text of a cell.
    pub render: Option<CellRenderer<R>>,
    /// Display class hint passed through to rendered cells.
    pub class: Option<String>,
    /// Fixed width in terminal columns. `None` fits the content.
    pub width: Option<u16>,
    /// Horizontal alignment.
    pub align: Alignment,
}

impl<R> ColumnDef<R> {
    /// Create a new column.
    pub fn new(key: ColumnKey, label: impl Into<String>, accessor: fn(&R) -> CellValue) -> Self {
        Self {
            key,
            label: label.into(),
            accessor,
            render: None,
            class: None,
            width: None,
            align: Alignment::Left,
        }
    }

    /// Set a custom cell renderer.
    pub fn render(mut self, render: impl Fn(&R) -> String + 'static) -> Self {
        self.render = Some(Rc::new(render));
        self
    }

    /// Set the display class hint.
    ///
    /// The `"numeric"` class also right-aligns the column.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if class == NUMERIC_CLASS {
            self.align = Alignment::Right;
        }
        self.class = Some(class);
        self
    }

    /// Set a fixed width.
    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Read the raw value of this column from a record.
    pub fn value(&self, record: &R) -> CellValue {
        (self.accessor)(record)
    }

    /// Text shown in this column's cell for `record`.
    ///
    /// Missing values render as an empty string.
    pub fn cell_text(&self, record: &R) -> String {
        match &self.render {
            Some(render) => render(record),
            None => self.value(record).as_text(),
        }
    }
}

impl<R> Clone for ColumnDef<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            label: self.label.clone(),
            accessor: self.accessor,
            render: self.render.clone(),
            class: self.class.clone(),
            width: self.width,
            align: self.align,
        }
    }
}

impl<R> fmt::Debug for ColumnDef<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDef")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("custom_render", &self.render.is_some())
            .field("class", &self.class)
            .field("width", &self.width)
            .field("align", &self.align)
            .finish()
    }
}
