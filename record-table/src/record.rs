//! The Record trait implemented by anything a table can display.

use crate::value::CellValue;

/// Trait for items that can be displayed as rows in a [`RecordTable`].
///
/// # Examples
///
/// ```
/// use record_table::{CellValue, Record};
///
/// struct Insight {
///     id: String,
///     title: String,
///     votes: u32,
/// }
///
/// impl Record for Insight {
///     fn id(&self) -> String {
///         self.id.clone()
///     }
///
///     fn values(&self) -> Vec<CellValue> {
///         vec![self.id.clone().into(), self.title.clone().into(), self.votes.into()]
///     }
/// }
/// ```
///
/// [`RecordTable`]: crate::RecordTable
pub trait Record {
    /// Unique identifier for this record, used as the row key.
    ///
    /// Duplicates are not detected.
    fn id(&self) -> String;

    /// Every attribute of the record.
    ///
    /// The global filter matches against all of these, not only the
    /// attributes that have a column.
    fn values(&self) -> Vec<CellValue>;
}
