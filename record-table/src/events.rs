//! Event handling for the record table.
//!
//! Hosts translate their own input (mouse, keys) into these calls. Each
//! call applies one view change synchronously and reports whether the
//! table handled it.

use crate::record::Record;
use crate::table::RecordTable;

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

impl From<bool> for EventResult {
    fn from(handled: bool) -> Self {
        if handled {
            EventResult::Consumed
        } else {
            EventResult::Ignored
        }
    }
}

impl<R: Record> RecordTable<R> {
    /// Handle a click on a column header.
    pub fn on_header_click(&mut self, key: &str) -> EventResult {
        self.toggle_sort(key).is_some().into()
    }

    /// Handle a click on the row at a display position.
    pub fn on_row_click(&mut self, position: usize) -> EventResult {
        self.activate_row(position).into()
    }

    /// Append a typed character to the filter.
    pub fn on_filter_input(&mut self, c: char) -> EventResult {
        if c.is_control() {
            return EventResult::Ignored;
        }
        let mut text = self.filter_text().to_string();
        text.push(c);
        self.set_filter_text(text);
        EventResult::Consumed
    }

    /// Delete the last character of the filter.
    pub fn on_filter_backspace(&mut self) -> EventResult {
        let mut text = self.filter_text().to_string();
        if text.pop().is_none() {
            return EventResult::Ignored;
        }
        self.set_filter_text(text);
        EventResult::Consumed
    }

    /// Handle a click on a column visibility menu entry.
    pub fn on_toggle_column(&mut self, key: &str) -> EventResult {
        self.toggle_column(key).is_some().into()
    }
}
