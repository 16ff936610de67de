//! Feedback hub screen: one record table driven by terminal input.

use std::io::Write;
use std::sync::Arc;

use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{cursor, queue};
use futures::StreamExt;
use log::{debug, info, warn};
use record_table::text::{display_width, fit_to_width, truncate_to_width};
use record_table::{COLUMN_SEPARATOR, EventResult, RecordTable, RenderedRow, RenderedTable};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

use crate::error::AppError;
use crate::fixtures::{FeedbackCluster, feedback_clusters, feedback_columns};
use crate::settings::Settings;
use crate::terminal::TerminalGuard;

/// Screen rows above the table header: toolbar, filter, column menu.
const HEADER_ROW: u16 = 3;
/// First screen row of the table body.
const BODY_TOP: u16 = HEADER_ROW + 1;
/// Rows below the body: status line.
const FOOTER_ROWS: u16 = 1;

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct App {
    table: RecordTable<FeedbackCluster>,
    /// Activated cluster titles, sent by the row activation callback.
    activations: UnboundedReceiver<String>,
    /// Cursor position within the current page.
    cursor: usize,
    /// Index into the visible columns for keyboard sorting.
    header_focus: usize,
    /// Page size fixed by settings. Unset follows the terminal height.
    fixed_page_size: Option<usize>,
    status: String,
    needs_draw: bool,
}

impl App {
    pub fn new(settings: &Settings) -> Self {
        let (tx, activations) = unbounded_channel();

        let mut table = RecordTable::new(
            "Feedback hub",
            feedback_columns(),
            Arc::new(feedback_clusters()),
        )
        .on_row_activate(move |cluster: &FeedbackCluster| {
            info!("Opening cluster {} ({})", cluster.id, cluster.title);
            let _ = tx.send(format!("Opened {}: {}", cluster.id, cluster.title));
        })
        .toolbar_extras(|| vec!["Export CSV".to_string(), "New cluster".to_string()]);

        for key in &settings.hidden_columns {
            if table.set_column_visible(key, false).is_none() {
                warn!("Ignoring unknown hidden column {:?}", key);
            }
        }
        // Zero means "fit to the terminal", same as unset.
        let fixed_page_size = settings.page_size.filter(|&size| size > 0);
        if fixed_page_size.is_some() {
            table.set_page_size(fixed_page_size);
        }

        Self {
            table,
            activations,
            cursor: 0,
            header_focus: 0,
            fixed_page_size,
            status: "Type to filter · Tab sorts · F1-F8 toggle columns · Ctrl+Q quits".to_string(),
            needs_draw: true,
        }
    }

    /// Run until the user quits.
    pub async fn run(mut self) -> Result<(), AppError> {
        let mut terminal = TerminalGuard::new()?;
        let mut events = EventStream::new();

        let (_, height) = terminal.size()?;
        self.fit_page(height);
        self.draw(&mut terminal)?;

        while let Some(event) = events.next().await {
            let event = event?;
            if let Event::Resize(_, height) = event {
                self.fit_page(height);
                self.needs_draw = true;
            }
            if self.handle_event(event) == Flow::Quit {
                info!("Quit requested");
                break;
            }
            while let Ok(message) = self.activations.try_recv() {
                self.status = message;
                self.needs_draw = true;
            }
            if self.table.take_dirty() {
                self.clamp_cursor();
                self.needs_draw = true;
            }
            if self.needs_draw {
                self.draw(&mut terminal)?;
            }
        }
        Ok(())
    }

    /// Page size follows the body height. A fixed size from settings is
    /// capped so the cursor row always stays on screen.
    fn fit_page(&mut self, height: u16) {
        let body = usize::from(height.saturating_sub(BODY_TOP + FOOTER_ROWS).max(1));
        let size = self.fixed_page_size.map_or(body, |fixed| fixed.min(body));
        debug!("Fitting page size to {} rows", size);
        self.table.set_page_size(Some(size));
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let rows = self.table.visible_rows().len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
        let columns = self.table.visible_columns().len();
        self.header_focus = self.header_focus.min(columns.saturating_sub(1));
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    fn handle_event(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.on_key(key),
            Event::Mouse(mouse) => {
                self.on_mouse(mouse);
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn on_key(&mut self, key: KeyEvent) -> Flow {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => return Flow::Quit,
            KeyCode::Char(c) if !ctrl => {
                self.table.on_filter_input(c);
            }
            KeyCode::Backspace => {
                self.table.on_filter_backspace();
            }
            KeyCode::Esc => self.table.clear_filter(),
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageDown => {
                if self.table.next_page() {
                    self.cursor = 0;
                }
            }
            KeyCode::PageUp => {
                if self.table.prev_page() {
                    self.cursor = 0;
                }
            }
            KeyCode::Left => self.move_header_focus(-1),
            KeyCode::Right => self.move_header_focus(1),
            KeyCode::Tab => {
                let key = self
                    .table
                    .visible_columns()
                    .get(self.header_focus)
                    .map(|c| c.key);
                if let Some(key) = key {
                    self.table.on_header_click(key);
                }
            }
            KeyCode::Enter => {
                self.table.on_row_click(self.cursor);
            }
            KeyCode::F(n) => {
                let key = self
                    .table
                    .columns()
                    .get(usize::from(n).saturating_sub(1))
                    .map(|c| c.key);
                if let Some(key) = key {
                    self.table.on_toggle_column(key);
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn move_cursor(&mut self, delta: isize) {
        let rows = self.table.visible_rows().len();
        if rows == 0 {
            return;
        }
        let next = self.cursor.saturating_add_signed(delta).min(rows - 1);
        if next != self.cursor {
            self.cursor = next;
            self.needs_draw = true;
        }
    }

    fn move_header_focus(&mut self, delta: isize) {
        let columns = self.table.visible_columns().len();
        if columns == 0 {
            return;
        }
        self.header_focus = self.header_focus.saturating_add_signed(delta).min(columns - 1);
        self.needs_draw = true;
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if mouse.row == HEADER_ROW {
            let rendered = self.table.render();
            if let Some(key) = rendered.column_at_x(mouse.column as usize) {
                self.table.on_header_click(key);
            }
        } else if mouse.row >= BODY_TOP {
            let position = (mouse.row - BODY_TOP) as usize;
            if self.table.on_row_click(position) == EventResult::Consumed {
                self.cursor = position;
                self.needs_draw = true;
            }
        }
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    fn draw(&mut self, terminal: &mut TerminalGuard) -> Result<(), AppError> {
        let (width, height) = terminal.size()?;
        let width = width as usize;
        let rendered = self.table.render();
        let out = terminal.out();

        queue!(out, Clear(ClearType::All))?;

        queue!(
            out,
            cursor::MoveTo(0, 0),
            SetAttribute(Attribute::Bold),
            Print(truncate_to_width(&rendered.toolbar.summary(), width)),
            SetAttribute(Attribute::Reset),
        )?;

        let filter = format!("Filter: {}▏", rendered.toolbar.filter_text);
        queue!(out, cursor::MoveTo(0, 1), Print(truncate_to_width(&filter, width)))?;

        let menu = self
            .table
            .column_menu()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let mark = if entry.visible { "x" } else { " " };
                format!("F{} [{}] {}", i + 1, mark, entry.label)
            })
            .collect::<Vec<_>>()
            .join("  ");
        queue!(
            out,
            cursor::MoveTo(0, 2),
            SetForegroundColor(Color::DarkGrey),
            Print(truncate_to_width(&menu, width)),
            ResetColor,
        )?;

        self.draw_header(out, &rendered, width)?;

        for (position, row) in rendered.rows.iter().enumerate() {
            let y = BODY_TOP + position as u16;
            if y >= height.saturating_sub(FOOTER_ROWS) {
                break;
            }
            draw_row(out, &rendered, row, y, width, position == self.cursor)?;
        }
        if rendered.rows.is_empty() {
            queue!(
                out,
                cursor::MoveTo(0, BODY_TOP),
                SetForegroundColor(Color::DarkGrey),
                Print("No matching feedback"),
                ResetColor,
            )?;
        }

        queue!(
            out,
            cursor::MoveTo(0, height.saturating_sub(1)),
            SetForegroundColor(Color::Cyan),
            Print(truncate_to_width(&self.status, width)),
            ResetColor,
        )?;

        out.flush()?;
        self.needs_draw = false;
        Ok(())
    }

    fn draw_header(
        &self,
        out: &mut impl Write,
        rendered: &RenderedTable,
        width: usize,
    ) -> Result<(), AppError> {
        queue!(out, cursor::MoveTo(0, HEADER_ROW))?;
        let mut used = 0;
        for (i, (header, column_width)) in rendered
            .header
            .iter()
            .zip(rendered.column_widths())
            .enumerate()
        {
            if i > 0 {
                used += print_clipped(out, COLUMN_SEPARATOR, width, used)?;
            }
            let text = fit_to_width(&header.text(), column_width, header.align);
            let attribute = if i == self.header_focus {
                Attribute::Reverse
            } else {
                Attribute::Bold
            };
            queue!(out, SetAttribute(attribute))?;
            used += print_clipped(out, &text, width, used)?;
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}

/// Draw one body row, coloring cells by their class hint.
fn draw_row(
    out: &mut impl Write,
    rendered: &RenderedTable,
    row: &RenderedRow,
    y: u16,
    width: usize,
    focused: bool,
) -> Result<(), AppError> {
    queue!(out, cursor::MoveTo(0, y))?;
    if focused {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    let mut used = 0;
    for (i, (cell, column_width)) in row.cells.iter().zip(rendered.column_widths()).enumerate() {
        if i > 0 {
            used += print_clipped(out, COLUMN_SEPARATOR, width, used)?;
        }
        let color = match cell.class.as_deref() {
            Some("muted") => Color::DarkGrey,
            Some("badge") => Color::Magenta,
            _ => Color::Reset,
        };
        queue!(out, SetForegroundColor(color))?;
        used += print_clipped(out, &fit_to_width(&cell.text, column_width, cell.align), width, used)?;
    }
    queue!(out, ResetColor, SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Print `text` without passing column `width`. Returns the width printed.
fn print_clipped(
    out: &mut impl Write,
    text: &str,
    width: usize,
    used: usize,
) -> Result<usize, AppError> {
    let text = truncate_to_width(text, width.saturating_sub(used));
    queue!(out, Print(&text))?;
    Ok(display_width(&text))
}
