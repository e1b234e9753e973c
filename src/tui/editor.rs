//! Multi-line prompt editor.
//!
//! A cooperative, event-driven editor: every key event feeds a pure state
//! transition (`apply_key`), and the visible surface is re-derived from
//! buffer state after each event. The run ends on an explicit submit (Tab,
//! buffer of at least two chars) or cancel (Ctrl-C) gesture.
//!
//! Width is sampled once at construction and not re-sampled on resize.

use crate::tui::settings;
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Print, PrintStyledContent, Stylize};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::QueueableCommand;
use std::io::{self, Write};

/// Final result of one editor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOutcome {
    /// Captured buffer content; empty when cancelled.
    pub text: String,
    /// True when the run ended on the cancel gesture.
    pub cancelled: bool,
}

/// Editor lifecycle states. `Submitted` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditorState {
    Editing,
    Submitted,
    Cancelled,
}

/// Multi-line editor over a char-indexed buffer.
pub struct MultilineEditor {
    buffer: String,
    /// Cursor position in chars.
    cursor: usize,
    /// Render width in columns, sampled once at construction.
    width: u16,
    /// While unfocused, only character keys (which refocus) mutate the buffer.
    focused: bool,
    state: EditorState,
}

impl MultilineEditor {
    /// Construct an editor sized to the current terminal width.
    pub fn new() -> Self {
        let width = terminal::size()
            .map(|(cols, _)| cols)
            .unwrap_or(settings::EDITOR_FALLBACK_COLUMNS);
        Self::with_width(width)
    }

    fn with_width(width: u16) -> Self {
        Self {
            buffer: String::new(),
            cursor: 0,
            width: width.max(1),
            focused: true,
            state: EditorState::Editing,
        }
    }

    /// Run the editor until a submit or cancel gesture.
    ///
    /// Raw mode is held only for the duration of the run; the surface is
    /// erased before returning so caller output starts on a clean line.
    pub fn run(&mut self) -> io::Result<EditorOutcome> {
        terminal::enable_raw_mode()?;
        let result = self.event_loop();
        terminal::disable_raw_mode()?;
        result
    }

    fn event_loop(&mut self) -> io::Result<EditorOutcome> {
        let mut out = io::stderr();
        let mut cursor_row = self.draw(&mut out, 0)?;

        while self.state == EditorState::Editing {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    self.apply_key(key);
                    cursor_row = self.draw(&mut out, cursor_row)?;
                }
                // Width stays a construction-time snapshot; a resize only
                // triggers a repaint at the original width.
                Event::Resize(..) => {
                    cursor_row = self.draw(&mut out, cursor_row)?;
                }
                _ => {}
            }
        }

        self.clear_surface(&mut out, cursor_row)?;
        Ok(self.take_outcome())
    }

    /// Apply one key event to the state machine.
    fn apply_key(&mut self, key: KeyEvent) {
        if self.state != EditorState::Editing {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.buffer.clear();
            self.cursor = 0;
            self.state = EditorState::Cancelled;
            return;
        }

        match key.code {
            KeyCode::Esc => self.focused = false,
            KeyCode::Tab => {
                if char_count(&self.buffer) >= settings::EDITOR_SUBMIT_MIN_CHARS {
                    self.focused = false;
                    self.state = EditorState::Submitted;
                }
            }
            KeyCode::Char(ch) => {
                // Character-producing keys regain focus automatically.
                self.focused = true;
                self.insert(ch);
            }
            KeyCode::Enter => {
                self.focused = true;
                self.insert('\n');
            }
            KeyCode::Backspace if self.focused && self.cursor > 0 => {
                let start = byte_index_at_char(&self.buffer, self.cursor - 1);
                let end = byte_index_at_char(&self.buffer, self.cursor);
                self.buffer.replace_range(start..end, "");
                self.cursor -= 1;
            }
            KeyCode::Delete if self.focused && self.cursor < char_count(&self.buffer) => {
                let start = byte_index_at_char(&self.buffer, self.cursor);
                let end = byte_index_at_char(&self.buffer, self.cursor + 1);
                self.buffer.replace_range(start..end, "");
            }
            KeyCode::Left if self.focused && self.cursor > 0 => self.cursor -= 1,
            KeyCode::Right if self.focused && self.cursor < char_count(&self.buffer) => {
                self.cursor += 1;
            }
            KeyCode::Home if self.focused => {
                self.cursor = line_start_char_index(&self.buffer, self.cursor);
            }
            KeyCode::End if self.focused => {
                self.cursor = line_end_char_index(&self.buffer, self.cursor);
            }
            KeyCode::Up if self.focused => self.move_vertical(-1),
            KeyCode::Down if self.focused => self.move_vertical(1),
            _ => {}
        }
    }

    fn insert(&mut self, ch: char) {
        let byte_idx = byte_index_at_char(&self.buffer, self.cursor);
        self.buffer.insert(byte_idx, ch);
        self.cursor += 1;
    }

    /// Move the cursor one logical line up or down, preserving the column
    /// where the target line is long enough.
    fn move_vertical(&mut self, direction: i8) {
        let start = line_start_char_index(&self.buffer, self.cursor);
        let column = self.cursor - start;

        if direction < 0 {
            if start == 0 {
                return;
            }
            let prev_start = line_start_char_index(&self.buffer, start - 1);
            let prev_len = (start - 1) - prev_start;
            self.cursor = prev_start + column.min(prev_len);
        } else {
            let end = line_end_char_index(&self.buffer, self.cursor);
            if end == char_count(&self.buffer) {
                return;
            }
            let next_start = end + 1;
            let next_len = line_end_char_index(&self.buffer, next_start) - next_start;
            self.cursor = next_start + column.min(next_len);
        }
    }

    fn take_outcome(&mut self) -> EditorOutcome {
        let outcome = EditorOutcome {
            text: match self.state {
                EditorState::Submitted => self.buffer.clone(),
                _ => String::new(),
            },
            cancelled: self.state == EditorState::Cancelled,
        };
        // One editing session per buffer; reset regardless of how it ended.
        self.buffer.clear();
        self.cursor = 0;
        outcome
    }

    /// Repaint the surface from buffer state.
    ///
    /// `prev_cursor_row` is the surface row the terminal cursor was left on
    /// by the previous draw; returns the row it is left on now.
    fn draw<W: Write>(&self, out: &mut W, prev_cursor_row: u16) -> io::Result<u16> {
        if prev_cursor_row > 0 {
            out.queue(MoveUp(prev_cursor_row))?;
        }
        out.queue(MoveToColumn(0))?
            .queue(Clear(ClearType::FromCursorDown))?;

        let rows = wrap_rows(&self.buffer, self.width as usize);
        if self.buffer.is_empty() {
            out.queue(PrintStyledContent(
                settings::EDITOR_PLACEHOLDER.with(settings::COLOR_PLACEHOLDER),
            ))?
            .queue(Print("\r\n"))?;
        } else {
            for row in &rows {
                out.queue(Print(row.as_str()))?.queue(Print("\r\n"))?;
            }
        }

        let (cursor_row, cursor_col) = cursor_row_col(&self.buffer, self.cursor, self.width as usize);
        let rows_below = rows.len() as u16 - cursor_row.min(rows.len()) as u16;
        if rows_below > 0 {
            out.queue(MoveUp(rows_below))?;
        }
        out.queue(MoveToColumn(cursor_col as u16))?;
        out.flush()?;
        Ok(cursor_row as u16)
    }

    fn clear_surface<W: Write>(&self, out: &mut W, cursor_row: u16) -> io::Result<()> {
        if cursor_row > 0 {
            out.queue(MoveUp(cursor_row))?;
        }
        out.queue(MoveToColumn(0))?
            .queue(Clear(ClearType::FromCursorDown))?;
        out.flush()
    }
}

impl Default for MultilineEditor {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Char-indexed buffer helpers
// ---------------------------------------------------------------------------

/// Convert a char index to a byte index, preserving UTF-8 boundaries.
fn byte_index_at_char(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(s.len())
}

/// Return total char count for a UTF-8 string.
fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Return the char index for the start of the line containing `cursor`.
fn line_start_char_index(buffer: &str, cursor: usize) -> usize {
    let mut idx = cursor;
    while idx > 0 {
        if buffer.chars().nth(idx - 1) == Some('\n') {
            break;
        }
        idx -= 1;
    }
    idx
}

/// Return the char index for the end of the line containing `cursor`.
fn line_end_char_index(buffer: &str, cursor: usize) -> usize {
    let len = char_count(buffer);
    let mut idx = cursor;
    while idx < len {
        if buffer.chars().nth(idx) == Some('\n') {
            break;
        }
        idx += 1;
    }
    idx
}

/// Wrap buffer content into visual rows of at most `width` chars.
fn wrap_rows(buffer: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for line in buffer.split('\n') {
        if line.is_empty() {
            rows.push(String::new());
            continue;
        }
        let chars: Vec<char> = line.chars().collect();
        for chunk in chars.chunks(width) {
            rows.push(chunk.iter().collect());
        }
    }
    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

/// Map a char-index cursor to its visual (row, column) under wrapping.
fn cursor_row_col(buffer: &str, cursor: usize, width: usize) -> (usize, usize) {
    let width = width.max(1);
    let mut row = 0;
    let mut remaining = cursor;

    for line in buffer.split('\n') {
        let line_len = line.chars().count();
        if remaining <= line_len {
            row += remaining / width;
            return (row, remaining % width);
        }
        // Rows contributed by this full line, at least one even when empty.
        row += line_len.div_ceil(width).max(1);
        remaining -= line_len + 1;
    }
    (row, 0)
}
