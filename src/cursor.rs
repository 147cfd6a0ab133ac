//! Cursor position and selection anchor.
//!
//! A [`Cursor`] is a [`Position`] into a [`TextBuffer`] plus an optional
//! selection anchor. Every movement takes the buffer it moves through and
//! clamps the result to valid bounds, so the cursor invariant
//! `0 <= line < line_count` and `0 <= col <= line_len(line)` holds after
//! every call. The anchor is the fixed endpoint of a selection; the cursor
//! is the moving one.

use crate::buffer::{Position, TextBuffer};
use crate::unicode::{next_word_start, prev_word_start};

/// Cursor with optional selection anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    position: Position,
    anchor: Option<Position>,
}

impl Cursor {
    /// Create a cursor at (0, 0) with no selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Set the position, clamped to buffer bounds.
    pub fn set_position(&mut self, buffer: &TextBuffer, pos: Position) {
        self.position = buffer.clamp(pos);
    }

    /// The selection anchor, if one is set.
    #[must_use]
    pub fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// Set the anchor at the current position, if none exists.
    pub fn begin_selection(&mut self) {
        if self.anchor.is_none() {
            self.anchor = Some(self.position);
        }
    }

    /// Remove the anchor.
    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Whether a non-empty selection is active.
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.anchor.is_some_and(|a| a != self.position)
    }

    /// The active selection as a normalized (start, end) pair in document
    /// order, start-inclusive, end-exclusive. `None` when there is no anchor
    /// or the selection is empty.
    #[must_use]
    pub fn selection(&self) -> Option<(Position, Position)> {
        let anchor = self.anchor?;
        if anchor == self.position {
            return None;
        }
        if anchor <= self.position {
            Some((anchor, self.position))
        } else {
            Some((self.position, anchor))
        }
    }

    /// Re-clamp position and anchor after an external buffer mutation.
    pub fn clamp(&mut self, buffer: &TextBuffer) {
        self.position = buffer.clamp(self.position);
        if let Some(anchor) = self.anchor {
            self.anchor = Some(buffer.clamp(anchor));
        }
    }

    /// Move one code point left, wrapping to the end of the previous line at
    /// column 0.
    pub fn move_left(&mut self, buffer: &TextBuffer) {
        if self.position.col > 0 {
            self.position.col -= 1;
        } else if self.position.line > 0 {
            self.position.line -= 1;
            self.position.col = buffer.line_len(self.position.line).unwrap_or(0);
        }
    }

    /// Move one code point right, wrapping to the start of the next line at
    /// end-of-line.
    pub fn move_right(&mut self, buffer: &TextBuffer) {
        let len = buffer.line_len(self.position.line).unwrap_or(0);
        if self.position.col < len {
            self.position.col += 1;
        } else if self.position.line + 1 < buffer.line_count() {
            self.position.line += 1;
            self.position.col = 0;
        }
    }

    /// Move up one line. The column is preserved where possible, clamped to
    /// the target line's length.
    pub fn move_up(&mut self, buffer: &TextBuffer) {
        if self.position.line > 0 {
            self.position.line -= 1;
            self.position = buffer.clamp(self.position);
        }
    }

    /// Move down one line. The column is preserved where possible, clamped
    /// to the target line's length.
    pub fn move_down(&mut self, buffer: &TextBuffer) {
        if self.position.line + 1 < buffer.line_count() {
            self.position.line += 1;
            self.position = buffer.clamp(self.position);
        }
    }

    /// Move to column 0.
    pub fn move_line_start(&mut self) {
        self.position.col = 0;
    }

    /// Move past the last character of the current line.
    pub fn move_line_end(&mut self, buffer: &TextBuffer) {
        self.position.col = buffer.line_len(self.position.line).unwrap_or(0);
    }

    /// Move to (0, 0).
    pub fn move_buffer_start(&mut self) {
        self.position = Position::new(0, 0);
    }

    /// Move past the last character of the last line.
    pub fn move_buffer_end(&mut self, buffer: &TextBuffer) {
        self.position = buffer.end_position();
    }

    /// Move up by one page of `rows` lines.
    pub fn move_page_up(&mut self, buffer: &TextBuffer, rows: usize) {
        self.position.line = self.position.line.saturating_sub(rows.max(1));
        self.position = buffer.clamp(self.position);
    }

    /// Move down by one page of `rows` lines.
    pub fn move_page_down(&mut self, buffer: &TextBuffer, rows: usize) {
        self.position.line = self.position.line.saturating_add(rows.max(1));
        self.position = buffer.clamp(self.position);
    }

    /// Move to the start of the previous word, wrapping to the end of the
    /// previous line at column 0. Word boundaries follow UAX #29.
    pub fn move_word_left(&mut self, buffer: &TextBuffer) {
        if self.position.col == 0 {
            if self.position.line > 0 {
                self.position.line -= 1;
                self.position.col = buffer.line_len(self.position.line).unwrap_or(0);
            }
            return;
        }
        let line = buffer.line(self.position.line).unwrap_or("");
        self.position.col = prev_word_start(line, self.position.col).unwrap_or(0);
    }

    /// Move to the start of the next word, then end-of-line, then the start
    /// of the next line. Word boundaries follow UAX #29.
    pub fn move_word_right(&mut self, buffer: &TextBuffer) {
        let line = buffer.line(self.position.line).unwrap_or("");
        let len = line.chars().count();
        if self.position.col >= len {
            if self.position.line + 1 < buffer.line_count() {
                self.position.line += 1;
                self.position.col = 0;
            }
            return;
        }
        self.position.col = next_word_start(line, self.position.col).unwrap_or(len);
    }
}
