//! Viewport layout over the text buffer.
//!
//! The [`Viewport`] tracks which rectangular window of the buffer is
//! visible, scrolls it to keep the cursor inside, and lays lines out into a
//! [`Frame`] of display-ready rows. Layout works in display columns, so wide
//! characters scroll and clip correctly; rows past the end of the document
//! render as tilde placeholders.

use crate::buffer::{Position, TextBuffer};
use crate::cursor::Cursor;
use crate::unicode::{display_col, display_width, slice_columns};

/// One rendered row of the viewport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameLine {
    /// Visible text, already clipped to the viewport width.
    pub text: String,
    /// Highlighted span as relative display columns `[start, end)`, when a
    /// selection overlaps this row.
    pub selection: Option<(usize, usize)>,
    /// Whether this row is a past-the-end placeholder.
    pub tilde: bool,
}

impl FrameLine {
    fn tilde() -> Self {
        Self {
            text: "~".to_string(),
            selection: None,
            tilde: true,
        }
    }
}

/// A laid-out snapshot of the visible window, ready for a terminal to paint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Rows, top to bottom. Always exactly the viewport height.
    pub lines: Vec<FrameLine>,
    /// Cursor row relative to the viewport top.
    pub cursor_row: usize,
    /// Cursor display column relative to the viewport left edge.
    pub cursor_col: usize,
    /// Status line text. Filled in by the session, not by layout.
    pub status: String,
}

/// Scrollable window over a [`TextBuffer`].
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    top_line: usize,
    left_col: usize,
    rows: usize,
    cols: usize,
}

impl Viewport {
    /// Create a viewport of the given text area size.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            top_line: 0,
            left_col: 0,
            rows: rows.max(1),
            cols: cols.max(1),
        }
    }

    /// Text rows visible.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Display columns visible.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// First visible line.
    #[must_use]
    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// Leftmost visible display column.
    #[must_use]
    pub fn left_col(&self) -> usize {
        self.left_col
    }

    /// Resize the text area. Scroll offsets are kept and re-validated by the
    /// next [`scroll_to_cursor`](Self::scroll_to_cursor).
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = rows.max(1);
        self.cols = cols.max(1);
    }

    /// Scroll the minimum amount needed to bring `pos` into view.
    pub fn scroll_to_cursor(&mut self, buffer: &TextBuffer, pos: Position) {
        if pos.line < self.top_line {
            self.top_line = pos.line;
        } else if pos.line >= self.top_line + self.rows {
            self.top_line = pos.line + 1 - self.rows;
        }

        let line = buffer.line(pos.line).unwrap_or("");
        let cur = display_col(line, pos.col);
        if cur < self.left_col {
            self.left_col = cur;
        } else if cur >= self.left_col + self.cols {
            self.left_col = cur + 1 - self.cols;
        }
    }

    /// Lay out the visible window into a [`Frame`].
    ///
    /// The caller is expected to have scrolled first; a cursor outside the
    /// window clamps to the frame edge rather than panicking.
    #[must_use]
    pub fn layout(&self, buffer: &TextBuffer, cursor: &Cursor) -> Frame {
        let selection = cursor.selection();
        let mut lines = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let idx = self.top_line + row;
            match buffer.line(idx) {
                Some(line) => {
                    let text = slice_columns(line, self.left_col, self.cols);
                    let sel = selection.and_then(|(start, end)| {
                        self.selection_span(line, idx, start, end)
                    });
                    lines.push(FrameLine {
                        text,
                        selection: sel,
                        tilde: false,
                    });
                }
                None => lines.push(FrameLine::tilde()),
            }
        }

        let pos = cursor.position();
        let line = buffer.line(pos.line).unwrap_or("");
        let cursor_row = pos.line.saturating_sub(self.top_line).min(self.rows - 1);
        let cursor_col = display_col(line, pos.col)
            .saturating_sub(self.left_col)
            .min(self.cols - 1);

        Frame {
            lines,
            cursor_row,
            cursor_col,
            status: String::new(),
        }
    }

    /// Highlight span for line `idx`, relative to the viewport, or `None` if
    /// the selection does not touch the visible part of this row.
    fn selection_span(
        &self,
        line: &str,
        idx: usize,
        start: Position,
        end: Position,
    ) -> Option<(usize, usize)> {
        if idx < start.line || idx > end.line {
            return None;
        }
        let from = if idx == start.line {
            display_col(line, start.col)
        } else {
            0
        };
        let to = if idx == end.line {
            display_col(line, end.col)
        } else {
            // A selection crossing the line break highlights one extra cell
            // to stand in for the newline.
            display_width(line) + 1
        };

        let view_end = self.left_col + self.cols;
        let from = from.max(self.left_col);
        let to = to.min(view_end);
        if from >= to {
            return None;
        }
        Some((from - self.left_col, to - self.left_col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_of(n: usize) -> TextBuffer {
        let text: Vec<String> = (0..n).map(|i| format!("line {i}")).collect();
        TextBuffer::from_lines(text)
    }

    #[test]
    fn test_layout_fills_viewport() {
        let buf = buffer_of(2);
        let cur = Cursor::new();
        let vp = Viewport::new(4, 20);
        let frame = vp.layout(&buf, &cur);
        assert_eq!(frame.lines.len(), 4);
        assert_eq!(frame.lines[0].text, "line 0");
        assert_eq!(frame.lines[1].text, "line 1");
        assert!(frame.lines[2].tilde);
        assert!(frame.lines[3].tilde);
    }

    #[test]
    fn test_scroll_down_and_back() {
        let buf = buffer_of(10);
        let mut vp = Viewport::new(3, 20);

        vp.scroll_to_cursor(&buf, Position::new(5, 0));
        assert_eq!(vp.top_line(), 3);

        vp.scroll_to_cursor(&buf, Position::new(1, 0));
        assert_eq!(vp.top_line(), 1);
    }

    #[test]
    fn test_horizontal_scroll() {
        let buf = TextBuffer::from_text("abcdefghij");
        let mut vp = Viewport::new(1, 4);

        vp.scroll_to_cursor(&buf, Position::new(0, 7));
        assert_eq!(vp.left_col(), 4);

        let mut cur = Cursor::new();
        cur.set_position(&buf, Position::new(0, 7));
        let frame = vp.layout(&buf, &cur);
        assert_eq!(frame.lines[0].text, "efgh");
        assert_eq!(frame.cursor_col, 3);
    }

    #[test]
    fn test_wide_chars_scroll_in_display_columns() {
        // Four wide chars occupy display columns 0..8.
        let buf = TextBuffer::from_text("漢字漢字");
        let mut vp = Viewport::new(1, 4);
        vp.scroll_to_cursor(&buf, Position::new(0, 3));
        // Cursor sits at display column 6; window must cover it.
        assert!(vp.left_col() <= 6 && 6 < vp.left_col() + 4);
    }

    #[test]
    fn test_selection_span_single_line() {
        let buf = TextBuffer::from_text("hello world");
        let mut cur = Cursor::new();
        cur.set_position(&buf, Position::new(0, 2));
        cur.begin_selection();
        cur.set_position(&buf, Position::new(0, 7));
        let vp = Viewport::new(1, 20);
        let frame = vp.layout(&buf, &cur);
        assert_eq!(frame.lines[0].selection, Some((2, 7)));
    }

    #[test]
    fn test_selection_span_multi_line() {
        let buf = TextBuffer::from_text("abc\ndef\nghi");
        let mut cur = Cursor::new();
        cur.set_position(&buf, Position::new(0, 1));
        cur.begin_selection();
        cur.set_position(&buf, Position::new(2, 2));
        let vp = Viewport::new(3, 20);
        let frame = vp.layout(&buf, &cur);
        // First line: from col 1 through the newline cell.
        assert_eq!(frame.lines[0].selection, Some((1, 4)));
        // Middle line fully covered plus newline cell.
        assert_eq!(frame.lines[1].selection, Some((0, 4)));
        // Last line up to col 2.
        assert_eq!(frame.lines[2].selection, Some((0, 2)));
    }

    #[test]
    fn test_selection_clipped_by_scroll() {
        let buf = TextBuffer::from_text("abcdefghij");
        let mut cur = Cursor::new();
        cur.set_position(&buf, Position::new(0, 0));
        cur.begin_selection();
        cur.set_position(&buf, Position::new(0, 6));
        let mut vp = Viewport::new(1, 4);
        vp.scroll_to_cursor(&buf, Position::new(0, 6));
        let frame = vp.layout(&buf, &cur);
        // Window shows columns 3..7; selection covers 0..6 → visible 0..3.
        assert_eq!(frame.lines[0].selection, Some((0, 3)));
    }

    #[test]
    fn test_resize_keeps_cursor_reachable() {
        let buf = buffer_of(20);
        let mut vp = Viewport::new(10, 40);
        vp.scroll_to_cursor(&buf, Position::new(15, 0));
        vp.resize(3, 40);
        vp.scroll_to_cursor(&buf, Position::new(15, 0));
        assert!(vp.top_line() <= 15 && 15 < vp.top_line() + 3);
    }
}
