//! Line-oriented text storage.
//!
//! [`TextBuffer`] owns the document as an ordered sequence of lines of
//! Unicode text. A line never contains a line terminator; inserting text
//! with `'\n'` splits lines and deleting across a line break merges them.
//! All coordinates are (line, column) pairs where the column is a code-point
//! offset, never a byte offset, so multi-byte characters count as one unit
//! of cursor movement.
//!
//! Invariant: the buffer always holds at least one line. An empty document
//! is one empty line.

use crate::error::{Error, Result};

/// A (line, column) coordinate into a [`TextBuffer`].
///
/// `col` is a code-point offset in `[0, line_len]`; a value equal to the
/// line length means "after the last character". Ordering is lexicographic
/// by (line, col), which is the document order used to normalize selections.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line index (0-based).
    pub line: usize,
    /// Code-point offset within the line.
    pub col: usize,
}

impl Position {
    /// Create a new position.
    #[must_use]
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Line-oriented text buffer with character-level edit operations.
#[derive(Clone, Debug)]
pub struct TextBuffer {
    lines: Vec<String>,
    dirty: bool,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Create an empty buffer (one empty line).
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            dirty: false,
        }
    }

    /// Create a buffer from text. Lines are split on `'\n'`; a trailing
    /// newline does not produce an extra empty line.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let stripped = text.strip_suffix('\n').unwrap_or(text);
        let lines: Vec<String> = if stripped.is_empty() {
            vec![String::new()]
        } else {
            stripped.split('\n').map(str::to_string).collect()
        };
        Self {
            lines,
            dirty: false,
        }
    }

    /// Create a buffer from pre-split lines. Interior `'\n'` in a supplied
    /// line splits it; an empty vector yields the empty document.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut split = Vec::with_capacity(lines.len());
        for line in &lines {
            for part in line.trim_end_matches('\n').split('\n') {
                split.push(part.to_string());
            }
        }
        if split.is_empty() {
            split.push(String::new());
        }
        Self {
            lines: split,
            dirty: false,
        }
    }

    /// Number of lines. Always at least 1.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Length of line `i` in code points, or `None` for a non-existent line.
    #[must_use]
    pub fn line_len(&self, i: usize) -> Option<usize> {
        self.lines.get(i).map(|l| l.chars().count())
    }

    /// Text of line `i`, without a terminator.
    #[must_use]
    pub fn line(&self, i: usize) -> Option<&str> {
        self.lines.get(i).map(String::as_str)
    }

    /// Whether `pos` addresses an existing line at a column within
    /// `[0, line_len]`.
    #[must_use]
    pub fn is_valid(&self, pos: Position) -> bool {
        self.line_len(pos.line).is_some_and(|len| pos.col <= len)
    }

    /// Clamp a position to valid buffer bounds.
    #[must_use]
    pub fn clamp(&self, pos: Position) -> Position {
        let line = pos.line.min(self.lines.len() - 1);
        let len = self.lines[line].chars().count();
        Position::new(line, pos.col.min(len))
    }

    /// Position after the last character of the last line.
    #[must_use]
    pub fn end_position(&self) -> Position {
        let line = self.lines.len() - 1;
        Position::new(line, self.lines[line].chars().count())
    }

    /// Whether the buffer has been mutated since creation or the last
    /// [`mark_clean`](Self::mark_clean).
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag (after the embedder persists a snapshot).
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Copy of all lines, for handing to the persistence collaborator.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        self.lines.clone()
    }

    /// Full contents joined with `'\n'`.
    #[must_use]
    pub fn contents(&self) -> String {
        self.lines.join("\n")
    }

    /// Insert text at `pos`. Text containing `'\n'` splits across lines.
    ///
    /// Returns the position immediately after the inserted text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos` addresses a non-existent line
    /// or a column beyond that line's length. Inserting at the end-of-line
    /// column (including on the last line) is valid and appends.
    pub fn insert(&mut self, pos: Position, text: &str) -> Result<Position> {
        if !self.is_valid(pos) {
            return Err(self.out_of_range(pos));
        }
        if text.is_empty() {
            return Ok(pos);
        }

        let byte = byte_index(&self.lines[pos.line], pos.col);
        let mut parts = text.split('\n');
        let first = parts.next().unwrap_or("");
        let rest: Vec<&str> = parts.collect();

        self.dirty = true;
        if rest.is_empty() {
            self.lines[pos.line].insert_str(byte, first);
            return Ok(Position::new(pos.line, pos.col + first.chars().count()));
        }

        // Split the target line at the insertion point, attach the first
        // part to its head and the last part to its tail.
        let tail = self.lines[pos.line].split_off(byte);
        self.lines[pos.line].push_str(first);

        let last = rest[rest.len() - 1];
        let end_col = last.chars().count();
        let mut new_lines: Vec<String> = rest.iter().map(|s| (*s).to_string()).collect();
        new_lines[rest.len() - 1].push_str(&tail);

        let end_line = pos.line + rest.len();
        self.lines
            .splice(pos.line + 1..pos.line + 1, new_lines);
        Ok(Position::new(end_line, end_col))
    }

    /// Text in `[start, end)` without removing it, with `'\n'` separating
    /// lines.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either endpoint is invalid.
    pub fn range_text(&self, start: Position, end: Position) -> Result<String> {
        let (start, end) = ordered(start, end);
        if !self.is_valid(start) {
            return Err(self.out_of_range(start));
        }
        if !self.is_valid(end) {
            return Err(self.out_of_range(end));
        }
        if start == end {
            return Ok(String::new());
        }

        if start.line == end.line {
            let line = &self.lines[start.line];
            let a = byte_index(line, start.col);
            let b = byte_index(line, end.col);
            return Ok(line[a..b].to_string());
        }

        let mut out = String::new();
        let first = &self.lines[start.line];
        out.push_str(&first[byte_index(first, start.col)..]);
        for line in &self.lines[start.line + 1..end.line] {
            out.push('\n');
            out.push_str(line);
        }
        let last = &self.lines[end.line];
        out.push('\n');
        out.push_str(&last[..byte_index(last, end.col)]);
        Ok(out)
    }

    /// Remove all content in `[start, end)` and return the removed text.
    ///
    /// Endpoints are normalized to document order first. A range spanning a
    /// line break merges the surrounding lines. An empty range is a no-op
    /// returning the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if either endpoint is invalid.
    pub fn delete_range(&mut self, start: Position, end: Position) -> Result<String> {
        let (start, end) = ordered(start, end);
        let removed = self.range_text(start, end)?;
        if start == end {
            return Ok(removed);
        }

        self.dirty = true;
        if start.line == end.line {
            let line = &mut self.lines[start.line];
            let a = byte_index(line, start.col);
            let b = byte_index(line, end.col);
            line.drain(a..b);
            return Ok(removed);
        }

        let tail = {
            let last = &self.lines[end.line];
            last[byte_index(last, end.col)..].to_string()
        };
        let first = &mut self.lines[start.line];
        first.truncate(byte_index(first, start.col));
        first.push_str(&tail);
        self.lines.drain(start.line + 1..=end.line);
        Ok(removed)
    }

    fn out_of_range(&self, pos: Position) -> Error {
        Error::OutOfRange {
            line: pos.line,
            col: pos.col,
            line_count: self.lines.len(),
        }
    }
}

/// Normalize two positions to document order.
fn ordered(a: Position, b: Position) -> (Position, Position) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Byte offset of code point `col` within `line` (line length in bytes when
/// `col` equals the code-point count).
fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map_or(line.len(), |(i, _)| i)
}
