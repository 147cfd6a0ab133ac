//! Display width and word-boundary helpers.
//!
//! Cursor movement is addressed in code points, but terminal layout is
//! addressed in display columns: some code points (CJK, many emoji) occupy
//! two columns, combining marks occupy zero. These helpers bridge the two
//! coordinate systems and provide UAX #29 word boundaries for word-wise
//! navigation.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Get the display width of a string in terminal columns.
#[must_use]
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Get the display width of a character in terminal columns.
///
/// Includes a fast path for ASCII printable characters (0x20-0x7E), which
/// are always width 1 and are the most common case.
#[inline]
#[must_use]
pub fn display_width_char(c: char) -> usize {
    if c.is_ascii() && (' '..='~').contains(&c) {
        return 1;
    }
    if c < ' ' {
        return 0;
    }
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Display column of the code point at offset `col` within `line`.
///
/// Equal to the summed widths of the first `col` code points. Offsets past
/// the end of the line yield the full line width.
#[must_use]
pub fn display_col(line: &str, col: usize) -> usize {
    line.chars().take(col).map(display_width_char).sum()
}

/// Slice a line by display columns `[start_col, start_col + max_cols)`.
///
/// Never splits a wide character: a wide character straddling the left edge
/// is replaced by a single space, and one that would cross the right edge is
/// dropped.
#[must_use]
pub fn slice_columns(s: &str, start_col: usize, max_cols: usize) -> String {
    let end_col = start_col.saturating_add(max_cols);
    let mut col = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = display_width_char(ch);
        if col + w <= start_col {
            col += w;
            continue;
        }
        if col < start_col {
            // Wide character straddles the left edge; its visible half
            // becomes a blank cell.
            col += w;
            if col <= end_col {
                out.push(' ');
            }
            continue;
        }
        if col + w > end_col {
            break;
        }
        out.push(ch);
        col += w;
    }
    out
}

/// Code-point offset of the next word start strictly after `col`.
///
/// Word segmentation follows UAX #29; whitespace segments are never targets.
/// Returns `None` when no word starts after `col` on this line.
#[must_use]
pub fn next_word_start(line: &str, col: usize) -> Option<usize> {
    let mut char_pos = 0;
    for seg in line.split_word_bounds() {
        if char_pos > col && !seg.chars().all(char::is_whitespace) {
            return Some(char_pos);
        }
        char_pos += seg.chars().count();
    }
    None
}

/// Code-point offset of the last word start strictly before `col`.
///
/// Returns `None` when no word starts before `col` on this line.
#[must_use]
pub fn prev_word_start(line: &str, col: usize) -> Option<usize> {
    let mut char_pos = 0;
    let mut best = None;
    for seg in line.split_word_bounds() {
        if char_pos >= col {
            break;
        }
        if !seg.chars().all(char::is_whitespace) {
            best = Some(char_pos);
        }
        char_pos += seg.chars().count();
    }
    best
}
