//! Terminal I/O: raw mode, ANSI output, and the [`TerminalIo`] seam.
//!
//! [`EditorSession::run`](crate::EditorSession::run) is generic over
//! [`TerminalIo`], so tests drive the real edit loop with scripted events
//! while [`AnsiTerminal`] provides the production implementation over any
//! `Read`/`Write` pair (normally stdin/stdout in raw mode).

pub mod ansi;
pub mod raw;

pub use raw::{RawModeGuard, enable_raw_mode, is_tty, terminal_size};

use std::io::{self, Read, Write};

use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::input::{Event, InputParser, KeyCode, KeyEvent, ParseError};
use crate::unicode::{display_width, display_width_char, slice_columns};
use crate::viewport::Frame;

/// The terminal surface an edit loop runs against.
pub trait TerminalIo {
    /// Current size as (columns, rows).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) when the size cannot be
    /// determined.
    fn size(&mut self) -> Result<(u16, u16)>;

    /// Block until the next decoded event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) when the input source fails.
    fn read_event(&mut self) -> Result<Event>;

    /// Paint a frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) when the output sink fails.
    fn present(&mut self, frame: &Frame) -> Result<()>;
}

/// ANSI terminal over a raw `Read`/`Write` pair.
///
/// Input bytes are buffered and decoded incrementally; malformed input is
/// logged and skipped rather than aborting the session. Output is composed
/// per frame and written with a single flush.
pub struct AnsiTerminal<R: Read, W: Write> {
    input: R,
    output: W,
    parser: InputParser,
    pending: Vec<u8>,
    size: (u16, u16),
    // When backed by a real TTY, size() re-runs the winsize ioctl so
    // SIGWINCH resizes are observed without an in-band report.
    probe_winsize: bool,
}

impl AnsiTerminal<io::Stdin, io::Stdout> {
    /// Build a terminal over stdin/stdout, querying the real window size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) when stdout is not a
    /// terminal.
    pub fn stdio() -> Result<Self> {
        let (cols, rows) = raw::terminal_size()?;
        let mut term = Self::new(io::stdin(), io::stdout(), cols, rows);
        term.probe_winsize = true;
        Ok(term)
    }
}

impl<R: Read, W: Write> AnsiTerminal<R, W> {
    /// Build a terminal over arbitrary streams with a fixed initial size.
    /// The size tracks subsequent resize reports from the input stream.
    pub fn new(input: R, output: W, cols: u16, rows: u16) -> Self {
        Self {
            input,
            output,
            parser: InputParser::new(),
            pending: Vec::new(),
            size: (cols, rows),
            probe_winsize: false,
        }
    }

    /// Switch to the alternate screen buffer and clear it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) on write failure.
    pub fn enter_alt_screen(&mut self) -> Result<()> {
        self.output.write_all(ansi::ALT_SCREEN_ON.as_bytes())?;
        self.output.write_all(ansi::CLEAR_SCREEN.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Leave the alternate screen buffer and restore the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) on write failure.
    pub fn leave_alt_screen(&mut self) -> Result<()> {
        self.output.write_all(ansi::CURSOR_SHOW.as_bytes())?;
        self.output.write_all(ansi::ALT_SCREEN_OFF.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    /// Read more bytes into the pending buffer. With `VMIN=0`/`VTIME=1` a
    /// return of 0 means the 100ms timeout expired with nothing available.
    fn fill(&mut self) -> Result<usize> {
        let mut buf = [0u8; 64];
        let n = self.input.read(&mut buf)?;
        self.pending.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

impl<R: Read, W: Write> TerminalIo for AnsiTerminal<R, W> {
    fn size(&mut self) -> Result<(u16, u16)> {
        if self.probe_winsize {
            if let Ok(size) = raw::terminal_size() {
                self.size = size;
            }
        }
        Ok(self.size)
    }

    fn read_event(&mut self) -> Result<Event> {
        loop {
            match self.parser.parse(&self.pending) {
                Ok((event, used)) => {
                    self.pending.drain(..used);
                    if let Event::Resize(r) = event {
                        self.size = (r.width, r.height);
                    }
                    return Ok(event);
                }
                Err(ParseError::Empty) => {
                    self.fill()?;
                }
                Err(ParseError::Incomplete) => {
                    if self.fill()? == 0 {
                        // Timeout with a bare ESC pending: the Escape key.
                        if self.pending == [0x1b] {
                            self.pending.clear();
                            return Ok(Event::Key(KeyEvent::key(KeyCode::Esc)));
                        }
                        emit_log(
                            LogLevel::Warn,
                            &format!("discarding truncated input: {:02x?}", self.pending),
                        );
                        self.pending.clear();
                    }
                }
                Err(ParseError::UnrecognizedSequence(seq)) => {
                    emit_log(
                        LogLevel::Warn,
                        &format!("unrecognized escape sequence: {seq:02x?}"),
                    );
                    let n = seq.len().clamp(1, self.pending.len());
                    self.pending.drain(..n);
                }
                Err(ParseError::InvalidUtf8) => {
                    emit_log(LogLevel::Warn, "skipping invalid UTF-8 input byte");
                    self.pending.drain(..1);
                }
            }
        }
    }

    fn present(&mut self, frame: &Frame) -> Result<()> {
        let width = usize::from(self.size.0);
        let mut out = String::new();
        out.push_str(ansi::CURSOR_HIDE);
        out.push_str(ansi::CURSOR_HOME);

        for line in &frame.lines {
            match line.selection {
                Some(span) => out.push_str(&highlighted(&line.text, span)),
                None => out.push_str(&line.text),
            }
            out.push_str(ansi::CLEAR_LINE_RIGHT);
            out.push_str("\r\n");
        }

        out.push_str(ansi::INVERSE);
        out.push_str(&padded(&frame.status, width));
        out.push_str(ansi::RESET);

        let row = u16::try_from(frame.cursor_row + 1).unwrap_or(u16::MAX);
        let col = u16::try_from(frame.cursor_col + 1).unwrap_or(u16::MAX);
        out.push_str(&ansi::cursor_to(row, col));
        out.push_str(ansi::CURSOR_SHOW);

        self.output.write_all(out.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }
}

/// Wrap the display-column span `[start, end)` of `text` in inverse video.
/// A span reaching past the end of the text renders one inverse space for
/// the selected line break.
fn highlighted(text: &str, (start, end): (usize, usize)) -> String {
    let mut out = String::new();
    let mut col = 0;
    let mut open = false;
    for ch in text.chars() {
        if !open && col >= start && col < end {
            out.push_str(ansi::INVERSE);
            open = true;
        }
        if open && col >= end {
            out.push_str(ansi::RESET);
            open = false;
        }
        out.push(ch);
        col += display_width_char(ch);
    }
    if !open && col >= start && col < end {
        out.push_str(ansi::INVERSE);
        open = true;
    }
    if open {
        if end > col {
            out.push(' ');
        }
        out.push_str(ansi::RESET);
    }
    out
}

/// Clip and pad to an exact display width.
fn padded(text: &str, width: usize) -> String {
    let mut s = slice_columns(text, 0, width);
    let w = display_width(&s);
    s.push_str(&" ".repeat(width.saturating_sub(w)));
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ResizeEvent;
    use crate::viewport::FrameLine;

    fn terminal(input: &[u8]) -> AnsiTerminal<io::Cursor<Vec<u8>>, Vec<u8>> {
        AnsiTerminal::new(io::Cursor::new(input.to_vec()), Vec::new(), 20, 5)
    }

    #[test]
    fn test_read_event_stream() {
        let mut term = terminal(b"a\x1b[A\x0d");
        assert_eq!(
            term.read_event().unwrap(),
            Event::Key(KeyEvent::char('a'))
        );
        assert_eq!(
            term.read_event().unwrap(),
            Event::Key(KeyEvent::key(KeyCode::Up))
        );
        assert_eq!(
            term.read_event().unwrap(),
            Event::Key(KeyEvent::key(KeyCode::Enter))
        );
    }

    #[test]
    fn test_lone_esc_resolves_after_timeout() {
        // Cursor input returns 0 once exhausted, like a timed-out raw read.
        let mut term = terminal(b"\x1b");
        assert_eq!(
            term.read_event().unwrap(),
            Event::Key(KeyEvent::key(KeyCode::Esc))
        );
    }

    #[test]
    fn test_invalid_utf8_skipped() {
        let mut term = terminal(&[0xff, b'x']);
        assert_eq!(
            term.read_event().unwrap(),
            Event::Key(KeyEvent::char('x'))
        );
    }

    #[test]
    fn test_resize_report_updates_size() {
        let mut term = terminal(b"\x1b[8;30;100t");
        assert_eq!(
            term.read_event().unwrap(),
            Event::Resize(ResizeEvent::new(100, 30))
        );
        assert_eq!(term.size().unwrap(), (100, 30));
    }

    #[test]
    fn test_present_paints_frame() {
        let mut term = terminal(b"");
        let frame = Frame {
            lines: vec![
                FrameLine {
                    text: "hello".to_string(),
                    selection: Some((1, 3)),
                    tilde: false,
                },
                FrameLine {
                    text: "~".to_string(),
                    selection: None,
                    tilde: true,
                },
            ],
            cursor_row: 0,
            cursor_col: 2,
            status: "st".to_string(),
        };
        term.present(&frame).unwrap();
        let out = String::from_utf8(term.output.clone()).unwrap();
        assert!(out.contains("h\x1b[7mel\x1b[0mlo"));
        assert!(out.contains("~"));
        // Status padded to the 20-column width.
        assert!(out.contains("\x1b[7mst                  \x1b[0m"));
        assert!(out.ends_with("\x1b[1;3H\x1b[?25h"));
    }

    #[test]
    fn test_highlighted_covers_line_break_cell() {
        assert_eq!(highlighted("ab", (0, 3)), "\x1b[7mab \x1b[0m");
        assert_eq!(highlighted("", (0, 1)), "\x1b[7m \x1b[0m");
    }

    #[test]
    fn test_padded_clips_wide_chars() {
        assert_eq!(padded("漢字漢", 5), "漢字 ");
        assert_eq!(padded("ab", 4), "ab  ");
    }
}
