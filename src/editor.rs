//! Editor session and action dispatch.
//!
//! [`EditorSession`] is the explicit context object holding every piece of
//! editing state: buffer, cursor, keymap, viewport, clipboards, and the
//! dispatcher's `Normal`/`Selecting` state. There are no process-wide
//! singletons; embedders construct a session, feed it decoded events, and
//! paint the frames it produces. [`EditorSession::run`] wires that cycle to
//! any [`TerminalIo`] implementation.

use crate::buffer::{Position, TextBuffer};
use crate::clipboard::{Clipboard, ScratchClipboard};
use crate::cursor::Cursor;
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::input::{Event, KeyEvent};
use crate::keymap::{Action, Keymap};
use crate::terminal::TerminalIo;
use crate::unicode::display_col;
use crate::viewport::{Frame, Viewport};

/// Dispatcher state. `Selecting` means a selection anchor is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// No selection anchor.
    #[default]
    Normal,
    /// A selection anchor is set; navigation extends the selection.
    Selecting,
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Save was requested; the embedder should persist the returned lines.
    Saved,
    /// Quit with unsaved changes. The changes are in the returned lines but
    /// the embedder should not persist them.
    Discarded,
    /// Quit with no changes since the last clean point.
    Aborted,
}

/// Loop control returned by event handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    /// Keep processing events.
    Continue,
    /// Terminate the loop.
    Exit(ExitStatus),
}

/// Result of a completed session: how it ended and the final document.
#[derive(Clone, Debug)]
pub struct ExitOutcome {
    /// How the session ended.
    pub status: ExitStatus,
    /// Final buffer contents as lines.
    pub lines: Vec<String>,
}

const HELP_LINES: &[&str] = &[
    "  Help",
    "",
    "  Arrows           move the cursor",
    "  Shift+Arrows     select text",
    "  Ctrl+Left/Right  move by word",
    "  Home / End       start / end of line",
    "  Ctrl+Home/End    start / end of document",
    "  PgUp / PgDn      move by page",
    "  Ctrl-C           copy selection",
    "  Ctrl-X           cut selection",
    "  Ctrl-V           paste",
    "  Ctrl-S or F2     save and exit",
    "  Ctrl-Q or Esc    exit without saving",
    "  F1 or Ctrl-H     toggle this help",
    "",
    "  Press any key to continue.",
];

/// A complete editing session over one document.
pub struct EditorSession {
    buffer: TextBuffer,
    cursor: Cursor,
    mode: Mode,
    keymap: Keymap,
    viewport: Viewport,
    scratch: ScratchClipboard,
    system_clipboard: Option<Box<dyn Clipboard>>,
    status_message: Option<String>,
    help_visible: bool,
    name: String,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Create a session over an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::with_buffer(TextBuffer::new())
    }

    /// Create a session over pre-loaded lines.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self::with_buffer(TextBuffer::from_lines(lines))
    }

    fn with_buffer(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            cursor: Cursor::new(),
            mode: Mode::Normal,
            keymap: Keymap::default(),
            viewport: Viewport::new(23, 80),
            scratch: ScratchClipboard::new(),
            system_clipboard: None,
            status_message: None,
            help_visible: false,
            name: "untitled".to_string(),
        }
    }

    /// Set the document name shown in the status line.
    #[must_use]
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Install a system clipboard bridge. Without one, cut/copy/paste use
    /// only the in-session scratch clipboard.
    pub fn set_clipboard(&mut self, clipboard: Box<dyn Clipboard>) {
        self.system_clipboard = Some(clipboard);
    }

    /// Replace the keymap.
    pub fn set_keymap(&mut self, keymap: Keymap) {
        self.keymap = keymap;
    }

    /// The document buffer.
    #[must_use]
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The cursor.
    #[must_use]
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Current dispatcher state.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Snapshot of the document as lines, for the persistence collaborator.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.buffer.to_lines()
    }

    /// Resize the session's text area to a terminal of `width` x `height`
    /// cells. One row is reserved for the status line.
    pub fn resize(&mut self, width: u16, height: u16) {
        let rows = usize::from(height).saturating_sub(1).max(1);
        self.viewport.resize(rows, usize::from(width).max(1));
    }

    /// Handle one decoded terminal event.
    pub fn handle_event(&mut self, event: &Event) -> Control {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Resize(r) => {
                self.resize(r.width, r.height);
                Control::Continue
            }
        }
    }

    /// Handle one key event through the keymap and dispatcher.
    ///
    /// While the help panel is visible, the next key dismisses it and is
    /// otherwise consumed.
    pub fn handle_key(&mut self, key: &KeyEvent) -> Control {
        self.status_message = None;
        if self.help_visible {
            self.help_visible = false;
            return Control::Continue;
        }
        let Some(action) = self.keymap.resolve(key) else {
            emit_log(LogLevel::Debug, &format!("unbound key ignored: {key:?}"));
            return Control::Continue;
        };
        self.dispatch(action, key.shift())
    }

    /// Apply a resolved action. `select` extends the selection on movement
    /// actions (anchor set at the pre-move position if none exists).
    pub fn dispatch(&mut self, action: Action, select: bool) -> Control {
        if action.is_movement() {
            if select {
                self.cursor.begin_selection();
            } else {
                self.cursor.clear_selection();
            }
            self.apply_movement(action);
            self.sync_mode();
            return Control::Continue;
        }

        // Any edit while selecting first removes the selected range.
        if action.is_edit() {
            self.delete_selection();
        }

        match action {
            Action::InsertChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_text(c.encode_utf8(&mut tmp));
            }
            Action::InsertNewline => {
                self.insert_text("\n");
            }
            Action::InsertTab => {
                // Soft tabs: spaces to the next 4-column stop, measured in
                // display columns so wide characters keep the visual grid.
                let pos = self.cursor.position();
                let line = self.buffer.line(pos.line).unwrap_or("");
                let n = 4 - display_col(line, pos.col) % 4;
                self.insert_text(&" ".repeat(n));
            }
            Action::DeleteBackward => self.delete_backward(),
            Action::DeleteForward => self.delete_forward(),
            Action::Paste => self.paste(),
            Action::Copy => self.copy(),
            Action::Cut => self.cut(),
            Action::ToggleHelp => self.help_visible = !self.help_visible,
            Action::Save => return Control::Exit(ExitStatus::Saved),
            Action::Quit => {
                let status = if self.buffer.is_dirty() {
                    ExitStatus::Discarded
                } else {
                    ExitStatus::Aborted
                };
                return Control::Exit(status);
            }
            _ => {}
        }
        self.sync_mode();
        Control::Continue
    }

    /// Lay out the next frame: scroll to the cursor, render the window, and
    /// compose the status line (or the help panel when it is open).
    pub fn render_frame(&mut self) -> Frame {
        self.viewport
            .scroll_to_cursor(&self.buffer, self.cursor.position());
        let mut frame = self.viewport.layout(&self.buffer, &self.cursor);
        if self.help_visible {
            for (i, row) in frame.lines.iter_mut().enumerate() {
                row.text = HELP_LINES.get(i).unwrap_or(&"").to_string();
                row.selection = None;
                row.tilde = false;
            }
        }
        frame.status = self.status_line();
        frame
    }

    /// Drive a full edit loop over `terminal` until an exit action.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if the terminal fails to
    /// deliver events or paint frames. Buffer-level errors never surface
    /// here; they are logged and the loop continues.
    pub fn run<T: TerminalIo>(&mut self, terminal: &mut T) -> Result<ExitOutcome> {
        loop {
            // Dimensions are reconciled every pass so window size changes
            // take effect on the next paint.
            let (width, height) = terminal.size()?;
            self.resize(width, height);
            let frame = self.render_frame();
            terminal.present(&frame)?;
            let event = terminal.read_event()?;
            if let Control::Exit(status) = self.handle_event(&event) {
                return Ok(ExitOutcome {
                    status,
                    lines: self.buffer.to_lines(),
                });
            }
        }
    }

    fn apply_movement(&mut self, action: Action) {
        match action {
            Action::MoveLeft => self.cursor.move_left(&self.buffer),
            Action::MoveRight => self.cursor.move_right(&self.buffer),
            Action::MoveUp => self.cursor.move_up(&self.buffer),
            Action::MoveDown => self.cursor.move_down(&self.buffer),
            Action::MoveLineStart => self.cursor.move_line_start(),
            Action::MoveLineEnd => self.cursor.move_line_end(&self.buffer),
            Action::MovePageUp => self.cursor.move_page_up(&self.buffer, self.viewport.rows()),
            Action::MovePageDown => {
                self.cursor.move_page_down(&self.buffer, self.viewport.rows());
            }
            Action::MoveWordLeft => self.cursor.move_word_left(&self.buffer),
            Action::MoveWordRight => self.cursor.move_word_right(&self.buffer),
            Action::MoveDocStart => self.cursor.move_buffer_start(),
            Action::MoveDocEnd => self.cursor.move_buffer_end(&self.buffer),
            _ => {}
        }
    }

    fn sync_mode(&mut self) {
        self.mode = if self.cursor.anchor().is_some() {
            Mode::Selecting
        } else {
            Mode::Normal
        };
    }

    /// Remove the selected range, if any, and collapse the cursor to its
    /// start. Edits while selecting always do this first.
    fn delete_selection(&mut self) {
        if let Some((start, end)) = self.cursor.selection() {
            match self.buffer.delete_range(start, end) {
                Ok(_) => self.cursor.set_position(&self.buffer, start),
                Err(e) => emit_log(LogLevel::Error, &format!("selection delete failed: {e}")),
            }
        }
        self.cursor.clear_selection();
    }

    fn insert_text(&mut self, text: &str) {
        match self.buffer.insert(self.cursor.position(), text) {
            Ok(end) => self.cursor.set_position(&self.buffer, end),
            Err(e) => emit_log(LogLevel::Error, &format!("insert failed: {e}")),
        }
    }

    fn delete_backward(&mut self) {
        let pos = self.cursor.position();
        if pos == Position::new(0, 0) {
            return;
        }
        self.cursor.move_left(&self.buffer);
        let start = self.cursor.position();
        if let Err(e) = self.buffer.delete_range(start, pos) {
            emit_log(LogLevel::Error, &format!("delete failed: {e}"));
        }
    }

    fn delete_forward(&mut self) {
        let pos = self.cursor.position();
        let mut probe = self.cursor;
        probe.move_right(&self.buffer);
        let end = probe.position();
        if end == pos {
            return;
        }
        if let Err(e) = self.buffer.delete_range(pos, end) {
            emit_log(LogLevel::Error, &format!("delete failed: {e}"));
        }
    }

    fn copy(&mut self) {
        let Some((start, end)) = self.cursor.selection() else {
            self.status_message = Some("nothing selected".to_string());
            return;
        };
        match self.buffer.range_text(start, end) {
            Ok(text) => {
                self.clipboard_set(&text);
                self.status_message = Some("copied selection".to_string());
            }
            Err(e) => emit_log(LogLevel::Error, &format!("copy failed: {e}")),
        }
    }

    fn cut(&mut self) {
        let Some((start, end)) = self.cursor.selection() else {
            self.status_message = Some("nothing selected".to_string());
            return;
        };
        match self.buffer.delete_range(start, end) {
            Ok(removed) => {
                self.clipboard_set(&removed);
                self.cursor.set_position(&self.buffer, start);
                self.cursor.clear_selection();
                self.status_message = Some("cut selection".to_string());
            }
            Err(e) => emit_log(LogLevel::Error, &format!("cut failed: {e}")),
        }
        self.sync_mode();
    }

    fn paste(&mut self) {
        let text = self.clipboard_get();
        if text.is_empty() {
            self.status_message = Some("clipboard empty".to_string());
            return;
        }
        self.insert_text(&text);
    }

    /// Write to the scratch clipboard and, when one is installed, the system
    /// bridge. A bridge failure is logged and does not fail the action.
    fn clipboard_set(&mut self, text: &str) {
        if let Err(e) = self.scratch.set_text(text) {
            emit_log(LogLevel::Error, &format!("scratch clipboard set: {e}"));
        }
        if let Some(clip) = self.system_clipboard.as_mut() {
            if let Err(e) = clip.set_text(text) {
                emit_log(
                    LogLevel::Warn,
                    &format!("system clipboard set failed, scratch retains text: {e}"),
                );
            }
        }
    }

    /// Read the system clipboard if available, falling back to scratch.
    fn clipboard_get(&mut self) -> String {
        if let Some(clip) = self.system_clipboard.as_mut() {
            match clip.get_text() {
                Ok(text) => return text,
                Err(e) => emit_log(
                    LogLevel::Warn,
                    &format!("system clipboard get failed, using scratch: {e}"),
                ),
            }
        }
        self.scratch.get_text().unwrap_or_default()
    }

    fn status_line(&self) -> String {
        let pos = self.cursor.position();
        let marker = if self.buffer.is_dirty() { " [+]" } else { "" };
        let left = self
            .status_message
            .clone()
            .unwrap_or_else(|| format!("{}{marker}", self.name));
        format!("{left}  Ln {}, Col {}", pos.line + 1, pos.col + 1)
    }
}
