//! `termed` - Embeddable terminal text editor core
//!
//! A nano-style plain-text editing core: line-oriented buffer, cursor and
//! selection with Unicode-aware navigation, clipboard cut/copy/paste, a
//! table-driven keystroke dispatcher, and a viewport renderer, tied together
//! by an explicit [`EditorSession`] with no global state. Terminal raw mode,
//! file persistence, and the system clipboard live at the edges behind small
//! traits, so the core embeds anywhere a `Read`/`Write` pair exists.

// Crate-level lint configuration
#![warn(unsafe_code)] // Unsafe code needs justification (required for termios FFI)
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::module_name_repetitions)] // Allow TextBuffer, KeyEvent etc
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference

pub mod buffer;
pub mod clipboard;
pub mod cursor;
pub mod editor;
pub mod error;
pub mod event;
pub mod fileio;
pub mod input;
pub mod keymap;
pub mod terminal;
pub mod unicode;
pub mod viewport;

// Re-export core types at crate root
pub use buffer::{Position, TextBuffer};
pub use clipboard::{Clipboard, ScratchClipboard};
pub use cursor::Cursor;
pub use editor::{Control, EditorSession, ExitOutcome, ExitStatus, Mode};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_log, set_log_callback};
pub use keymap::{Action, Keymap};
pub use viewport::{Frame, FrameLine, Viewport};

// Re-export input types
pub use input::{Event, InputParser, KeyCode, KeyEvent, KeyModifiers, ResizeEvent};

// Re-export terminal types
pub use terminal::{
    AnsiTerminal, RawModeGuard, TerminalIo, enable_raw_mode, is_tty, terminal_size,
};
