//! Terminal input decoding.

pub mod event;
pub mod keyboard;
pub mod parser;

pub use event::{Event, ResizeEvent};
pub use keyboard::{KeyCode, KeyEvent, KeyModifiers};
pub use parser::{InputParser, ParseError};
