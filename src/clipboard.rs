//! Clipboard bridge abstraction.
//!
//! The core never talks to the OS clipboard directly. Embedders supply an
//! implementation of [`Clipboard`]; the session also keeps a
//! [`ScratchClipboard`] so cut/copy/paste keep working within the session
//! when the system bridge is absent or failing.

use crate::error::Result;

/// Abstract get/set of a text blob.
///
/// Failure is non-fatal to the editor: implementations should return
/// [`Error::ClipboardUnavailable`](crate::Error::ClipboardUnavailable) and
/// the session recovers with its scratch clipboard.
pub trait Clipboard {
    /// Read the clipboard contents.
    fn get_text(&mut self) -> Result<String>;

    /// Replace the clipboard contents.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// In-process clipboard used as the fallback store. Infallible.
#[derive(Clone, Debug, Default)]
pub struct ScratchClipboard {
    text: String,
}

impl ScratchClipboard {
    /// Create an empty scratch clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for ScratchClipboard {
    fn get_text(&mut self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = text.to_string();
        Ok(())
    }
}
