//! Key-to-action mapping.
//!
//! [`Keymap`] is a plain lookup table from decoded [`KeyEvent`]s to logical
//! [`Action`]s. The edit loop is polymorphic over this table only: bindings
//! are replaceable without touching the dispatch state machine. A printable
//! character with no explicit binding is an insert of that character.

use std::collections::HashMap;

use crate::input::{KeyCode, KeyEvent, KeyModifiers};

/// A logical editing or navigation action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Move one code point left.
    MoveLeft,
    /// Move one code point right.
    MoveRight,
    /// Move up one line.
    MoveUp,
    /// Move down one line.
    MoveDown,
    /// Move to start of line.
    MoveLineStart,
    /// Move to end of line.
    MoveLineEnd,
    /// Move up one page.
    MovePageUp,
    /// Move down one page.
    MovePageDown,
    /// Move to previous word start.
    MoveWordLeft,
    /// Move to next word start.
    MoveWordRight,
    /// Move to start of document.
    MoveDocStart,
    /// Move to end of document.
    MoveDocEnd,
    /// Insert a character at the cursor.
    InsertChar(char),
    /// Insert a line break at the cursor.
    InsertNewline,
    /// Insert spaces up to the next tab stop.
    InsertTab,
    /// Delete the character before the cursor.
    DeleteBackward,
    /// Delete the character after the cursor.
    DeleteForward,
    /// Copy the selection to the clipboard.
    Copy,
    /// Cut the selection to the clipboard.
    Cut,
    /// Paste the clipboard at the cursor.
    Paste,
    /// Save and exit the session.
    Save,
    /// Exit the session without saving.
    Quit,
    /// Toggle the help panel.
    ToggleHelp,
}

impl Action {
    /// Check if this is a cursor movement.
    #[must_use]
    pub fn is_movement(&self) -> bool {
        matches!(
            self,
            Self::MoveLeft
                | Self::MoveRight
                | Self::MoveUp
                | Self::MoveDown
                | Self::MoveLineStart
                | Self::MoveLineEnd
                | Self::MovePageUp
                | Self::MovePageDown
                | Self::MoveWordLeft
                | Self::MoveWordRight
                | Self::MoveDocStart
                | Self::MoveDocEnd
        )
    }

    /// Check if this is an edit (mutates the buffer when applied).
    #[must_use]
    pub fn is_edit(&self) -> bool {
        matches!(
            self,
            Self::InsertChar(_)
                | Self::InsertNewline
                | Self::InsertTab
                | Self::DeleteBackward
                | Self::DeleteForward
                | Self::Paste
        )
    }
}

/// Lookup table from key events to actions.
#[derive(Clone, Debug)]
pub struct Keymap {
    table: HashMap<KeyEvent, Action>,
}

impl Default for Keymap {
    /// The stock nano-style bindings.
    ///
    /// Arrows/Home/End/PageUp/PageDown navigate; the same keys with Shift
    /// select; Ctrl+Left/Right move by word; Ctrl+Home/End jump to document
    /// bounds; Ctrl-C/Ctrl-Insert copy, Ctrl-X/Shift-Delete cut,
    /// Ctrl-V/Shift-Insert paste; Ctrl-S/F2 save; Ctrl-Q/Esc quit;
    /// F1/Ctrl-H toggle help.
    fn default() -> Self {
        let mut map = Self {
            table: HashMap::new(),
        };

        // Movement keys bind in plain, Shift (select), Ctrl (word/doc), and
        // Ctrl+Shift (word/doc select) variants; the dispatcher reads the
        // Shift modifier off the event itself.
        let none = KeyModifiers::empty();
        let shift = KeyModifiers::SHIFT;
        let ctrl = KeyModifiers::CTRL;
        let ctrl_shift = KeyModifiers::CTRL | KeyModifiers::SHIFT;

        for mods in [none, shift] {
            map.bind(KeyEvent::new(KeyCode::Left, mods), Action::MoveLeft);
            map.bind(KeyEvent::new(KeyCode::Right, mods), Action::MoveRight);
            map.bind(KeyEvent::new(KeyCode::Up, mods), Action::MoveUp);
            map.bind(KeyEvent::new(KeyCode::Down, mods), Action::MoveDown);
            map.bind(KeyEvent::new(KeyCode::Home, mods), Action::MoveLineStart);
            map.bind(KeyEvent::new(KeyCode::End, mods), Action::MoveLineEnd);
            map.bind(KeyEvent::new(KeyCode::PageUp, mods), Action::MovePageUp);
            map.bind(KeyEvent::new(KeyCode::PageDown, mods), Action::MovePageDown);
        }
        for mods in [ctrl, ctrl_shift] {
            map.bind(KeyEvent::new(KeyCode::Left, mods), Action::MoveWordLeft);
            map.bind(KeyEvent::new(KeyCode::Right, mods), Action::MoveWordRight);
            map.bind(KeyEvent::new(KeyCode::Home, mods), Action::MoveDocStart);
            map.bind(KeyEvent::new(KeyCode::End, mods), Action::MoveDocEnd);
            map.bind(KeyEvent::new(KeyCode::Up, mods), Action::MoveUp);
            map.bind(KeyEvent::new(KeyCode::Down, mods), Action::MoveDown);
        }

        map.bind(KeyEvent::key(KeyCode::Enter), Action::InsertNewline);
        map.bind(KeyEvent::key(KeyCode::Tab), Action::InsertTab);
        map.bind(KeyEvent::key(KeyCode::Backspace), Action::DeleteBackward);
        map.bind(KeyEvent::key(KeyCode::Delete), Action::DeleteForward);

        map.bind(KeyEvent::with_ctrl(KeyCode::Char('c')), Action::Copy);
        map.bind(KeyEvent::with_ctrl(KeyCode::Insert), Action::Copy);
        map.bind(KeyEvent::with_ctrl(KeyCode::Char('x')), Action::Cut);
        map.bind(KeyEvent::with_shift(KeyCode::Delete), Action::Cut);
        map.bind(KeyEvent::with_ctrl(KeyCode::Char('v')), Action::Paste);
        map.bind(KeyEvent::with_shift(KeyCode::Insert), Action::Paste);

        map.bind(KeyEvent::with_ctrl(KeyCode::Char('s')), Action::Save);
        map.bind(KeyEvent::key(KeyCode::F(2)), Action::Save);
        map.bind(KeyEvent::with_ctrl(KeyCode::Char('q')), Action::Quit);
        map.bind(KeyEvent::key(KeyCode::Esc), Action::Quit);
        map.bind(KeyEvent::key(KeyCode::F(1)), Action::ToggleHelp);
        map.bind(KeyEvent::with_ctrl(KeyCode::Char('h')), Action::ToggleHelp);

        map
    }
}

impl Keymap {
    /// Create an empty keymap.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Bind a key event to an action, replacing any previous binding.
    pub fn bind(&mut self, key: KeyEvent, action: Action) {
        self.table.insert(key, action);
    }

    /// Remove a binding.
    pub fn unbind(&mut self, key: &KeyEvent) {
        self.table.remove(key);
    }

    /// Resolve a key event to an action.
    ///
    /// Exact table lookups win; an unbound printable character (with no
    /// Ctrl/Alt held) resolves to [`Action::InsertChar`].
    #[must_use]
    pub fn resolve(&self, key: &KeyEvent) -> Option<Action> {
        if let Some(action) = self.table.get(key) {
            return Some(*action);
        }
        if key.ctrl() || key.alt() {
            return None;
        }
        match key.code.char() {
            Some(c) if !c.is_control() => Some(Action::InsertChar(c)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let map = Keymap::default();
        assert_eq!(
            map.resolve(&KeyEvent::key(KeyCode::Left)),
            Some(Action::MoveLeft)
        );
        assert_eq!(
            map.resolve(&KeyEvent::with_shift(KeyCode::Left)),
            Some(Action::MoveLeft)
        );
        assert_eq!(
            map.resolve(&KeyEvent::with_ctrl(KeyCode::Right)),
            Some(Action::MoveWordRight)
        );
        assert_eq!(
            map.resolve(&KeyEvent::with_ctrl(KeyCode::Char('q'))),
            Some(Action::Quit)
        );
        assert_eq!(
            map.resolve(&KeyEvent::with_shift(KeyCode::Insert)),
            Some(Action::Paste)
        );
    }

    #[test]
    fn test_printable_falls_back_to_insert() {
        let map = Keymap::default();
        assert_eq!(
            map.resolve(&KeyEvent::char('x')),
            Some(Action::InsertChar('x'))
        );
        assert_eq!(
            map.resolve(&KeyEvent::char('漢')),
            Some(Action::InsertChar('漢'))
        );
    }

    #[test]
    fn test_unbound_control_is_none() {
        let map = Keymap::default();
        assert_eq!(map.resolve(&KeyEvent::with_ctrl(KeyCode::Char('z'))), None);
    }

    #[test]
    fn test_rebinding() {
        let mut map = Keymap::default();
        map.bind(KeyEvent::with_ctrl(KeyCode::Char('w')), Action::Quit);
        assert_eq!(
            map.resolve(&KeyEvent::with_ctrl(KeyCode::Char('w'))),
            Some(Action::Quit)
        );
        map.unbind(&KeyEvent::with_ctrl(KeyCode::Char('w')));
        assert_eq!(map.resolve(&KeyEvent::with_ctrl(KeyCode::Char('w'))), None);
    }

    #[test]
    fn test_action_classification() {
        assert!(Action::MoveWordLeft.is_movement());
        assert!(!Action::Cut.is_movement());
        assert!(Action::InsertChar('a').is_edit());
        assert!(Action::Paste.is_edit());
        assert!(!Action::Copy.is_edit());
    }
}
