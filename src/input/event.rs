//! Terminal event types.

use crate::input::keyboard::KeyEvent;

/// A decoded terminal event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Keyboard event.
    Key(KeyEvent),
    /// Terminal resize event.
    Resize(ResizeEvent),
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Self::Key(e)
    }
}

impl From<ResizeEvent> for Event {
    fn from(e: ResizeEvent) -> Self {
        Self::Resize(e)
    }
}

/// Terminal resize event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResizeEvent {
    /// New width in columns.
    pub width: u16,
    /// New height in rows.
    pub height: u16,
}

impl ResizeEvent {
    /// Create a new resize event.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_conversions() {
        let event: Event = KeyEvent::char('a').into();
        assert_eq!(event, Event::Key(KeyEvent::char('a')));

        let event: Event = ResizeEvent::new(100, 50).into();
        assert_eq!(event, Event::Resize(ResizeEvent::new(100, 50)));
    }
}
