//! ANSI sequence parser for terminal input.
//!
//! Parses raw bytes from the terminal into structured events. Supports:
//! - Standard VT sequences (arrows, Home/End, function keys)
//! - CSI sequences with `1;N` modifier encoding
//! - Tilde sequences (Insert, Delete, Page Up/Down, F5+)
//! - Control bytes (Ctrl+A..Z, Enter, Tab, Backspace)
//! - Multi-byte UTF-8 input
//!
//! Invalid UTF-8 never aborts the session: the caller skips the offending
//! byte on [`ParseError::InvalidUtf8`] and continues.

// Parser has many match arms for different terminal sequences
#![allow(clippy::match_same_arms)]
// Self is used for consistency with other methods even when not needed
#![allow(clippy::unused_self)]

use crate::input::event::{Event, ResizeEvent};
use crate::input::keyboard::{KeyCode, KeyEvent, KeyModifiers};

/// Error type for input parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Input buffer is empty.
    Empty,
    /// Incomplete escape sequence (need more bytes).
    Incomplete,
    /// Unrecognized escape sequence.
    UnrecognizedSequence(Vec<u8>),
    /// Invalid UTF-8 in input. The caller should skip one byte.
    InvalidUtf8,
}

/// Result of parsing input: the event and the number of bytes consumed.
pub type ParseResult = Result<(Event, usize), ParseError>;

/// Stateless decoder for terminal input bytes.
#[derive(Clone, Debug, Default)]
pub struct InputParser;

impl InputParser {
    /// Create a new input parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse bytes into an event.
    ///
    /// Returns the event and number of bytes consumed, or an error.
    /// Call repeatedly with the same buffer until `Err(ParseError::Empty)`
    /// or `Err(ParseError::Incomplete)` is returned.
    ///
    /// # Errors
    ///
    /// See [`ParseError`]. `Incomplete` for a lone `ESC` is resolved by the
    /// caller via read timeout (a bare `ESC` byte with nothing following is
    /// the Escape key).
    pub fn parse(&self, input: &[u8]) -> ParseResult {
        if input.is_empty() {
            return Err(ParseError::Empty);
        }

        let first = input[0];

        match first {
            // Escape sequence
            0x1b => self.parse_escape(input),
            // Enter (CR or LF in raw mode)
            0x0d | 0x0a => Ok((KeyEvent::key(KeyCode::Enter).into(), 1)),
            0x09 => Ok((KeyEvent::key(KeyCode::Tab).into(), 1)),
            // Remaining control characters: Ctrl+A through Ctrl+Z
            0x01..=0x1a => {
                let c = (first - 1 + b'a') as char;
                Ok((
                    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CTRL).into(),
                    1,
                ))
            }
            0x7f => Ok((KeyEvent::key(KeyCode::Backspace).into(), 1)),
            // Regular characters (ASCII)
            0x20..=0x7e => Ok((KeyEvent::char(first as char).into(), 1)),
            // UTF-8 sequences
            0x80..=0xff => self.parse_utf8(input),
            _ => Err(ParseError::UnrecognizedSequence(vec![first])),
        }
    }

    /// Parse an escape sequence.
    fn parse_escape(&self, input: &[u8]) -> ParseResult {
        if input.len() == 1 {
            // Could be just Escape or start of a sequence.
            return Err(ParseError::Incomplete);
        }

        match input[1] {
            // CSI sequence: ESC [
            b'[' => self.parse_csi(input),
            // SS3 sequence: ESC O (alternate function keys)
            b'O' => self.parse_ss3(input),
            // Alt+key: ESC <char>
            0x20..=0x7e => {
                let c = input[1] as char;
                Ok((KeyEvent::new(KeyCode::Char(c), KeyModifiers::ALT).into(), 2))
            }
            // Double escape
            0x1b => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
            _ => Ok((KeyEvent::key(KeyCode::Esc).into(), 1)),
        }
    }

    /// Parse a CSI sequence (ESC [ ...).
    fn parse_csi(&self, input: &[u8]) -> ParseResult {
        if input.len() < 3 {
            return Err(ParseError::Incomplete);
        }

        // Find the final byte (0x40-0x7e)
        let mut end = 2;
        while end < input.len() {
            let b = input[end];
            if (0x40..=0x7e).contains(&b) {
                break;
            }
            end += 1;
        }

        if end >= input.len() {
            return Err(ParseError::Incomplete);
        }

        let final_byte = input[end];
        let params = &input[2..end];

        match final_byte {
            // Arrow keys and navigation
            b'A' => self.parse_modified_key(params, KeyCode::Up, end + 1),
            b'B' => self.parse_modified_key(params, KeyCode::Down, end + 1),
            b'C' => self.parse_modified_key(params, KeyCode::Right, end + 1),
            b'D' => self.parse_modified_key(params, KeyCode::Left, end + 1),
            b'H' => self.parse_modified_key(params, KeyCode::Home, end + 1),
            b'F' => self.parse_modified_key(params, KeyCode::End, end + 1),

            // Tilde sequences: ESC [ <number> ~
            b'~' => self.parse_tilde_key(params, end + 1),

            // Resize report (XTWINOPS): ESC [ 8 ; rows ; cols t
            b't' => self.parse_resize(params, end + 1),

            _ => Err(ParseError::UnrecognizedSequence(input[..=end].to_vec())),
        }
    }

    /// Parse a key with modifiers from CSI params.
    fn parse_modified_key(&self, params: &[u8], base_key: KeyCode, consumed: usize) -> ParseResult {
        let modifiers = if params.is_empty() {
            KeyModifiers::empty()
        } else {
            self.parse_modifiers(params)?
        };
        Ok((KeyEvent::new(base_key, modifiers).into(), consumed))
    }

    /// Parse modifiers from CSI parameter bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUtf8`] if the parameter bytes are not
    /// valid UTF-8.
    fn parse_modifiers(&self, params: &[u8]) -> Result<KeyModifiers, ParseError> {
        // Format: 1;N where N encodes modifiers
        // N = 1 + (shift ? 1 : 0) + (alt ? 2 : 0) + (ctrl ? 4 : 0)
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let parts: Vec<&str> = s.split(';').collect();
        if parts.len() >= 2 {
            if let Ok(n) = parts[1].parse::<u8>() {
                let n = n.saturating_sub(1);
                let mut mods = KeyModifiers::empty();
                if n & 1 != 0 {
                    mods |= KeyModifiers::SHIFT;
                }
                if n & 2 != 0 {
                    mods |= KeyModifiers::ALT;
                }
                if n & 4 != 0 {
                    mods |= KeyModifiers::CTRL;
                }
                return Ok(mods);
            }
        }
        Ok(KeyModifiers::empty())
    }

    /// Parse tilde key sequences (Insert, Delete, Page Up/Down, F5+).
    fn parse_tilde_key(&self, params: &[u8], consumed: usize) -> ParseResult {
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let parts: Vec<&str> = s.split(';').collect();
        let num: u8 = parts.first().and_then(|p| p.parse().ok()).unwrap_or(0);

        let modifiers = if parts.len() >= 2 {
            self.parse_modifiers(params)?
        } else {
            KeyModifiers::empty()
        };

        let code = match num {
            1 | 7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 | 8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            11 => KeyCode::F(1),
            12 => KeyCode::F(2),
            13 => KeyCode::F(3),
            14 => KeyCode::F(4),
            15 => KeyCode::F(5),
            17 => KeyCode::F(6),
            18 => KeyCode::F(7),
            19 => KeyCode::F(8),
            20 => KeyCode::F(9),
            21 => KeyCode::F(10),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            _ => return Err(ParseError::UnrecognizedSequence(full_sequence(params, b'~'))),
        };

        Ok((KeyEvent::new(code, modifiers).into(), consumed))
    }

    /// Parse SS3 sequences (ESC O ...).
    fn parse_ss3(&self, input: &[u8]) -> ParseResult {
        if input.len() < 3 {
            return Err(ParseError::Incomplete);
        }

        let code = match input[2] {
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            b'H' => KeyCode::Home,
            b'F' => KeyCode::End,
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            other => return Err(ParseError::UnrecognizedSequence(vec![0x1b, b'O', other])),
        };

        Ok((KeyEvent::key(code).into(), 3))
    }

    /// Parse a resize report (CSI 8 ; rows ; cols t).
    fn parse_resize(&self, params: &[u8], consumed: usize) -> ParseResult {
        let s = std::str::from_utf8(params).map_err(|_| ParseError::InvalidUtf8)?;
        let parts: Vec<&str> = s.split(';').collect();
        if parts.len() == 3 && parts[0] == "8" {
            if let (Ok(rows), Ok(cols)) = (parts[1].parse::<u16>(), parts[2].parse::<u16>()) {
                return Ok((ResizeEvent::new(cols, rows).into(), consumed));
            }
        }
        Err(ParseError::UnrecognizedSequence(full_sequence(params, b't')))
    }

    /// Parse a multi-byte UTF-8 character.
    fn parse_utf8(&self, input: &[u8]) -> ParseResult {
        let len = match input[0] {
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => return Err(ParseError::InvalidUtf8),
        };

        if input.len() < len {
            return Err(ParseError::Incomplete);
        }

        match std::str::from_utf8(&input[..len]) {
            Ok(s) => {
                let c = s.chars().next().ok_or(ParseError::InvalidUtf8)?;
                Ok((KeyEvent::char(c).into(), len))
            }
            Err(_) => Err(ParseError::InvalidUtf8),
        }
    }
}

/// Rebuild the full CSI byte sequence for error reporting; its length tells
/// the caller how many pending bytes to skip.
fn full_sequence(params: &[u8], final_byte: u8) -> Vec<u8> {
    let mut seq = Vec::with_capacity(params.len() + 3);
    seq.extend_from_slice(&[0x1b, b'[']);
    seq.extend_from_slice(params);
    seq.push(final_byte);
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(bytes: &[u8]) -> ParseResult {
        InputParser::new().parse(bytes)
    }

    fn key(bytes: &[u8]) -> KeyEvent {
        match parse(bytes) {
            Ok((Event::Key(k), _)) => k,
            other => panic!("expected key event, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_ascii() {
        assert_eq!(key(b"a"), KeyEvent::char('a'));
        assert_eq!(key(b" "), KeyEvent::char(' '));
    }

    #[test]
    fn test_control_bytes() {
        assert_eq!(key(b"\x11"), KeyEvent::with_ctrl(KeyCode::Char('q')));
        assert_eq!(key(b"\x13"), KeyEvent::with_ctrl(KeyCode::Char('s')));
        assert_eq!(key(b"\r"), KeyEvent::key(KeyCode::Enter));
        assert_eq!(key(b"\t"), KeyEvent::key(KeyCode::Tab));
        assert_eq!(key(b"\x7f"), KeyEvent::key(KeyCode::Backspace));
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(key(b"\x1b[A"), KeyEvent::key(KeyCode::Up));
        assert_eq!(key(b"\x1b[B"), KeyEvent::key(KeyCode::Down));
        assert_eq!(key(b"\x1b[C"), KeyEvent::key(KeyCode::Right));
        assert_eq!(key(b"\x1b[D"), KeyEvent::key(KeyCode::Left));
    }

    #[test]
    fn test_modified_arrows() {
        assert_eq!(key(b"\x1b[1;2D"), KeyEvent::with_shift(KeyCode::Left));
        assert_eq!(key(b"\x1b[1;5C"), KeyEvent::with_ctrl(KeyCode::Right));
        assert_eq!(
            key(b"\x1b[1;6C"),
            KeyEvent::new(KeyCode::Right, KeyModifiers::CTRL | KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_home_end() {
        assert_eq!(key(b"\x1b[H"), KeyEvent::key(KeyCode::Home));
        assert_eq!(key(b"\x1b[F"), KeyEvent::key(KeyCode::End));
        assert_eq!(key(b"\x1bOH"), KeyEvent::key(KeyCode::Home));
        assert_eq!(key(b"\x1b[1;5H"), KeyEvent::with_ctrl(KeyCode::Home));
    }

    #[test]
    fn test_tilde_keys() {
        assert_eq!(key(b"\x1b[3~"), KeyEvent::key(KeyCode::Delete));
        assert_eq!(key(b"\x1b[5~"), KeyEvent::key(KeyCode::PageUp));
        assert_eq!(key(b"\x1b[6~"), KeyEvent::key(KeyCode::PageDown));
        assert_eq!(key(b"\x1b[2;2~"), KeyEvent::with_shift(KeyCode::Insert));
        assert_eq!(key(b"\x1b[3;2~"), KeyEvent::with_shift(KeyCode::Delete));
        assert_eq!(key(b"\x1b[2;5~"), KeyEvent::with_ctrl(KeyCode::Insert));
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(key(b"\x1bOP"), KeyEvent::key(KeyCode::F(1)));
        assert_eq!(key(b"\x1b[11~"), KeyEvent::key(KeyCode::F(1)));
        assert_eq!(key(b"\x1b[12~"), KeyEvent::key(KeyCode::F(2)));
        assert_eq!(key(b"\x1b[24~"), KeyEvent::key(KeyCode::F(12)));
    }

    #[test]
    fn test_alt_char() {
        assert_eq!(
            key(b"\x1bx"),
            KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)
        );
    }

    #[test]
    fn test_utf8_multibyte() {
        let (event, consumed) = parse("é".as_bytes()).unwrap();
        assert_eq!(event, Event::Key(KeyEvent::char('é')));
        assert_eq!(consumed, 2);

        let (event, consumed) = parse("漢".as_bytes()).unwrap();
        assert_eq!(event, Event::Key(KeyEvent::char('漢')));
        assert_eq!(consumed, 3);
    }

    #[test]
    fn test_utf8_incomplete() {
        let bytes = "漢".as_bytes();
        assert_eq!(parse(&bytes[..1]), Err(ParseError::Incomplete));
        assert_eq!(parse(&bytes[..2]), Err(ParseError::Incomplete));
    }

    #[test]
    fn test_invalid_utf8() {
        assert_eq!(parse(&[0xff, 0x20]), Err(ParseError::InvalidUtf8));
        // Continuation byte with no lead byte
        assert_eq!(parse(&[0x80]), Err(ParseError::InvalidUtf8));
        // Lead byte followed by a non-continuation byte
        assert_eq!(parse(&[0xc3, 0x41]), Err(ParseError::InvalidUtf8));
    }

    #[test]
    fn test_lone_escape_is_incomplete() {
        assert_eq!(parse(b"\x1b"), Err(ParseError::Incomplete));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(b""), Err(ParseError::Empty));
    }

    #[test]
    fn test_resize_report() {
        let (event, consumed) = parse(b"\x1b[8;24;80t").unwrap();
        assert_eq!(event, Event::Resize(ResizeEvent::new(80, 24)));
        assert_eq!(consumed, 10);
    }

    #[test]
    fn test_unrecognized_csi() {
        assert!(matches!(
            parse(b"\x1b[99z"),
            Err(ParseError::UnrecognizedSequence(_))
        ));
    }

    #[test]
    fn test_consumed_counts() {
        let (_, n) = parse(b"\x1b[1;2Dxyz").unwrap();
        assert_eq!(n, 6);
        let (_, n) = parse(b"\x1b[Axyz").unwrap();
        assert_eq!(n, 3);
    }
}
