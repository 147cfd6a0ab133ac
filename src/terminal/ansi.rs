//! Constant ANSI escape sequences used by the renderer.

/// Reset all attributes to default.
pub const RESET: &str = "\x1b[0m";

/// Clear entire screen.
pub const CLEAR_SCREEN: &str = "\x1b[2J";

/// Clear from cursor to end of line.
pub const CLEAR_LINE_RIGHT: &str = "\x1b[K";

/// Hide cursor.
pub const CURSOR_HIDE: &str = "\x1b[?25l";

/// Show cursor.
pub const CURSOR_SHOW: &str = "\x1b[?25h";

/// Move cursor to home position (1,1).
pub const CURSOR_HOME: &str = "\x1b[H";

/// Inverse video, used for the selection highlight and the status line.
pub const INVERSE: &str = "\x1b[7m";

/// Enable alternative screen buffer.
pub const ALT_SCREEN_ON: &str = "\x1b[?1049h";

/// Disable alternative screen buffer.
pub const ALT_SCREEN_OFF: &str = "\x1b[?1049l";

/// Move the cursor to 1-based (row, col).
#[must_use]
pub fn cursor_to(row: u16, col: u16) -> String {
    format!("\x1b[{row};{col}H")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_to() {
        assert_eq!(cursor_to(1, 1), "\x1b[1;1H");
        assert_eq!(cursor_to(24, 80), "\x1b[24;80H");
    }
}
