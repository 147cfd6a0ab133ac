//! Error types for termed.

use std::fmt;
use std::io;

/// Result type alias for termed operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for termed operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error from terminal or file operations.
    Io(io::Error),
    /// A buffer coordinate addressed a non-existent line or a column beyond
    /// that line's length. This is an integration error at the API boundary;
    /// the edit loop guards against it by construction.
    OutOfRange {
        line: usize,
        col: usize,
        line_count: usize,
    },
    /// System clipboard get/set failed. Non-fatal: the session falls back to
    /// its internal scratch clipboard.
    ClipboardUnavailable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OutOfRange {
                line,
                col,
                line_count,
            } => {
                write!(
                    f,
                    "position ({line}, {col}) out of range for {line_count}-line buffer"
                )
            }
            Self::ClipboardUnavailable(s) => write!(f, "clipboard unavailable: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::OutOfRange {
            line: 7,
            col: 3,
            line_count: 2,
        };
        assert!(err.to_string().contains("(7, 3)"));
        assert!(err.to_string().contains("2-line"));

        let err = Error::ClipboardUnavailable("no display".to_string());
        assert!(err.to_string().contains("no display"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
