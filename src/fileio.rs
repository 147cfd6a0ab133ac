//! Loading and saving documents.
//!
//! The core treats persistence as an external collaborator; these helpers
//! are the stock implementation used by the bundled binary. Saves go through
//! a temporary file in the same directory followed by a rename, so a failed
//! write never truncates the original.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Load a document as lines. A missing file yields an empty document;
/// non-UTF-8 bytes are replaced rather than rejected.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) on any read failure other than
/// the file not existing.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let text = String::from_utf8_lossy(&bytes);
    let stripped = text.strip_suffix('\n').unwrap_or(&text);
    if stripped.is_empty() {
        return Ok(Vec::new());
    }
    Ok(stripped.split('\n').map(str::to_string).collect())
}

/// Save lines to `path` atomically, with a trailing newline.
///
/// # Errors
///
/// Returns [`Error::Io`](crate::Error::Io) if the temporary file cannot be
/// written or renamed into place.
pub fn save_lines(path: &Path, lines: &[String]) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    for line in lines {
        tmp.write_all(line.as_bytes())?;
        tmp.write_all(b"\n")?;
    }
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        let lines = vec!["one".to_string(), "two".to_string()];
        save_lines(&path, &lines).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
        assert_eq!(load_lines(&path).unwrap(), lines);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_lines(&dir.path().join("absent")).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_save_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        save_lines(&path, &["old".to_string()]).unwrap();
        save_lines(&path, &["new".to_string()]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }

    #[test]
    fn test_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        save_lines(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
        assert_eq!(load_lines(&path).unwrap(), Vec::<String>::new());
    }
}
