//! Loading raw input from disk and cutting it into lines.
//!
//! Reading is a thin wrapper over [`std::fs::read`] that attaches the path to
//! the error. Splitting is on `\n` only; a `\r` before it stays on the line
//! and is treated as whitespace (or kept verbatim inside a value) by the
//! lexer.

use std::path::Path;

use crate::error::ParseError;

/// Read the whole file into memory.
pub fn load_file(path: &Path) -> Result<Vec<u8>, ParseError> {
    match std::fs::read(path) {
        Ok(bytes) => {
            tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded file");
            Ok(bytes)
        }
        Err(e) => Err(ParseError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Split on `\n`. A trailing terminator yields a final empty line, which
/// lexes as blank.
pub fn split_lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    bytes.split(|&b| b == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn load_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.ini");
        fs::write(&path, "k=v\n").unwrap();
        assert_eq!(load_file(&path).unwrap(), b"k=v\n");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope.ini");
        match load_file(&path) {
            Err(ParseError::Io { path: p, source }) => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn load_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(load_file(dir.path()), Err(ParseError::Io { .. })));
    }

    #[test]
    fn split_keeps_carriage_returns() {
        let lines: Vec<&[u8]> = split_lines(b"a=1\r\n[s]\r\n").collect();
        assert_eq!(lines, vec![&b"a=1\r"[..], b"[s]\r", b""]);
    }

    #[test]
    fn split_empty_input_is_one_empty_line() {
        let lines: Vec<&[u8]> = split_lines(b"").collect();
        assert_eq!(lines, vec![&b""[..]]);
    }
}
