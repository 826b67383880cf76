//! File tokenizer: validate the raw bytes, then lex every line.
//!
//! The encoding checks run over the whole buffer before any line is lexed,
//! so a bad byte on the last line still fails the file without producing
//! lexemes. Lexing stops at the first malformed line.

use std::path::Path;

use crate::error::{EncodingIssue, ParseError};
use crate::file;
use crate::lexer::{self, Lexeme};

/// Reject buffers that are not plain ASCII text.
///
/// A NUL byte means the measured text would end before the loaded byte
/// count, which the format does not allow.
pub fn check_encoding(bytes: &[u8]) -> Result<(), ParseError> {
    for (offset, &b) in bytes.iter().enumerate() {
        let issue = match b {
            0 => EncodingIssue::EmbeddedNul,
            b if !b.is_ascii() => EncodingIssue::NonAscii(b),
            _ => continue,
        };
        return Err(ParseError::Encoding { offset, issue });
    }
    Ok(())
}

/// Lex an in-memory buffer into its ordered lexemes.
pub fn tokenize(bytes: &[u8]) -> Result<Vec<Lexeme>, ParseError> {
    check_encoding(bytes)?;

    let mut lexemes = Vec::new();
    for (index, line) in file::split_lines(bytes).enumerate() {
        match lexer::lex_line(line) {
            Lexeme::Malformed(reason) => {
                tracing::debug!(line = index + 1, %reason, "malformed line");
                return Err(ParseError::Syntax {
                    line: index + 1,
                    reason,
                });
            }
            lexeme => {
                lexemes.try_reserve(1)?;
                lexemes.push(lexeme);
            }
        }
    }
    Ok(lexemes)
}

/// Load `path` and lex it.
pub fn tokenize_file(path: &Path) -> Result<Vec<Lexeme>, ParseError> {
    let bytes = file::load_file(path)?;
    tokenize(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::MalformedReason;

    #[test]
    fn one_lexeme_per_line() {
        let lexemes = tokenize(b"; hi\n[s]\nk=v\n").unwrap();
        assert_eq!(
            lexemes,
            vec![
                Lexeme::Comment(" hi".into()),
                Lexeme::SectionHeader("s".into()),
                Lexeme::Pair {
                    key: "k".into(),
                    value: "v".into()
                },
                Lexeme::Blank,
            ]
        );
    }

    #[test]
    fn crlf_lines_lex_like_lf() {
        let lexemes = tokenize(b"[s]\r\n\r\n; c\r\n").unwrap();
        assert_eq!(lexemes[0], Lexeme::SectionHeader("s".into()));
        assert_eq!(lexemes[1], Lexeme::Blank);
        assert_eq!(lexemes[2], Lexeme::Comment(" c\r".into()));
    }

    #[test]
    fn non_ascii_fails_before_lexing() {
        // the syntax error on line 1 is never reported
        let err = tokenize(b"no equals here\nk=\xC3\xA9\n").unwrap_err();
        match err {
            ParseError::Encoding { offset, issue } => {
                assert_eq!(offset, 17);
                assert_eq!(issue, EncodingIssue::NonAscii(0xC3));
            }
            other => panic!("expected encoding error, got {other:?}"),
        }
    }

    #[test]
    fn embedded_nul_is_encoding_error() {
        let err = tokenize(b"k=v\0\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Encoding {
                offset: 3,
                issue: EncodingIssue::EmbeddedNul
            }
        ));
    }

    #[test]
    fn first_malformed_line_aborts_with_line_number() {
        let err = tokenize(b"a=1\n\n[broken\n=also bad\n").unwrap_err();
        match err {
            ParseError::Syntax { line, reason } => {
                assert_eq!(line, 3);
                assert_eq!(reason, MalformedReason::UnterminatedSection);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn tokenize_file_reads_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("x.ini");
        std::fs::write(&path, "[s]\n").unwrap();
        let lexemes = tokenize_file(&path).unwrap();
        assert_eq!(lexemes.len(), 2);
    }
}
