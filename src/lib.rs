//! A strict, line-oriented INI reader. Point it at a file and get back an
//! immutable [`ConfigDocument`] or a single classified error.
//!
//! ```ignore
//! let doc = ini2cfg::parse("etc/hinterlib.ini")?;
//! let version = doc.get(None, "ver");
//! let url = doc.get(Some("zlib.src"), "url");
//! ```
//!
//! # The format
//!
//! Every line is exactly one of:
//!
//! | Line            | Shape                                              |
//! |-----------------|----------------------------------------------------|
//! | blank           | nothing but space, tab, VT, FF or CR               |
//! | comment         | first non-whitespace character is `;`              |
//! | section header  | `[name]` followed only by whitespace               |
//! | pair            | `key=value`, key non-empty, value taken verbatim   |
//!
//! Anything else rejects the whole file. There is no quoting, escaping,
//! line continuation or trailing comment; `a = b ; c` has the key `"a "` and
//! the value `" b ; c"`. The file must be plain ASCII with no NUL bytes.
//! CRLF line endings work because a CR at the start of a line is whitespace
//! (a CR at the end of a value is kept as part of the value).
//!
//! # Scopes
//!
//! Pairs before the first header are *global*. Once a header is seen the
//! global scope is closed for good: every later pair belongs to the most
//! recently opened section. Sections are not merged and keys are not
//! deduplicated; a repeated key or a repeated header is kept as written, in
//! order.
//!
//! # Field bounds
//!
//! Section names keep at most 128 bytes, keys 256, values 4096. Longer
//! fields are cut silently; length alone never fails a parse.
//!
//! # Pipeline
//!
//! ```text
//! file bytes ── encoding check ── split on '\n' ── lex each line ── build
//!                  (tokenize)        (file)          (lexer)       (builder)
//! ```
//!
//! Each stage fails fast. The caller gets either a complete document or the
//! first error, never a partial result. Allocation failure while
//! accumulating is reported as [`ParseError::OutOfMemory`].
//!
//! # Round-tripping
//!
//! A document's `Display` output is canonical INI. Re-parsing it yields the
//! same pairs and sections (comments and blank lines are not kept).
//!
//! # Command line
//!
//! The `ini2cfg` binary (behind the default `clap` feature) prints a
//! document as INI, JSON or a flat `section.key = value` listing, looks up
//! single keys, and can check for the toolchain assembler first. Its
//! defaults come from [`settings::Settings`].

pub mod errno;
pub mod error;
pub mod lexer;
pub mod preflight;
pub mod render;
pub mod settings;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
pub mod cli;
mod file;
mod tokenize;

#[cfg(test)]
mod fixtures;

use std::path::Path;

pub use builder::build;
pub use errno::ErrnoTag;
pub use error::{EncodingIssue, Error, ParseError, PreflightError};
pub use lexer::{Lexeme, MalformedReason, lex_line};
pub use render::{OutputFormat, render};
pub use tokenize::{tokenize, tokenize_file};
pub use types::{ConfigDocument, MAX_KEY, MAX_NAME, MAX_VALUE, Pair, Section};

/// Read and parse the INI file at `path`.
pub fn parse(path: impl AsRef<Path>) -> Result<ConfigDocument, ParseError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "parsing");
    build(tokenize_file(path)?)
}

/// Parse an in-memory buffer. Same rules as [`parse`], minus the file read.
pub fn parse_bytes(bytes: &[u8]) -> Result<ConfigDocument, ParseError> {
    build(tokenize(bytes)?)
}

/// Parse INI text. Non-ASCII text is rejected like any other input.
pub fn parse_str(text: &str) -> Result<ConfigDocument, ParseError> {
    parse_bytes(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{MANIFEST, write_ini};
    use proptest::prelude::*;

    #[test]
    fn empty_file_is_empty_document() {
        let (_dir, path) = write_ini("");
        let doc = parse(&path).unwrap();
        assert!(doc.global_pairs().is_empty());
        assert!(doc.sections().is_empty());
    }

    #[test]
    fn single_global_pair() {
        let doc = parse_str("k=v\n").unwrap();
        assert_eq!(doc.global_pairs(), &[Pair::new("k", "v")]);
        assert!(doc.sections().is_empty());
    }

    #[test]
    fn single_section_with_pair() {
        let doc = parse_str("[s]\nk=v\n").unwrap();
        assert!(doc.global_pairs().is_empty());
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.sections()[0].name(), "s");
        assert_eq!(doc.sections()[0].pairs(), &[Pair::new("k", "v")]);
    }

    #[test]
    fn global_pair_then_empty_section() {
        let doc = parse_str("k=v\n[s]\n").unwrap();
        assert_eq!(doc.global_pairs(), &[Pair::new("k", "v")]);
        assert_eq!(doc.sections()[0].name(), "s");
        assert!(doc.sections()[0].pairs().is_empty());
    }

    #[test]
    fn long_key_is_truncated() {
        let text = format!("{}=v\n", "a".repeat(300));
        let doc = parse_str(&text).unwrap();
        assert_eq!(doc.global_pairs()[0].key(), "a".repeat(256));
        assert_eq!(doc.global_pairs()[0].value(), "v");
    }

    #[test]
    fn byte_c3_anywhere_is_encoding_error() {
        for text in [
            &b"\xC3"[..],
            b"k=\xC3\n",
            b"[s]\nk=v\n; caf\xC3\n",
            b"k=v\n\n\n\xC3",
        ] {
            let (_dir, path) = write_ini(text);
            assert!(
                matches!(parse(&path), Err(ParseError::Encoding { .. })),
                "{text:?}"
            );
        }
    }

    #[test]
    fn missing_bracket_is_syntax_error() {
        assert!(matches!(
            parse_str("[s\n"),
            Err(ParseError::Syntax {
                line: 1,
                reason: MalformedReason::UnterminatedSection
            })
        ));
    }

    #[test]
    fn empty_key_is_syntax_error() {
        assert!(matches!(
            parse_str("=v\n"),
            Err(ParseError::Syntax {
                reason: MalformedReason::EmptyKey,
                ..
            })
        ));
    }

    #[test]
    fn comment_line_contributes_nothing() {
        let doc = parse_str("  ; a comment\n").unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn duplicate_keys_retained() {
        let doc = parse_str("k=1\nk=2\n").unwrap();
        assert_eq!(
            doc.global_pairs(),
            &[Pair::new("k", "1"), Pair::new("k", "2")]
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = parse(dir.path().join("absent.ini")).unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
        assert_eq!(err.errno(), Some(ErrnoTag::NotFound));
    }

    #[test]
    fn manifest_parses() {
        let (_dir, path) = write_ini(MANIFEST);
        let doc = parse(&path).unwrap();
        assert_eq!(doc.get(None, "tp"), Some("linux,gba"));
        assert_eq!(doc.get(None, "ver"), Some("0.4.1"));
        assert_eq!(
            doc.get(Some("zlib.src"), "url"),
            Some("https://zlib.net/zlib-1.3.tar.gz\r")
        );
        assert_eq!(doc.get_all(Some("zlib.src"), "mirror").len(), 2);
        assert_eq!(
            doc.get(Some("hinterlib.proj"), "cflags"),
            Some(" -O2 -Wall ")
        );
        let names: Vec<&str> = doc.sections().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["zlib.src", "hinterlib.proj"]);
    }

    #[test]
    fn bare_line_fails_with_its_line_number() {
        let err = parse_str("a=1\n[s]\nb=2\noops\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Syntax {
                line: 4,
                reason: MalformedReason::MissingEquals
            }
        ));
    }

    #[test]
    fn manifest_round_trips() {
        let doc = parse_str(MANIFEST).unwrap();
        assert_eq!(parse_str(&doc.to_string()).unwrap(), doc);
    }

    fn key_strategy() -> impl Strategy<Value = String> {
        // first byte: not whitespace, '[', ';' or '='; no '=' anywhere
        "[!-:<>-Z\\\\-~][ -<>-~]{0,20}"
    }

    fn value_strategy() -> impl Strategy<Value = String> {
        "[\t -~]{0,30}"
    }

    fn name_strategy() -> impl Strategy<Value = String> {
        "[ -\\\\^-~]{0,20}"
    }

    fn pairs_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
        prop::collection::vec((key_strategy(), value_strategy()), 0..5)
    }

    fn document_strategy() -> impl Strategy<Value = ConfigDocument> {
        (
            pairs_strategy(),
            prop::collection::vec((name_strategy(), pairs_strategy()), 0..4),
        )
            .prop_map(|(globals, sections)| {
                let to_pairs = |pairs: Vec<(String, String)>| -> Box<[Pair]> {
                    pairs.iter().map(|(k, v)| Pair::new(k, v)).collect()
                };
                let sections = sections
                    .into_iter()
                    .map(|(name, pairs)| Section::new(&name, to_pairs(pairs)))
                    .collect();
                ConfigDocument::from_parts(to_pairs(globals), sections)
            })
    }

    proptest! {
        #[test]
        fn rendered_document_reparses_identically(doc in document_strategy()) {
            let reparsed = parse_str(&doc.to_string()).unwrap();
            prop_assert_eq!(reparsed, doc);
        }

        #[test]
        fn lexer_never_panics(line in prop::collection::vec(any::<u8>(), 0..64)) {
            let _ = lex_line(&line);
        }
    }
}
