//! Line lexer: classify one physical line into a [`Lexeme`].
//!
//! The lexer is a small byte-driven state machine:
//!
//! ```text
//!            ws                 ']'              ws
//!   Start ───────► Start   Section ─────► PostSection ───► PostSection
//!     │ '['  ──────────────►  │ other: accumulate
//!     │ ';'  ──► Comment (rest of line verbatim)
//!     │ other ─► Key ── '=' ──► Value (rest of line verbatim)
//! ```
//!
//! End of line in `Start` is a blank line, in `Comment` a comment, in
//! `PostSection` a section header and in `Value` a pair. Ending anywhere
//! else is malformed. So is an `=` with nothing before it and anything but
//! whitespace after the closing `]`. A byte above 0x7F anywhere on the line
//! is reported as non-ASCII before any of those.
//!
//! Lines without an `=` are rejected rather than read as bare values.

use std::fmt;

/// Working bound for a single accumulated field. Bytes past this are
/// dropped; the builder applies the tighter per-field bounds afterwards.
pub const LINE_BUF_MAX: usize = 4096;

/// The classified content of one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    Blank,
    /// Everything after the `;`, verbatim. Never reaches the document.
    Comment(String),
    SectionHeader(String),
    Pair {
        key: String,
        value: String,
    },
    Malformed(MalformedReason),
}

/// Why a line failed to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    NonAscii,
    UnterminatedSection,
    TrailingAfterSection,
    EmptyKey,
    MissingEquals,
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MalformedReason::NonAscii => "non-ASCII byte",
            MalformedReason::UnterminatedSection => "section header is missing its closing ']'",
            MalformedReason::TrailingAfterSection => "unexpected text after section header",
            MalformedReason::EmptyKey => "empty key before '='",
            MalformedReason::MissingEquals => "expected 'key=value', found no '='",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Section,
    PostSection,
    Comment,
    Key,
    Value,
}

/// Whitespace skipped at the start of a line and allowed after `]`.
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | 0x0B | 0x0C | b'\r')
}

/// Bounded accumulator for the field currently being lexed.
#[derive(Default)]
struct FieldBuf {
    bytes: Vec<u8>,
}

impl FieldBuf {
    fn push(&mut self, b: u8) {
        if self.bytes.len() < LINE_BUF_MAX {
            self.bytes.push(b);
        }
    }

    fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Drain the buffer into a `String`. Only ASCII is ever pushed.
    fn take(&mut self) -> String {
        std::mem::take(&mut self.bytes)
            .into_iter()
            .map(char::from)
            .collect()
    }
}

/// Classify one line. `line` must not contain the `\n` terminator.
pub fn lex_line(line: &[u8]) -> Lexeme {
    let mut state = State::Start;
    let mut buf = FieldBuf::default();
    let mut key = String::new();

    if !line.is_ascii() {
        return Lexeme::Malformed(MalformedReason::NonAscii);
    }

    for &b in line {
        match state {
            State::Start => match b {
                b if is_space(b) => {}
                b'[' => state = State::Section,
                b';' => state = State::Comment,
                b'=' => return Lexeme::Malformed(MalformedReason::EmptyKey),
                other => {
                    buf.push(other);
                    state = State::Key;
                }
            },
            State::Section => {
                if b == b']' {
                    state = State::PostSection;
                } else {
                    buf.push(b);
                }
            }
            State::PostSection => {
                if !is_space(b) {
                    return Lexeme::Malformed(MalformedReason::TrailingAfterSection);
                }
            }
            State::Key => {
                if b == b'=' {
                    if buf.is_empty() {
                        return Lexeme::Malformed(MalformedReason::EmptyKey);
                    }
                    key = buf.take();
                    state = State::Value;
                } else {
                    buf.push(b);
                }
            }
            State::Value | State::Comment => buf.push(b),
        }
    }

    match state {
        State::Start => Lexeme::Blank,
        State::Comment => Lexeme::Comment(buf.take()),
        State::PostSection => Lexeme::SectionHeader(buf.take()),
        State::Value => Lexeme::Pair {
            key,
            value: buf.take(),
        },
        State::Section => Lexeme::Malformed(MalformedReason::UnterminatedSection),
        State::Key => Lexeme::Malformed(MalformedReason::MissingEquals),
    }
}
