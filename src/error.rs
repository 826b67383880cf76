use std::path::PathBuf;

use thiserror::Error;

use crate::errno::ErrnoTag;
use crate::lexer::MalformedReason;

/// Why the loaded bytes were rejected before lexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingIssue {
    /// A byte above 0x7F.
    NonAscii(u8),
    /// A NUL byte before the end of the buffer.
    EmbeddedNul,
}

impl std::fmt::Display for EncodingIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingIssue::NonAscii(b) => write!(f, "non-ASCII byte 0x{b:02X}"),
            EncodingIssue::EmbeddedNul => f.write_str("embedded NUL byte"),
        }
    }
}

/// Failure of a single parse. The first failure aborts the whole parse; no
/// partial document is ever returned.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid encoding at byte {offset}: {issue}")]
    Encoding {
        offset: usize,
        issue: EncodingIssue,
    },

    #[error("Syntax error on line {line}: {reason}")]
    Syntax {
        line: usize,
        reason: MalformedReason,
    },

    #[error("Out of memory while building the document")]
    OutOfMemory,

    #[error("Internal error: {0}")]
    Internal(&'static str),
}

impl ParseError {
    /// Errno classification of an [`Io`](ParseError::Io) failure.
    pub fn errno(&self) -> Option<ErrnoTag> {
        match self {
            ParseError::Io { source, .. } => ErrnoTag::from_io_error(source),
            _ => None,
        }
    }
}

impl From<std::collections::TryReserveError> for ParseError {
    fn from(_: std::collections::TryReserveError) -> Self {
        ParseError::OutOfMemory
    }
}

/// A toolchain prerequisite that is not satisfied on this host.
#[derive(Debug, Error)]
pub enum PreflightError {
    #[error("{hint} ({path}: {reason})")]
    Missing {
        path: PathBuf,
        reason: ErrnoTag,
        hint: String,
    },

    #[error("Unexpected error checking {path}: {source}")]
    Unexpected {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything the command-line front end can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Preflight(#[from] PreflightError),

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),

    #[error("Failed to render document: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Section not found: {0}")]
    SectionNotFound(String),
}
