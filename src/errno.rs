//! Classification of the OS errors a path lookup can produce.
//!
//! A fixed table from [`ErrnoTag`] to a short human message and, on Unix,
//! the `libc` errno value. Used by [`preflight`](crate::preflight) to tell
//! "this path is missing or unusable" apart from unexpected failures, and
//! by [`ParseError::errno`](crate::ParseError::errno) to describe I/O
//! failures.

use std::fmt;
use std::io;

/// The errno values that mean a path cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrnoTag {
    AccessDenied,
    SymlinkLoop,
    NameTooLong,
    NotFound,
    NotADirectory,
    ReadOnlyFilesystem,
    BadAddress,
    InvalidArgument,
    Io,
    OutOfMemory,
    TextFileBusy,
}

impl ErrnoTag {
    pub const ALL: [ErrnoTag; 11] = [
        ErrnoTag::AccessDenied,
        ErrnoTag::SymlinkLoop,
        ErrnoTag::NameTooLong,
        ErrnoTag::NotFound,
        ErrnoTag::NotADirectory,
        ErrnoTag::ReadOnlyFilesystem,
        ErrnoTag::BadAddress,
        ErrnoTag::InvalidArgument,
        ErrnoTag::Io,
        ErrnoTag::OutOfMemory,
        ErrnoTag::TextFileBusy,
    ];

    /// The raw `errno` value for this tag.
    #[cfg(unix)]
    pub fn code(self) -> i32 {
        match self {
            ErrnoTag::AccessDenied => libc::EACCES,
            ErrnoTag::SymlinkLoop => libc::ELOOP,
            ErrnoTag::NameTooLong => libc::ENAMETOOLONG,
            ErrnoTag::NotFound => libc::ENOENT,
            ErrnoTag::NotADirectory => libc::ENOTDIR,
            ErrnoTag::ReadOnlyFilesystem => libc::EROFS,
            ErrnoTag::BadAddress => libc::EFAULT,
            ErrnoTag::InvalidArgument => libc::EINVAL,
            ErrnoTag::Io => libc::EIO,
            ErrnoTag::OutOfMemory => libc::ENOMEM,
            ErrnoTag::TextFileBusy => libc::ETXTBSY,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ErrnoTag::AccessDenied => "Access denied",
            ErrnoTag::SymlinkLoop => "Too many symbolic links",
            ErrnoTag::NameTooLong => "Name too long",
            ErrnoTag::NotFound => "Does not exist or dangling symlink",
            ErrnoTag::NotADirectory => "Directory component is not a directory",
            ErrnoTag::ReadOnlyFilesystem => "Cannot write to read-only file system",
            ErrnoTag::BadAddress => "Address space access denied",
            ErrnoTag::InvalidArgument => "Mode incorrectly specified",
            ErrnoTag::Io => "I/O error",
            ErrnoTag::OutOfMemory => "Insufficient kernel memory",
            ErrnoTag::TextFileBusy => "Cannot write to executable file being executed",
        }
    }

    /// Reverse lookup from a raw `errno`. Codes outside the table give `None`.
    #[cfg(unix)]
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.code() == code)
    }

    /// Classify an I/O error.
    ///
    /// On Unix the raw OS code is looked up in the table. Everywhere else,
    /// and for errors that did not come from the OS, the error kind decides
    /// for the few kinds that have a direct counterpart.
    pub fn from_io_error(err: &io::Error) -> Option<Self> {
        #[cfg(unix)]
        if let Some(code) = err.raw_os_error() {
            return Self::from_code(code);
        }
        match err.kind() {
            io::ErrorKind::NotFound => Some(ErrnoTag::NotFound),
            io::ErrorKind::PermissionDenied => Some(ErrnoTag::AccessDenied),
            io::ErrorKind::InvalidInput => Some(ErrnoTag::InvalidArgument),
            io::ErrorKind::OutOfMemory => Some(ErrnoTag::OutOfMemory),
            _ => None,
        }
    }
}

impl fmt::Display for ErrnoTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
