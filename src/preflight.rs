//! Toolchain prerequisite checks run before a build configuration is read.
//!
//! Each [`Requirement`] names an executable or a directory, the platforms it
//! applies to, and the hint shown when it is missing. Requirements for other
//! platforms are skipped.
//!
//! Executables given as a bare name are searched on `PATH`; names containing
//! a `/` are checked as-is. A lookup that fails with one of the errno values
//! in [`ErrnoTag`] counts as "not there"; any other failure is reported as
//! unexpected.

use std::ffi::OsString;
use std::ops::BitOr;
use std::path::{Path, PathBuf};

use crate::errno::ErrnoTag;
use crate::error::PreflightError;

/// Bit set of host platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Platforms(u32);

impl Platforms {
    pub const NONE: Platforms = Platforms(0);
    pub const LINUX: Platforms = Platforms(1 << 0);
    pub const DARWIN: Platforms = Platforms(1 << 1);
    pub const FREEBSD: Platforms = Platforms(1 << 2);
    pub const OPENBSD: Platforms = Platforms(1 << 3);
    pub const NETBSD: Platforms = Platforms(1 << 4);
    pub const ALL_BSDS: Platforms = Platforms(Self::FREEBSD.0 | Self::OPENBSD.0 | Self::NETBSD.0);

    /// The platform this binary was built for, or `NONE` for hosts outside
    /// the set.
    pub fn current() -> Platforms {
        if cfg!(target_os = "linux") {
            Self::LINUX
        } else if cfg!(target_os = "macos") {
            Self::DARWIN
        } else if cfg!(target_os = "freebsd") {
            Self::FREEBSD
        } else if cfg!(target_os = "openbsd") {
            Self::OPENBSD
        } else if cfg!(target_os = "netbsd") {
            Self::NETBSD
        } else {
            Self::NONE
        }
    }

    pub fn intersects(self, other: Platforms) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for Platforms {
    type Output = Platforms;

    fn bitor(self, rhs: Platforms) -> Platforms {
        Platforms(self.0 | rhs.0)
    }
}

/// Something that must exist on the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Requirement {
    Executable {
        name: String,
        platforms: Platforms,
        hint: String,
    },
    Directory {
        path: PathBuf,
        platforms: Platforms,
        hint: String,
    },
}

impl Requirement {
    pub fn platforms(&self) -> Platforms {
        match self {
            Requirement::Executable { platforms, .. }
            | Requirement::Directory { platforms, .. } => *platforms,
        }
    }

    /// Check against the running host and the process `PATH`.
    pub fn check(&self) -> Result<(), PreflightError> {
        self.check_on(Platforms::current(), std::env::var_os("PATH"))
    }

    /// Check as if running on `host` with the given `PATH` value.
    pub fn check_on(
        &self,
        host: Platforms,
        path_var: Option<OsString>,
    ) -> Result<(), PreflightError> {
        if !self.platforms().intersects(host) {
            tracing::trace!(requirement = ?self, "requirement not applicable on this host");
            return Ok(());
        }
        match self {
            Requirement::Executable { name, hint, .. } => find_executable(name, path_var, hint),
            Requirement::Directory { path, hint, .. } => check_directory(path, hint),
        }
    }
}

/// Run every requirement, stopping at the first failure.
pub fn check_all(requirements: &[Requirement]) -> Result<(), PreflightError> {
    for requirement in requirements {
        requirement.check()?;
    }
    tracing::debug!(count = requirements.len(), "preflight passed");
    Ok(())
}

const DARWIN_ELF_AS_HINT: &str = "ELF-bearing GNU as was not found on your system. \
     Run 'brew install x86_64-elf-binutils' to fix this.";

/// The assembler the build configuration depends on.
pub fn elf_assembler() -> Vec<Requirement> {
    vec![
        Requirement::Directory {
            path: "/usr/local/opt/x86_64-elf-binutils/bin".into(),
            platforms: Platforms::DARWIN,
            hint: DARWIN_ELF_AS_HINT.into(),
        },
        Requirement::Executable {
            name: "/usr/local/opt/x86_64-elf-binutils/bin/x86_64-elf-as".into(),
            platforms: Platforms::DARWIN,
            hint: DARWIN_ELF_AS_HINT.into(),
        },
        Requirement::Executable {
            name: "as".into(),
            platforms: Platforms::LINUX | Platforms::ALL_BSDS,
            hint: "GNU as was not found on your system. Install binutils to fix this.".into(),
        },
    ]
}

/// `Ok(None)` when the path exists, `Ok(Some(tag))` when it is unusable
/// for a known reason.
fn classify_path(path: &Path) -> Result<Option<ErrnoTag>, PreflightError> {
    match std::fs::metadata(path) {
        Ok(_) => Ok(None),
        Err(e) => match ErrnoTag::from_io_error(&e) {
            Some(tag) => Ok(Some(tag)),
            None => Err(PreflightError::Unexpected {
                path: path.to_path_buf(),
                source: e,
            }),
        },
    }
}

fn find_executable(
    name: &str,
    path_var: Option<OsString>,
    hint: &str,
) -> Result<(), PreflightError> {
    let missing = |path: PathBuf, reason| PreflightError::Missing {
        path,
        reason,
        hint: hint.to_string(),
    };

    if name.contains('/') {
        let path = PathBuf::from(name);
        return match classify_path(&path)? {
            None => Ok(()),
            Some(reason) => Err(missing(path, reason)),
        };
    }

    let dirs: Vec<PathBuf> = path_var
        .map(|v| std::env::split_paths(&v).collect())
        .unwrap_or_default();
    for dir in dirs {
        let candidate = dir.join(name);
        if classify_path(&candidate)?.is_none() {
            tracing::debug!(path = %candidate.display(), "found executable");
            return Ok(());
        }
    }
    Err(missing(PathBuf::from(name), ErrnoTag::NotFound))
}

fn check_directory(path: &Path, hint: &str) -> Result<(), PreflightError> {
    match std::fs::read_dir(path) {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(PreflightError::Missing {
            path: path.to_path_buf(),
            reason: ErrnoTag::NotFound,
            hint: hint.to_string(),
        }),
        Err(e) => Err(PreflightError::Unexpected {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
