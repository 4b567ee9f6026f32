//! Error taxonomy for scanning and exporting.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// An ignore pattern that failed to compile.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid ignore pattern {pattern:?}: {reason}")]
pub struct InvalidPattern {
    pub pattern: String,
    pub reason: String,
}

#[derive(Error, Debug)]
pub enum WalkError {
    #[error("{}: No such file or directory", .0.display())]
    NotFound(PathBuf),

    #[error("{}: Permission denied", .0.display())]
    PermissionDenied(PathBuf),

    #[error("{}: Not a directory", .0.display())]
    NotADirectory(PathBuf),

    /// The cancellation token fired before the walk completed.
    #[error("scan cancelled")]
    Cancelled,

    /// A malformed ignore pattern. Reported as a diagnostic, never returned by a walk.
    #[error(transparent)]
    InvalidPattern(#[from] InvalidPattern),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    /// Classify an I/O failure on `path` into the taxonomy.
    pub fn from_io(path: impl Into<PathBuf>, err: io::Error) -> Self {
        let path = path.into();
        match err.kind() {
            io::ErrorKind::NotFound => Self::NotFound(path),
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source: err },
        }
    }

    /// Whether this outcome is a user-initiated abort rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::NotADirectory(p)
            | Self::Io { path: p, .. } => Some(p),
            Self::Cancelled | Self::InvalidPattern(_) => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("no entries to export")]
    Empty,

    /// A recognized format this build cannot produce.
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to write export")]
    Io(#[from] io::Error),

    #[error("failed to serialize entries")]
    Json(#[from] serde_json::Error),
}
