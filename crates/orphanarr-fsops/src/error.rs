//! # Design
//!
//! - Provide structured, constant-message errors for media scans and link checks.
//! - Capture operation context (paths, operations) to make failures reproducible in tests.
//! - Preserve source errors without interpolating context into error messages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for filesystem analysis.
pub type FsOpsResult<T> = Result<T, FsOpsError>;

/// Errors produced while inspecting the filesystem.
#[derive(Debug, Error)]
pub enum FsOpsError {
    /// Scan root does not exist or cannot be stat'ed.
    #[error("fsops invalid path")]
    InvalidPath {
        /// Root path handed to the scanner.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// IO failure while enumerating below a validated root.
    #[error("fsops scan failure")]
    Scan {
        /// Operation that triggered the failure.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
    /// A hard-link operand could not be stat'ed.
    #[error("fsops stat failure")]
    Stat {
        /// Path that could not be stat'ed.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl FsOpsError {
    pub(crate) fn invalid_path(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::InvalidPath {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn scan(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: io::Error,
    ) -> Self {
        Self::Scan {
            operation,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn stat(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Stat {
            path: path.into(),
            source,
        }
    }

    /// Path the failure relates to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::InvalidPath { path, .. } | Self::Scan { path, .. } | Self::Stat { path, .. } => {
                path
            }
        }
    }
}
