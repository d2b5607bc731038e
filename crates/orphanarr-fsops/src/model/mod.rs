//! Domain models for filesystem analysis.
//!
//! # Design
//! - Keep stat snapshots small and copyable; they carry no IO handles.
//! - `(device_id, inode)` is the only identity used to decide "same physical file".

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Container formats recognised as media when no explicit allow-list is configured.
pub const DEFAULT_MEDIA_EXTENSIONS: &[&str] = &["mkv", "mp4", "avi", "m4v"];

/// Kind of filesystem entry reported by a stat call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Regular file.
    Regular,
    /// Directory.
    Directory,
    /// Symbolic link (only reported when links are not followed).
    Symlink,
    /// Sockets, devices, FIFOs.
    Other,
}

/// Metadata snapshot captured by a single stat call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// Identifier of the filesystem the entry lives on.
    pub device_id: u64,
    /// Inode number, unique per device.
    pub inode: u64,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Entry kind.
    pub kind: FileKind,
}

impl FileStat {
    /// Identity key of the underlying physical file.
    #[must_use]
    pub const fn identity(&self) -> FileIdentity {
        FileIdentity {
            device_id: self.device_id,
            inode: self.inode,
        }
    }

    /// Whether the platform's regular-file bit is set.
    #[must_use]
    pub const fn is_regular_file(&self) -> bool {
        matches!(self.kind, FileKind::Regular)
    }

    /// Whether the entry is a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        matches!(self.kind, FileKind::Directory)
    }
}

/// Device and inode pair identifying one physical file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileIdentity {
    /// Identifier of the filesystem the file lives on.
    pub device_id: u64,
    /// Inode number, unique per device.
    pub inode: u64,
}

/// Regular media file discovered by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Identifier of the filesystem the file lives on.
    pub device_id: u64,
    /// Inode number, unique per device.
    pub inode: u64,
    /// Size in bytes at scan time.
    pub size_bytes: u64,
    /// Always `true` for scanner output.
    pub is_regular_file: bool,
}

impl MediaFile {
    pub(crate) fn from_stat(path: impl Into<PathBuf>, stat: &FileStat) -> Self {
        Self {
            path: path.into(),
            device_id: stat.device_id,
            inode: stat.inode,
            size_bytes: stat.size_bytes,
            is_regular_file: stat.is_regular_file(),
        }
    }

    /// Identity key of the underlying physical file.
    #[must_use]
    pub const fn identity(&self) -> FileIdentity {
        FileIdentity {
            device_id: self.device_id,
            inode: self.inode,
        }
    }

    /// Stat snapshot equivalent to the one captured during the scan.
    #[must_use]
    pub const fn stat(&self) -> FileStat {
        FileStat {
            device_id: self.device_id,
            inode: self.inode,
            size_bytes: self.size_bytes,
            kind: if self.is_regular_file {
                FileKind::Regular
            } else {
                FileKind::Other
            },
        }
    }

    /// Final path component, when it is valid UTF-8.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|name| name.to_str())
    }
}

/// Case-insensitive allow-list of media file extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaExtensions {
    extensions: BTreeSet<String>,
}

impl MediaExtensions {
    /// Build an allow-list; entries are trimmed, lower-cased, and stripped of a leading dot.
    /// Empty entries are ignored.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .filter_map(|entry| {
                let trimmed = entry.as_ref().trim().trim_start_matches('.');
                (!trimmed.is_empty()).then(|| trimmed.to_ascii_lowercase())
            })
            .collect();
        Self { extensions }
    }

    /// Whether `path` carries one of the allowed extensions.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_ascii_lowercase()))
    }

    /// Whether the allow-list is empty (nothing is media).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Iterate the normalised extensions in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for MediaExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_MEDIA_EXTENSIONS)
    }
}
