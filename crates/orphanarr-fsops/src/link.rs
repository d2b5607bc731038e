//! Hard-link equivalence between two files.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{FsOpsError, FsOpsResult};
use crate::fs::{FileSystem, LocalFileSystem};
use crate::model::{FileStat, MediaFile};

/// Operand of a hard-link comparison: either a path that still needs a stat, or a stat that
/// was already captured.
#[derive(Debug, Clone, Copy)]
pub enum LinkTarget<'a> {
    /// Path to stat (symbolic links are followed).
    Path(&'a Path),
    /// Previously captured stat snapshot.
    Stat(FileStat),
}

impl<'a> From<&'a Path> for LinkTarget<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for LinkTarget<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Self::Path(path.as_path())
    }
}

impl From<FileStat> for LinkTarget<'_> {
    fn from(stat: FileStat) -> Self {
        Self::Stat(stat)
    }
}

impl From<&FileStat> for LinkTarget<'_> {
    fn from(stat: &FileStat) -> Self {
        Self::Stat(*stat)
    }
}

impl From<&MediaFile> for LinkTarget<'_> {
    fn from(file: &MediaFile) -> Self {
        Self::Stat(file.stat())
    }
}

/// Decides whether two operands are the same physical file.
#[derive(Debug, Clone, Default)]
pub struct HardLinkMatcher<F = LocalFileSystem> {
    fs: F,
}

impl HardLinkMatcher<LocalFileSystem> {
    /// Matcher over the host filesystem.
    #[must_use]
    pub const fn local() -> Self {
        Self::new(LocalFileSystem)
    }
}

impl<F> HardLinkMatcher<F>
where
    F: FileSystem,
{
    /// Matcher over an explicit filesystem capability.
    #[must_use]
    pub const fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Resolve an operand to a stat snapshot, statting only when given a path.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::Stat`] if the path cannot be stat'ed.
    pub async fn resolve(&self, target: LinkTarget<'_>) -> FsOpsResult<FileStat> {
        match target {
            LinkTarget::Stat(stat) => Ok(stat),
            LinkTarget::Path(path) => self
                .fs
                .stat(path)
                .await
                .map_err(|source| FsOpsError::stat(path, source)),
        }
    }

    /// Whether `left` and `right` share device and inode.
    ///
    /// Two distinct files with identical bytes are never linked, and a path is always linked
    /// with itself.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::Stat`] when either path operand cannot be stat'ed; a missing file
    /// is reported, never treated as "not linked".
    pub async fn is_hard_linked_with<'a, 'b>(
        &self,
        left: impl Into<LinkTarget<'a>> + Send,
        right: impl Into<LinkTarget<'b>> + Send,
    ) -> FsOpsResult<bool> {
        let left = self.resolve(left.into()).await?;
        let right = self.resolve(right.into()).await?;
        let linked = left.identity() == right.identity();
        trace!(
            left_inode = left.inode,
            right_inode = right.inode,
            linked,
            "hard link comparison"
        );
        Ok(linked)
    }
}
