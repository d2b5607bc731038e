//! Media discovery below a torrent content path.

use std::path::{Path, PathBuf};

use tracing::{debug, instrument, trace};

use crate::error::{FsOpsError, FsOpsResult};
use crate::fs::{FileSystem, LocalFileSystem};
use crate::model::{FileKind, MediaExtensions, MediaFile};

/// Recursively collects media files, visiting directory entries in byte order of their names.
#[derive(Debug, Clone)]
pub struct MediaScanner<F = LocalFileSystem> {
    fs: F,
    extensions: MediaExtensions,
}

impl MediaScanner<LocalFileSystem> {
    /// Scanner over the host filesystem.
    #[must_use]
    pub const fn local(extensions: MediaExtensions) -> Self {
        Self::new(LocalFileSystem, extensions)
    }
}

impl<F> MediaScanner<F>
where
    F: FileSystem,
{
    /// Scanner over an explicit filesystem capability.
    #[must_use]
    pub const fn new(fs: F, extensions: MediaExtensions) -> Self {
        Self { fs, extensions }
    }

    /// Extensions classified as media.
    #[must_use]
    pub const fn extensions(&self) -> &MediaExtensions {
        &self.extensions
    }

    /// Filesystem capability backing the scanner.
    #[must_use]
    pub const fn file_system(&self) -> &F {
        &self.fs
    }

    /// Collect every media file at or below `root`, depth-first in sorted name order.
    ///
    /// A regular file root yields itself when its extension is allowed and nothing otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::InvalidPath`] when `root` cannot be stat'ed and
    /// [`FsOpsError::Scan`] when any entry below it cannot be listed or stat'ed. A failing
    /// entry aborts the whole scan.
    #[instrument(name = "media_scanner.collect", skip_all, fields(root = %root.display()))]
    pub async fn collect_media_files(&self, root: &Path) -> FsOpsResult<Vec<MediaFile>> {
        let stat = self
            .fs
            .stat(root)
            .await
            .map_err(|source| FsOpsError::invalid_path(root, source))?;

        let mut media = Vec::new();
        match stat.kind {
            FileKind::Regular => {
                if self.extensions.matches(root) {
                    media.push(MediaFile::from_stat(root, &stat));
                }
            }
            FileKind::Directory => self.walk(root, &mut media).await?,
            FileKind::Symlink | FileKind::Other => {
                debug!(kind = ?stat.kind, "scan root is neither a file nor a directory");
            }
        }

        debug!(count = media.len(), "media scan finished");
        Ok(media)
    }

    async fn walk(&self, root: &Path, media: &mut Vec<MediaFile>) -> FsOpsResult<()> {
        let mut pending = self.sorted_children(root).await?;

        while let Some(path) = pending.pop() {
            let stat = self
                .fs
                .symlink_stat(&path)
                .await
                .map_err(|source| FsOpsError::scan("scanner.stat", &path, source))?;

            match stat.kind {
                FileKind::Directory => {
                    pending.extend(self.sorted_children(&path).await?);
                }
                FileKind::Regular => {
                    if self.extensions.matches(&path) {
                        trace!(path = %path.display(), "media file");
                        media.push(MediaFile::from_stat(path, &stat));
                    }
                }
                FileKind::Symlink | FileKind::Other => {
                    trace!(path = %path.display(), kind = ?stat.kind, "skipping entry");
                }
            }
        }

        Ok(())
    }

    /// Children of `dir` in reverse sorted order, ready to be popped from a stack.
    async fn sorted_children(&self, dir: &Path) -> FsOpsResult<Vec<PathBuf>> {
        let mut names = self
            .fs
            .read_dir_names(dir)
            .await
            .map_err(|source| FsOpsError::scan("scanner.read_dir", dir, source))?;
        names.sort_unstable_by(|left, right| right.cmp(left));
        Ok(names.into_iter().map(|name| dir.join(name)).collect())
    }
}
