//! Filesystem capability consumed by the scanner, matcher, and library index.
//!
//! # Design
//! - Only stat and directory listing are exposed; nothing here can write.
//! - Callers hold the capability explicitly so tests can substitute an in-memory tree.

use std::ffi::OsString;
use std::fs::Metadata;
use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;

use crate::model::{FileKind, FileStat};

/// Read-only filesystem primitives.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Stat `path`, following symbolic links.
    async fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Stat `path` without following a trailing symbolic link.
    async fn symlink_stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Names of the immediate children of the directory at `path`, in unspecified order.
    async fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>>;
}

#[async_trait]
impl<T> FileSystem for Arc<T>
where
    T: FileSystem + ?Sized,
{
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        (**self).stat(path).await
    }

    async fn symlink_stat(&self, path: &Path) -> io::Result<FileStat> {
        (**self).symlink_stat(path).await
    }

    async fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        (**self).read_dir_names(path).await
    }
}

/// Host filesystem accessed through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(file_stat(&metadata))
    }

    async fn symlink_stat(&self, path: &Path) -> io::Result<FileStat> {
        let metadata = tokio::fs::symlink_metadata(path).await?;
        Ok(file_stat(&metadata))
    }

    async fn read_dir_names(&self, path: &Path) -> io::Result<Vec<OsString>> {
        let mut entries = tokio::fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name());
        }
        Ok(names)
    }
}

fn file_kind(metadata: &Metadata) -> FileKind {
    let file_type = metadata.file_type();
    if file_type.is_file() {
        FileKind::Regular
    } else if file_type.is_dir() {
        FileKind::Directory
    } else if file_type.is_symlink() {
        FileKind::Symlink
    } else {
        FileKind::Other
    }
}

/// Convert host metadata into a stat snapshot.
#[cfg(unix)]
#[must_use]
pub fn file_stat(metadata: &Metadata) -> FileStat {
    use std::os::unix::fs::MetadataExt;

    FileStat {
        device_id: metadata.dev(),
        inode: metadata.ino(),
        size_bytes: metadata.len(),
        kind: file_kind(metadata),
    }
}

/// Convert host metadata into a stat snapshot.
///
/// Device and inode numbers are not exposed on this platform and are reported as zero, so
/// hard-link detection is not meaningful here.
#[cfg(not(unix))]
#[must_use]
pub fn file_stat(metadata: &Metadata) -> FileStat {
    FileStat {
        device_id: 0,
        inode: 0,
        size_bytes: metadata.len(),
        kind: file_kind(metadata),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use orphanarr_test_support::fixtures::FixtureTree;

    #[tokio::test]
    async fn local_stat_reports_kinds_and_sizes() -> Result<()> {
        let tree = FixtureTree::new()?;
        let file = tree.file_with("movies/Movie.mkv", b"0123456789")?;
        let dir = tree.join("movies");

        let file_stat = LocalFileSystem.stat(&file).await?;
        assert_eq!(file_stat.kind, FileKind::Regular);
        assert_eq!(file_stat.size_bytes, 10);

        let dir_stat = LocalFileSystem.stat(&dir).await?;
        assert!(dir_stat.is_dir());
        Ok(())
    }

    #[tokio::test]
    async fn read_dir_names_lists_immediate_children() -> Result<()> {
        let tree = FixtureTree::new()?;
        tree.file("movies/b.mkv")?;
        tree.file("movies/a.mkv")?;
        tree.file("movies/nested/c.mkv")?;

        let mut names = LocalFileSystem
            .read_dir_names(&tree.join("movies"))
            .await?;
        names.sort();
        assert_eq!(names, vec!["a.mkv", "b.mkv", "nested"]);
        Ok(())
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlink_stat_does_not_follow_links() -> Result<()> {
        let tree = FixtureTree::new()?;
        tree.file("movies/Movie.mkv")?;
        let link = tree.symlink("movies/Movie.mkv", "links/Movie.mkv")?;

        assert_eq!(
            LocalFileSystem.symlink_stat(&link).await?.kind,
            FileKind::Symlink
        );
        assert_eq!(LocalFileSystem.stat(&link).await?.kind, FileKind::Regular);
        Ok(())
    }

    #[tokio::test]
    async fn arc_wrapper_delegates() -> Result<()> {
        let tree = FixtureTree::new()?;
        let file = tree.file("Movie.mkv")?;
        let shared: Arc<dyn FileSystem> = Arc::new(LocalFileSystem);
        assert!(shared.stat(&file).await?.is_regular_file());
        Ok(())
    }
}
