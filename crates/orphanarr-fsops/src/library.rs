//! Identity index over the organised media library.
//!
//! # Design
//! - Built once per run from a full media scan of every library root.
//! - Lookups are by [`FileIdentity`], which makes `contains` equivalent to running the hard-link
//!   matcher against every library file without the per-pair stat.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::FsOpsResult;
use crate::fs::FileSystem;
use crate::model::{FileIdentity, MediaFile};
use crate::scanner::MediaScanner;

/// Library media files keyed by device and inode.
#[derive(Debug, Clone, Default)]
pub struct LibraryIndex {
    roots: Vec<PathBuf>,
    by_identity: HashMap<FileIdentity, Vec<PathBuf>>,
    files: usize,
}

impl LibraryIndex {
    /// Scan every root and index the media files found.
    ///
    /// # Errors
    ///
    /// Propagates the first scan failure; a missing library root is reported as
    /// [`crate::FsOpsError::InvalidPath`].
    pub async fn build<F, P>(scanner: &MediaScanner<F>, roots: &[P]) -> FsOpsResult<Self>
    where
        F: FileSystem,
        P: AsRef<Path> + Sync,
    {
        let mut index = Self::default();
        for root in roots {
            let root = root.as_ref();
            let files = scanner.collect_media_files(root).await?;
            debug!(root = %root.display(), files = files.len(), "indexed library root");
            index.roots.push(root.to_path_buf());
            for file in &files {
                index.insert(file);
            }
        }
        info!(
            roots = index.roots.len(),
            files = index.files,
            "library index built"
        );
        Ok(index)
    }

    /// Record a library file.
    pub fn insert(&mut self, file: &MediaFile) {
        let paths = self.by_identity.entry(file.identity()).or_default();
        if !paths.contains(&file.path) {
            paths.push(file.path.clone());
            self.files += 1;
        }
    }

    /// Whether some library file other than `file` itself shares its identity.
    #[must_use]
    pub fn contains(&self, file: &MediaFile) -> bool {
        self.linked_paths(file).next().is_some()
    }

    /// Library paths hard-linked with `file`, excluding `file`'s own path.
    pub fn linked_paths<'a>(&'a self, file: &'a MediaFile) -> impl Iterator<Item = &'a Path> {
        self.by_identity
            .get(&file.identity())
            .into_iter()
            .flatten()
            .filter(move |path| **path != file.path)
            .map(PathBuf::as_path)
    }

    /// Number of indexed library files.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.files
    }

    /// Whether the index holds no files.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.files == 0
    }

    /// Roots that were scanned.
    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }
}
