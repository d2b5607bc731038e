//! On-disk fixture trees for filesystem tests.
//!
//! # Design
//! - Every tree lives in its own temporary directory and is removed on drop.
//! - Files receive content derived from their relative path so two fixture files never share
//!   bytes unless a test writes identical content on purpose.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Torrent content directory for movies, relative to the tree root.
pub const TORRENT_MOVIES_DIR: &str = "completed/movies";
/// Torrent content directory for series, relative to the tree root.
pub const TORRENT_SERIES_DIR: &str = "completed/series";
/// Organised movie library, relative to the tree root.
pub const LIBRARY_MOVIES_DIR: &str = "media/movies";
/// Organised series library, relative to the tree root.
pub const LIBRARY_SERIES_DIR: &str = "media/series";

/// Temporary directory tree with helpers for files, directories, and hard links.
#[derive(Debug)]
pub struct FixtureTree {
    dir: TempDir,
}

impl FixtureTree {
    /// Create an empty tree under the system temporary directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix("orphanarr-").tempdir()?;
        Ok(Self { dir })
    }

    /// Root of the tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Resolve a path relative to the tree root.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Create a directory (and its parents).
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn mkdir(&self, relative: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = self.join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Write a file whose content is derived from its relative path.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or file cannot be written.
    pub fn file(&self, relative: impl AsRef<Path>) -> io::Result<PathBuf> {
        let relative = relative.as_ref();
        let content = relative.to_string_lossy().into_owned();
        self.file_with(relative, content.as_bytes())
    }

    /// Write a file with explicit content.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory or file cannot be written.
    pub fn file_with(&self, relative: impl AsRef<Path>, content: &[u8]) -> io::Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// Hard link `link` to the existing `target`, creating parent directories of the link.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the link fails.
    pub fn hard_link(
        &self,
        target: impl AsRef<Path>,
        link: impl AsRef<Path>,
    ) -> io::Result<PathBuf> {
        let target = self.join(target);
        let link = self.join(link);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::hard_link(&target, &link)?;
        Ok(link)
    }

    /// Create a symbolic link at `link` pointing to `target` (both relative to the root).
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    #[cfg(unix)]
    pub fn symlink(&self, target: impl AsRef<Path>, link: impl AsRef<Path>) -> io::Result<PathBuf> {
        let target = self.join(target);
        let link = self.join(link);
        if let Some(parent) = link.parent() {
            fs::create_dir_all(parent)?;
        }
        std::os::unix::fs::symlink(&target, &link)?;
        Ok(link)
    }
}

/// Build the seed-and-organize layout: torrent payloads under `completed/` and the organised
/// library under `media/`, hard-linked where the media manager imported a file.
///
/// # Errors
///
/// Returns an error if any file, directory, or link cannot be created.
pub fn seed_and_organize() -> io::Result<FixtureTree> {
    let tree = FixtureTree::new()?;

    for relative in [
        "completed/movies/MovieWithLinks.mkv",
        "completed/movies/MovieWithLinksInAFolder/Movie.mkv",
        "completed/movies/MovieWithoutLinksButUnwatchExtension.iso",
        "completed/movies/MoviesNestedInFolders/MovieAtRoot1.mkv",
        "completed/movies/MoviesNestedInFolders/MovieAtRoot2.mkv",
        "completed/movies/MoviesNestedInFolders/Nested/MovieInNestedFolder.mkv",
        "completed/movies/MovieWithoutLinksButProtected.mkv",
        "completed/movies/MovieWithLinksButPreviouslyTaggedToDelete.mkv",
        "completed/Uncategorized.mkv",
        "completed/other/MovieFromUnwatchedCategory.mkv",
        "completed/series/SeriesWithoutLinksToDelete/Season 01/Episode 01.mkv",
        "completed/series/SeriesWithoutLinksToDelete/Season 01/Episode 02.mkv",
        "media/movies/MovieWithoutHardLink.mkv",
    ] {
        tree.file(relative)?;
    }

    for (target, link) in [
        (
            "completed/movies/MovieWithLinks.mkv",
            "media/movies/MovieWithLinks/Movie.Link1.mkv",
        ),
        (
            "completed/movies/MovieWithLinks.mkv",
            "media/movies/MovieWithLinks/Movie.Link2.mkv",
        ),
        (
            "completed/movies/MovieWithLinksInAFolder/Movie.mkv",
            "media/movies/MovieWithLinksInAFolder/Movie.Link1.mkv",
        ),
        (
            "completed/movies/MovieWithoutLinksButUnwatchExtension.iso",
            "media/movies/MovieWithoutLinksButUnwatchExtension/Movie.Link1.iso",
        ),
        (
            "completed/movies/MovieWithLinksButPreviouslyTaggedToDelete.mkv",
            "media/movies/MovieWithLinksButPreviouslyTaggedToDelete/Movie.mkv",
        ),
    ] {
        tree.hard_link(target, link)?;
    }

    for season in ["Season 01", "Season 02"] {
        for episode in ["Episode 01", "Episode 02", "Episode 03"] {
            let target = format!("completed/series/SeriesWithLinks/{season}/{episode}.mkv");
            tree.file(&target)?;
            tree.hard_link(
                &target,
                format!("media/series/SeriesWithLinks/{season}/{episode}.Link1.mkv"),
            )?;
        }
    }

    Ok(tree)
}
