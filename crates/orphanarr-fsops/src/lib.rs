//! Read-only filesystem analysis: media discovery, hard-link equivalence, and library indexing.
#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::multiple_crate_versions)]

pub mod error;
pub mod fs;
pub mod library;
pub mod link;
pub mod model;
pub mod scanner;

pub use error::{FsOpsError, FsOpsResult};
pub use fs::{FileSystem, LocalFileSystem, file_stat};
pub use library::LibraryIndex;
pub use link::{HardLinkMatcher, LinkTarget};
pub use model::{
    DEFAULT_MEDIA_EXTENSIONS, FileIdentity, FileKind, FileStat, MediaExtensions, MediaFile,
};
pub use scanner::MediaScanner;
