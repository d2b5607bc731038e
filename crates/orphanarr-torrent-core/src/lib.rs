//! Download-client agnostic torrent records, catalog filtering, and source seams.
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

pub mod catalog;
pub mod error;
pub mod model;
pub mod service;

pub use catalog::TorrentCatalog;
pub use error::{TorrentError, TorrentResult};
pub use model::{FilterCriteria, RawTorrent, TorrentRecord, parse_tags};
pub use service::{StaticTorrentSource, TorrentSource};
