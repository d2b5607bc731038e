//! qBittorrent WebUI adapter providing the torrent list to the orphan analysis.
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

pub mod client;
pub mod error;

pub use client::{QbitClient, QbitConnection};
pub use error::{QbitError, QbitResult};
