#![forbid(unsafe_code)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unused, dead_code, unreachable_pub)]

//! Shared test helpers used across integration suites.
//! Layout: fixtures.rs (on-disk trees with hard links), torrents.rs (download client payloads).

pub mod fixtures;
pub mod torrents;
