#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
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

//! Orphanarr application wiring.
//!
//! Layout: `bootstrap.rs` (environment and run sequence), `orchestrator.rs` (torrent scanning),
//! `report.rs` (orphan classification).

/// Run sequence and environment loading.
pub mod bootstrap;
/// Application error types.
pub mod error;
/// Torrent-to-media orchestration.
pub mod orchestrator;
/// Orphan classification and report output.
pub mod report;

pub use bootstrap::{run_analysis, run_app};
pub use error::{AppError, AppResult};
pub use orchestrator::{MediaTorrent, OrphanAnalysisOrchestrator, TorrentScan};
pub use report::{OrphanReport, ReportSummary, TorrentReport, TorrentStatus};
