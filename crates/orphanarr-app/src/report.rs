//! Orphan classification of scanned torrents against the library index.

use std::error::Error as _;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use orphanarr_fsops::{FsOpsError, LibraryIndex};
use orphanarr_torrent_core::TorrentRecord;
use serde::Serialize;
use tracing::{info, warn};

use crate::orchestrator::{MediaTorrent, TorrentScan};

/// Link state of a torrent's media relative to the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TorrentStatus {
    /// Every media file has a library partner.
    Linked,
    /// Some, but not all, media files have a library partner.
    Partial,
    /// No media file has a library partner.
    Orphaned,
    /// The payload holds no media files.
    NoMedia,
    /// The content path could not be scanned.
    ScanFailed,
}

/// Classification of a single torrent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TorrentReport {
    /// Torrent display name.
    pub name: String,
    /// Info hash.
    pub hash: String,
    /// Category.
    pub category: String,
    /// Content path that was scanned.
    pub content_path: PathBuf,
    /// Overall status.
    pub status: TorrentStatus,
    /// Media files with at least one library partner.
    pub linked: Vec<PathBuf>,
    /// Media files without a library partner.
    pub orphaned: Vec<PathBuf>,
    /// Total size of the orphaned files.
    pub orphaned_bytes: u64,
    /// Scan failure, when the status is [`TorrentStatus::ScanFailed`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Torrents classified.
    pub torrents: usize,
    /// Fully linked torrents.
    pub linked: usize,
    /// Partially linked torrents.
    pub partial: usize,
    /// Orphaned torrents.
    pub orphaned: usize,
    /// Torrents without media.
    pub no_media: usize,
    /// Torrents whose scan failed.
    pub scan_failed: usize,
    /// Bytes held by orphaned media files across all torrents.
    pub orphaned_bytes: u64,
}

/// Result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct OrphanReport {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Number of library files the torrents were compared against.
    pub library_files: usize,
    /// Aggregated counts.
    pub summary: ReportSummary,
    /// Per-torrent classification in input order.
    pub torrents: Vec<TorrentReport>,
}

impl OrphanReport {
    /// Classify scan outcomes, keeping failed scans as [`TorrentStatus::ScanFailed`].
    #[must_use]
    pub fn classify(scans: Vec<TorrentScan>, library: &LibraryIndex) -> Self {
        let torrents = scans
            .into_iter()
            .map(|scan| match scan.result {
                Ok(media_files) => classify_torrent(
                    MediaTorrent {
                        torrent: scan.torrent,
                        media_files,
                    },
                    library,
                ),
                Err(err) => failed_torrent(scan.torrent, &err),
            })
            .collect();
        Self::from_torrents(torrents, library)
    }

    /// Classify fully scanned torrents.
    #[must_use]
    pub fn classify_media(media: Vec<MediaTorrent>, library: &LibraryIndex) -> Self {
        let torrents = media
            .into_iter()
            .map(|torrent| classify_torrent(torrent, library))
            .collect();
        Self::from_torrents(torrents, library)
    }

    fn from_torrents(torrents: Vec<TorrentReport>, library: &LibraryIndex) -> Self {
        let mut summary = ReportSummary {
            torrents: torrents.len(),
            ..ReportSummary::default()
        };
        for torrent in &torrents {
            summary.orphaned_bytes += torrent.orphaned_bytes;
            match torrent.status {
                TorrentStatus::Linked => summary.linked += 1,
                TorrentStatus::Partial => summary.partial += 1,
                TorrentStatus::Orphaned => summary.orphaned += 1,
                TorrentStatus::NoMedia => summary.no_media += 1,
                TorrentStatus::ScanFailed => summary.scan_failed += 1,
            }
        }
        Self {
            generated_at: Utc::now(),
            library_files: library.len(),
            summary,
            torrents,
        }
    }

    /// Torrents with at least one orphaned media file.
    pub fn with_orphans(&self) -> impl Iterator<Item = &TorrentReport> {
        self.torrents.iter().filter(|torrent| {
            matches!(
                torrent.status,
                TorrentStatus::Orphaned | TorrentStatus::Partial
            )
        })
    }

    /// Emit the summary and one event per torrent needing attention.
    pub fn log(&self) {
        for torrent in &self.torrents {
            match torrent.status {
                TorrentStatus::Orphaned | TorrentStatus::Partial => info!(
                    torrent = %torrent.name,
                    hash = %torrent.hash,
                    status = ?torrent.status,
                    orphaned_files = torrent.orphaned.len(),
                    orphaned_bytes = torrent.orphaned_bytes,
                    "orphaned media"
                ),
                TorrentStatus::ScanFailed => warn!(
                    torrent = %torrent.name,
                    error = torrent.error.as_deref().unwrap_or_default(),
                    "torrent not analysed"
                ),
                TorrentStatus::Linked | TorrentStatus::NoMedia => {}
            }
        }
        let summary = &self.summary;
        info!(
            torrents = summary.torrents,
            linked = summary.linked,
            partial = summary.partial,
            orphaned = summary.orphaned,
            no_media = summary.no_media,
            scan_failed = summary.scan_failed,
            orphaned_bytes = summary.orphaned_bytes,
            library_files = self.library_files,
            "orphan report"
        );
    }
}

fn classify_torrent(media: MediaTorrent, library: &LibraryIndex) -> TorrentReport {
    let mut linked = Vec::new();
    let mut orphaned = Vec::new();
    let mut orphaned_bytes = 0;
    for file in &media.media_files {
        if library.contains(file) {
            linked.push(file.path.clone());
        } else {
            orphaned_bytes += file.size_bytes;
            orphaned.push(file.path.clone());
        }
    }

    let status = match (linked.is_empty(), orphaned.is_empty()) {
        (true, true) => TorrentStatus::NoMedia,
        (false, true) => TorrentStatus::Linked,
        (true, false) => TorrentStatus::Orphaned,
        (false, false) => TorrentStatus::Partial,
    };

    let torrent = media.torrent;
    TorrentReport {
        name: torrent.name,
        hash: torrent.hash,
        category: torrent.category,
        content_path: torrent.content_path,
        status,
        linked,
        orphaned,
        orphaned_bytes,
        error: None,
    }
}

fn failed_torrent(torrent: TorrentRecord, err: &FsOpsError) -> TorrentReport {
    let mut message = format!("{err}: {}", err.path().display());
    if let Some(source) = err.source() {
        message.push_str(": ");
        message.push_str(&source.to_string());
    }
    TorrentReport {
        name: torrent.name,
        hash: torrent.hash,
        category: torrent.category,
        content_path: torrent.content_path,
        status: TorrentStatus::ScanFailed,
        linked: Vec::new(),
        orphaned: Vec::new(),
        orphaned_bytes: 0,
        error: Some(message),
    }
}
