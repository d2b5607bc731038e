//! Pairs filtered torrents with the media files found under their content paths.
//!
//! # Design
//! - Scans for different torrents run concurrently on the current task and share nothing.
//! - Output order always follows the filtered input order, regardless of completion order.

use futures_util::future::join_all;
use orphanarr_fsops::{
    FileSystem, FsOpsError, FsOpsResult, LocalFileSystem, MediaFile, MediaScanner,
};
use orphanarr_torrent_core::{FilterCriteria, TorrentCatalog, TorrentRecord};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// A torrent together with the media files beneath its content path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaTorrent {
    /// Torrent the files belong to.
    pub torrent: TorrentRecord,
    /// Media files in scan order; empty when the payload holds no media.
    pub media_files: Vec<MediaFile>,
}

/// Per-torrent scan outcome used when one failing torrent must not hide the others.
#[derive(Debug)]
pub struct TorrentScan {
    /// Torrent that was scanned.
    pub torrent: TorrentRecord,
    /// Media files, or the scan failure.
    pub result: FsOpsResult<Vec<MediaFile>>,
}

impl TorrentScan {
    /// Convert into a [`MediaTorrent`], dropping failed scans.
    #[must_use]
    pub fn into_media_torrent(self) -> Option<MediaTorrent> {
        let media_files = self.result.ok()?;
        Some(MediaTorrent {
            torrent: self.torrent,
            media_files,
        })
    }
}

/// Builds [`MediaTorrent`]s from torrent records.
#[derive(Debug, Clone)]
pub struct OrphanAnalysisOrchestrator<F = LocalFileSystem> {
    scanner: MediaScanner<F>,
}

impl<F> OrphanAnalysisOrchestrator<F>
where
    F: FileSystem,
{
    /// Orchestrator scanning with `scanner`.
    #[must_use]
    pub const fn new(scanner: MediaScanner<F>) -> Self {
        Self { scanner }
    }

    /// Scanner used for every torrent.
    #[must_use]
    pub const fn scanner(&self) -> &MediaScanner<F> {
        &self.scanner
    }

    /// Filter `records`, then scan every surviving torrent.
    ///
    /// `None` criteria keep every record.
    ///
    /// # Errors
    ///
    /// Every scan runs to completion; the error returned is the one belonging to the earliest
    /// failing torrent in input order, and no partial result is returned.
    #[instrument(name = "orchestrator.build_media_torrents", skip_all, fields(records = records.len()))]
    pub async fn build_media_torrents(
        &self,
        records: &[TorrentRecord],
        criteria: Option<&FilterCriteria>,
    ) -> FsOpsResult<Vec<MediaTorrent>> {
        let selected = select(records, criteria);
        let scans = selected.into_iter().map(|torrent| async move {
            let media_files = self
                .scanner
                .collect_media_files(&torrent.content_path)
                .await?;
            Ok::<_, FsOpsError>(MediaTorrent {
                torrent,
                media_files,
            })
        });
        let media = join_all(scans)
            .await
            .into_iter()
            .collect::<FsOpsResult<Vec<_>>>()?;
        info!(torrents = media.len(), "media torrents built");
        Ok(media)
    }

    /// Filter `records`, then scan every surviving torrent, reporting each outcome separately.
    #[instrument(name = "orchestrator.scan_media_torrents", skip_all, fields(records = records.len()))]
    pub async fn scan_media_torrents(
        &self,
        records: &[TorrentRecord],
        criteria: Option<&FilterCriteria>,
    ) -> Vec<TorrentScan> {
        let selected = select(records, criteria);
        let scans = selected.into_iter().map(|torrent| async move {
            let result = self.scanner.collect_media_files(&torrent.content_path).await;
            if let Err(err) = &result {
                warn!(
                    torrent = %torrent.name,
                    path = %err.path().display(),
                    error = %err,
                    "torrent scan failed"
                );
            }
            TorrentScan { torrent, result }
        });
        let outcomes = join_all(scans).await;
        let failed = outcomes.iter().filter(|scan| scan.result.is_err()).count();
        info!(torrents = outcomes.len(), failed, "torrent scans finished");
        outcomes
    }
}

fn select(records: &[TorrentRecord], criteria: Option<&FilterCriteria>) -> Vec<TorrentRecord> {
    let selected = criteria.map_or_else(
        || records.to_vec(),
        |criteria| TorrentCatalog::from_records(records.to_vec()).find_matching(criteria),
    );
    debug!(
        total = records.len(),
        selected = selected.len(),
        "torrents selected for scanning"
    );
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use orphanarr_fsops::MediaExtensions;
    use orphanarr_test_support::fixtures::{FixtureTree, seed_and_organize};
    use orphanarr_test_support::torrents::{PROTECTED_TAG, torrent_list_under};

    fn orchestrator() -> OrphanAnalysisOrchestrator {
        OrphanAnalysisOrchestrator::new(MediaScanner::local(MediaExtensions::default()))
    }

    fn record(name: &str, path: std::path::PathBuf) -> TorrentRecord {
        TorrentRecord {
            name: name.to_string(),
            category: "Movies".to_string(),
            tags: std::collections::BTreeSet::new(),
            content_path: path,
            hash: format!("{name}-hash"),
        }
    }

    #[tokio::test]
    async fn builds_media_torrents_in_filtered_order() -> Result<()> {
        let tree = seed_and_organize()?;
        let catalog = TorrentCatalog::from_json(&torrent_list_under(tree.root())?)?;
        let criteria = FilterCriteria::default()
            .with_categories(["Movies", "Series"])
            .excluding_tags([PROTECTED_TAG]);

        let media = orchestrator()
            .build_media_torrents(catalog.records(), Some(&criteria))
            .await?;

        let names: Vec<&str> = media.iter().map(|m| m.torrent.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "MovieWithLinks",
                "MovieWithLinksInAFolder",
                "MovieWithoutLinksButUnwatchExtension",
                "MoviesNestedInFolders",
                "MovieWithLinksButPreviouslyTaggedToDelete",
                "SeriesWithoutLinksToDelete",
            ]
        );
        let counts: Vec<usize> = media.iter().map(|m| m.media_files.len()).collect();
        assert_eq!(counts, vec![1, 1, 0, 3, 1, 2]);
        Ok(())
    }

    #[tokio::test]
    async fn no_criteria_keeps_every_record() -> Result<()> {
        let tree = seed_and_organize()?;
        let catalog = TorrentCatalog::from_json(&torrent_list_under(tree.root())?)?;

        let media = orchestrator()
            .build_media_torrents(catalog.records(), None)
            .await?;

        assert_eq!(media.len(), catalog.len());
        Ok(())
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() -> Result<()> {
        let media = orchestrator().build_media_torrents(&[], None).await?;
        assert!(media.is_empty());
        assert!(orchestrator().scan_media_torrents(&[], None).await.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn one_missing_path_fails_the_batch() -> Result<()> {
        let tree = FixtureTree::new()?;
        let present = tree.file("present/Movie.mkv")?;
        let records = vec![
            record("Present", present),
            record("Missing", tree.join("missing")),
        ];

        let result = orchestrator().build_media_torrents(&records, None).await;

        assert!(matches!(result, Err(FsOpsError::InvalidPath { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn batch_error_belongs_to_earliest_failing_torrent() -> Result<()> {
        let tree = FixtureTree::new()?;
        let present = tree.file("present/Movie.mkv")?;
        let first_missing = tree.join("missing-first");
        let records = vec![
            record("Present", present),
            record("MissingFirst", first_missing.clone()),
            record("MissingSecond", tree.join("missing-second")),
        ];

        for _ in 0..8 {
            let err = orchestrator()
                .build_media_torrents(&records, None)
                .await
                .err()
                .ok_or_else(|| anyhow::anyhow!("expected a scan failure"))?;
            assert_eq!(err.path(), first_missing.as_path());
        }
        Ok(())
    }

    #[tokio::test]
    async fn partial_mode_keeps_successful_scans() -> Result<()> {
        let tree = FixtureTree::new()?;
        let present = tree.file("present/Movie.mkv")?;
        let records = vec![
            record("Missing", tree.join("missing")),
            record("Present", present),
        ];

        let scans = orchestrator().scan_media_torrents(&records, None).await;

        assert_eq!(scans.len(), 2);
        assert_eq!(scans[0].torrent.name, "Missing");
        assert!(scans[0].result.is_err());
        assert_eq!(scans[1].torrent.name, "Present");
        let media: Vec<MediaTorrent> = scans
            .into_iter()
            .filter_map(TorrentScan::into_media_torrent)
            .collect();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].media_files.len(), 1);
        Ok(())
    }
}
