use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use orphanarr_app::{AppError, OrphanReport, TorrentStatus, run_analysis};
use orphanarr_config::AppConfig;
use orphanarr_config::defaults::{
    ENV_LIBRARY_PATHS, ENV_QBIT_BASE_URL, ENV_QBIT_PASSWORD, ENV_QBIT_USERNAME,
    ENV_TORRENT_CATEGORIES,
};
use orphanarr_test_support::fixtures::{
    FixtureTree, LIBRARY_MOVIES_DIR, LIBRARY_SERIES_DIR, seed_and_organize,
};
use orphanarr_test_support::torrents::torrent_list_under;
use orphanarr_torrent_core::{RawTorrent, StaticTorrentSource, TorrentSource};

fn config_for(library_paths: &str) -> Result<AppConfig> {
    let values: HashMap<&str, String> = HashMap::from([
        (ENV_QBIT_BASE_URL, "http://127.0.0.1:8080".to_string()),
        (ENV_QBIT_USERNAME, "admin".to_string()),
        (ENV_QBIT_PASSWORD, "adminadmin".to_string()),
        (ENV_TORRENT_CATEGORIES, "Movies,Series".to_string()),
        (ENV_LIBRARY_PATHS, library_paths.to_string()),
    ]);
    Ok(AppConfig::from_lookup(|name| values.get(name).cloned())?)
}

fn library_paths(tree: &FixtureTree) -> String {
    format!(
        "{},{}",
        tree.join(LIBRARY_MOVIES_DIR).display(),
        tree.join(LIBRARY_SERIES_DIR).display()
    )
}

fn fixture_source(tree: &FixtureTree) -> Result<StaticTorrentSource> {
    let torrents: Vec<RawTorrent> = serde_json::from_str(&torrent_list_under(tree.root())?)?;
    Ok(StaticTorrentSource::new(torrents))
}

fn status_of(report: &OrphanReport, name: &str) -> Option<TorrentStatus> {
    report
        .torrents
        .iter()
        .find(|torrent| torrent.name == name)
        .map(|torrent| torrent.status)
}

#[derive(Default)]
struct RecordingSource {
    inner: Option<StaticTorrentSource>,
    connects: AtomicUsize,
    disconnects: AtomicUsize,
}

#[async_trait]
impl TorrentSource for RecordingSource {
    async fn connect(&self) -> Result<()> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_torrents(&self) -> Result<Vec<RawTorrent>> {
        match &self.inner {
            Some(source) => source.list_torrents().await,
            None => Err(anyhow!("webui unavailable")),
        }
    }

    async fn disconnect(&self) -> Result<()> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        Err(anyhow!("logout rejected"))
    }
}

#[tokio::test]
async fn seeded_downloads_are_classified_against_the_library() -> Result<()> {
    let tree = seed_and_organize()?;
    let config = config_for(&library_paths(&tree))?;
    let source = fixture_source(&tree)?;

    let report = run_analysis(&config, &source).await?;

    let names: Vec<&str> = report.torrents.iter().map(|t| t.name.as_str()).collect();
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
    assert_eq!(status_of(&report, "MovieWithLinks"), Some(TorrentStatus::Linked));
    assert_eq!(
        status_of(&report, "MovieWithLinksInAFolder"),
        Some(TorrentStatus::Linked)
    );
    assert_eq!(
        status_of(&report, "MovieWithoutLinksButUnwatchExtension"),
        Some(TorrentStatus::NoMedia)
    );
    assert_eq!(
        status_of(&report, "MoviesNestedInFolders"),
        Some(TorrentStatus::Orphaned)
    );
    assert_eq!(
        status_of(&report, "MovieWithLinksButPreviouslyTaggedToDelete"),
        Some(TorrentStatus::Linked)
    );
    assert_eq!(
        status_of(&report, "SeriesWithoutLinksToDelete"),
        Some(TorrentStatus::Orphaned)
    );

    assert_eq!(report.library_files, 11);
    assert_eq!(report.summary.torrents, 6);
    assert_eq!(report.summary.orphaned, 2);
    assert_eq!(report.summary.scan_failed, 0);
    let nested = report
        .torrents
        .iter()
        .find(|torrent| torrent.name == "MoviesNestedInFolders")
        .ok_or_else(|| anyhow!("nested torrent missing"))?;
    assert_eq!(nested.orphaned.len(), 3);
    Ok(())
}

#[tokio::test]
async fn missing_content_path_is_reported_not_fatal() -> Result<()> {
    let tree = seed_and_organize()?;
    std::fs::remove_file(tree.join("completed/movies/MovieWithLinks.mkv"))?;
    let config = config_for(&library_paths(&tree))?;
    let source = fixture_source(&tree)?;

    let report = run_analysis(&config, &source).await?;

    assert_eq!(
        status_of(&report, "MovieWithLinks"),
        Some(TorrentStatus::ScanFailed)
    );
    assert_eq!(report.summary.scan_failed, 1);
    assert_eq!(report.summary.torrents, 6);
    Ok(())
}

#[tokio::test]
async fn missing_library_root_fails_the_run() -> Result<()> {
    let tree = seed_and_organize()?;
    let missing = tree.join("media/does-not-exist");
    let config = config_for(&missing.display().to_string())?;
    let source = fixture_source(&tree)?;

    let result = run_analysis(&config, &source).await;

    assert!(matches!(result, Err(AppError::FsOps { .. })));
    Ok(())
}

#[tokio::test]
async fn source_is_disconnected_when_listing_fails() -> Result<()> {
    let tree = seed_and_organize()?;
    let config = config_for(&library_paths(&tree))?;
    let source = RecordingSource::default();

    let result = run_analysis(&config, &source).await;

    assert!(matches!(
        result,
        Err(AppError::TorrentSource {
            operation: "source.list_torrents",
            ..
        })
    ));
    assert_eq!(source.connects.load(Ordering::SeqCst), 1);
    assert_eq!(source.disconnects.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn failed_disconnect_does_not_fail_the_run() -> Result<()> {
    let tree = seed_and_organize()?;
    let config = config_for(&library_paths(&tree))?;
    let source = RecordingSource {
        inner: Some(fixture_source(&tree)?),
        ..RecordingSource::default()
    };

    let report = run_analysis(&config, &source).await?;

    assert_eq!(report.summary.torrents, 6);
    assert_eq!(source.disconnects.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn empty_library_paths_are_rejected_before_connecting() -> Result<()> {
    let tree = seed_and_organize()?;
    let values: HashMap<&str, &str> = HashMap::from([
        (ENV_QBIT_BASE_URL, "http://127.0.0.1:8080"),
        (ENV_QBIT_USERNAME, "admin"),
        (ENV_QBIT_PASSWORD, "adminadmin"),
        (ENV_TORRENT_CATEGORIES, "Movies,Series"),
    ]);
    let config = AppConfig::from_lookup(|name| values.get(name).map(|v| (*v).to_string()))?;
    let source = RecordingSource {
        inner: Some(fixture_source(&tree)?),
        ..RecordingSource::default()
    };

    let result = run_analysis(&config, &source).await;

    assert!(matches!(
        result,
        Err(AppError::InvalidConfig {
            field: "LIBRARY_PATHS",
            ..
        })
    ));
    assert_eq!(source.connects.load(Ordering::SeqCst), 0);
    Ok(())
}
