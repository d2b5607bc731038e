//! Typed configuration models.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use orphanarr_fsops::MediaExtensions;
use orphanarr_telemetry::LogFormat;
use orphanarr_torrent_core::FilterCriteria;
use url::Url;

/// Fully validated runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Download client connection settings.
    pub qbittorrent: QbitSettings,
    /// Torrent selection settings.
    pub torrents: TorrentSelection,
    /// Library roots whose files count as hard-link partners.
    pub library_paths: Vec<PathBuf>,
    /// Extensions (lower-case, without dot) classified as media.
    pub media_extensions: Vec<String>,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// How the final report is emitted.
    pub report_format: ReportFormat,
}

impl AppConfig {
    /// Filter that keeps configured categories and drops protected torrents.
    #[must_use]
    pub fn filter_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            include_categories: Some(self.torrents.categories.clone()),
            exclude_tags: Some(BTreeSet::from([self.torrents.protected_tag.clone()])),
        }
    }

    /// Media allow-list used by every scan.
    #[must_use]
    pub fn media_extensions(&self) -> MediaExtensions {
        MediaExtensions::new(&self.media_extensions)
    }
}

/// qBittorrent WebUI settings.
#[derive(Clone)]
pub struct QbitSettings {
    /// WebUI base URL.
    pub base_url: Url,
    /// Login user.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for QbitSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QbitSettings")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Which torrents take part in the analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TorrentSelection {
    /// Categories to analyse; never empty.
    pub categories: BTreeSet<String>,
    /// Tag that exempts a torrent.
    pub protected_tag: String,
}

/// Logging settings handed to the telemetry crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Level or `EnvFilter` directive.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

/// Output channel for the orphan report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Summarise through the tracing subscriber.
    #[default]
    Log,
    /// Print the full report as JSON on stdout.
    Json,
}
