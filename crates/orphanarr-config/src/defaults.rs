//! Environment variable names and default values.
//!
//! # Design
//! - Keep every variable name in one place so the loader and its tests agree.
//! - Defaults mirror what an unconfigured deployment should do: watch every category and
//!   protect torrents carrying the default tag.

/// qBittorrent WebUI base URL.
pub const ENV_QBIT_BASE_URL: &str = "QBITTORRENT_BASE_URL";
/// qBittorrent WebUI user name.
pub const ENV_QBIT_USERNAME: &str = "QBITTORRENT_USERNAME";
/// qBittorrent WebUI password.
pub const ENV_QBIT_PASSWORD: &str = "QBITTORRENT_PASSWORD";
/// Comma-separated categories to analyse.
pub const ENV_TORRENT_CATEGORIES: &str = "TORRENT_CATEGORIES";
/// Tag that exempts a torrent from analysis.
pub const ENV_TORRENT_TAG_PROTECTED: &str = "TORRENT_TAG_PROTECTED";
/// Comma-separated library roots.
pub const ENV_LIBRARY_PATHS: &str = "LIBRARY_PATHS";
/// Comma-separated media extensions.
pub const ENV_MEDIA_EXTENSIONS: &str = "MEDIA_EXTENSIONS";
/// HTTP timeout in whole seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "ORPHANARR_HTTP_TIMEOUT_SECS";
/// Log level or filter directive.
pub const ENV_LOG_LEVEL: &str = "ORPHANARR_LOG_LEVEL";
/// Log output format.
pub const ENV_LOG_FORMAT: &str = "ORPHANARR_LOG_FORMAT";
/// Report output format.
pub const ENV_REPORT_FORMAT: &str = "ORPHANARR_REPORT_FORMAT";

/// Tag applied to torrents that must never be reported.
pub const DEFAULT_PROTECTED_TAG: &str = "orphanarr.protected";
/// HTTP timeout when none is configured.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
/// Upper bound accepted for the HTTP timeout.
pub(crate) const MAX_HTTP_TIMEOUT_SECS: u64 = 600;
