//! Environment-driven configuration loading.
//!
//! # Design
//! - Values are read through a lookup closure so callers (and tests) never have to mutate the
//!   process environment.
//! - Blank values are treated as unset.

use std::env;
use std::time::Duration;

use orphanarr_fsops::DEFAULT_MEDIA_EXTENSIONS;
use orphanarr_telemetry::{DEFAULT_LOG_LEVEL, LogFormat};
use tracing::debug;

use crate::defaults::{
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_PROTECTED_TAG, ENV_HTTP_TIMEOUT_SECS, ENV_LIBRARY_PATHS,
    ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_MEDIA_EXTENSIONS, ENV_QBIT_BASE_URL, ENV_QBIT_PASSWORD,
    ENV_QBIT_USERNAME, ENV_REPORT_FORMAT, ENV_TORRENT_CATEGORIES, ENV_TORRENT_TAG_PROTECTED,
};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppConfig, LoggingSettings, QbitSettings, ReportFormat, TorrentSelection};
use crate::validate::{
    parse_base_url, parse_categories, parse_library_paths, parse_log_format,
    parse_media_extensions, parse_report_format, parse_timeout,
};

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_lookup`].
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when a required variable is unset or blank and
    /// [`ConfigError::InvalidField`] when a value fails validation.
    pub fn from_lookup<L>(lookup: L) -> ConfigResult<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let source = Lookup(lookup);

        let base_url = parse_base_url(ENV_QBIT_BASE_URL, &source.required(ENV_QBIT_BASE_URL)?)?;
        let username = source.required(ENV_QBIT_USERNAME)?;
        let password = source.required(ENV_QBIT_PASSWORD)?;
        let timeout = source
            .optional(ENV_HTTP_TIMEOUT_SECS)
            .map_or(Ok(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS)), |raw| {
                parse_timeout(ENV_HTTP_TIMEOUT_SECS, &raw)
            })?;

        let categories = parse_categories(
            ENV_TORRENT_CATEGORIES,
            &source.required(ENV_TORRENT_CATEGORIES)?,
        )?;
        let protected_tag = source
            .optional(ENV_TORRENT_TAG_PROTECTED)
            .map_or_else(|| DEFAULT_PROTECTED_TAG.to_string(), |tag| tag.trim().to_string());

        let library_paths = source
            .optional(ENV_LIBRARY_PATHS)
            .map_or(Ok(Vec::new()), |raw| {
                parse_library_paths(ENV_LIBRARY_PATHS, &raw)
            })?;
        let media_extensions = source.optional(ENV_MEDIA_EXTENSIONS).map_or_else(
            || {
                Ok(DEFAULT_MEDIA_EXTENSIONS
                    .iter()
                    .map(|ext| (*ext).to_string())
                    .collect())
            },
            |raw| parse_media_extensions(ENV_MEDIA_EXTENSIONS, &raw),
        )?;

        let level = source
            .optional(ENV_LOG_LEVEL)
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
        let format = source
            .optional(ENV_LOG_FORMAT)
            .map_or(Ok(LogFormat::infer()), |raw| {
                parse_log_format(ENV_LOG_FORMAT, &raw)
            })?;
        let report_format = source
            .optional(ENV_REPORT_FORMAT)
            .map_or(Ok(ReportFormat::default()), |raw| {
                parse_report_format(ENV_REPORT_FORMAT, &raw)
            })?;

        let config = Self {
            qbittorrent: QbitSettings {
                base_url,
                username,
                password,
                timeout,
            },
            torrents: TorrentSelection {
                categories,
                protected_tag,
            },
            library_paths,
            media_extensions,
            logging: LoggingSettings { level, format },
            report_format,
        };
        debug!(
            base_url = %config.qbittorrent.base_url,
            libraries = config.library_paths.len(),
            "configuration loaded"
        );
        Ok(config)
    }
}

struct Lookup<L>(L);

impl<L> Lookup<L>
where
    L: Fn(&str) -> Option<String>,
{
    fn optional(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &'static str) -> ConfigResult<String> {
        self.optional(name).ok_or(ConfigError::MissingEnv { name })
    }
}
