//! # Design
//!
//! - Centralize application-level errors for bootstrap and analysis.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use std::error::Error as StdError;
use std::io;

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: orphanarr_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: orphanarr_telemetry::TelemetryError,
    },
    /// Download client construction failed.
    #[error("download client operation failed")]
    Qbit {
        /// Operation identifier.
        operation: &'static str,
        /// Source client error.
        source: orphanarr_qbit::QbitError,
    },
    /// The torrent source could not be reached or queried.
    #[error("torrent source operation failed")]
    TorrentSource {
        /// Operation identifier.
        operation: &'static str,
        /// Source error reported by the adapter.
        source: Box<dyn StdError + Send + Sync>,
    },
    /// Filesystem analysis failed.
    #[error("filesystem analysis failed")]
    FsOps {
        /// Operation identifier.
        operation: &'static str,
        /// Source fsops error.
        source: orphanarr_fsops::FsOpsError,
    },
    /// Rendering the report failed.
    #[error("report rendering failed")]
    Report {
        /// Operation identifier.
        operation: &'static str,
        /// Source serialisation error.
        source: serde_json::Error,
    },
    /// Writing the report failed.
    #[error("io operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Source IO error.
        source: io::Error,
    },
    /// Configuration values were unusable for this run.
    #[error("invalid configuration")]
    InvalidConfig {
        /// Field name that failed validation.
        field: &'static str,
        /// Machine-readable reason for the failure.
        reason: &'static str,
        /// Optional value associated with the failure.
        value: Option<String>,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: orphanarr_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: orphanarr_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn qbit(operation: &'static str, source: orphanarr_qbit::QbitError) -> Self {
        Self::Qbit { operation, source }
    }

    pub(crate) fn torrent_source(operation: &'static str, source: anyhow::Error) -> Self {
        Self::TorrentSource {
            operation,
            source: source.into(),
        }
    }

    pub(crate) const fn fsops(
        operation: &'static str,
        source: orphanarr_fsops::FsOpsError,
    ) -> Self {
        Self::FsOps { operation, source }
    }
}
