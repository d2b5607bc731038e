use std::io::{self, Write};
use std::sync::Arc;

use orphanarr_config::{AppConfig, ReportFormat};
use orphanarr_fsops::{LibraryIndex, MediaScanner};
use orphanarr_qbit::{QbitClient, QbitConnection};
use orphanarr_telemetry::{GlobalContextGuard, LoggingConfig};
use orphanarr_torrent_core::{TorrentCatalog, TorrentSource};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};
use crate::orchestrator::OrphanAnalysisOrchestrator;
use crate::report::OrphanReport;

/// Dependencies required to run the orphan finder.
pub(crate) struct BootstrapDependencies {
    config: AppConfig,
    source: Arc<dyn TorrentSource>,
}

impl BootstrapDependencies {
    /// Construct production dependencies from the environment for the binary entrypoint.
    pub(crate) fn from_env() -> AppResult<Self> {
        // A missing .env file is the normal case outside development.
        dotenvy::dotenv().ok();

        let config =
            AppConfig::from_env().map_err(|err| AppError::config("config.from_env", err))?;
        let settings = &config.qbittorrent;
        let client = QbitClient::new(QbitConnection {
            base_url: settings.base_url.clone(),
            username: settings.username.clone(),
            password: settings.password.clone(),
            timeout: settings.timeout,
        })
        .map_err(|err| AppError::qbit("qbit.new", err))?;

        Ok(Self {
            config,
            source: Arc::new(client),
        })
    }
}

/// Entry point for a single orphan analysis run.
///
/// # Errors
///
/// Returns an error if configuration, logging, the download client, or the analysis fails.
pub async fn run_app() -> AppResult<()> {
    let dependencies = BootstrapDependencies::from_env()?;
    run_app_with(dependencies).await
}

/// Run sequence that relies entirely on injected dependencies.
pub(crate) async fn run_app_with(dependencies: BootstrapDependencies) -> AppResult<()> {
    let BootstrapDependencies { config, source } = dependencies;

    let logging = LoggingConfig {
        level: &config.logging.level,
        format: config.logging.format,
        ..LoggingConfig::default()
    };
    orphanarr_telemetry::init_logging(&logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let _context = GlobalContextGuard::new("scan");

    info!("orphan analysis starting");
    let report = run_analysis(&config, source.as_ref()).await?;
    emit_report(&report, config.report_format)?;
    info!("orphan analysis finished");
    Ok(())
}

/// Fetch, filter and scan the torrents, then classify their media against the library.
///
/// The source session is closed whether or not the analysis succeeds; a failed logout is
/// logged and does not fail the run.
///
/// # Errors
///
/// Returns [`AppError::InvalidConfig`] when no library path is configured,
/// [`AppError::TorrentSource`] when the torrent list cannot be fetched, and
/// [`AppError::FsOps`] when a library root cannot be scanned. Per-torrent scan failures are
/// recorded in the report instead.
pub async fn run_analysis(
    config: &AppConfig,
    source: &dyn TorrentSource,
) -> AppResult<OrphanReport> {
    if config.library_paths.is_empty() {
        return Err(AppError::InvalidConfig {
            field: "LIBRARY_PATHS",
            reason: "required_for_analysis",
            value: None,
        });
    }

    source
        .connect()
        .await
        .map_err(|err| AppError::torrent_source("source.connect", err))?;
    let outcome = analyse(config, source).await;
    if let Err(err) = source.disconnect().await {
        warn!(error = %err, "torrent source disconnect failed");
    }
    outcome
}

async fn analyse(config: &AppConfig, source: &dyn TorrentSource) -> AppResult<OrphanReport> {
    let raw = source
        .list_torrents()
        .await
        .map_err(|err| AppError::torrent_source("source.list_torrents", err))?;
    let catalog = TorrentCatalog::parse(raw);
    info!(torrents = catalog.len(), "torrent list fetched");

    let orchestrator =
        OrphanAnalysisOrchestrator::new(MediaScanner::local(config.media_extensions()));
    let criteria = config.filter_criteria();
    let scans = orchestrator
        .scan_media_torrents(catalog.records(), Some(&criteria))
        .await;

    let library = LibraryIndex::build(orchestrator.scanner(), &config.library_paths)
        .await
        .map_err(|err| AppError::fsops("library.build", err))?;

    Ok(OrphanReport::classify(scans, &library))
}

fn emit_report(report: &OrphanReport, format: ReportFormat) -> AppResult<()> {
    match format {
        ReportFormat::Log => {
            report.log();
            Ok(())
        }
        ReportFormat::Json => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, report).map_err(|source| {
                AppError::Report {
                    operation: "report.json",
                    source,
                }
            })?;
            writeln!(stdout).map_err(|source| AppError::Io {
                operation: "report.stdout",
                source,
            })
        }
    }
}
