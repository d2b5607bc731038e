//! Validation helpers and parsing utilities for environment values.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use orphanarr_telemetry::LogFormat;
use url::Url;

use crate::defaults::MAX_HTTP_TIMEOUT_SECS;
use crate::error::{ConfigError, ConfigResult};
use crate::model::ReportFormat;

/// Split a comma-separated value into trimmed, non-empty items.
pub(crate) fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

pub(crate) fn parse_categories(field: &'static str, raw: &str) -> ConfigResult<BTreeSet<String>> {
    let categories: BTreeSet<String> = parse_list(raw).into_iter().collect();
    if categories.is_empty() {
        return Err(ConfigError::invalid(field, raw, "empty_list"));
    }
    Ok(categories)
}

pub(crate) fn parse_library_paths(field: &'static str, raw: &str) -> ConfigResult<Vec<PathBuf>> {
    parse_list(raw)
        .into_iter()
        .map(|item| {
            let path = PathBuf::from(&item);
            if path.is_absolute() {
                Ok(path)
            } else {
                Err(ConfigError::invalid(field, &item, "must_be_absolute"))
            }
        })
        .collect()
}

pub(crate) fn parse_media_extensions(field: &'static str, raw: &str) -> ConfigResult<Vec<String>> {
    let extensions: Vec<String> = parse_list(raw)
        .into_iter()
        .map(|item| item.trim_start_matches('.').to_ascii_lowercase())
        .filter(|item| !item.is_empty())
        .collect();
    if extensions.is_empty() {
        return Err(ConfigError::invalid(field, raw, "empty_list"));
    }
    Ok(extensions)
}

pub(crate) fn parse_base_url(field: &'static str, raw: &str) -> ConfigResult<Url> {
    let url = Url::parse(raw.trim()).map_err(|_| ConfigError::invalid(field, raw, "invalid_url"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::invalid(field, raw, "unsupported_scheme")),
    }
}

pub(crate) fn parse_timeout(field: &'static str, raw: &str) -> ConfigResult<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::invalid(field, raw, "not_a_number"))?;
    if secs == 0 || secs > MAX_HTTP_TIMEOUT_SECS {
        return Err(ConfigError::invalid(field, raw, "out_of_range"));
    }
    Ok(Duration::from_secs(secs))
}

pub(crate) fn parse_log_format(field: &'static str, raw: &str) -> ConfigResult<LogFormat> {
    LogFormat::from_name(raw).ok_or_else(|| ConfigError::invalid(field, raw, "unknown_format"))
}

pub(crate) fn parse_report_format(field: &'static str, raw: &str) -> ConfigResult<ReportFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "log" => Ok(ReportFormat::Log),
        "json" => Ok(ReportFormat::Json),
        _ => Err(ConfigError::invalid(field, raw, "unknown_format")),
    }
}
