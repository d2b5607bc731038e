//! Download client payload fixtures.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

/// qBittorrent `/api/v2/torrents/info` response with content paths relative to a fixture root.
pub const TORRENT_LIST_JSON: &str = include_str!("../data/torrent-list.json");

/// Number of torrents in [`TORRENT_LIST_JSON`].
pub const TORRENT_COUNT: usize = 10;

/// Tag carried by torrents that must never be reported.
pub const PROTECTED_TAG: &str = "orphanarr.protected";

/// Rewrite every `content_path` in [`TORRENT_LIST_JSON`] to live under `root`.
///
/// # Errors
///
/// Returns an error if the fixture is not a JSON array of objects.
pub fn torrent_list_under(root: &Path) -> Result<String> {
    let mut torrents: Value =
        serde_json::from_str(TORRENT_LIST_JSON).context("torrent fixture is not valid JSON")?;
    let entries = torrents
        .as_array_mut()
        .ok_or_else(|| anyhow!("torrent fixture must be an array"))?;
    for entry in entries {
        let relative = entry
            .get("content_path")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("torrent fixture entry missing content_path"))?;
        let absolute = root.join(relative).to_string_lossy().into_owned();
        entry["content_path"] = Value::String(absolute);
    }
    serde_json::to_string(&torrents).context("failed to serialise torrent fixture")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_contains_expected_torrents() -> Result<()> {
        let parsed: Vec<Value> = serde_json::from_str(TORRENT_LIST_JSON)?;
        assert_eq!(parsed.len(), TORRENT_COUNT);
        Ok(())
    }

    #[test]
    fn content_paths_are_rebased() -> Result<()> {
        let rebased = torrent_list_under(Path::new("/srv/downloads"))?;
        let parsed: Vec<Value> = serde_json::from_str(&rebased)?;
        assert!(parsed.iter().all(|entry| {
            entry["content_path"]
                .as_str()
                .is_some_and(|path| path.starts_with("/srv/downloads/completed/"))
        }));
        Ok(())
    }
}
