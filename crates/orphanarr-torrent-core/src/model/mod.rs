//! Torrent records as delivered by the download client and as consumed by the analysis.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Torrent entry as reported by the download client.
///
/// Field names follow the qBittorrent `/api/v2/torrents/info` payload; unknown fields are ignored
/// and missing ones default to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTorrent {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Category; empty when uncategorised.
    #[serde(default)]
    pub category: String,
    /// Comma-separated tag list.
    #[serde(default)]
    pub tags: String,
    /// File or directory holding the torrent payload.
    #[serde(default)]
    pub content_path: String,
    /// Info hash.
    #[serde(default)]
    pub hash: String,
}

/// Normalised torrent record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TorrentRecord {
    /// Display name.
    pub name: String,
    /// Category; empty when uncategorised.
    pub category: String,
    /// Trimmed, non-empty, de-duplicated tags. Membership is exact and case-sensitive.
    pub tags: BTreeSet<String>,
    /// File or directory holding the torrent payload.
    pub content_path: PathBuf,
    /// Info hash.
    pub hash: String,
}

impl TorrentRecord {
    /// Normalise a raw entry.
    #[must_use]
    pub fn from_raw(raw: RawTorrent) -> Self {
        Self {
            tags: parse_tags(&raw.tags),
            name: raw.name,
            category: raw.category,
            content_path: PathBuf::from(raw.content_path),
            hash: raw.hash,
        }
    }

    /// Whether the record carries `tag` exactly.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

impl From<RawTorrent> for TorrentRecord {
    fn from(raw: RawTorrent) -> Self {
        Self::from_raw(raw)
    }
}

/// Split a comma-separated tag string, trimming whitespace and dropping empty pieces.
#[must_use]
pub fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Conjunctive category/tag filter.
///
/// `None` disables a condition; `Some` of an empty category set therefore matches nothing while
/// `Some` of an empty tag set excludes nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Categories to keep.
    pub include_categories: Option<BTreeSet<String>>,
    /// Tags that disqualify a record.
    pub exclude_tags: Option<BTreeSet<String>>,
}

impl FilterCriteria {
    /// Criteria that keep every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to the given categories.
    #[must_use]
    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    /// Drop records carrying any of the given tags.
    #[must_use]
    pub fn excluding_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `record` satisfies every enabled condition.
    #[must_use]
    pub fn matches(&self, record: &TorrentRecord) -> bool {
        let category_ok = self
            .include_categories
            .as_ref()
            .is_none_or(|categories| categories.contains(&record.category));
        let tags_ok = self
            .exclude_tags
            .as_ref()
            .is_none_or(|excluded| record.tags.is_disjoint(excluded));
        category_ok && tags_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, tags: &str) -> TorrentRecord {
        TorrentRecord::from_raw(RawTorrent {
            name: "Movie".into(),
            category: category.into(),
            tags: tags.into(),
            content_path: "/downloads/Movie.mkv".into(),
            hash: "abc".into(),
        })
    }

    #[test]
    fn parse_tags_trims_and_drops_empty_pieces() {
        let tags = parse_tags(" a, b ,,c, a ,");
        assert_eq!(
            tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn tags_are_case_sensitive() {
        let record = record("Movies", "Protected");
        assert!(record.has_tag("Protected"));
        assert!(!record.has_tag("protected"));
    }

    #[test]
    fn raw_torrent_tolerates_missing_and_extra_fields() -> Result<(), serde_json::Error> {
        let raw: RawTorrent =
            serde_json::from_str(r#"{"name":"Movie","state":"stalledUP","size":10}"#)?;
        assert_eq!(raw.name, "Movie");
        assert!(raw.category.is_empty());
        assert!(raw.content_path.is_empty());
        Ok(())
    }

    #[test]
    fn default_criteria_match_everything() {
        let criteria = FilterCriteria::all();
        assert!(criteria.matches(&record("", "")));
        assert!(criteria.matches(&record("Movies", "anything")));
    }

    #[test]
    fn empty_category_set_matches_nothing() {
        let criteria = FilterCriteria::default().with_categories(Vec::<String>::new());
        assert!(!criteria.matches(&record("Movies", "")));
        assert!(!criteria.matches(&record("", "")));
    }

    #[test]
    fn empty_exclusion_set_excludes_nothing() {
        let criteria = FilterCriteria::default().excluding_tags(Vec::<String>::new());
        assert!(criteria.matches(&record("Movies", "protected")));
    }

    #[test]
    fn conditions_are_conjunctive() {
        let criteria = FilterCriteria::default()
            .with_categories(["Movies"])
            .excluding_tags(["protected"]);

        assert!(criteria.matches(&record("Movies", "hd")));
        assert!(!criteria.matches(&record("Movies", "hd, protected")));
        assert!(!criteria.matches(&record("Series", "hd")));
        assert!(!criteria.matches(&record("Series", "protected")));
    }
}
