//! Parsed torrent list with category and tag filtering.

use tracing::debug;

use crate::error::{TorrentError, TorrentResult};
use crate::model::{FilterCriteria, RawTorrent, TorrentRecord};

/// Ordered collection of normalised torrent records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TorrentCatalog {
    records: Vec<TorrentRecord>,
}

impl TorrentCatalog {
    /// Normalise raw client entries, keeping their order.
    #[must_use]
    pub fn parse(raw: Vec<RawTorrent>) -> Self {
        let records: Vec<TorrentRecord> = raw.into_iter().map(TorrentRecord::from_raw).collect();
        debug!(count = records.len(), "parsed torrent catalog");
        Self { records }
    }

    /// Decode a qBittorrent torrent-list payload.
    ///
    /// # Errors
    ///
    /// Returns [`TorrentError::Decode`] if `payload` is not a JSON array of torrent objects.
    pub fn from_json(payload: &str) -> TorrentResult<Self> {
        let raw: Vec<RawTorrent> =
            serde_json::from_str(payload).map_err(|source| TorrentError::Decode {
                operation: "catalog.from_json",
                source,
            })?;
        Ok(Self::parse(raw))
    }

    /// Wrap already-normalised records.
    #[must_use]
    pub const fn from_records(records: Vec<TorrentRecord>) -> Self {
        Self { records }
    }

    /// Records satisfying `criteria`, in catalog order.
    #[must_use]
    pub fn find_matching(&self, criteria: &FilterCriteria) -> Vec<TorrentRecord> {
        let matching: Vec<TorrentRecord> = self
            .records
            .iter()
            .filter(|record| criteria.matches(record))
            .cloned()
            .collect();
        debug!(
            total = self.records.len(),
            matching = matching.len(),
            "filtered torrent catalog"
        );
        matching
    }

    /// All records in catalog order.
    #[must_use]
    pub fn records(&self) -> &[TorrentRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Consume the catalog, yielding its records.
    #[must_use]
    pub fn into_records(self) -> Vec<TorrentRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, category: &str, tags: &str) -> RawTorrent {
        RawTorrent {
            name: name.into(),
            category: category.into(),
            tags: tags.into(),
            content_path: format!("/downloads/{name}"),
            hash: format!("{name}-hash"),
        }
    }

    #[test]
    fn parse_keeps_order_and_normalises_tags() {
        let catalog = TorrentCatalog::parse(vec![
            raw("B", "Movies", "x, y"),
            raw("A", "Series", ""),
        ]);

        let names: Vec<&str> = catalog.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(catalog.records()[0].tags.len(), 2);
        assert!(catalog.records()[1].tags.is_empty());
    }

    #[test]
    fn from_json_rejects_malformed_payload() {
        let err = TorrentCatalog::from_json("{\"not\":\"a list\"}").err();
        assert!(matches!(
            err,
            Some(TorrentError::Decode {
                operation: "catalog.from_json",
                ..
            })
        ));
    }

    #[test]
    fn filtering_with_empty_categories_yields_nothing() {
        let catalog = TorrentCatalog::parse(vec![raw("A", "Movies", ""), raw("B", "", "")]);
        let criteria = FilterCriteria::default().with_categories(Vec::<String>::new());
        assert!(catalog.find_matching(&criteria).is_empty());
    }

    #[test]
    fn filtering_is_pure() {
        let catalog = TorrentCatalog::parse(vec![raw("A", "Movies", "p"), raw("B", "Movies", "")]);
        let before = catalog.clone();
        let criteria = FilterCriteria::default().excluding_tags(["p"]);

        let first = catalog.find_matching(&criteria);
        let second = catalog.find_matching(&criteria);

        assert_eq!(first, second);
        assert_eq!(catalog, before);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name, "B");
    }
}
