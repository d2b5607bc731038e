//! Seams implemented by download-client adapters.

use async_trait::async_trait;

use crate::model::RawTorrent;

/// Source of the torrent list, typically a download client's web API.
#[async_trait]
pub trait TorrentSource: Send + Sync {
    /// Open a session with the client; sources without sessions need not override this.
    async fn connect(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Fetch every torrent currently known to the client.
    async fn list_torrents(&self) -> anyhow::Result<Vec<RawTorrent>>;

    /// Close the session opened by [`TorrentSource::connect`].
    async fn disconnect(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Fixed in-memory torrent list.
#[derive(Debug, Clone, Default)]
pub struct StaticTorrentSource {
    torrents: Vec<RawTorrent>,
}

impl StaticTorrentSource {
    /// Serve `torrents` on every call.
    #[must_use]
    pub const fn new(torrents: Vec<RawTorrent>) -> Self {
        Self { torrents }
    }
}

#[async_trait]
impl TorrentSource for StaticTorrentSource {
    async fn list_torrents(&self) -> anyhow::Result<Vec<RawTorrent>> {
        Ok(self.torrents.clone())
    }
}
