//! Error types for torrent catalog handling.

use thiserror::Error;

/// Primary error type for torrent catalog operations.
#[derive(Debug, Error)]
pub enum TorrentError {
    /// Torrent list payload could not be decoded.
    #[error("torrent list decode failed")]
    Decode {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying decode failure.
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience alias for torrent catalog results.
pub type TorrentResult<T> = Result<T, TorrentError>;
