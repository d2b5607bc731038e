//! # Design
//!
//! - Constant messages; request context lives in fields.
//! - Transport, status, and payload failures stay distinguishable so callers can decide whether
//!   re-authenticating is worthwhile.

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for qBittorrent client operations.
pub type QbitResult<T> = Result<T, QbitError>;

/// Errors raised by the qBittorrent WebUI client.
#[derive(Debug, Error)]
pub enum QbitError {
    /// Building the HTTP client failed.
    #[error("qbittorrent client build failed")]
    ClientBuild {
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// An endpoint URL could not be derived from the base URL.
    #[error("qbittorrent endpoint url invalid")]
    InvalidUrl {
        /// Endpoint path being joined.
        endpoint: &'static str,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },
    /// The request could not be sent or its body could not be read.
    #[error("qbittorrent request failed")]
    Http {
        /// Operation that issued the request.
        operation: &'static str,
        /// Request URL.
        url: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with an unexpected status.
    #[error("qbittorrent returned unexpected status")]
    Status {
        /// Operation that issued the request.
        operation: &'static str,
        /// Request URL.
        url: String,
        /// Response status.
        status: StatusCode,
    },
    /// Login was rejected.
    #[error("qbittorrent authentication failed")]
    Authentication {
        /// Machine-readable reason.
        reason: &'static str,
    },
    /// An authenticated call was attempted without a session.
    #[error("qbittorrent session missing")]
    NotAuthenticated {
        /// Operation that required a session.
        operation: &'static str,
    },
    /// Response payload could not be decoded.
    #[error("qbittorrent response decode failed")]
    Decode {
        /// Operation that issued the request.
        operation: &'static str,
        /// Underlying reqwest decode error.
        #[source]
        source: reqwest::Error,
    },
}

impl QbitError {
    pub(crate) fn http(operation: &'static str, url: &url::Url, source: reqwest::Error) -> Self {
        Self::Http {
            operation,
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn status(operation: &'static str, url: &url::Url, status: StatusCode) -> Self {
        Self::Status {
            operation,
            url: url.to_string(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn qbit_error_variants_render_constant_messages() {
        let url = url::Url::parse("http://localhost:8080/api/v2/torrents/info").ok();
        assert!(url.is_some());
        let Some(url) = url else { return };

        let status = QbitError::status("torrents.info", &url, StatusCode::FORBIDDEN);
        assert_eq!(status.to_string(), "qbittorrent returned unexpected status");
        assert!(matches!(
            status,
            QbitError::Status { status: code, ref url, .. }
                if code == StatusCode::FORBIDDEN && url.ends_with("/info")
        ));

        let auth = QbitError::Authentication {
            reason: "credentials_rejected",
        };
        assert_eq!(auth.to_string(), "qbittorrent authentication failed");
        assert!(auth.source().is_none());

        let invalid = QbitError::InvalidUrl {
            endpoint: "api/v2/auth/login",
            source: url::ParseError::EmptyHost,
        };
        assert!(invalid.source().is_some());
    }
}
