//! qBittorrent WebUI client.
//!
//! # Design
//! - The session is a single `SID` cookie captured at login and replayed explicitly, so the
//!   client does not depend on a cookie jar.
//! - Only the endpoints needed to read the torrent list are implemented.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use orphanarr_torrent_core::{RawTorrent, TorrentSource};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, REFERER, SET_COOKIE};
use reqwest::{Client, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::{QbitError, QbitResult};

const LOGIN_ENDPOINT: &str = "api/v2/auth/login";
const LOGOUT_ENDPOINT: &str = "api/v2/auth/logout";
const TORRENTS_INFO_ENDPOINT: &str = "api/v2/torrents/info";
const SESSION_COOKIE: &str = "SID";
const LOGIN_REJECTED_BODY: &str = "Fails.";

/// Connection parameters for a qBittorrent WebUI.
#[derive(Clone)]
pub struct QbitConnection {
    /// WebUI base URL; a trailing path segment is treated as a directory.
    pub base_url: Url,
    /// Login user.
    pub username: String,
    /// Login password.
    pub password: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for QbitConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QbitConnection")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Authenticated qBittorrent WebUI client.
pub struct QbitClient {
    http: Client,
    base_url: Url,
    username: String,
    password: String,
    session: RwLock<Option<String>>,
}

impl fmt::Debug for QbitClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QbitClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl QbitClient {
    /// Build a client; no request is sent until [`QbitClient::login`].
    ///
    /// # Errors
    ///
    /// Returns [`QbitError::ClientBuild`] if the HTTP client cannot be constructed.
    pub fn new(connection: QbitConnection) -> QbitResult<Self> {
        let base_url = directory_url(connection.base_url);
        let mut default_headers = HeaderMap::new();
        // The WebUI rejects requests whose Referer does not match its own origin.
        if let Ok(referer) = HeaderValue::from_str(base_url.as_str()) {
            default_headers.insert(REFERER, referer);
        }

        let http = Client::builder()
            .timeout(connection.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|source| QbitError::ClientBuild { source })?;

        Ok(Self {
            http,
            base_url,
            username: connection.username,
            password: connection.password,
            session: RwLock::new(None),
        })
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Whether a session cookie is currently held.
    pub async fn is_authenticated(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Log in and retain the session cookie.
    ///
    /// # Errors
    ///
    /// Returns [`QbitError::Authentication`] when the credentials are rejected or no session
    /// cookie is issued, and [`QbitError::Http`]/[`QbitError::Status`] on transport failures.
    #[instrument(name = "qbit.login", skip(self), fields(base_url = %self.base_url))]
    pub async fn login(&self) -> QbitResult<()> {
        let url = self.endpoint(LOGIN_ENDPOINT)?;
        let response = self
            .http
            .post(url.clone())
            .form(&[
                ("username", self.username.as_str()),
                ("password", self.password.as_str()),
            ])
            .send()
            .await
            .map_err(|source| QbitError::http("auth.login", &url, source))?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            return Err(QbitError::Authentication {
                reason: "client_banned",
            });
        }
        if !status.is_success() {
            return Err(QbitError::status("auth.login", &url, status));
        }

        let sid = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|raw| cookie_value(raw, SESSION_COOKIE));
        let body = response
            .text()
            .await
            .map_err(|source| QbitError::http("auth.login", &url, source))?;

        if body.trim() == LOGIN_REJECTED_BODY {
            return Err(QbitError::Authentication {
                reason: "credentials_rejected",
            });
        }
        let sid = sid.ok_or(QbitError::Authentication {
            reason: "session_cookie_missing",
        })?;

        *self.session.write().await = Some(sid);
        info!("authenticated with qbittorrent");
        Ok(())
    }

    /// Fetch the full torrent list.
    ///
    /// # Errors
    ///
    /// Returns [`QbitError::NotAuthenticated`] before a successful login,
    /// [`QbitError::Status`] when the server rejects the request, and [`QbitError::Decode`] when
    /// the payload is not a torrent list.
    #[instrument(name = "qbit.torrents_info", skip(self))]
    pub async fn fetch_torrents(&self) -> QbitResult<Vec<RawTorrent>> {
        let url = self.endpoint(TORRENTS_INFO_ENDPOINT)?;
        let cookie = self.session_cookie("torrents.info").await?;
        let response = self
            .http
            .get(url.clone())
            .header(COOKIE, cookie)
            .send()
            .await
            .map_err(|source| QbitError::http("torrents.info", &url, source))?;

        let status = response.status();
        if !status.is_success() {
            return Err(QbitError::status("torrents.info", &url, status));
        }
        let torrents = response
            .json::<Vec<RawTorrent>>()
            .await
            .map_err(|source| {
                if source.is_decode() {
                    QbitError::Decode {
                        operation: "torrents.info",
                        source,
                    }
                } else {
                    QbitError::http("torrents.info", &url, source)
                }
            })?;
        debug!(count = torrents.len(), "fetched torrent list");
        Ok(torrents)
    }

    /// End the session. A client without a session is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`QbitError::Http`]/[`QbitError::Status`] when the logout request fails; the local
    /// session is discarded either way.
    #[instrument(name = "qbit.logout", skip(self))]
    pub async fn logout(&self) -> QbitResult<()> {
        let Some(sid) = self.session.write().await.take() else {
            return Ok(());
        };
        let url = self.endpoint(LOGOUT_ENDPOINT)?;
        let response = self
            .http
            .post(url.clone())
            .header(COOKIE, format!("{SESSION_COOKIE}={sid}"))
            .send()
            .await
            .map_err(|source| QbitError::http("auth.logout", &url, source))?;
        let status = response.status();
        if !status.is_success() {
            return Err(QbitError::status("auth.logout", &url, status));
        }
        debug!("logged out of qbittorrent");
        Ok(())
    }

    fn endpoint(&self, endpoint: &'static str) -> QbitResult<Url> {
        self.base_url
            .join(endpoint)
            .map_err(|source| QbitError::InvalidUrl { endpoint, source })
    }

    async fn session_cookie(&self, operation: &'static str) -> QbitResult<String> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|sid| format!("{SESSION_COOKIE}={sid}"))
            .ok_or(QbitError::NotAuthenticated { operation })
    }
}

#[async_trait]
impl TorrentSource for QbitClient {
    async fn connect(&self) -> anyhow::Result<()> {
        Ok(self.login().await?)
    }

    async fn list_torrents(&self) -> anyhow::Result<Vec<RawTorrent>> {
        Ok(self.fetch_torrents().await?)
    }

    async fn disconnect(&self) -> anyhow::Result<()> {
        Ok(self.logout().await?)
    }
}

/// Ensure the URL path ends with `/` so relative endpoints are appended rather than replacing
/// the last segment.
fn directory_url(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

/// Extract `needle` from a `Cookie` or `Set-Cookie` header value.
fn cookie_value(raw: &str, needle: &str) -> Option<String> {
    for entry in raw.split(';') {
        let mut parts = entry.splitn(2, '=');
        let name = parts.next().map(str::trim).unwrap_or_default();
        if !name.eq_ignore_ascii_case(needle) {
            continue;
        }
        let value = parts.next().map(str::trim)?;
        if value.is_empty() {
            return None;
        }
        return Some(value.trim_matches('"').to_string());
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_extracts_session() {
        assert_eq!(
            cookie_value("SID=abc123; HttpOnly; path=/", "SID"),
            Some("abc123".to_string())
        );
        assert_eq!(cookie_value("other=1; sid=\"q\"", "SID"), Some("q".to_string()));
        assert_eq!(cookie_value("SID=; path=/", "SID"), None);
        assert_eq!(cookie_value("path=/", "SID"), None);
    }

    #[test]
    fn directory_url_appends_trailing_slash() -> Result<(), url::ParseError> {
        let nested = directory_url(Url::parse("http://host:8080/qbit")?);
        assert_eq!(
            nested.join(LOGIN_ENDPOINT)?.as_str(),
            "http://host:8080/qbit/api/v2/auth/login"
        );

        let root = directory_url(Url::parse("http://host:8080")?);
        assert_eq!(
            root.join(TORRENTS_INFO_ENDPOINT)?.as_str(),
            "http://host:8080/api/v2/torrents/info"
        );
        Ok(())
    }

    #[test]
    fn debug_output_omits_password() -> Result<(), Box<dyn std::error::Error>> {
        let connection = QbitConnection {
            base_url: Url::parse("http://host:8080")?,
            username: "admin".into(),
            password: "hunter2".into(),
            timeout: Duration::from_secs(1),
        };
        assert!(!format!("{connection:?}").contains("hunter2"));
        let client = QbitClient::new(connection)?;
        assert!(!format!("{client:?}").contains("hunter2"));
        Ok(())
    }
}
