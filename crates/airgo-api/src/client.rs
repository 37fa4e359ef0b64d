// Panel HTTP client
//
// Wraps `reqwest::Client` with the panel's base URL, the shared `key` query
// parameter, connection-level retries, and conditional GET handling.
// Endpoint methods live in `node.rs` and `user.rs` as inherent impls.

use reqwest::StatusCode;
use reqwest::header::{ETAG, IF_NONE_MATCH};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::transport::{TransportConfig, backoff};

/// Outcome of a conditional GET.
#[derive(Debug)]
pub enum Conditional<T> {
    /// The panel answered 304; the cached validator is still current.
    NotModified,
    /// Fresh data.
    Modified(T),
}

/// Raw panel response: status, validator token, and body text.
#[derive(Debug, Clone)]
pub struct PanelResponse {
    pub status: StatusCode,
    pub etag: Option<String>,
    pub body: String,
}

impl PanelResponse {
    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(&self.body).map_err(|e| {
            let preview: String = self.body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: self.body.clone(),
            }
        })
    }
}

/// Raw HTTP client for the panel's node API.
///
/// Every request carries the shared secret as `?key=`. Error values only
/// ever carry the base URL + path, never the query string.
pub struct PanelClient {
    http: reqwest::Client,
    base_url: Url,
    key: SecretString,
    retry_count: u32,
}

impl PanelClient {
    /// Create a client from a `TransportConfig`.
    pub fn new(
        base_url: &str,
        key: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            http,
            base_url,
            key,
            retry_count: transport.retry_count,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        key: SecretString,
        retry_count: u32,
    ) -> Self {
        Self {
            http,
            base_url,
            key,
            retry_count,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build the full URL for an absolute API path: `{base}{path}`.
    ///
    /// A base URL with its own path prefix (e.g. `https://host/panel/`) keeps it.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET with an `If-None-Match` validator.
    ///
    /// A 304 is returned to the caller untouched; any other non-2xx status
    /// becomes `Error::Status`.
    pub async fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
        if_none_match: &str,
    ) -> Result<PanelResponse, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let mut request = self
            .http
            .get(url.clone())
            .query(&[("key", self.key.expose_secret())])
            .query(params);
        if !if_none_match.is_empty() {
            request = request.header(IF_NONE_MATCH, if_none_match);
        }

        let resp = self.send(&url, request).await?;
        let status = resp.status();

        if status != StatusCode::NOT_MODIFIED && !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status,
            });
        }

        let etag = resp
            .headers()
            .get(ETAG)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp.text().await.map_err(|e| transport_error(&url, e))?;

        Ok(PanelResponse { status, etag, body })
    }

    /// Send a GET and classify the response as modified / not modified.
    pub(crate) async fn get_conditional(
        &self,
        path: &str,
        params: &[(&str, String)],
        if_none_match: &str,
    ) -> Result<Conditional<PanelResponse>, Error> {
        let resp = self.get(path, params, if_none_match).await?;
        if resp.status == StatusCode::NOT_MODIFIED {
            debug!(path, "not modified");
            return Ok(Conditional::NotModified);
        }
        Ok(Conditional::Modified(resp))
    }

    /// POST a JSON body. Only HTTP 200 counts as accepted.
    pub async fn post<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let request = self
            .http
            .post(url.clone())
            .query(&[("key", self.key.expose_secret())])
            .json(body);

        let resp = self.send(&url, request).await?;
        let status = resp.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(Error::Status {
                url: url.to_string(),
                status,
            })
        }
    }

    /// Send with up to `retry_count` extra attempts on connect/timeout errors.
    async fn send(
        &self,
        url: &Url,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Error> {
        let mut attempt = 0;
        loop {
            let Some(req) = request.try_clone() else {
                return request.send().await.map_err(|e| transport_error(url, e));
            };

            let err = match req.send().await {
                Ok(resp) => return Ok(resp),
                Err(e) => transport_error(url, e),
            };
            if attempt >= self.retry_count || !err.is_transient() {
                return Err(err);
            }
            attempt += 1;
            warn!(url = %url, attempt, error = %err, "request failed, retrying");
            tokio::time::sleep(backoff(attempt)).await;
        }
    }
}

/// Wrap a reqwest error, dropping its URL so the `key` query never leaks.
fn transport_error(url: &Url, source: reqwest::Error) -> Error {
    Error::Transport {
        url: url.to_string(),
        source: source.without_url(),
    }
}
