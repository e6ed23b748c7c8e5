// Controller API HTTP client
//
// Wraps `reqwest::Client` with endpoint URL construction and response
// decoding. Endpoint groups (whitelist, topology, stats) are implemented
// as inherent methods in separate files to keep this module focused on
// transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{Ack, StatusResponse};
use crate::transport::TransportConfig;

/// Raw HTTP client for the SDN controller REST API.
///
/// Stateless apart from its connection pool: every call is an independent
/// request/response round trip against `base_url`.
#[derive(Debug, Clone)]
pub struct ControllerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ControllerClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the controller API root (e.g. `http://127.0.0.1:8080`);
    /// a trailing path segment is kept, so `http://host/api` targets
    /// `http://host/api/whitelist`.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Parse `base_url` and create a client with default transport settings.
    pub fn from_url(base_url: &str) -> Result<Self, Error> {
        let url = Url::parse(base_url)?;
        Self::new(url, &TransportConfig::default())
    }

    /// The controller base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/{path}`.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{}", path.trim_start_matches('/')))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.api_url(path)?;
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_json(resp).await
    }

    /// Send a POST request with JSON body and check the `status` field.
    pub(crate) async fn post_status(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Ack, Error> {
        let url = self.api_url(path)?;
        debug!("POST {}", url);

        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_json::<StatusResponse>(resp).await?.into_ack()
    }

    /// Send a DELETE request with JSON body and check the `status` field.
    pub(crate) async fn delete_status(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Ack, Error> {
        let url = self.api_url(path)?;
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_json::<StatusResponse>(resp).await?.into_ack()
    }

    /// Reject non-2xx statuses, then decode the body as JSON.
    async fn parse_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }
}
