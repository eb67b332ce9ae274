//! HTTP access to the Cristin API.

use async_trait::async_trait;
use futures::future;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use crate::config::Config;
use crate::{Error, Result};

/// Raw answer from upstream.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub uri: Url,
    pub status: u16,
    pub body: String,
    pub headers: HeaderMap,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can GET an upstream URI.
#[async_trait]
pub trait Upstream: Send + Sync {
    async fn fetch(&self, uri: &Url) -> Result<UpstreamResponse>;
}

/// reqwest backed client for the Cristin REST API.
#[derive(Debug, Clone)]
pub struct CristinClient {
    http_client: reqwest::Client,
}

impl CristinClient {
    /// Build a client with the configured connect timeout and bot filter
    /// bypass header.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(bypass) = &config.bot_filter_bypass {
            let name = HeaderName::from_bytes(bypass.name.as_bytes())
                .map_err(|e| Error::Config(format!("Invalid bot filter header name: {}", e)))?;
            let value = HeaderValue::from_str(&bypass.value)
                .map_err(|e| Error::Config(format!("Invalid bot filter header value: {}", e)))?;
            headers.insert(name, value);
        }

        let http_client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl Upstream for CristinClient {
    async fn fetch(&self, uri: &Url) -> Result<UpstreamResponse> {
        let response = self
            .http_client
            .get(uri.clone())
            .send()
            .await
            .map_err(|e| transport_error(uri, e))?;

        let status = response.status().as_u16();
        debug!("Upstream answered {} for {}", status, uri);
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| transport_error(uri, e))?;

        Ok(UpstreamResponse {
            uri: uri.clone(),
            status,
            body,
            headers,
        })
    }
}

fn transport_error(uri: &Url, e: reqwest::Error) -> Error {
    error!("Request to {} failed: {}", uri, e);
    if e.is_timeout() {
        Error::UpstreamTimeout
    } else {
        Error::UpstreamUnavailable(e.to_string())
    }
}

/// Turn a non-success upstream status into an error.
///
/// `id` names the requested resource in not found messages.
pub fn check_status(id: &str, response: &UpstreamResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(Error::NotFound(id.to_string()));
    }
    error!(
        "Upstream responded with status {} for {}: {}",
        response.status, response.uri, response.body
    );
    Err(Error::UpstreamStatus {
        status: response.status,
        uri: response.uri.to_string(),
    })
}

pub fn deserialize<T: DeserializeOwned>(response: &UpstreamResponse) -> Result<T> {
    serde_json::from_str(&response.body).map_err(|e| {
        error!(
            "Unreadable body from {}: {} (body: {})",
            response.uri, e, response.body
        );
        Error::UpstreamMalformed(e.to_string())
    })
}

/// Fetch, check and deserialize in one go.
pub async fn fetch_json<T: DeserializeOwned>(upstream: &dyn Upstream, id: &str, uri: &Url) -> Result<T> {
    let response = upstream.fetch(uri).await?;
    check_status(id, &response)?;
    deserialize(&response)
}

/// Replace each hit with the full record behind its own URL.
///
/// Lookups run concurrently and the result keeps the input order. A hit
/// whose lookup fails, or that has no URL, is kept as it was.
pub async fn enrich<T, F>(upstream: &dyn Upstream, hits: Vec<T>, url_of: F) -> Vec<T>
where
    T: DeserializeOwned + Send,
    F: Fn(&T) -> Option<Url>,
{
    let uris: Vec<Option<Url>> = hits.iter().map(url_of).collect();

    let lookups = uris.iter().map(|uri| async move {
        let uri = uri.as_ref()?;
        match fetch_json::<T>(upstream, uri.as_str(), uri).await {
            Ok(full) => Some(full),
            Err(e) => {
                warn!("Keeping search hit for {} as is: {}", uri, e);
                None
            }
        }
    });
    let enriched = future::join_all(lookups).await;

    hits.into_iter()
        .zip(enriched)
        .map(|(hit, full)| full.unwrap_or(hit))
        .collect()
}
