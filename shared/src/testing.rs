//! In-memory upstream for unit tests.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use url::Url;

use crate::client::{Upstream, UpstreamResponse};
use crate::{Error, Result};

/// Answers GETs from canned responses keyed by the full URI.
#[derive(Debug, Default)]
pub struct StubUpstream {
    responses: HashMap<String, UpstreamResponse>,
}

impl StubUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(self, uri: &Url, status: u16, body: &str) -> Self {
        self.with_response(uri, status, body, &[])
    }

    pub fn with_response(
        mut self,
        uri: &Url,
        status: u16,
        body: &str,
        headers: &[(&'static str, &str)],
    ) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in headers {
            map.insert(
                HeaderName::from_static(*name),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        self.responses.insert(
            uri.to_string(),
            UpstreamResponse {
                uri: uri.clone(),
                status,
                body: body.to_string(),
                headers: map,
            },
        );
        self
    }
}

#[async_trait]
impl Upstream for StubUpstream {
    async fn fetch(&self, uri: &Url) -> Result<UpstreamResponse> {
        self.responses
            .get(uri.as_str())
            .cloned()
            .ok_or_else(|| Error::UpstreamUnavailable(format!("no stub for {}", uri)))
    }
}
