//! Paged search envelope returned by every search endpoint.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, LINK};
use serde::Serialize;
use url::Url;

use crate::uri;
use crate::{Error, Result};

/// Header carrying the total number of hits upstream.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

const REL_NEXT: &str = "rel=\"next\"";
const REL_PREV: &str = "rel=\"prev\"";
const PAGE: &str = "page";
const RESULTS: &str = "results";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<T> {
    #[serde(rename = "@context")]
    pub context: Option<String>,
    pub id: Url,
    pub size: u64,
    pub search_string: Option<String>,
    pub processing_time: u64,
    pub first_record: u64,
    pub next_results: Option<Url>,
    pub previous_results: Option<Url>,
    pub hits: Vec<T>,
}

impl<T> SearchResponse<T> {
    pub fn new(id: Url) -> Self {
        Self {
            context: None,
            search_string: id.query().map(String::from),
            id,
            size: 0,
            processing_time: 0,
            first_record: 0,
            next_results: None,
            previous_results: None,
            hits: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_hits(mut self, hits: Vec<T>) -> Self {
        self.hits = hits;
        self
    }

    pub fn with_processing_time(mut self, elapsed: Duration) -> Self {
        self.processing_time = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Fill in size, first record and page links.
    ///
    /// `page` and `results` are read from the client parameters. A value that
    /// is present but not a positive number is an invalid parameter.
    pub fn using_headers_and_query_params(
        mut self,
        headers: &HeaderMap,
        params: &BTreeMap<String, String>,
    ) -> Result<Self> {
        let size = total_count(headers);
        let page = positive(params, PAGE, 1)?;
        let results = positive(params, RESULTS, 1)?;

        let first_record = if size > 0 {
            (page - 1).saturating_mul(results).saturating_add(1)
        } else {
            0
        };

        if size < first_record || (size == 0 && page > 1) {
            return Err(Error::PageOutOfScope { size });
        }

        let link = headers
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        self.size = size;
        self.first_record = first_record;
        self.next_results = (link.contains(REL_NEXT)
            && size >= first_record.saturating_add(results))
        .then(|| with_page(&self.id, page + 1));
        self.previous_results = (link.contains(REL_PREV) && page > 1)
            .then(|| with_page(&self.id, page - 1));

        Ok(self)
    }
}

/// Total hit count from the upstream headers, 0 when missing or garbled.
pub fn total_count(headers: &HeaderMap) -> u64 {
    headers
        .get(TOTAL_COUNT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0)
}

fn positive(params: &BTreeMap<String, String>, name: &str, fallback: u64) -> Result<u64> {
    let Some(value) = params.get(name) else {
        return Ok(fallback);
    };
    value
        .parse::<u64>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| {
            Error::invalid_parameter(name, format!("Parameter '{name}' must be a positive number"))
        })
}

/// The id URI with only the page parameter replaced.
fn with_page(id: &Url, page: u64) -> Url {
    let mut pairs: Vec<(String, String)> = id
        .query_pairs()
        .filter(|(key, _)| key != PAGE)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.push((PAGE.to_string(), page.to_string()));
    uri::with_query_pairs(id, &pairs)
}
