//! Request pipelines shared by the resource services.

pub mod biobanks;
pub mod categories;
pub mod funding_sources;
pub mod keywords;
pub mod persons;
pub mod projects;

use std::time::Instant;

use tracing::info;
use url::Url;

use crate::client::{self, Upstream};
use crate::config::Config;
use crate::models::CristinRecord;
use crate::query::{ParameterKey, Query};
use crate::search::SearchResponse;
use crate::{Error, Result};

/// Raw name/value pairs as received from the gateway.
pub type Parameters = [(String, String)];

const UPSTREAM_LANGUAGE: &str = "lang";

/// Run a search upstream and assemble one page of NVA hits.
///
/// Hits that carry a URL to their full record are enriched with it, using
/// the same language as the search.
pub async fn search<K, C, T, F>(
    upstream: &dyn Upstream,
    config: &Config,
    query: &Query<K>,
    context: &str,
    to_nva: F,
) -> Result<SearchResponse<T>>
where
    K: ParameterKey,
    C: CristinRecord,
    F: Fn(&C, &Url) -> T,
{
    let started = Instant::now();
    let nva_base = config.nva_base()?;
    let id = query.to_nva_uri(&nva_base);
    let uri = query.to_upstream_uri(&config.cristin_api_url);

    info!("Searching {}", uri);
    let response = upstream.fetch(&uri).await?;
    client::check_status(id.as_str(), &response)?;
    let records: Vec<C> = client::deserialize(&response)?;

    let page = SearchResponse::new(id)
        .with_context(context)
        .using_headers_and_query_params(&response.headers, &query.to_client_parameters())?;

    let language = uri
        .query_pairs()
        .find(|(key, _)| key == UPSTREAM_LANGUAGE)
        .map(|(_, value)| value.into_owned());
    let records = client::enrich(upstream, records, |record| {
        let url = Url::parse(record.record_url()?).ok()?;
        Some(with_language(url, language.as_deref()))
    })
    .await;

    let hits = records.iter().map(|record| to_nva(record, &nva_base)).collect();
    Ok(page
        .with_hits(hits)
        .with_processing_time(started.elapsed()))
}

/// Fetch the single resource named by the query's identity.
pub async fn fetch<K, C, T, F>(
    upstream: &dyn Upstream,
    config: &Config,
    query: &Query<K>,
    to_nva: F,
) -> Result<T>
where
    K: ParameterKey,
    C: CristinRecord,
    F: Fn(&C, &Url) -> T,
{
    let nva_base = config.nva_base()?;
    let mut id = query.to_nva_uri(&nva_base);
    id.set_query(None);
    let uri = query.to_upstream_uri(&config.cristin_api_url);

    info!("Fetching {}", uri);
    let record: C = client::fetch_json(upstream, id.as_str(), &uri).await?;
    Ok(to_nva(&record, &nva_base))
}

/// Reject every query parameter, for endpoints that take none.
pub(crate) fn without_query_parameters(params: &Parameters) -> Result<()> {
    if params.is_empty() {
        return Ok(());
    }
    let mut keys: Vec<String> = params.iter().map(|(name, _)| name.clone()).collect();
    keys.sort();
    keys.dedup();
    let quoted: Vec<String> = keys.iter().map(|key| format!("'{}'", key)).collect();
    let message = format!(
        "Invalid parameter(s) {}. This endpoint does not support query parameters",
        quoted.join(", ")
    );
    Err(Error::InvalidParameter { keys, message })
}

fn with_language(mut url: Url, language: Option<&str>) -> Url {
    if let Some(language) = language {
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != UPSTREAM_LANGUAGE)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .chain([(UPSTREAM_LANGUAGE.to_string(), language.to_string())])
            .collect();
        url = crate::uri::with_query_pairs(&url, &pairs);
    }
    url
}
