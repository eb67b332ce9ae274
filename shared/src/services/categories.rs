//! The fixed list of Cristin project categories.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::info;

use crate::client::{self, Upstream};
use crate::config::Config;
use crate::models::keyword::CATEGORY_CONTEXT_URL;
use crate::models::{CristinTypedLabel, TypedLabel};
use crate::search::SearchResponse;
use crate::uri;
use crate::Result;

use super::Parameters;

const CATEGORY_PATH: [&str; 2] = ["category", "project"];
const CRISTIN_CATEGORIES_PATH: [&str; 2] = ["projects", "categories"];

/// The whole list fits one page.
const LIST_PAGE: [(&str, &str); 2] = [("page", "1"), ("results", "2000")];

pub async fn list(
    upstream: &dyn Upstream,
    config: &Config,
    params: &Parameters,
) -> Result<SearchResponse<TypedLabel>> {
    super::without_query_parameters(params)?;

    let started = Instant::now();
    let nva_base = config.nva_base()?;
    let id = uri::with_path_segments(&nva_base, CATEGORY_PATH);
    let uri = uri::with_path_segments(&config.cristin_api_url, CRISTIN_CATEGORIES_PATH);

    info!("Listing categories {}", uri);
    let response = upstream.fetch(&uri).await?;
    client::check_status(id.as_str(), &response)?;
    let categories: Vec<CristinTypedLabel> = client::deserialize(&response)?;

    let page: BTreeMap<String, String> = LIST_PAGE
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    let hits = categories
        .iter()
        .map(|category| category.to_label(&nva_base))
        .collect();

    Ok(SearchResponse::new(id)
        .with_context(CATEGORY_CONTEXT_URL)
        .using_headers_and_query_params(&response.headers, &page)?
        .with_hits(hits)
        .with_processing_time(started.elapsed()))
}
