use crate::client::Upstream;
use crate::config::Config;
use crate::models::biobank::BIOBANK_CONTEXT_URL;
use crate::models::{Biobank, CristinBiobank};
use crate::query::{BiobankKey, Query};
use crate::search::SearchResponse;
use crate::Result;

use super::Parameters;

pub async fn search(
    upstream: &dyn Upstream,
    config: &Config,
    params: &Parameters,
) -> Result<SearchResponse<Biobank>> {
    let query = Query::<BiobankKey>::builder()
        .from_query_parameters(params.iter().cloned())
        .with_required(&[BiobankKey::PageCurrent, BiobankKey::PageItemsPerPage])
        .build()?;

    super::search(
        upstream,
        config,
        &query,
        BIOBANK_CONTEXT_URL,
        CristinBiobank::to_biobank,
    )
    .await
}

pub async fn fetch(
    upstream: &dyn Upstream,
    config: &Config,
    path: &Parameters,
    params: &Parameters,
) -> Result<Biobank> {
    let query = Query::<BiobankKey>::builder()
        .from_path_parameters(path.iter().cloned())
        .from_query_parameters(params.iter().cloned())
        .with_required(&[BiobankKey::PathIdentity])
        .with_accepted(&[BiobankKey::Language])
        .build()?;

    let mut biobank = super::fetch(upstream, config, &query, CristinBiobank::to_biobank).await?;
    biobank.context = Some(BIOBANK_CONTEXT_URL.to_string());
    Ok(biobank)
}

#[cfg(test)]
mod tests {
    use super::super::tests::{config, pairs};
    use super::*;
    use crate::testing::StubUpstream;
    use crate::Error;
    use url::Url;

    #[tokio::test]
    async fn test_search_page_out_of_scope() {
        let upstream = StubUpstream::new().with_response(
            &Url::parse("https://api.cristin.no/v2/biobanks?page=10&per_page=10").unwrap(),
            200,
            "[]",
            &[("x-total-count", "50")],
        );

        let error = search(&upstream, &config(), &pairs(&[("page", "10"), ("results", "10")]))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::PageOutOfScope { size: 50 }));
    }

    #[tokio::test]
    async fn test_search_maps_hits_without_enrichment() {
        let upstream = StubUpstream::new().with_response(
            &Url::parse("https://api.cristin.no/v2/biobanks?lang=nb&page=1&per_page=5").unwrap(),
            200,
            r#"[{"cristin_biobank_id":"3","name":{"nb":"Blodprøver"}}]"#,
            &[("x-total-count", "1")],
        );

        let response = search(&upstream, &config(), &pairs(&[("language", "nb")]))
            .await
            .unwrap();
        assert_eq!(response.first_record, 1);
        assert_eq!(response.hits[0].id.as_str(), "https://api.dev.nva.aws.unit.no/cristin/biobank/3");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let upstream = StubUpstream::new().with_json(
            &Url::parse("https://api.cristin.no/v2/biobanks/3").unwrap(),
            503,
            "unavailable",
        );

        let error = fetch(&upstream, &config(), &pairs(&[("identifier", "3")]), &[])
            .await
            .unwrap_err();
        assert_eq!(error.status_code(), 502);

        let error = fetch(&StubUpstream::new(), &config(), &pairs(&[("identifier", "4")]), &[])
            .await
            .unwrap_err();
        assert!(matches!(error, Error::UpstreamUnavailable(_)));
    }

    #[tokio::test]
    async fn test_fetch_accepts_only_language() {
        let error = fetch(
            &StubUpstream::new(),
            &config(),
            &pairs(&[("identifier", "123")]),
            &pairs(&[("language", "nb"), ("status", "ACTIVE")]),
        )
        .await
        .unwrap_err();
        assert!(matches!(error, Error::InvalidParameter { ref keys, .. } if keys == &["status"]));
    }
}
