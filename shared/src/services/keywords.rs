//! Keyword search and lookup in the Cristin vocabulary.

use url::Url;

use crate::client::Upstream;
use crate::config::Config;
use crate::models::keyword::KEYWORD_SEARCH_CONTEXT_URL;
use crate::models::{CristinTypedLabel, Keyword, TypedLabel};
use crate::query::{KeywordKey, Query};
use crate::search::SearchResponse;
use crate::Result;

use super::Parameters;

pub async fn search(
    upstream: &dyn Upstream,
    config: &Config,
    params: &Parameters,
) -> Result<SearchResponse<TypedLabel>> {
    let query = Query::<KeywordKey>::builder()
        .from_query_parameters(params.iter().cloned())
        .with_required(&[KeywordKey::PageCurrent, KeywordKey::PageItemsPerPage])
        .build()?;

    super::search(
        upstream,
        config,
        &query,
        KEYWORD_SEARCH_CONTEXT_URL,
        CristinTypedLabel::to_label,
    )
    .await
}

pub async fn fetch(
    upstream: &dyn Upstream,
    config: &Config,
    path: &Parameters,
    params: &Parameters,
) -> Result<Keyword> {
    let query = Query::<KeywordKey>::builder()
        .from_path_parameters(path.iter().cloned())
        .from_query_parameters(params.iter().cloned())
        .with_required(&[KeywordKey::PathIdentity])
        .with_accepted(&[])
        .build()?;

    let identifier = query.identifier().unwrap_or_default();
    super::fetch(upstream, config, &query, |record: &CristinTypedLabel, nva_base: &Url| {
        record.to_keyword(nva_base, identifier)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::super::tests::{config, pairs};
    use super::*;
    use crate::models::keyword::KEYWORD_CONTEXT_URL;
    use crate::testing::StubUpstream;
    use crate::Error;

    fn uri(value: &str) -> Url {
        Url::parse(value).unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_query_as_name() {
        let upstream = StubUpstream::new().with_response(
            &uri("https://api.cristin.no/v2/keywords?name=kreft&page=1&per_page=100"),
            200,
            r#"[{"code":"1","name":{"nb":"Kreft"}},{"code":"2","name":{"en":"Cancer research"}}]"#,
            &[("x-total-count", "2")],
        );

        let response = search(&upstream, &config(), &pairs(&[("query", "kreft")]))
            .await
            .unwrap();
        assert_eq!(
            response.id.as_str(),
            "https://api.dev.nva.aws.unit.no/cristin/keyword?page=1&query=kreft&results=100"
        );
        assert_eq!(response.context.as_deref(), Some(KEYWORD_SEARCH_CONTEXT_URL));
        assert_eq!(response.size, 2);
        assert_eq!(response.hits[1].kind, "2");
        assert_eq!(response.next_results, None);
    }

    #[tokio::test]
    async fn test_search_rejects_unknown_parameters() {
        let error = search(&StubUpstream::new(), &config(), &pairs(&[("name", "kreft")]))
            .await
            .unwrap_err();
        assert!(matches!(error, Error::InvalidParameter { ref keys, .. } if keys == &["name"]));
    }

    #[tokio::test]
    async fn test_fetch_keyword() {
        let upstream = StubUpstream::new().with_json(
            &uri("https://api.cristin.no/v2/keywords/1234"),
            200,
            r#"{"code":"1234","name":{"nb":"Kreft","en":"Cancer"}}"#,
        );

        let keyword = fetch(&upstream, &config(), &pairs(&[("identifier", "1234")]), &[])
            .await
            .unwrap();
        assert_eq!(keyword.id.as_str(), "https://api.dev.nva.aws.unit.no/cristin/keyword/1234");
        assert_eq!(keyword.context.as_deref(), Some(KEYWORD_CONTEXT_URL));
        assert_eq!(keyword.labels.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_missing_keyword() {
        let upstream =
            StubUpstream::new().with_json(&uri("https://api.cristin.no/v2/keywords/9"), 404, "");
        let error = fetch(&upstream, &config(), &pairs(&[("identifier", "9")]), &[])
            .await
            .unwrap_err();
        assert_eq!(error.status_code(), 404);
    }

    #[tokio::test]
    async fn test_fetch_rejects_query_parameters() {
        let error = fetch(
            &StubUpstream::new(),
            &config(),
            &pairs(&[("identifier", "1234")]),
            &pairs(&[("query", "kreft")]),
        )
        .await
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "Invalid parameter(s) 'query'. This endpoint does not support query parameters"
        );
    }
}
