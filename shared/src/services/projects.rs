//! Project search and lookup, including projects of an organization.

use crate::client::Upstream;
use crate::config::Config;
use crate::models::project::{PROJECT_LOOKUP_CONTEXT_URL, PROJECT_SEARCH_CONTEXT_URL};
use crate::models::{CristinProject, NvaProject};
use crate::query::{ProjectKey, Query};
use crate::search::SearchResponse;
use crate::Result;

use super::Parameters;

const SEARCH_REQUIRED: [ProjectKey; 3] = [
    ProjectKey::Language,
    ProjectKey::PageCurrent,
    ProjectKey::PageItemsPerPage,
];
const LOOKUP_REQUIRED: [ProjectKey; 2] = [ProjectKey::PathIdentity, ProjectKey::Language];

/// Search projects. An `organization` path parameter limits the search to
/// projects of that organization.
pub async fn search(
    upstream: &dyn Upstream,
    config: &Config,
    path: &Parameters,
    params: &Parameters,
) -> Result<SearchResponse<NvaProject>> {
    let query = Query::<ProjectKey>::builder()
        .from_path_parameters(path.iter().cloned())
        .from_query_parameters(params.iter().cloned())
        .with_required(&SEARCH_REQUIRED)
        .build()?;

    super::search(
        upstream,
        config,
        &query,
        PROJECT_SEARCH_CONTEXT_URL,
        CristinProject::to_nva_project,
    )
    .await
}

pub async fn fetch(
    upstream: &dyn Upstream,
    config: &Config,
    path: &Parameters,
    params: &Parameters,
) -> Result<NvaProject> {
    let query = Query::<ProjectKey>::builder()
        .from_path_parameters(path.iter().cloned())
        .from_query_parameters(params.iter().cloned())
        .with_required(&LOOKUP_REQUIRED)
        .with_accepted(&[ProjectKey::Language])
        .build()?;

    let mut project = super::fetch(upstream, config, &query, CristinProject::to_nva_project).await?;
    project.context = Some(PROJECT_LOOKUP_CONTEXT_URL.to_string());
    Ok(project)
}

#[cfg(test)]
mod tests {
    use super::super::tests::{config, pairs};
    use super::*;
    use crate::testing::StubUpstream;
    use crate::Error;
    use url::Url;

    const SEARCH_URI: &str =
        "https://api.cristin.no/v2/projects?lang=en%2Cnb%2Cnn&page=2&per_page=1&query=kreft";

    fn uri(value: &str) -> Url {
        Url::parse(value).unwrap()
    }

    #[tokio::test]
    async fn test_search_enriches_hits() {
        let upstream = StubUpstream::new()
            .with_response(
                &uri(SEARCH_URI),
                200,
                r#"[{"cristin_project_id":"7","url":"https://api.cristin.no/v2/projects/7"}]"#,
                &[
                    ("x-total-count", "3"),
                    ("link", "<a>; rel=\"next\", <b>; rel=\"prev\""),
                ],
            )
            .with_json(
                &uri("https://api.cristin.no/v2/projects/7?lang=en%2Cnb%2Cnn"),
                200,
                r#"{"cristin_project_id":"7","title":{"en":"Full title"},"main_language":"en"}"#,
            );

        let response = search(
            &upstream,
            &config(),
            &[],
            &pairs(&[("query", "kreft"), ("page", "2"), ("results", "1")]),
        )
        .await
        .unwrap();

        assert_eq!(response.size, 3);
        assert_eq!(response.first_record, 2);
        assert_eq!(
            response.id.as_str(),
            "https://api.dev.nva.aws.unit.no/cristin/project?language=en%2Cnb%2Cnn&page=2&query=kreft&results=1"
        );
        assert!(response.next_results.unwrap().as_str().contains("page=3"));
        assert!(response.previous_results.unwrap().as_str().contains("page=1"));
        assert_eq!(response.hits.len(), 1);
        assert_eq!(response.hits[0].title.as_deref(), Some("Full title"));
    }

    #[tokio::test]
    async fn test_search_keeps_hit_when_enrichment_fails() {
        let upstream = StubUpstream::new().with_response(
            &uri(SEARCH_URI),
            200,
            r#"[{"cristin_project_id":"7","title":{"en":"Short"},"url":"https://api.cristin.no/v2/projects/7"}]"#,
            &[("x-total-count", "3")],
        );

        let response = search(
            &upstream,
            &config(),
            &[],
            &pairs(&[("query", "kreft"), ("page", "2"), ("results", "1")]),
        )
        .await
        .unwrap();
        assert_eq!(response.hits[0].title.as_deref(), Some("Short"));
    }

    #[tokio::test]
    async fn test_search_rejects_bad_parameters_before_calling_upstream() {
        let error = search(
            &StubUpstream::new(),
            &config(),
            &[],
            &pairs(&[("page", "zero"), ("colour", "red")]),
        )
        .await
        .unwrap_err();
        match error {
            Error::InvalidParameter { keys, .. } => assert_eq!(keys, vec!["colour", "page"]),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_organization_projects() {
        let upstream = StubUpstream::new().with_response(
            &uri("https://api.cristin.no/v2/projects?lang=en%2Cnb%2Cnn&page=1&parent_unit_id=185.90.0.0&per_page=5"),
            200,
            "[]",
            &[("x-total-count", "0")],
        );

        let response = search(
            &upstream,
            &config(),
            &pairs(&[("organization", "185.90.0.0")]),
            &[],
        )
        .await
        .unwrap();
        assert_eq!(
            response.id.as_str(),
            "https://api.dev.nva.aws.unit.no/cristin/organization/185.90.0.0/projects?language=en%2Cnb%2Cnn&page=1&results=5"
        );
        assert_eq!(response.first_record, 0);
        assert!(response.hits.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_project() {
        let upstream = StubUpstream::new().with_json(
            &uri("https://api.cristin.no/v2/projects/7?lang=en%2Cnb%2Cnn"),
            200,
            r#"{"cristin_project_id":"7"}"#,
        );

        let project = fetch(&upstream, &config(), &pairs(&[("identifier", "7")]), &[])
            .await
            .unwrap();
        assert_eq!(project.id.as_str(), "https://api.dev.nva.aws.unit.no/cristin/project/7");
        assert_eq!(project.context.as_deref(), Some(PROJECT_LOOKUP_CONTEXT_URL));
    }

    #[tokio::test]
    async fn test_fetch_missing_project() {
        let upstream = StubUpstream::new().with_json(
            &uri("https://api.cristin.no/v2/projects/8?lang=en%2Cnb%2Cnn"),
            404,
            "",
        );

        let error = fetch(&upstream, &config(), &pairs(&[("identifier", "8")]), &[])
            .await
            .unwrap_err();
        assert_eq!(error.status_code(), 404);
        assert_eq!(
            error.to_string(),
            "The requested resource 'https://api.dev.nva.aws.unit.no/cristin/project/8' was not found"
        );
    }

    #[tokio::test]
    async fn test_fetch_rejects_search_parameters() {
        let error = fetch(
            &StubUpstream::new(),
            &config(),
            &pairs(&[("identifier", "1")]),
            &pairs(&[("query", "x"), ("page", "3"), ("results", "9")]),
        )
        .await
        .unwrap_err();
        match error {
            Error::InvalidParameter { keys, message } => {
                assert_eq!(keys, vec!["page", "query", "results"]);
                assert_eq!(
                    message,
                    "Invalid parameter(s) 'page', 'query', 'results'. Valid query parameters: language"
                );
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_accepts_language() {
        let upstream = StubUpstream::new().with_json(
            &uri("https://api.cristin.no/v2/projects/7?lang=nb"),
            200,
            r#"{"cristin_project_id":"7"}"#,
        );

        let project = fetch(
            &upstream,
            &config(),
            &pairs(&[("identifier", "7")]),
            &pairs(&[("language", "nb")]),
        )
        .await
        .unwrap();
        assert_eq!(project.id.as_str(), "https://api.dev.nva.aws.unit.no/cristin/project/7");
    }

    #[tokio::test]
    async fn test_search_huge_page_is_rejected() {
        let error = search(
            &StubUpstream::new(),
            &config(),
            &[],
            &pairs(&[("page", "99999999999999999999999"), ("results", "5")]),
        )
        .await
        .unwrap_err();
        assert!(matches!(error, Error::InvalidParameter { ref keys, .. } if keys == &["page"]));
    }

    #[tokio::test]
    async fn test_organization_path_wins_over_organization_parameter() {
        let upstream = StubUpstream::new().with_response(
            &uri("https://api.cristin.no/v2/projects?lang=en%2Cnb%2Cnn&page=1&parent_unit_id=185.90.0.0&per_page=5"),
            200,
            "[]",
            &[("x-total-count", "0")],
        );

        let response = search(
            &upstream,
            &config(),
            &pairs(&[("organization", "185.90.0.0")]),
            &pairs(&[(
                "organization",
                "https://api.dev.nva.aws.unit.no/cristin/organization/194.0.0.0",
            )]),
        )
        .await
        .unwrap();
        assert!(response.hits.is_empty());
    }
}
