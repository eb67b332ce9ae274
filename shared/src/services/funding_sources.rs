//! Funding sources: the full list and single sources picked from it.

use tracing::info;
use url::Url;

use crate::client::{self, Upstream};
use crate::config::Config;
use crate::models::funding::{FUNDING_CONTEXT_URL, FUNDING_SOURCES_PATH};
use crate::models::{nva_id, CristinFundingSourceCode, NvaFundingSource, NvaFundingSources};
use crate::query::DEFAULT_LANGUAGES;
use crate::uri;
use crate::{Error, Result};

use super::Parameters;

const CRISTIN_FUNDING_SOURCES_PATH: [&str; 2] = ["fundings", "sources"];
const IDENTIFIER: &str = "identifier";

async fn fetch_all(
    upstream: &dyn Upstream,
    config: &Config,
    id: &Url,
) -> Result<Vec<CristinFundingSourceCode>> {
    let uri = uri::with_path_segments(&config.cristin_api_url, CRISTIN_FUNDING_SOURCES_PATH);
    let uri = uri::with_query_pairs(&uri, &[("lang".to_string(), DEFAULT_LANGUAGES.to_string())]);

    info!("Listing funding sources {}", uri);
    client::fetch_json(upstream, id.as_str(), &uri).await
}

pub async fn list(
    upstream: &dyn Upstream,
    config: &Config,
    params: &Parameters,
) -> Result<NvaFundingSources> {
    super::without_query_parameters(params)?;

    let nva_base = config.nva_base()?;
    let id = uri::with_path_segments(&nva_base, [FUNDING_SOURCES_PATH]);
    let sources = fetch_all(upstream, config, &id)
        .await?
        .iter()
        .map(|source| source.to_funding_source(&nva_base))
        .collect();

    Ok(NvaFundingSources {
        context: FUNDING_CONTEXT_URL.to_string(),
        id,
        sources,
    })
}

/// Cristin has no single-source endpoint, so the list is filtered by code.
pub async fn fetch(
    upstream: &dyn Upstream,
    config: &Config,
    path: &Parameters,
    params: &Parameters,
) -> Result<NvaFundingSource> {
    super::without_query_parameters(params)?;

    let code = path
        .iter()
        .find(|(name, _)| name == IDENTIFIER)
        .map(|(_, value)| uri::decode(value))
        .filter(|code| !code.trim().is_empty())
        .ok_or_else(|| {
            Error::invalid_parameter(IDENTIFIER, "Missing required parameter(s): identifier")
        })?;

    let nva_base = config.nva_base()?;
    let id = nva_id(&nva_base, FUNDING_SOURCES_PATH, &code);
    fetch_all(upstream, config, &id)
        .await?
        .iter()
        .find(|source| source.code == code)
        .map(|source| source.to_funding_source(&nva_base))
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::super::tests::{config, pairs};
    use super::*;
    use crate::testing::StubUpstream;

    const SOURCES_URI: &str = "https://api.cristin.no/v2/fundings/sources?lang=en%2Cnb%2Cnn";
    const SOURCES: &str = r#"[{"code":"NFR","name":{"en":"Research Council of Norway"}},
                              {"code":"EU/H2020","name":{"en":"Horizon 2020"}}]"#;

    fn upstream() -> StubUpstream {
        StubUpstream::new().with_json(&Url::parse(SOURCES_URI).unwrap(), 200, SOURCES)
    }

    #[tokio::test]
    async fn test_list_funding_sources() {
        let response = list(&upstream(), &config(), &[]).await.unwrap();
        assert_eq!(
            response.id.as_str(),
            "https://api.dev.nva.aws.unit.no/cristin/funding-sources"
        );
        assert_eq!(response.context, FUNDING_CONTEXT_URL);
        assert_eq!(response.sources.len(), 2);
        assert_eq!(response.sources[0].identifier, "NFR");
    }

    #[tokio::test]
    async fn test_fetch_decodes_identifier() {
        let source = fetch(&upstream(), &config(), &pairs(&[("identifier", "EU%2FH2020")]), &[])
            .await
            .unwrap();
        assert_eq!(source.identifier, "EU/H2020");
        assert_eq!(
            source.id.as_str(),
            "https://api.dev.nva.aws.unit.no/cristin/funding-sources/EU%2FH2020"
        );
    }

    #[tokio::test]
    async fn test_fetch_unknown_code_is_not_found() {
        let error = fetch(&upstream(), &config(), &pairs(&[("identifier", "NOPE")]), &[])
            .await
            .unwrap_err();
        assert_eq!(error.status_code(), 404);
        assert!(error.to_string().contains("funding-sources/NOPE"));
    }

    #[tokio::test]
    async fn test_malformed_list_is_bad_gateway() {
        let upstream = StubUpstream::new().with_json(&Url::parse(SOURCES_URI).unwrap(), 200, "{}");
        let error = list(&upstream, &config(), &[]).await.unwrap_err();
        assert_eq!(error.status_code(), 502);
    }
}
