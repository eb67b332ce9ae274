use super::key::{KeyDefinition, ParameterKey};
use super::pattern::ValuePattern;

/// Parameters accepted by the biobank endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BiobankKey {
    Invalid,
    PathIdentity,
    Language,
    Status,
    User,
    PageCurrent,
    PageItemsPerPage,
    PageSort,
}

const ALL: [BiobankKey; 8] = [
    BiobankKey::Invalid,
    BiobankKey::PathIdentity,
    BiobankKey::Language,
    BiobankKey::Status,
    BiobankKey::User,
    BiobankKey::PageCurrent,
    BiobankKey::PageItemsPerPage,
    BiobankKey::PageSort,
];

impl ParameterKey for BiobankKey {
    const INVALID: Self = BiobankKey::Invalid;
    const PATH_IDENTITY: Self = BiobankKey::PathIdentity;
    const PAGE_CURRENT: Self = BiobankKey::PageCurrent;
    const PAGE_ITEMS_PER_PAGE: Self = BiobankKey::PageItemsPerPage;
    const FIRST_QUERY_KEY: usize = 2;
    const UPSTREAM_PATH: &'static str = "biobanks";
    const NVA_PATH: &'static str = "biobank";

    fn values() -> &'static [Self] {
        &ALL
    }

    fn definition(self) -> KeyDefinition {
        match self {
            BiobankKey::Invalid => KeyDefinition::invalid(),
            BiobankKey::PathIdentity => {
                KeyDefinition::renamed("id", "identifier", ValuePattern::Number)
            }
            BiobankKey::Language => KeyDefinition::renamed("lang", "language", ValuePattern::Language),
            BiobankKey::Status => KeyDefinition::with_pattern("status", ValuePattern::Status).decoded(),
            BiobankKey::User => KeyDefinition::named("user"),
            BiobankKey::PageCurrent => KeyDefinition::with_pattern("page", ValuePattern::Number)
                .with_error_message("Parameter '{}' must be a positive number"),
            BiobankKey::PageItemsPerPage => {
                KeyDefinition::renamed("per_page", "results", ValuePattern::Number)
                    .with_error_message("Parameter '{}' must be a positive number")
            }
            BiobankKey::PageSort => KeyDefinition::named("sort"),
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;
    use url::Url;

    #[test]
    fn test_single_biobank() {
        let query: Query<BiobankKey> = Query::builder()
            .from_path_parameters([("identifier", "123")])
            .from_query_parameters([("language", "nb")])
            .with_required(&[BiobankKey::PathIdentity])
            .build()
            .unwrap();
        let base = Url::parse("https://api.cristin.no/v2").unwrap();
        assert_eq!(
            query.to_upstream_uri(&base).as_str(),
            "https://api.cristin.no/v2/biobanks/123?lang=nb"
        );
    }

    #[test]
    fn test_paging_defaults_without_language() {
        let query: Query<BiobankKey> = Query::builder()
            .with_required(&[BiobankKey::PageCurrent, BiobankKey::PageItemsPerPage])
            .build()
            .unwrap();
        assert_eq!(query.value(BiobankKey::PageCurrent), Some("1"));
        assert_eq!(query.value(BiobankKey::PageItemsPerPage), Some("5"));
        assert_eq!(query.value(BiobankKey::Language), None);
    }

    #[test]
    fn test_identifier_must_be_numeric() {
        let error = Query::<BiobankKey>::builder()
            .from_path_parameters([("identifier", "abc")])
            .build()
            .unwrap_err();
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn test_unknown_query_parameter_rejected() {
        let result = Query::<BiobankKey>::builder()
            .from_query_parameters([("keyword", "dna")])
            .build();
        assert!(result.is_err());
    }
}
