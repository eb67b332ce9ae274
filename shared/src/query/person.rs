use super::key::{
    KeyDefinition, ParameterKey, DEFAULT_LANGUAGES, DEFAULT_PAGE, DEFAULT_RESULTS_PER_PAGE,
};
use super::pattern::ValuePattern;

/// Parameters accepted by the person endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PersonKey {
    Invalid,
    PathIdentity,
    PathOrganisation,
    Name,
    Organization,
    Verified,
    Language,
    PageCurrent,
    PageItemsPerPage,
    PageSort,
}

const ALL: [PersonKey; 10] = [
    PersonKey::Invalid,
    PersonKey::PathIdentity,
    PersonKey::PathOrganisation,
    PersonKey::Name,
    PersonKey::Organization,
    PersonKey::Verified,
    PersonKey::Language,
    PersonKey::PageCurrent,
    PersonKey::PageItemsPerPage,
    PersonKey::PageSort,
];

impl ParameterKey for PersonKey {
    const INVALID: Self = PersonKey::Invalid;
    const PATH_IDENTITY: Self = PersonKey::PathIdentity;
    const PAGE_CURRENT: Self = PersonKey::PageCurrent;
    const PAGE_ITEMS_PER_PAGE: Self = PersonKey::PageItemsPerPage;
    const FIRST_QUERY_KEY: usize = 3;
    const UPSTREAM_PATH: &'static str = "persons";
    const NVA_PATH: &'static str = "person";

    fn values() -> &'static [Self] {
        &ALL
    }

    fn definition(self) -> KeyDefinition {
        use ValuePattern::*;

        match self {
            PersonKey::Invalid => KeyDefinition::invalid(),
            PersonKey::PathIdentity => KeyDefinition::renamed("id", "identifier", PersonIdentifier)
                .with_error_message("Invalid path parameter for '{}', must be a number or an ORCID"),
            PersonKey::PathOrganisation => {
                KeyDefinition::renamed("parent_unit_id", "organization", OrganizationIdentifier)
                    .decoded()
                    .with_error_message("Invalid path parameter for '{}', must be an organization identifier")
            }
            PersonKey::Name => KeyDefinition::with_pattern("name", FreeText)
                .decoded()
                .with_error_message("Parameter '{}' contains invalid characters"),
            PersonKey::Organization => {
                KeyDefinition::renamed("institution", "organization", NonEmpty).decoded()
            }
            PersonKey::Verified => KeyDefinition::with_pattern("verified", Boolean),
            PersonKey::Language => KeyDefinition::renamed("lang", "language", Language),
            PersonKey::PageCurrent => KeyDefinition::with_pattern("page", Number),
            PersonKey::PageItemsPerPage => KeyDefinition::renamed("per_page", "results", Number),
            PersonKey::PageSort => KeyDefinition::named("sort"),
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }

    fn default_value(self) -> Option<&'static str> {
        match self {
            PersonKey::Language => Some(DEFAULT_LANGUAGES),
            PersonKey::PageCurrent => Some(DEFAULT_PAGE),
            PersonKey::PageItemsPerPage => Some(DEFAULT_RESULTS_PER_PAGE),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Query;
    use url::Url;

    #[test]
    fn test_orcid_identifier_accepted() {
        let query: Query<PersonKey> = Query::builder()
            .from_path_parameters([("identifier", "0000-0002-1825-009X")])
            .build()
            .unwrap();
        let base = Url::parse("https://api.cristin.no/v2").unwrap();
        assert_eq!(
            query.to_upstream_uri(&base).as_str(),
            "https://api.cristin.no/v2/persons/0000-0002-1825-009X"
        );
    }

    #[test]
    fn test_name_search() {
        let query: Query<PersonKey> = Query::builder()
            .from_query_parameters([("name", "Ola%20Nordmann"), ("organization", "uio")])
            .with_required(&[PersonKey::Language, PersonKey::PageCurrent, PersonKey::PageItemsPerPage])
            .build()
            .unwrap();
        let base = Url::parse("https://api.cristin.no/v2").unwrap();
        assert_eq!(
            query.to_upstream_uri(&base).as_str(),
            "https://api.cristin.no/v2/persons?institution=uio&lang=en%2Cnb%2Cnn&name=Ola+Nordmann&page=1&per_page=5"
        );
    }

    #[test]
    fn test_ordinals_match_declaration_order() {
        for (index, key) in PersonKey::values().iter().enumerate() {
            assert_eq!(key.ordinal(), index);
        }
        assert!(PersonKey::PathOrganisation.is_path_key());
        assert!(PersonKey::Name.is_query_key());
    }

    #[test]
    fn test_persons_of_organization() {
        let query: Query<PersonKey> = Query::builder()
            .from_path_parameters([("organization", "185.90.0.0")])
            .from_query_parameters([("name", "Kari")])
            .with_required(&[PersonKey::PathOrganisation, PersonKey::PageCurrent])
            .build()
            .unwrap();
        assert_eq!(
            query.to_upstream_uri(&Url::parse("https://api.cristin.no/v2").unwrap()).as_str(),
            "https://api.cristin.no/v2/persons?name=Kari&page=1&parent_unit_id=185.90.0.0"
        );
        assert_eq!(
            query.to_nva_uri(&Url::parse("https://api.dev.nva.aws.unit.no/cristin").unwrap()).as_str(),
            "https://api.dev.nva.aws.unit.no/cristin/organization/185.90.0.0/persons?name=Kari&page=1"
        );
    }

    #[test]
    fn test_verified_must_be_boolean() {
        let result = Query::<PersonKey>::builder()
            .from_query_parameters([("verified", "maybe")])
            .build();
        assert!(result.is_err());
    }
}
