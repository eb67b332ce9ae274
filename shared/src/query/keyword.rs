use super::key::{KeyDefinition, ParameterKey, DEFAULT_PAGE};
use super::pattern::ValuePattern;

/// Keyword searches list a whole vocabulary page at once.
pub const DEFAULT_KEYWORDS_PER_PAGE: &str = "100";

/// Parameters accepted by the keyword endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum KeywordKey {
    Invalid,
    PathIdentity,
    Query,
    PageCurrent,
    PageItemsPerPage,
}

const ALL: [KeywordKey; 5] = [
    KeywordKey::Invalid,
    KeywordKey::PathIdentity,
    KeywordKey::Query,
    KeywordKey::PageCurrent,
    KeywordKey::PageItemsPerPage,
];

impl ParameterKey for KeywordKey {
    const INVALID: Self = KeywordKey::Invalid;
    const PATH_IDENTITY: Self = KeywordKey::PathIdentity;
    const PAGE_CURRENT: Self = KeywordKey::PageCurrent;
    const PAGE_ITEMS_PER_PAGE: Self = KeywordKey::PageItemsPerPage;
    const FIRST_QUERY_KEY: usize = 2;
    const UPSTREAM_PATH: &'static str = "keywords";
    const NVA_PATH: &'static str = "keyword";

    fn values() -> &'static [Self] {
        &ALL
    }

    fn definition(self) -> KeyDefinition {
        use ValuePattern::*;

        match self {
            KeywordKey::Invalid => KeyDefinition::invalid(),
            KeywordKey::PathIdentity => KeyDefinition::renamed("id", "identifier", Number)
                .with_error_message("Invalid path parameter for '{}'"),
            KeywordKey::Query => KeyDefinition::renamed("name", "query", FreeText)
                .decoded()
                .with_error_message("Parameter '{}' contains invalid characters"),
            KeywordKey::PageCurrent => KeyDefinition::with_pattern("page", Number)
                .with_error_message("Parameter '{}' must be a positive number"),
            KeywordKey::PageItemsPerPage => KeyDefinition::renamed("per_page", "results", Number)
                .with_error_message("Parameter '{}' must be a positive number"),
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }

    fn default_value(self) -> Option<&'static str> {
        match self {
            KeywordKey::PageCurrent => Some(DEFAULT_PAGE),
            KeywordKey::PageItemsPerPage => Some(DEFAULT_KEYWORDS_PER_PAGE),
            _ => None,
        }
    }
}
