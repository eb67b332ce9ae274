//! The parameter key registry shared by every resource type.

use std::fmt::Debug;
use std::hash::Hash;

use super::pattern::ValuePattern;
use crate::uri;

/// Default number of hits per page when the client does not ask for one.
pub const DEFAULT_RESULTS_PER_PAGE: &str = "5";
/// First page.
pub const DEFAULT_PAGE: &str = "1";
/// Languages requested from Cristin when the client does not choose.
pub const DEFAULT_LANGUAGES: &str = "en,nb,nn";

/// Whether a raw value has to be percent-decoded before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    None,
    Decode,
}

/// Static description of one parameter key.
#[derive(Debug, Clone, Copy)]
pub struct KeyDefinition {
    pub upstream_key: Option<&'static str>,
    pub client_key: Option<&'static str>,
    pub pattern: ValuePattern,
    pub error_message: Option<&'static str>,
    pub encoding: KeyEncoding,
}

impl KeyDefinition {
    /// Key used under the same name upstream and by clients.
    pub const fn named(key: &'static str) -> Self {
        Self::renamed(key, key, ValuePattern::NonEmpty)
    }

    /// Key with its own validation pattern.
    pub const fn with_pattern(key: &'static str, pattern: ValuePattern) -> Self {
        Self::renamed(key, key, pattern)
    }

    /// Key exposed to clients under another name than upstream.
    pub const fn renamed(upstream: &'static str, client: &'static str, pattern: ValuePattern) -> Self {
        Self {
            upstream_key: Some(upstream),
            client_key: Some(client),
            pattern,
            error_message: None,
            encoding: KeyEncoding::None,
        }
    }

    /// Placeholder for failed lookups.
    pub const fn invalid() -> Self {
        Self {
            upstream_key: None,
            client_key: None,
            pattern: ValuePattern::NonEmpty,
            error_message: None,
            encoding: KeyEncoding::None,
        }
    }

    pub const fn decoded(mut self) -> Self {
        self.encoding = KeyEncoding::Decode;
        self
    }

    pub const fn with_error_message(mut self, message: &'static str) -> Self {
        self.error_message = Some(message);
        self
    }
}

/// A closed set of parameter keys for one resource type.
///
/// Variants are ordered: ordinal 0 is the `INVALID` sentinel, ordinals below
/// `FIRST_QUERY_KEY` are path parameters and everything else is a query
/// parameter.
pub trait ParameterKey: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Result of failed lookups.
    const INVALID: Self;
    /// Identifier of a single resource, rendered as a path segment.
    const PATH_IDENTITY: Self;
    const PAGE_CURRENT: Self;
    const PAGE_ITEMS_PER_PAGE: Self;
    /// Ordinal of the first key that is accepted as a query parameter.
    const FIRST_QUERY_KEY: usize;
    /// Resource path segment upstream, e.g. `projects`.
    const UPSTREAM_PATH: &'static str;
    /// Resource path segment in NVA URIs, e.g. `project`.
    const NVA_PATH: &'static str;

    /// Every key in declaration order.
    fn values() -> &'static [Self];

    fn definition(self) -> KeyDefinition;

    fn ordinal(self) -> usize;

    /// Value used when a required key has not been supplied.
    fn default_value(self) -> Option<&'static str> {
        if self == Self::PAGE_CURRENT {
            Some(DEFAULT_PAGE)
        } else if self == Self::PAGE_ITEMS_PER_PAGE {
            Some(DEFAULT_RESULTS_PER_PAGE)
        } else {
            None
        }
    }

    /// Values sent upstream for one stored value.
    ///
    /// Most keys send their value as is; resources override this to
    /// translate values or expand lists into repeated parameters.
    fn upstream_values(self, value: &str) -> Vec<String> {
        vec![value.to_string()]
    }

    fn upstream_key(self) -> Option<&'static str> {
        self.definition().upstream_key
    }

    fn client_key(self) -> &'static str {
        let definition = self.definition();
        definition
            .client_key
            .or(definition.upstream_key)
            .unwrap_or_default()
    }

    fn encoding(self) -> KeyEncoding {
        self.definition().encoding
    }

    fn is_path_key(self) -> bool {
        let ordinal = self.ordinal();
        ordinal > 0 && ordinal < Self::FIRST_QUERY_KEY
    }

    fn is_query_key(self) -> bool {
        self.ordinal() >= Self::FIRST_QUERY_KEY
    }

    /// Decodes the raw value if the key asks for it.
    fn normalize(self, raw: &str) -> String {
        match self.encoding() {
            KeyEncoding::Decode => uri::decode(raw),
            KeyEncoding::None => raw.to_string(),
        }
    }

    /// True when the (normalized) value fully matches the key's pattern.
    fn accepts(self, raw: &str) -> bool {
        self.definition().pattern.matches(&self.normalize(raw))
    }

    /// Message used when a value for this key is rejected.
    fn invalid_value_message(self) -> String {
        let name = self.client_key();
        match self.definition().error_message {
            Some(template) => template.replace("{}", name),
            None => format!("Parameter '{}' has invalid value", name),
        }
    }

    /// Resolve a client supplied query parameter to a key.
    ///
    /// Path keys never match. With one candidate that key is returned and
    /// its value is checked later by the builder. With several candidates
    /// the last one accepting the value wins; if none accepts it the first
    /// candidate is returned so the builder reports it by name.
    fn resolve(name: &str, value: &str) -> Self {
        let candidates: Vec<Self> = Self::values()
            .iter()
            .copied()
            .filter(|key| key.is_query_key() && key.client_key() == name)
            .collect();

        match candidates.as_slice() {
            [] => Self::INVALID,
            [only] => *only,
            [first, ..] => candidates
                .iter()
                .rev()
                .copied()
                .find(|key| key.accepts(value))
                .unwrap_or(*first),
        }
    }

    /// Resolve a client supplied path parameter to a path key.
    fn resolve_path(name: &str) -> Self {
        Self::values()
            .iter()
            .copied()
            .find(|key| key.is_path_key() && key.client_key() == name)
            .unwrap_or(Self::INVALID)
    }

    /// Sorted client names accepted as query parameters.
    fn valid_client_keys() -> Vec<&'static str> {
        let mut keys: Vec<&'static str> = Self::values()
            .iter()
            .copied()
            .filter(|key| key.is_query_key())
            .map(|key| key.client_key())
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }
}
