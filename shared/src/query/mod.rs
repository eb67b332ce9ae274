//! Typed, validated query parameters and their URI renderings.

mod biobank;
mod builder;
mod key;
mod keyword;
mod pattern;
mod person;
mod project;

use std::collections::{BTreeMap, HashSet};

use url::Url;

use crate::uri;

pub use biobank::BiobankKey;
pub use builder::QueryBuilder;
pub use key::{
    KeyDefinition, KeyEncoding, ParameterKey, DEFAULT_LANGUAGES, DEFAULT_PAGE,
    DEFAULT_RESULTS_PER_PAGE,
};
pub use keyword::KeywordKey;
pub use pattern::ValuePattern;
pub use person::PersonKey;
pub use project::ProjectKey;

/// Validated parameters of one request.
///
/// Only [`QueryBuilder::build`] creates values, so every required key is
/// present and every value has passed its key's pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<K: ParameterKey> {
    path: BTreeMap<K, String>,
    params: BTreeMap<K, String>,
}

impl<K: ParameterKey> Query<K> {
    pub fn builder() -> QueryBuilder<K> {
        QueryBuilder::new()
    }

    pub(crate) fn from_parts(path: BTreeMap<K, String>, params: BTreeMap<K, String>) -> Self {
        Self { path, params }
    }

    /// Stored value of a path or query key.
    pub fn value(&self, key: K) -> Option<&str> {
        self.path
            .get(&key)
            .or_else(|| self.params.get(&key))
            .map(String::as_str)
    }

    pub fn contains(&self, key: K) -> bool {
        self.value(key).is_some()
    }

    /// Identifier of the single resource this query targets, if any.
    pub fn identifier(&self) -> Option<&str> {
        self.value(K::PATH_IDENTITY)
    }

    /// Path keys other than the identity, e.g. a parent organization.
    fn scope(&self) -> impl Iterator<Item = (&K, &String)> {
        self.path.iter().filter(|(key, _)| **key != K::PATH_IDENTITY)
    }

    /// URI of the upstream request.
    ///
    /// The identity is appended as a path segment. Every other key becomes a
    /// query parameter under its upstream name.
    ///
    /// Each upstream name is sent for one key only. Path keys win over query
    /// keys, and among query keys the one declared last wins.
    pub fn to_upstream_uri(&self, base: &Url) -> Url {
        let path = uri::with_path_segments(base, [K::UPSTREAM_PATH]);
        let path = match self.identifier() {
            Some(identifier) => uri::with_path_segments(&path, [identifier]),
            None => path,
        };

        let mut claimed: HashSet<&'static str> = HashSet::new();
        let pairs: Vec<(String, String)> = self
            .scope()
            .chain(self.params.iter().rev())
            .filter_map(|(key, value)| key.upstream_key().map(|name| (name, *key, value)))
            .filter(|(name, _, _)| claimed.insert(*name))
            .flat_map(|(name, key, value)| {
                key.upstream_values(value)
                    .into_iter()
                    .map(move |value| (name.to_string(), value))
            })
            .collect();

        uri::with_query_pairs(&path, &pairs)
    }

    /// URI of this query in the NVA API.
    ///
    /// Scoping path keys render as `{name}/{value}` prefixes followed by the
    /// plural resource path, e.g. `organization/185.90.0.0/projects`.
    pub fn to_nva_uri(&self, nva_base: &Url) -> Url {
        let mut segments: Vec<&str> = Vec::new();
        for (key, value) in self.scope() {
            segments.push(key.client_key());
            segments.push(value);
        }
        segments.push(if segments.is_empty() {
            K::NVA_PATH
        } else {
            K::UPSTREAM_PATH
        });
        if let Some(identifier) = self.identifier() {
            segments.push(identifier);
        }

        let path = uri::with_path_segments(nva_base, segments);
        uri::with_query_parameters(&path, &self.to_client_parameters())
    }

    /// Query parameters under their client names.
    pub fn to_client_parameters(&self) -> BTreeMap<String, String> {
        self.params
            .iter()
            .map(|(key, value)| (key.client_key().to_string(), value.clone()))
            .collect()
    }
}
