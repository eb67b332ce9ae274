use std::collections::BTreeMap;

use super::key::ParameterKey;
use super::Query;
use crate::{Error, Result};

/// Collects raw path and query parameters into a [`Query`].
///
/// Problems are recorded as they are found and reported together by
/// [`QueryBuilder::build`].
#[derive(Debug, Clone)]
pub struct QueryBuilder<K: ParameterKey> {
    path: BTreeMap<K, String>,
    params: BTreeMap<K, String>,
    required: Vec<K>,
    accepted: Option<Vec<K>>,
    supplied: Vec<K>,
    unknown: Vec<String>,
    rejected: BTreeMap<String, String>,
}

impl<K: ParameterKey> Default for QueryBuilder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ParameterKey> QueryBuilder<K> {
    pub fn new() -> Self {
        Self {
            path: BTreeMap::new(),
            params: BTreeMap::new(),
            required: Vec::new(),
            accepted: None,
            supplied: Vec::new(),
            unknown: Vec::new(),
            rejected: BTreeMap::new(),
        }
    }

    /// Add path parameters as received from the gateway.
    pub fn from_path_parameters<I, N, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in parameters {
            let (name, value) = (name.as_ref(), value.as_ref());
            let key = K::resolve_path(name);
            if key == K::INVALID {
                self.unknown.push(name.to_string());
            } else {
                self.insert(key, value);
            }
        }
        self
    }

    /// Add query string parameters as received from the gateway.
    pub fn from_query_parameters<I, N, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: AsRef<str>,
        V: AsRef<str>,
    {
        for (name, value) in parameters {
            let (name, value) = (name.as_ref(), value.as_ref());
            let key = K::resolve(name, value);
            if key == K::INVALID {
                self.unknown.push(name.to_string());
            } else {
                self.supplied.push(key);
                self.insert(key, value);
            }
        }
        self
    }

    /// Set a path key directly.
    pub fn with_path(mut self, key: K, value: impl AsRef<str>) -> Self {
        if key.is_path_key() {
            self.insert(key, value.as_ref());
        } else {
            self.unknown.push(key.client_key().to_string());
        }
        self
    }

    /// Set a query key directly.
    pub fn with_value(mut self, key: K, value: impl AsRef<str>) -> Self {
        if key.is_query_key() {
            self.supplied.push(key);
            self.insert(key, value.as_ref());
        } else {
            self.unknown.push(key.client_key().to_string());
        }
        self
    }

    /// Keys that must be present after defaults are applied.
    pub fn with_required(mut self, keys: &[K]) -> Self {
        for key in keys {
            if !self.required.contains(key) {
                self.required.push(*key);
            }
        }
        self
    }

    /// Restrict the query keys a client may supply, e.g. on lookups.
    ///
    /// Defaults of required keys are not affected.
    pub fn with_accepted(mut self, keys: &[K]) -> Self {
        self.accepted = Some(keys.to_vec());
        self
    }

    fn insert(&mut self, key: K, raw: &str) {
        if !key.accepts(raw) {
            self.rejected
                .insert(key.client_key().to_string(), key.invalid_value_message());
            return;
        }
        let value = key.normalize(raw);
        if key.is_path_key() {
            self.path.insert(key, value);
        } else {
            self.params.insert(key, value);
        }
    }

    fn contains(&self, key: K) -> bool {
        self.path.contains_key(&key) || self.params.contains_key(&key)
    }

    pub fn build(mut self) -> Result<Query<K>> {
        if let Some(accepted) = &self.accepted {
            let refused: Vec<String> = self
                .supplied
                .iter()
                .filter(|key| !accepted.contains(key))
                .map(|key| key.client_key().to_string())
                .collect();
            self.unknown.extend(refused);
        }

        for key in self.required.clone() {
            if self.contains(key) {
                continue;
            }
            if let Some(default) = key.default_value() {
                if key.is_path_key() {
                    self.path.insert(key, default.to_string());
                } else {
                    self.params.insert(key, default.to_string());
                }
            }
        }

        if !self.unknown.is_empty() || !self.rejected.is_empty() {
            return Err(self.invalid_parameters());
        }

        let mut missing: Vec<String> = self
            .required
            .iter()
            .filter(|key| !self.contains(**key))
            .map(|key| key.client_key().to_string())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            let message = format!("Missing required parameter(s): {}", missing.join(", "));
            return Err(Error::InvalidParameter { keys: missing, message });
        }

        Ok(Query::from_parts(self.path, self.params))
    }

    fn invalid_parameters(&self) -> Error {
        let mut keys: Vec<String> = self
            .unknown
            .iter()
            .cloned()
            .chain(self.rejected.keys().cloned())
            .collect();
        keys.sort();
        keys.dedup();

        let mut messages: Vec<String> = Vec::new();
        if !self.unknown.is_empty() {
            let valid = self.valid_client_keys();
            messages.push(if valid.is_empty() {
                format!(
                    "Invalid parameter(s) {}. This endpoint does not support query parameters",
                    quoted(&self.unknown)
                )
            } else {
                format!(
                    "Invalid parameter(s) {}. Valid query parameters: {}",
                    quoted(&self.unknown),
                    valid.join(", ")
                )
            });
        }
        messages.extend(self.rejected.values().cloned());

        Error::InvalidParameter {
            keys,
            message: messages.join(". "),
        }
    }
}

impl<K: ParameterKey> QueryBuilder<K> {
    fn valid_client_keys(&self) -> Vec<&'static str> {
        match &self.accepted {
            Some(accepted) => {
                let mut keys: Vec<&'static str> = accepted
                    .iter()
                    .filter(|key| key.is_query_key())
                    .map(|key| key.client_key())
                    .collect();
                keys.sort_unstable();
                keys.dedup();
                keys
            }
            None => K::valid_client_keys(),
        }
    }
}

fn quoted(names: &[String]) -> String {
    let mut names: Vec<String> = names.iter().map(|name| format!("'{}'", name)).collect();
    names.sort();
    names.dedup();
    names.join(", ")
}
