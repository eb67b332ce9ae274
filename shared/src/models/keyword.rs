use serde::Serialize;
use url::Url;

use super::{nva_id, CristinTypedLabel, LanguageMap, TypedLabel};

pub const KEYWORD_CONTEXT_URL: &str = "https://bibsysdev.github.io/src/keyword-context.json";
pub const KEYWORD_SEARCH_CONTEXT_URL: &str = "https://example.org/keyword-context.json";
pub const CATEGORY_CONTEXT_URL: &str = "https://example.org/category-context.json";
const KEYWORD_PATH: &str = "keyword";
const KEYWORD_TYPE: &str = "Keyword";

/// A single keyword from the Cristin vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Url,
    pub identifier: String,
    #[serde(skip_serializing_if = "LanguageMap::is_empty")]
    pub labels: LanguageMap,
}

impl CristinTypedLabel {
    /// Search hit form: code and names, code empty when Cristin omits it.
    pub fn to_label(&self, _nva_base: &Url) -> TypedLabel {
        TypedLabel {
            kind: self.code.clone().unwrap_or_default(),
            label: self.name.clone(),
        }
    }

    /// The keyword named by `identifier`, labelled from this record.
    pub fn to_keyword(&self, nva_base: &Url, identifier: &str) -> Keyword {
        let identifier = self.code.as_deref().unwrap_or(identifier);
        Keyword {
            context: Some(KEYWORD_CONTEXT_URL.to_string()),
            kind: KEYWORD_TYPE.to_string(),
            id: nva_id(nva_base, KEYWORD_PATH, identifier),
            identifier: identifier.to_string(),
            labels: self.name.clone(),
        }
    }
}
