use serde::{Deserialize, Serialize};
use url::Url;

use super::{nva_id, LanguageMap};

pub const FUNDING_CONTEXT_URL: &str = "https://bibsysdev.github.io/src/funding-context.json";
pub const FUNDING_SOURCES_PATH: &str = "funding-sources";
const FUNDING_SOURCE_TYPE: &str = "FundingSource";

/// Entry of the Cristin funding source list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinFundingSourceCode {
    pub code: String,
    #[serde(default)]
    pub name: LanguageMap,
}

/// A funder such as `NFR` or `EU`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NvaFundingSource {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Url,
    pub identifier: String,
    pub labels: LanguageMap,
    /// Older clients read `name`; it always equals `labels`.
    pub name: LanguageMap,
}

/// Every funding source Cristin knows of.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NvaFundingSources {
    #[serde(rename = "@context")]
    pub context: String,
    pub id: Url,
    pub sources: Vec<NvaFundingSource>,
}

impl CristinFundingSourceCode {
    /// Codes may contain reserved characters; the id path segment is encoded.
    pub fn to_funding_source(&self, nva_base: &Url) -> NvaFundingSource {
        NvaFundingSource {
            kind: FUNDING_SOURCE_TYPE.to_string(),
            id: nva_id(nva_base, FUNDING_SOURCES_PATH, &self.code),
            identifier: self.code.clone(),
            labels: self.name.clone(),
            name: self.name.clone(),
        }
    }
}
