//! Upstream (Cristin) and NVA data models.
//!
//! Cristin models mirror the snake_case JSON of the Cristin REST API and
//! ignore unknown fields. NVA models serialize as camelCase and are built
//! from their Cristin counterpart with the NVA base URI.

pub mod biobank;
pub mod funding;
pub mod keyword;
pub mod person;
pub mod project;

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::uri;

pub use biobank::{Biobank, CristinBiobank};
pub use funding::{CristinFundingSourceCode, NvaFundingSource, NvaFundingSources};
pub use keyword::Keyword;
pub use person::{CristinPerson, Person};
pub use project::{CristinProject, NvaProject, ProjectStatus};

/// Language code to text, e.g. `{"nb": "Kreft", "en": "Cancer"}`.
pub type LanguageMap = BTreeMap<String, String>;

pub const CRISTIN_IDENTIFIER: &str = "CristinIdentifier";
const ORGANIZATION_PATH: &str = "organization";

/// A record deserialized from Cristin.
pub trait CristinRecord: DeserializeOwned + Send {
    /// Upstream URL of the complete record, when search hits are abridged.
    fn record_url(&self) -> Option<&str> {
        None
    }
}

impl CristinRecord for CristinProject {
    fn record_url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl CristinRecord for CristinPerson {
    fn record_url(&self) -> Option<&str> {
        self.url.as_deref()
    }
}

impl CristinRecord for CristinBiobank {}

impl CristinRecord for CristinTypedLabel {}

/// `{ "type": ..., "value": ... }` pair used for identifiers and names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl TypedValue {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Code with labels, e.g. a keyword or a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedLabel {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: LanguageMap,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinTypedLabel {
    pub code: Option<String>,
    #[serde(default)]
    pub name: LanguageMap,
}

impl CristinTypedLabel {
    pub fn to_typed_label(&self) -> Option<TypedLabel> {
        Some(TypedLabel {
            kind: self.code.clone()?,
            label: self.name.clone(),
        })
    }
}

/// Institution or unit reference as Cristin embeds it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinUnit {
    pub cristin_unit_id: Option<String>,
    pub cristin_institution_id: Option<String>,
    pub url: Option<String>,
    #[serde(default, alias = "institution_name")]
    pub unit_name: LanguageMap,
}

impl CristinUnit {
    /// Organization identifier in `n.n.n.n` form.
    pub fn organization_identifier(&self) -> Option<String> {
        match (&self.cristin_unit_id, &self.cristin_institution_id) {
            (Some(unit), _) => Some(unit.clone()),
            (None, Some(institution)) => Some(format!("{}.0.0.0", institution)),
            (None, None) => None,
        }
    }

    pub fn to_organization(&self, nva_base: &Url) -> Option<Organization> {
        let identifier = self.organization_identifier()?;
        Some(Organization {
            id: organization_id(nva_base, &identifier),
            kind: "Organization".to_string(),
            labels: self.unit_name.clone(),
        })
    }
}

/// Institution with an optional unit below it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinOrganization {
    pub institution: Option<CristinUnit>,
    pub institution_unit: Option<CristinUnit>,
}

impl CristinOrganization {
    /// The most specific organization present.
    pub fn to_organization(&self, nva_base: &Url) -> Option<Organization> {
        self.institution_unit
            .as_ref()
            .and_then(|unit| unit.to_organization(nva_base))
            .or_else(|| {
                self.institution
                    .as_ref()
                    .and_then(|institution| institution.to_organization(nva_base))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organization {
    pub id: Url,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: LanguageMap,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinDateInfo {
    pub date: Option<String>,
}

/// NVA URI of a single resource: `{nva_base}/{path}/{identifier}`.
pub fn nva_id(nva_base: &Url, path: &str, identifier: &str) -> Url {
    uri::with_path_segments(nva_base, [path, identifier])
}

pub fn organization_id(nva_base: &Url, identifier: &str) -> Url {
    nva_id(nva_base, ORGANIZATION_PATH, identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nva() -> Url {
        Url::parse("https://api.dev.nva.aws.unit.no/cristin").unwrap()
    }

    #[test]
    fn test_institution_becomes_top_level_organization() {
        let unit: CristinUnit =
            serde_json::from_str(r#"{"cristin_institution_id":"185","institution_name":{"en":"UiO"}}"#)
                .unwrap();
        let organization = unit.to_organization(&nva()).unwrap();
        assert_eq!(
            organization.id.as_str(),
            "https://api.dev.nva.aws.unit.no/cristin/organization/185.0.0.0"
        );
        assert_eq!(organization.labels.get("en").map(String::as_str), Some("UiO"));
    }

    #[test]
    fn test_unit_preferred_over_institution() {
        let organization: CristinOrganization = serde_json::from_str(
            r#"{"institution":{"cristin_institution_id":"185"},
                "institution_unit":{"cristin_unit_id":"185.90.0.0"}}"#,
        )
        .unwrap();
        let organization = organization.to_organization(&nva()).unwrap();
        assert!(organization.id.as_str().ends_with("/organization/185.90.0.0"));
    }

    #[test]
    fn test_empty_unit_has_no_organization() {
        assert!(CristinUnit::default().to_organization(&nva()).is_none());
    }
}
