use serde::{Deserialize, Serialize};
use url::Url;

use super::{nva_id, CristinDateInfo, CristinOrganization, LanguageMap, TypedValue, CRISTIN_IDENTIFIER};

/// Context of both single biobanks and biobank search pages.
pub const BIOBANK_CONTEXT_URL: &str = "https://bibsysdev.github.io/src/biobank-context.json";
const BIOBANK_PATH: &str = "biobank";
const PERSON_PATH: &str = "person";
const PROJECT_PATH: &str = "project";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinBiobank {
    pub cristin_biobank_id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub name: LanguageMap,
    pub main_language: Option<String>,
    pub start_date: Option<String>,
    pub store_until_date: Option<String>,
    pub status: Option<String>,
    pub created: Option<CristinDateInfo>,
    pub last_modified: Option<CristinDateInfo>,
    pub coordinating_institution: Option<CristinOrganization>,
    pub coordinator: Option<CristinReference>,
    pub associated_project: Option<CristinProjectReference>,
    pub biobank_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinReference {
    pub cristin_person_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinProjectReference {
    pub cristin_project_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Biobank {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub id: Url,
    #[serde(rename = "type")]
    pub kind: String,
    pub identifiers: Vec<TypedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biobank_type: Option<String>,
    #[serde(skip_serializing_if = "LanguageMap::is_empty")]
    pub name: LanguageMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_until_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinating_organization: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinator: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Url>,
}

impl CristinBiobank {
    pub fn to_biobank(&self, nva_base: &Url) -> Biobank {
        let mut identifiers = vec![TypedValue::new(CRISTIN_IDENTIFIER, &self.cristin_biobank_id)];
        if let Some(biobank_id) = &self.biobank_id {
            identifiers.push(TypedValue::new("BiobankIdentifier", biobank_id));
        }

        Biobank {
            context: None,
            id: nva_id(nva_base, BIOBANK_PATH, &self.cristin_biobank_id),
            kind: "Biobank".to_string(),
            identifiers,
            biobank_type: self.kind.clone(),
            name: self.name.clone(),
            main_language: self.main_language.clone(),
            start_date: self.start_date.clone(),
            store_until_date: self.store_until_date.clone(),
            status: self.status.clone(),
            created: self.created.as_ref().and_then(|info| info.date.clone()),
            last_modified: self.last_modified.as_ref().and_then(|info| info.date.clone()),
            coordinating_organization: self
                .coordinating_institution
                .as_ref()
                .and_then(|organization| organization.to_organization(nva_base))
                .map(|organization| organization.id),
            coordinator: self
                .coordinator
                .as_ref()
                .and_then(|person| person.cristin_person_id.as_deref())
                .map(|id| nva_id(nva_base, PERSON_PATH, id)),
            project: self
                .associated_project
                .as_ref()
                .and_then(|project| project.cristin_project_id.as_deref())
                .map(|id| nva_id(nva_base, PROJECT_PATH, id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_biobank() {
        let cristin: CristinBiobank = serde_json::from_str(
            r#"{
                "cristin_biobank_id": "3",
                "type": "GENERAL",
                "name": {"nb": "Blodprøver"},
                "status": "ACTIVE",
                "biobank_id": "2011/44",
                "created": {"date": "2014-01-02T00:00:00Z"},
                "coordinator": {"cristin_person_id": "99"},
                "associated_project": {"cristin_project_id": "2057063"}
            }"#,
        )
        .unwrap();
        let nva = Url::parse("https://api.dev.nva.aws.unit.no/cristin").unwrap();
        let biobank = cristin.to_biobank(&nva);

        assert_eq!(biobank.id.as_str(), "https://api.dev.nva.aws.unit.no/cristin/biobank/3");
        assert_eq!(biobank.identifiers[1].value, "2011/44");
        assert_eq!(biobank.created.as_deref(), Some("2014-01-02T00:00:00Z"));
        assert_eq!(
            biobank.coordinator.unwrap().as_str(),
            "https://api.dev.nva.aws.unit.no/cristin/person/99"
        );
        assert!(biobank.project.unwrap().as_str().ends_with("/project/2057063"));
        assert_eq!(biobank.coordinating_organization, None);
    }
}
