use serde::{Deserialize, Serialize};
use url::Url;

use super::{nva_id, CristinTypedLabel, CristinUnit, TypedLabel, TypedValue, CRISTIN_IDENTIFIER};

pub const PERSON_SEARCH_CONTEXT_URL: &str = "https://example.org/person-search-context.json";
pub const PERSON_LOOKUP_CONTEXT_URL: &str = "https://example.org/person-context.json";
const PERSON_PATH: &str = "person";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinPerson {
    pub cristin_person_id: String,
    pub url: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    pub first_name_preferred: Option<String>,
    pub surname_preferred: Option<String>,
    pub orcid: Option<CristinOrcid>,
    pub tel: Option<String>,
    pub email: Option<String>,
    pub picture_url: Option<String>,
    #[serde(default)]
    pub affiliations: Vec<CristinAffiliation>,
    pub reserved: Option<bool>,
    pub identified_cristin_person: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinOrcid {
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinAffiliation {
    pub institution: Option<CristinUnit>,
    pub unit: Option<CristinUnit>,
    pub active: Option<bool>,
    pub position: Option<CristinTypedLabel>,
}

/// Person in NVA shape. Reserved persons only carry their id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub id: Url,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifiers: Vec<TypedValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub names: Vec<TypedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<ContactDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Url>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub affiliations: Vec<Affiliation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Affiliation {
    pub organization: Url,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<TypedLabel>,
}

impl CristinPerson {
    pub fn to_person(&self, nva_base: &Url) -> Person {
        let id = nva_id(nva_base, PERSON_PATH, &self.cristin_person_id);
        if self.reserved == Some(true) {
            return Person {
                context: None,
                id,
                kind: "Person".to_string(),
                identifiers: Vec::new(),
                names: Vec::new(),
                contact_details: None,
                image: None,
                affiliations: Vec::new(),
                verified: None,
            };
        }

        Person {
            context: None,
            id,
            kind: "Person".to_string(),
            identifiers: self.identifiers(),
            names: self.names(),
            contact_details: self.contact_details(),
            image: self
                .picture_url
                .as_deref()
                .and_then(|picture| Url::parse(picture).ok()),
            affiliations: self
                .affiliations
                .iter()
                .filter_map(|affiliation| affiliation.to_affiliation(nva_base))
                .collect(),
            verified: self.identified_cristin_person,
        }
    }

    fn identifiers(&self) -> Vec<TypedValue> {
        let mut identifiers = vec![TypedValue::new(CRISTIN_IDENTIFIER, &self.cristin_person_id)];
        if let Some(orcid) = self.orcid.as_ref().and_then(|orcid| orcid.id.as_deref()) {
            identifiers.push(TypedValue::new("ORCID", orcid));
        }
        identifiers
    }

    fn names(&self) -> Vec<TypedValue> {
        [
            ("FirstName", &self.first_name),
            ("LastName", &self.surname),
            ("PreferredFirstName", &self.first_name_preferred),
            ("PreferredLastName", &self.surname_preferred),
        ]
        .into_iter()
        .filter_map(|(kind, name)| name.as_deref().map(|name| TypedValue::new(kind, name)))
        .collect()
    }

    fn contact_details(&self) -> Option<ContactDetails> {
        if self.tel.is_none() && self.email.is_none() {
            return None;
        }
        Some(ContactDetails {
            telephone: self.tel.clone(),
            email: self.email.clone(),
        })
    }
}

impl CristinAffiliation {
    fn to_affiliation(&self, nva_base: &Url) -> Option<Affiliation> {
        let organization = self
            .unit
            .as_ref()
            .or(self.institution.as_ref())?
            .to_organization(nva_base)?;
        Some(Affiliation {
            organization: organization.id,
            active: self.active.unwrap_or(false),
            role: self.position.as_ref().and_then(CristinTypedLabel::to_typed_label),
        })
    }
}
