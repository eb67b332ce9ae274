use serde::{Deserialize, Serialize};
use url::Url;

use super::{
    nva_id, CristinDateInfo, CristinOrganization, CristinTypedLabel, CristinUnit, LanguageMap,
    Organization, TypedLabel, TypedValue, CRISTIN_IDENTIFIER,
};

pub const PROJECT_SEARCH_CONTEXT_URL: &str =
    "https://bibsysdev.github.io/src/project-search-context.json";
pub const PROJECT_LOOKUP_CONTEXT_URL: &str = "https://bibsysdev.github.io/src/project-context.json";
const PROJECT_PATH: &str = "project";
const PERSON_PATH: &str = "person";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectStatus {
    NotStarted,
    Active,
    Concluded,
}

impl ProjectStatus {
    /// Parse an NVA or Cristin status name, ignoring case, spaces and `+`.
    pub fn parse(name: &str) -> Option<Self> {
        let compact: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '+')
            .collect::<String>()
            .to_ascii_uppercase();
        match compact.as_str() {
            "NOTSTARTED" => Some(ProjectStatus::NotStarted),
            "ACTIVE" => Some(ProjectStatus::Active),
            "CONCLUDED" => Some(ProjectStatus::Concluded),
            _ => None,
        }
    }

    /// Status name used by Cristin.
    pub fn cristin_status(self) -> &'static str {
        match self {
            ProjectStatus::NotStarted => "not started",
            ProjectStatus::Active => "active",
            ProjectStatus::Concluded => "concluded",
        }
    }
}

/// Project as returned by `GET /projects` and `GET /projects/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinProject {
    pub cristin_project_id: String,
    pub url: Option<String>,
    #[serde(default)]
    pub title: LanguageMap,
    pub main_language: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub created: Option<CristinDateInfo>,
    pub last_modified: Option<CristinDateInfo>,
    pub coordinating_institution: Option<CristinOrganization>,
    #[serde(default)]
    pub project_funding_sources: Vec<CristinFundingSource>,
    #[serde(default)]
    pub participants: Vec<CristinParticipant>,
    #[serde(default)]
    pub academic_summary: LanguageMap,
    #[serde(default)]
    pub popular_scientific_summary: LanguageMap,
    #[serde(default)]
    pub keywords: Vec<CristinTypedLabel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinFundingSource {
    pub funding_source_code: Option<String>,
    #[serde(default)]
    pub funding_source_name: LanguageMap,
    pub project_code: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinParticipant {
    pub cristin_person_id: Option<String>,
    pub first_name: Option<String>,
    pub surname: Option<String>,
    #[serde(default)]
    pub roles: Vec<CristinRole>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CristinRole {
    pub role_code: Option<String>,
    pub institution: Option<CristinUnit>,
    pub unit: Option<CristinUnit>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NvaProject {
    #[serde(rename = "@context", skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub id: Url,
    #[serde(rename = "type")]
    pub kind: String,
    pub identifiers: Vec<TypedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_titles: Vec<LanguageMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub funding: Vec<Funding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinating_institution: Option<Organization>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Contributor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "LanguageMap::is_empty")]
    pub academic_summary: LanguageMap,
    #[serde(skip_serializing_if = "LanguageMap::is_empty")]
    pub popular_scientific_summary: LanguageMap,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<TypedLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Funding {
    pub source: FundingSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingSource {
    pub code: String,
    #[serde(skip_serializing_if = "LanguageMap::is_empty")]
    pub names: LanguageMap,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contributor {
    #[serde(rename = "type")]
    pub kind: String,
    pub identity: ContributorIdentity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<Organization>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorIdentity {
    pub id: Url,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl CristinProject {
    pub fn to_nva_project(&self, nva_base: &Url) -> NvaProject {
        let (title, alternative_titles) = self.split_titles();

        NvaProject {
            context: None,
            id: nva_id(nva_base, PROJECT_PATH, &self.cristin_project_id),
            kind: "Project".to_string(),
            identifiers: vec![TypedValue::new(CRISTIN_IDENTIFIER, &self.cristin_project_id)],
            title,
            language: self.main_language.clone(),
            alternative_titles,
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
            funding: self
                .project_funding_sources
                .iter()
                .filter_map(CristinFundingSource::to_funding)
                .collect(),
            coordinating_institution: self
                .coordinating_institution
                .as_ref()
                .and_then(|organization| organization.to_organization(nva_base)),
            contributors: self
                .participants
                .iter()
                .flat_map(|participant| participant.to_contributors(nva_base))
                .collect(),
            status: self.status.as_deref().and_then(ProjectStatus::parse),
            academic_summary: self.academic_summary.clone(),
            popular_scientific_summary: self.popular_scientific_summary.clone(),
            keywords: self
                .keywords
                .iter()
                .filter_map(CristinTypedLabel::to_typed_label)
                .collect(),
        }
    }

    /// Title in the main language, other languages as alternatives.
    fn split_titles(&self) -> (Option<String>, Vec<LanguageMap>) {
        let main = self
            .main_language
            .as_deref()
            .filter(|language| self.title.contains_key(*language))
            .or_else(|| self.title.keys().next().map(String::as_str));

        let Some(main) = main else {
            return (None, Vec::new());
        };

        let alternatives = self
            .title
            .iter()
            .filter(|(language, _)| language.as_str() != main)
            .map(|(language, title)| LanguageMap::from([(language.clone(), title.clone())]))
            .collect();
        (self.title.get(main).cloned(), alternatives)
    }
}

impl CristinFundingSource {
    fn to_funding(&self) -> Option<Funding> {
        Some(Funding {
            source: FundingSource {
                code: self.funding_source_code.clone()?,
                names: self.funding_source_name.clone(),
            },
            identifier: self.project_code.clone(),
        })
    }
}

impl CristinParticipant {
    /// One contributor per role.
    fn to_contributors(&self, nva_base: &Url) -> Vec<Contributor> {
        let Some(person_id) = &self.cristin_person_id else {
            return Vec::new();
        };
        let identity = ContributorIdentity {
            id: nva_id(nva_base, PERSON_PATH, person_id),
            kind: "Person".to_string(),
            first_name: self.first_name.clone(),
            last_name: self.surname.clone(),
        };

        self.roles
            .iter()
            .map(|role| Contributor {
                kind: contributor_type(role.role_code.as_deref()).to_string(),
                identity: identity.clone(),
                affiliation: role
                    .unit
                    .as_ref()
                    .or(role.institution.as_ref())
                    .and_then(|unit| unit.to_organization(nva_base)),
            })
            .collect()
    }
}

fn contributor_type(role_code: Option<&str>) -> &'static str {
    match role_code {
        Some("PRO_MANAGER") => "ProjectManager",
        _ => "ProjectParticipant",
    }
}
