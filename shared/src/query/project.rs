use super::key::{
    KeyDefinition, ParameterKey, DEFAULT_LANGUAGES, DEFAULT_PAGE, DEFAULT_RESULTS_PER_PAGE,
};
use super::pattern::ValuePattern;
use crate::models::ProjectStatus;
use crate::uri;

const INVALID_CHARACTERS: &str = "Parameter '{}' contains invalid characters";
const INVALID_NUMBER: &str = "Parameter '{}' must be a positive number";
const INVALID_ORGANIZATION_URI: &str = "Parameter '{}' must be an organization URI";
const INVALID_ORGANIZATION_IDENTIFIER: &str =
    "Invalid path parameter for '{}', needs to be an organization identifier like 185.90.0.0";
const INVALID_STATUS: &str = "Parameter '{}' must be one of ACTIVE, CONCLUDED, NOTSTARTED";

/// Parameters accepted by the project endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectKey {
    Invalid,
    PathIdentity,
    PathOrganisation,
    ApprovalReferenceId,
    ApprovedBy,
    Biobank,
    Category,
    Creator,
    Funding,
    FundingSource,
    GrantId,
    Institution,
    Keyword,
    Language,
    Levels,
    ModifiedSince,
    Name,
    Organization,
    Participant,
    ProjectManager,
    ProjectUnit,
    Query,
    Status,
    Title,
    User,
    PageCurrent,
    PageItemsPerPage,
    PageSort,
}

const ALL: [ProjectKey; 28] = [
    ProjectKey::Invalid,
    ProjectKey::PathIdentity,
    ProjectKey::PathOrganisation,
    ProjectKey::ApprovalReferenceId,
    ProjectKey::ApprovedBy,
    ProjectKey::Biobank,
    ProjectKey::Category,
    ProjectKey::Creator,
    ProjectKey::Funding,
    ProjectKey::FundingSource,
    ProjectKey::GrantId,
    ProjectKey::Institution,
    ProjectKey::Keyword,
    ProjectKey::Language,
    ProjectKey::Levels,
    ProjectKey::ModifiedSince,
    ProjectKey::Name,
    ProjectKey::Organization,
    ProjectKey::Participant,
    ProjectKey::ProjectManager,
    ProjectKey::ProjectUnit,
    ProjectKey::Query,
    ProjectKey::Status,
    ProjectKey::Title,
    ProjectKey::User,
    ProjectKey::PageCurrent,
    ProjectKey::PageItemsPerPage,
    ProjectKey::PageSort,
];

impl ParameterKey for ProjectKey {
    const INVALID: Self = ProjectKey::Invalid;
    const PATH_IDENTITY: Self = ProjectKey::PathIdentity;
    const PAGE_CURRENT: Self = ProjectKey::PageCurrent;
    const PAGE_ITEMS_PER_PAGE: Self = ProjectKey::PageItemsPerPage;
    const FIRST_QUERY_KEY: usize = 3;
    const UPSTREAM_PATH: &'static str = "projects";
    const NVA_PATH: &'static str = "project";

    fn values() -> &'static [Self] {
        &ALL
    }

    fn definition(self) -> KeyDefinition {
        use ValuePattern::*;

        match self {
            ProjectKey::Invalid => KeyDefinition::invalid(),
            ProjectKey::PathIdentity => KeyDefinition::renamed("id", "identifier", Number),
            ProjectKey::PathOrganisation => {
                KeyDefinition::renamed("parent_unit_id", "organization", OrganizationIdentifier)
                    .decoded()
                    .with_error_message(INVALID_ORGANIZATION_IDENTIFIER)
            }
            ProjectKey::ApprovalReferenceId => KeyDefinition::named("approval_reference_id"),
            ProjectKey::ApprovedBy => KeyDefinition::named("approved_by"),
            ProjectKey::Biobank => KeyDefinition::named("biobank"),
            ProjectKey::Category => KeyDefinition::named("category"),
            ProjectKey::Creator => KeyDefinition::with_pattern("creator", Number)
                .with_error_message(INVALID_NUMBER),
            ProjectKey::Funding => KeyDefinition::named("funding"),
            ProjectKey::FundingSource => KeyDefinition::named("funding_source"),
            ProjectKey::GrantId => KeyDefinition::with_pattern("project_code", Number)
                .with_error_message(INVALID_NUMBER),
            ProjectKey::Institution => KeyDefinition::named("institution"),
            ProjectKey::Keyword => KeyDefinition::named("keyword"),
            ProjectKey::Language => KeyDefinition::renamed("lang", "language", Language),
            ProjectKey::Levels => KeyDefinition::renamed("levels", "depth", Number)
                .with_error_message(INVALID_NUMBER),
            ProjectKey::ModifiedSince => KeyDefinition::with_pattern("modified_since", Date),
            ProjectKey::Name => KeyDefinition::renamed("title", "name", FreeText)
                .decoded()
                .with_error_message(INVALID_CHARACTERS),
            ProjectKey::Organization => KeyDefinition::renamed("parent_unit_id", "organization", Url)
                .decoded()
                .with_error_message(INVALID_ORGANIZATION_URI),
            ProjectKey::Participant => KeyDefinition::named("participant"),
            ProjectKey::ProjectManager => KeyDefinition::named("project_manager"),
            ProjectKey::ProjectUnit => KeyDefinition::named("unit"),
            ProjectKey::Query => KeyDefinition::with_pattern("query", FreeText)
                .decoded()
                .with_error_message(INVALID_CHARACTERS),
            ProjectKey::Status => KeyDefinition::with_pattern("status", Status)
                .decoded()
                .with_error_message(INVALID_STATUS),
            ProjectKey::Title => KeyDefinition::with_pattern("title", FreeText)
                .decoded()
                .with_error_message(INVALID_CHARACTERS),
            ProjectKey::User => KeyDefinition::named("user"),
            ProjectKey::PageCurrent => KeyDefinition::with_pattern("page", Number)
                .with_error_message(INVALID_NUMBER),
            ProjectKey::PageItemsPerPage => KeyDefinition::renamed("per_page", "results", Number)
                .with_error_message(INVALID_NUMBER),
            ProjectKey::PageSort => KeyDefinition::named("sort"),
        }
    }

    fn ordinal(self) -> usize {
        self as usize
    }

    fn default_value(self) -> Option<&'static str> {
        match self {
            ProjectKey::Language => Some(DEFAULT_LANGUAGES),
            ProjectKey::PageCurrent => Some(DEFAULT_PAGE),
            ProjectKey::PageItemsPerPage => Some(DEFAULT_RESULTS_PER_PAGE),
            _ => None,
        }
    }

    fn upstream_values(self, value: &str) -> Vec<String> {
        match self {
            ProjectKey::Biobank | ProjectKey::Keyword | ProjectKey::Participant => value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(String::from)
                .collect(),
            ProjectKey::Status => vec![ProjectStatus::parse(value)
                .map(ProjectStatus::cristin_status)
                .unwrap_or(value)
                .to_string()],
            ProjectKey::Organization => {
                vec![uri::last_path_segment(value).unwrap_or_else(|| value.to_string())]
            }
            _ => vec![value.to_string()],
        }
    }
}
