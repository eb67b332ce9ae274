//! Person search and lookup by Cristin number or ORCID, including persons
//! of an organization.

use crate::client::Upstream;
use crate::config::Config;
use crate::models::person::{PERSON_LOOKUP_CONTEXT_URL, PERSON_SEARCH_CONTEXT_URL};
use crate::models::{CristinPerson, Person};
use crate::query::{PersonKey, Query};
use crate::search::SearchResponse;
use crate::Result;

use super::Parameters;

const SEARCH_REQUIRED: [PersonKey; 3] = [
    PersonKey::Language,
    PersonKey::PageCurrent,
    PersonKey::PageItemsPerPage,
];
const ORGANIZATION_REQUIRED: [PersonKey; 3] = [
    PersonKey::PathOrganisation,
    PersonKey::PageCurrent,
    PersonKey::PageItemsPerPage,
];
const ORGANIZATION_ACCEPTED: [PersonKey; 4] = [
    PersonKey::Name,
    PersonKey::PageCurrent,
    PersonKey::PageItemsPerPage,
    PersonKey::PageSort,
];

/// Search persons. An `organization` path parameter limits the search to
/// persons of that organization and narrows the accepted parameters.
pub async fn search(
    upstream: &dyn Upstream,
    config: &Config,
    path: &Parameters,
    params: &Parameters,
) -> Result<SearchResponse<Person>> {
    let builder = Query::<PersonKey>::builder()
        .from_path_parameters(path.iter().cloned())
        .from_query_parameters(params.iter().cloned());
    let builder = if path.is_empty() {
        builder.with_required(&SEARCH_REQUIRED)
    } else {
        builder
            .with_required(&ORGANIZATION_REQUIRED)
            .with_accepted(&ORGANIZATION_ACCEPTED)
    };
    let query = builder.build()?;

    super::search(
        upstream,
        config,
        &query,
        PERSON_SEARCH_CONTEXT_URL,
        CristinPerson::to_person,
    )
    .await
}

pub async fn fetch(
    upstream: &dyn Upstream,
    config: &Config,
    path: &Parameters,
    params: &Parameters,
) -> Result<Person> {
    let query = Query::<PersonKey>::builder()
        .from_path_parameters(path.iter().cloned())
        .from_query_parameters(params.iter().cloned())
        .with_required(&[PersonKey::PathIdentity])
        .with_accepted(&[])
        .build()?;

    let mut person = super::fetch(upstream, config, &query, CristinPerson::to_person).await?;
    person.context = Some(PERSON_LOOKUP_CONTEXT_URL.to_string());
    Ok(person)
}
