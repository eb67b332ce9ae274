//! Shared library for the Cristin proxy Lambda functions.
//!
//! This crate validates client parameters, talks to the Cristin API and maps
//! its records into NVA's URIs, JSON shape and pagination envelope.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod query;
pub mod search;
pub mod services;
pub mod uri;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{CristinClient, Upstream, UpstreamResponse};
pub use config::Config;
pub use error::{Error, Result};
pub use query::{
    BiobankKey, KeywordKey, ParameterKey, PersonKey, ProjectKey, Query, QueryBuilder,
};
pub use search::SearchResponse;
