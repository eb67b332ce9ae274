//! HTTP helpers for Lambda functions.

use lambda_http::{Body, Request, RequestExt, Response};
use serde::Serialize;
use tracing::{error, warn};

use crate::services::Parameters;
use crate::Error;

const CONTENT_TYPE_JSON: &str = "application/json";
const CONTENT_TYPE_PROBLEM: &str = "application/problem+json";

/// Error body returned to clients.
#[derive(Debug, Serialize)]
pub struct Problem {
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl From<&Error> for Problem {
    fn from(error: &Error) -> Self {
        Self {
            title: error.title().to_string(),
            status: error.status_code(),
            detail: error.detail(),
        }
    }
}

/// Path and query string parameters of a gateway request.
#[derive(Debug, Default, Clone)]
pub struct RequestParameters {
    pub path: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
}

impl RequestParameters {
    pub fn from_request(event: &Request) -> Self {
        let owned = |(name, value): (&str, &str)| (name.to_string(), value.to_string());
        Self {
            path: event.path_parameters().iter().map(owned).collect(),
            query: event.query_string_parameters().iter().map(owned).collect(),
        }
    }

    pub fn has_path(&self, name: &str) -> bool {
        self.path.iter().any(|(key, _)| key == name)
    }

    pub fn path(&self) -> &Parameters {
        &self.path
    }

    pub fn query(&self) -> &Parameters {
        &self.query
    }
}

/// Create a JSON response with the given status code and data.
pub fn json_response<T: Serialize>(
    status: u16,
    data: &T,
    allowed_origin: &str,
) -> Result<Response<Body>, lambda_http::Error> {
    build(status, CONTENT_TYPE_JSON, serde_json::to_string(data)?, allowed_origin)
}

/// Create a problem response for an error, logging it by severity.
pub fn error_response(error: &Error, allowed_origin: &str) -> Result<Response<Body>, lambda_http::Error> {
    let problem = Problem::from(error);
    if problem.status >= 500 {
        error!("Request failed with {}: {}", problem.status, error);
    } else {
        warn!("Request rejected with {}: {}", problem.status, error);
    }
    build(
        problem.status,
        CONTENT_TYPE_PROBLEM,
        serde_json::to_string(&problem)?,
        allowed_origin,
    )
}

/// 200 with the value, or the problem response of the error.
pub fn respond<T: Serialize>(
    result: crate::Result<T>,
    allowed_origin: &str,
) -> Result<Response<Body>, lambda_http::Error> {
    match result {
        Ok(value) => json_response(200, &value, allowed_origin),
        Err(error) => error_response(&error, allowed_origin),
    }
}

pub fn method_not_allowed(method: &str, allowed_origin: &str) -> Result<Response<Body>, lambda_http::Error> {
    let problem = Problem {
        title: "Method Not Allowed".to_string(),
        status: 405,
        detail: format!("Method {} is not supported", method),
    };
    build(405, CONTENT_TYPE_PROBLEM, serde_json::to_string(&problem)?, allowed_origin)
}

fn build(
    status: u16,
    content_type: &str,
    body: String,
    allowed_origin: &str,
) -> Result<Response<Body>, lambda_http::Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", content_type)
        .header("access-control-allow-origin", allowed_origin)
        .body(Body::from(body))?)
}
