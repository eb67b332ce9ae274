//! Error types for the Cristin proxy Lambda functions.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Message shown to clients whenever the upstream API misbehaves.
pub const ERROR_MESSAGE_BACKEND_FETCH_FAILED: &str =
    "The request failed because of a problem with the upstream server";

/// Errors that can occur while proxying requests to Cristin.
#[derive(Error, Debug)]
pub enum Error {
    /// One or more parameters are unrecognized or fail validation.
    #[error("{message}")]
    InvalidParameter { keys: Vec<String>, message: String },

    /// The requested page lies beyond the end of the result set.
    #[error("Page requested is out of scope. Query contains {size} results")]
    PageOutOfScope { size: u64 },

    /// Upstream reported that the resource does not exist.
    #[error("The requested resource '{0}' was not found")]
    NotFound(String),

    /// Transport level failure talking to upstream.
    #[error("The request failed because of a problem with the upstream server")]
    UpstreamUnavailable(String),

    /// Upstream did not answer in time.
    #[error("Gateway timeout while waiting for the upstream server")]
    UpstreamTimeout,

    /// Upstream answered 2xx with a body we cannot read.
    #[error("The request failed because of a problem with the upstream server")]
    UpstreamMalformed(String),

    /// Upstream answered with a non-success status.
    #[error("Remote service responded with status: {status} when client called uri: {uri}")]
    UpstreamStatus { status: u16, uri: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an invalid parameter error for a single key.
    pub fn invalid_parameter(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            keys: vec![key.into()],
            message: message.into(),
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::InvalidParameter { .. } | Error::PageOutOfScope { .. } => 400,
            Error::NotFound(_) => 404,
            Error::UpstreamUnavailable(_) | Error::UpstreamMalformed(_) => 502,
            Error::UpstreamTimeout => 504,
            Error::UpstreamStatus { status, .. } => match status {
                400 | 404 | 409 | 410 | 422 => *status,
                _ => 502,
            },
            Error::Config(_) => 500,
        }
    }

    /// Short human readable title matching the status code.
    pub fn title(&self) -> &'static str {
        match self.status_code() {
            400 => "Bad Request",
            404 => "Not Found",
            409 => "Conflict",
            410 => "Gone",
            422 => "Unprocessable Entity",
            502 => "Bad Gateway",
            504 => "Gateway Timeout",
            _ => "Internal Server Error",
        }
    }

    /// Message safe to show to clients.
    ///
    /// Upstream status failures carry the upstream URI, which stays in the logs.
    pub fn detail(&self) -> String {
        match self {
            Error::UpstreamStatus { .. } if self.status_code() == 502 => {
                ERROR_MESSAGE_BACKEND_FETCH_FAILED.to_string()
            }
            Error::UpstreamStatus { status, .. } => {
                format!("Remote service responded with status: {status}")
            }
            Error::Config(_) => {
                "Internal server error. Contact application administrator.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_taxonomy() {
        assert_eq!(Error::invalid_parameter("page", "bad").status_code(), 400);
        assert_eq!(Error::PageOutOfScope { size: 3 }.status_code(), 400);
        assert_eq!(Error::NotFound("x".into()).status_code(), 404);
        assert_eq!(Error::UpstreamUnavailable("refused".into()).status_code(), 502);
        assert_eq!(Error::UpstreamMalformed("eof".into()).status_code(), 502);
        assert_eq!(Error::UpstreamTimeout.status_code(), 504);
        assert_eq!(Error::Config("missing".into()).status_code(), 500);
    }

    #[test]
    fn test_upstream_status_passthrough() {
        let status = |status| Error::UpstreamStatus { status, uri: "https://x".into() };
        assert_eq!(status(400).status_code(), 400);
        assert_eq!(status(410).status_code(), 410);
        assert_eq!(status(401).status_code(), 502);
        assert_eq!(status(503).status_code(), 502);
    }

    #[test]
    fn test_out_of_scope_message_contains_size() {
        let message = Error::PageOutOfScope { size: 50 }.to_string();
        assert_eq!(message, "Page requested is out of scope. Query contains 50 results");
    }

    #[test]
    fn test_detail_hides_upstream_uri() {
        let error = Error::UpstreamStatus { status: 500, uri: "https://secret/internal".into() };
        assert_eq!(error.detail(), ERROR_MESSAGE_BACKEND_FETCH_FAILED);
        assert_eq!(error.title(), "Bad Gateway");
    }
}
