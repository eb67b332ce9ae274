//! Configuration management for Lambda functions.

use std::env;
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

const DEFAULT_DOMAIN_NAME: &str = "api.dev.nva.aws.unit.no";
const DEFAULT_BASE_PATH: &str = "cristin";
const DEFAULT_ALLOWED_ORIGIN: &str = "*";
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Header pair that lets requests through the Cristin bot filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotFilterBypass {
    pub name: String,
    pub value: String,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Public host name of the NVA API
    pub domain_name: String,
    /// Base path of this API below the domain
    pub base_path: String,
    /// Root of the Cristin REST API
    pub cristin_api_url: Url,
    /// Value of the Access-Control-Allow-Origin header
    pub allowed_origin: String,
    /// Optional bot filter bypass header
    pub bot_filter_bypass: Option<BotFilterBypass>,
    /// Connect timeout for upstream requests
    pub connect_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let cristin_api_url = lookup("CRISTIN_API_URL")
            .ok_or_else(|| Error::Config("CRISTIN_API_URL not set".to_string()))?;
        let cristin_api_url = Url::parse(&cristin_api_url)
            .map_err(|e| Error::Config(format!("Invalid CRISTIN_API_URL: {}", e)))?;

        let bot_filter_bypass = match (
            lookup("CRISTIN_BOT_FILTER_BYPASS_HEADER_NAME"),
            lookup("CRISTIN_BOT_FILTER_BYPASS_HEADER_VALUE"),
        ) {
            (Some(name), Some(value)) if !name.is_empty() => Some(BotFilterBypass { name, value }),
            _ => None,
        };

        let connect_timeout = match lookup("CRISTIN_CONNECT_TIMEOUT_SECS") {
            Some(secs) => secs.parse().map_err(|_| {
                Error::Config(format!("Invalid CRISTIN_CONNECT_TIMEOUT_SECS: {}", secs))
            })?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        Ok(Self {
            domain_name: lookup("DOMAIN_NAME").unwrap_or_else(|| DEFAULT_DOMAIN_NAME.to_string()),
            base_path: lookup("BASE_PATH").unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
            cristin_api_url,
            allowed_origin: lookup("ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string()),
            bot_filter_bypass,
            connect_timeout: Duration::from_secs(connect_timeout),
        })
    }

    /// Root of every NVA facing URI: `https://{domain}/{base_path}`.
    pub fn nva_base(&self) -> Result<Url> {
        let mut uri = Url::parse(&format!("https://{}", self.domain_name))
            .map_err(|e| Error::Config(format!("Invalid DOMAIN_NAME: {}", e)))?;
        let base_path = self.base_path.trim_matches('/');
        if !base_path.is_empty() {
            uri = crate::uri::with_path_segments(&uri, base_path.split('/'));
        }
        Ok(uri)
    }
}
