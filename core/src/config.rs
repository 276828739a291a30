//! Client configuration and credential lookup.

use serde::Deserialize;

use crate::error::ApiError;
use crate::options::{CallOptions, HttpOptions, DEFAULT_API, DEFAULT_VERSION};

const ENV_API_KEY: &str = "RAGNABOT_API_KEY";
const ENV_API_URL: &str = "RAGNABOT_API_URL";
const ENV_API_VERSION: &str = "RAGNABOT_API_VERSION";

/// Supplies the API key for authenticated calls.
///
/// Returning `None` makes an authenticated dispatch fail with
/// [`ApiError::Configuration`] before any network I/O.
pub trait CredentialProvider {
    fn api_key(&self) -> Option<String>;
}

impl<F> CredentialProvider for F
where
    F: Fn() -> Option<String>,
{
    fn api_key(&self) -> Option<String> {
        self()
    }
}

/// Settings the bot hands to the client once at startup.
///
/// Deserializable so a host can nest it inside its own configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_version: Option<u32>,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn with_api_version(mut self, version: u32) -> Self {
        self.api_version = Some(version);
        self
    }

    /// Read `RAGNABOT_API_KEY`, `RAGNABOT_API_URL` and `RAGNABOT_API_VERSION`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let api_version = match lookup(ENV_API_VERSION) {
            Some(raw) => Some(raw.trim().parse::<u32>().map_err(|e| {
                ApiError::Configuration(format!("{ENV_API_VERSION}={raw:?} is not a version: {e}"))
            })?),
            None => None,
        };
        Ok(Self {
            api_key: lookup(ENV_API_KEY).filter(|key| !key.is_empty()),
            api_url: lookup(ENV_API_URL).filter(|url| !url.is_empty()),
            api_version,
        })
    }

    /// Base options for every call made with this configuration.
    pub fn call_options(&self) -> CallOptions {
        let api = self.api_url.as_deref().unwrap_or(DEFAULT_API);
        CallOptions {
            http: HttpOptions {
                version: self.api_version.unwrap_or(DEFAULT_VERSION),
                api: api.trim_end_matches('/').to_string(),
            },
            ..CallOptions::default()
        }
    }
}

impl CredentialProvider for ClientConfig {
    fn api_key(&self) -> Option<String> {
        self.api_key.clone().filter(|key| !key.is_empty())
    }
}
